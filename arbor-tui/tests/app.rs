use std::path::PathBuf;
use std::time::Duration;

use arbor::ManualClock;
use arbor_tui::buffer::Buffer;
use arbor_tui::event::{Event, Key, Modifiers, MouseButton};
use arbor_tui::{App, AppConfig, LoadState};
use tokio::runtime::Handle;

const SIZE: (u16, u16) = (100, 40);

fn config() -> AppConfig {
    let mut config = AppConfig::default();
    config.resource = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("data")
        .join("items.json")
        .to_string_lossy()
        .into_owned();
    config
}

fn key(c: char) -> Event {
    Event::Key {
        key: Key::Char(c),
        modifiers: Modifiers::default(),
    }
}

fn paint(app: &App<ManualClock>) -> Vec<String> {
    let mut buffer = Buffer::new(SIZE.0, SIZE.1);
    app.paint(&mut buffer);
    buffer.lines()
}

fn contains(lines: &[String], needle: &str) -> bool {
    lines.iter().any(|l| l.contains(needle))
}

async fn loaded() -> (App<ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    let mut app = App::new(config(), SIZE, clock.clone(), Handle::current());
    app.handle_event(key('a'));
    app.controller_mut().next_message().await;
    clock.advance(Duration::from_millis(750));
    app.tick();
    (app, clock)
}

// =============================================================================
// Buttons
// =============================================================================

#[tokio::test]
async fn test_idle_screen_offers_analyze() {
    let app = App::new(config(), SIZE, ManualClock::new(), Handle::current());
    let lines = paint(&app);
    assert!(lines[0].contains("[ Analyze ]"));
    // bordered canvas below the bar
    assert!(lines[1].starts_with('┌'));
    assert!(lines[SIZE.1 as usize - 1].starts_with('└'));
}

#[tokio::test]
async fn test_loading_shows_spinner_and_label() {
    let mut app = App::new(config(), SIZE, ManualClock::new(), Handle::current());
    app.handle_event(key('a'));
    assert_eq!(app.controller().state(), LoadState::Loading);
    assert!(app.tick());

    let lines = paint(&app);
    assert!(lines[0].contains("[ Collecting Data... ]"));
    assert!(lines[0].contains('■'));
}

#[tokio::test]
async fn test_loaded_tree_is_drawn() {
    let (app, _) = loaded().await;
    let lines = paint(&app);
    assert!(lines[0].contains("[ Reset ]"));
    for label in ["Markets", "Texas", "Colorado", "Georgia", "Unassigned"] {
        assert!(contains(&lines, label), "{label} missing");
    }
    assert!(!contains(&lines, "Dallas"));
}

#[tokio::test]
async fn test_click_on_reset_button_clears() {
    let (mut app, _) = loaded().await;
    let button = app.screen().button;
    app.handle_event(Event::Click {
        x: button.x,
        y: button.y,
        button: MouseButton::Left,
    });
    assert_eq!(app.controller().state(), LoadState::Idle);
    assert!(!contains(&paint(&app), "Markets"));
}

// =============================================================================
// Canvas interaction
// =============================================================================

#[tokio::test]
async fn test_click_on_node_expands_it() {
    let (mut app, clock) = loaded().await;
    let renderer = app.controller().renderer().unwrap();
    let texas = renderer.find("Texas").unwrap();
    let center = renderer.frame().node(texas).unwrap().center;
    let (x, y) = app.screen().canvas.to_cell(center).unwrap();

    app.handle_event(Event::Click {
        x,
        y,
        button: MouseButton::Left,
    });
    clock.advance(Duration::from_millis(750));
    app.tick();

    assert!(contains(&paint(&app), "Dallas"));
}

#[tokio::test]
async fn test_hovering_root_shows_hint() {
    let (mut app, clock) = loaded().await;
    let renderer = app.controller().renderer().unwrap();
    let root = renderer.root_id().unwrap();
    let center = renderer.frame().node(root).unwrap().center;
    let (x, y) = app.screen().canvas.to_cell(center).unwrap();

    app.handle_event(Event::MouseMove { x, y });
    clock.advance(Duration::from_millis(350));
    assert!(contains(&paint(&app), "Click to Return"));

    app.handle_event(Event::MouseMove { x: 0, y: 0 });
    clock.advance(Duration::from_millis(450));
    assert!(!contains(&paint(&app), "Click to Return"));
}

#[tokio::test]
async fn test_click_on_root_returns_to_start() {
    let (mut app, _) = loaded().await;
    let renderer = app.controller().renderer().unwrap();
    let root = renderer.root_id().unwrap();
    let center = renderer.frame().node(root).unwrap().center;
    let (x, y) = app.screen().canvas.to_cell(center).unwrap();

    app.handle_event(Event::Click {
        x,
        y,
        button: MouseButton::Left,
    });
    assert_eq!(app.controller().state(), LoadState::Idle);
    let lines = paint(&app);
    assert!(lines[0].contains("[ Analyze ]"));
    assert!(lines[0].contains("Returned to start"));
}

// =============================================================================
// Keys
// =============================================================================

#[tokio::test]
async fn test_quit_keys() {
    let mut app = App::new(config(), SIZE, ManualClock::new(), Handle::current());
    assert!(!app.should_quit());
    app.handle_event(key('q'));
    assert!(app.should_quit());

    let mut app = App::new(config(), SIZE, ManualClock::new(), Handle::current());
    app.handle_event(Event::Key {
        key: Key::Escape,
        modifiers: Modifiers::default(),
    });
    assert!(app.should_quit());
}

#[tokio::test]
async fn test_reset_key() {
    let (mut app, _) = loaded().await;
    app.handle_event(key('r'));
    assert_eq!(app.controller().state(), LoadState::Idle);
}

#[tokio::test]
async fn test_enter_presses_primary_button() {
    let enter = Event::Key {
        key: Key::Enter,
        modifiers: Modifiers::default(),
    };
    let mut app = App::new(config(), SIZE, ManualClock::new(), Handle::current());
    app.handle_event(enter);
    assert_eq!(app.controller().state(), LoadState::Loading);

    app.controller_mut().next_message().await;
    assert_eq!(app.controller().state(), LoadState::Done);
    app.handle_event(enter);
    assert_eq!(app.controller().state(), LoadState::Idle);
}
