//! Screen layout, input dispatch and the event loop.

use std::io;
use std::time::Duration;

use arbor::{Clock, Frame, Surface};
use log::{debug, info};
use tokio::runtime::Handle;

use crate::buffer::{Buffer, Cell};
use crate::canvas::Canvas;
use crate::config::AppConfig;
use crate::controller::{Controller, LoadState, SURFACE_ID, Status};
use crate::event::{Event, Key, MouseButton};
use crate::rect::Rect;
use crate::spinner::Spinner;
use crate::terminal::Terminal;
use crate::text::{display_width, truncate_to_width};

/// Poll interval while nothing is moving, so fetch results still arrive.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Where everything sits on screen for a given terminal size.
#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    pub button: Rect,
    pub spinner: Rect,
    pub status: Rect,
    pub canvas: Canvas,
}

impl Screen {
    pub fn new(width: u16, height: u16, label: &str, config: &AppConfig) -> Self {
        let (bar, rest) = Rect::from_size(width, height).split_top(1);
        let label_width = display_width(label) as u16;
        let button = Rect::new(bar.x + 1, bar.y, label_width.min(bar.width.saturating_sub(1)), 1);
        let spinner = Rect::new(button.right() + 1, bar.y, 8, 1);
        let status_x = spinner.right() + 1;
        let status = Rect::new(status_x, bar.y, bar.right().saturating_sub(status_x), 1);
        Self {
            button,
            spinner,
            status,
            canvas: Canvas::new(rest, config.surface.clone()),
        }
    }
}

pub fn button_label(state: LoadState) -> &'static str {
    match state {
        LoadState::Idle => "[ Analyze ]",
        LoadState::Loading => "[ Collecting Data... ]",
        LoadState::Done => "[ Reset ]",
    }
}

pub struct App<C: Clock + Clone + 'static> {
    config: AppConfig,
    controller: Controller<C>,
    clock: C,
    spinner: Spinner,
    size: (u16, u16),
    root_hovered: bool,
    quit: bool,
}

impl<C: Clock + Clone + 'static> App<C> {
    pub fn new(config: AppConfig, size: (u16, u16), clock: C, runtime: Handle) -> Self {
        let screen = Screen::new(size.0, size.1, button_label(LoadState::Idle), &config);
        let (width, height) = screen.canvas.surface_size();
        let controller = Controller::new(
            config.resource.clone(),
            config.renderer.clone(),
            Surface::new(SURFACE_ID, width, height),
            clock.clone(),
            runtime,
        );
        let spinner = Spinner::new().color(config.theme.accent);
        Self {
            config,
            controller,
            clock,
            spinner,
            size,
            root_hovered: false,
            quit: false,
        }
    }

    pub fn controller(&self) -> &Controller<C> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut Controller<C> {
        &mut self.controller
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn screen(&self) -> Screen {
        Screen::new(
            self.size.0,
            self.size.1,
            button_label(self.controller.state()),
            &self.config,
        )
    }

    fn frame(&self) -> Frame {
        self.controller
            .renderer()
            .map(|r| r.frame())
            .unwrap_or_default()
    }

    /// React to one input event.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key { key, modifiers } => match key {
                Key::Escape => self.quit = true,
                Key::Char('c') if modifiers.ctrl => self.quit = true,
                Key::Char('q') => self.quit = true,
                Key::Char('a') => {
                    self.controller.analyze();
                }
                Key::Char('r') => self.controller.reset(),
                Key::Enter => self.controller.press_primary(),
                _ => {}
            },
            Event::Click {
                x,
                y,
                button: MouseButton::Left,
            } => self.click(x, y),
            Event::Click { .. } => {}
            Event::MouseMove { x, y } => self.hover(x, y),
            Event::Resize { width, height } => {
                self.size = (width, height);
                let (width, height) = self.screen().canvas.surface_size();
                self.controller.resize(width, height);
            }
        }
        self.sync();
    }

    fn click(&mut self, x: u16, y: u16) {
        let screen = self.screen();
        if screen.button.contains(x, y) {
            self.controller.press_primary();
            return;
        }
        let frame = self.frame();
        if let Some(id) = screen.canvas.hit_node(&frame, x, y) {
            let activation = self.controller.activate(id);
            debug!("Click on {id}: {activation:?}");
        }
    }

    fn hover(&mut self, x: u16, y: u16) {
        let screen = self.screen();
        let frame = self.frame();
        let Some(renderer) = self.controller.renderer_mut() else { return };
        let over_root = screen
            .canvas
            .hit_node(&frame, x, y)
            .is_some_and(|id| Some(id) == renderer.root_id());

        if over_root && !self.root_hovered {
            renderer.on_root_hover_enter();
        } else if !over_root && self.root_hovered {
            renderer.on_root_hover_leave();
        }
        self.root_hovered = over_root;
    }

    /// Apply pending fetch results and back requests.
    pub fn sync(&mut self) -> bool {
        let changed = self.controller.drain();
        if self.controller.renderer().is_none() {
            self.root_hovered = false;
        }
        changed
    }

    /// Advance animations. Returns true while the screen keeps changing.
    pub fn tick(&mut self) -> bool {
        let animating = self
            .controller
            .renderer_mut()
            .is_some_and(|r| r.advance());
        animating || self.controller.state() == LoadState::Loading
    }

    pub fn paint(&self, buffer: &mut Buffer) {
        let theme = &self.config.theme;
        buffer.fill(buffer.area(), theme.background);

        let screen = self.screen();
        let label = button_label(self.controller.state());
        for (i, ch) in label.chars().enumerate() {
            let x = screen.button.x + i as u16;
            if x < screen.button.right() {
                buffer.set(
                    x,
                    screen.button.y,
                    Cell::new(ch)
                        .with_fg(theme.accent)
                        .with_bg(theme.background)
                        .bold(),
                );
            }
        }

        if let Some(since) = self.controller.loading_since() {
            let elapsed = self.clock.now().saturating_duration_since(since);
            self.spinner.render(elapsed, buffer, screen.spinner);
        }

        if let Some(status) = self.controller.status() {
            let fg = match status {
                Status::Info(_) => theme.text,
                Status::Error(_) => theme.error,
            };
            let text = truncate_to_width(status.text(), screen.status.width as usize);
            buffer.put_str(screen.status.x as i32, screen.status.y, &text, fg, screen.status);
        }

        screen.canvas.draw(&self.frame(), theme, buffer);
    }

    /// Run until the user quits.
    pub fn run(&mut self, terminal: &mut Terminal) -> io::Result<()> {
        info!("Starting event loop ({}x{})", self.size.0, self.size.1);
        let tick = Duration::from_millis(self.config.tick_ms.max(1));
        loop {
            self.sync();
            let busy = self.tick();
            terminal.draw(|buffer| self.paint(buffer))?;
            if self.quit {
                break;
            }

            let timeout = if busy { tick } else { IDLE_POLL };
            for raw in terminal.poll(Some(timeout))? {
                if let Some(event) = Event::from_crossterm(raw) {
                    self.handle_event(event);
                }
            }
        }
        info!("Event loop finished");
        Ok(())
    }
}
