use std::time::Duration;

use arbor::{Clock, Easing, ManualClock, Point, Rgb, TransitionConfig, Tween};

// =============================================================================
// Easing Function Tests
// =============================================================================

#[test]
fn test_easing_cubic_in_out() {
    // CubicInOut: 4t^3 below the midpoint, mirrored above it
    assert_eq!(Easing::CubicInOut.apply(0.0), 0.0);
    assert_eq!(Easing::CubicInOut.apply(0.5), 0.5);
    assert_eq!(Easing::CubicInOut.apply(1.0), 1.0);
    assert_eq!(Easing::CubicInOut.apply(0.25), 0.0625);
    assert!((Easing::CubicInOut.apply(0.75) - 0.9375).abs() < 1e-12);
}

#[test]
fn test_easing_boundaries() {
    for easing in [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
        Easing::CubicInOut,
    ] {
        assert_eq!(easing.apply(0.0), 0.0, "{easing:?} at 0");
        assert_eq!(easing.apply(1.0), 1.0, "{easing:?} at 1");
    }
}

#[test]
fn test_easing_clamps_out_of_range() {
    assert_eq!(Easing::CubicInOut.apply(-1.0), 0.0);
    assert_eq!(Easing::CubicInOut.apply(2.0), 1.0);
}

#[test]
fn test_easing_default_is_cubic() {
    assert_eq!(Easing::default(), Easing::CubicInOut);
}

// =============================================================================
// Tween Tests
// =============================================================================

#[test]
fn test_tween_reaches_target() {
    let clock = ManualClock::new();
    let config = TransitionConfig::new(Duration::from_millis(750), Easing::CubicInOut);
    let tween = Tween::new(Point::new(0.0, 0.0), Point::new(180.0, 90.0), clock.now(), config);

    assert_eq!(tween.value_at(clock.now()), Point::new(0.0, 0.0));
    clock.advance(Duration::from_millis(375));
    assert_eq!(tween.value_at(clock.now()), Point::new(90.0, 45.0));
    assert!(!tween.is_finished(clock.now()));
    clock.advance(Duration::from_millis(375));
    assert_eq!(tween.value_at(clock.now()), Point::new(180.0, 90.0));
    assert!(tween.is_finished(clock.now()));
}

#[test]
fn test_tween_last_retarget_wins() {
    let clock = ManualClock::new();
    let config = TransitionConfig::new(Duration::from_millis(100), Easing::Linear);
    let mut tween = Tween::new(0.0, 10.0, clock.now(), config);
    clock.advance(Duration::from_millis(20));
    tween.retarget(20.0, clock.now(), config);
    tween.retarget(-5.0, clock.now(), config);
    assert_eq!(*tween.target(), -5.0);
    clock.advance(Duration::from_millis(100));
    assert_eq!(tween.value_at(clock.now()), -5.0);
}

#[test]
fn test_settled_tween_ignores_same_target() {
    let clock = ManualClock::new();
    let config = TransitionConfig::new(Duration::from_millis(100), Easing::Linear);
    let mut tween = Tween::settled(3.0, clock.now());
    tween.retarget(3.0, clock.now(), config);
    assert!(tween.is_finished(clock.now()));
}

#[test]
fn test_color_tween_endpoints() {
    let clock = ManualClock::new();
    let config = TransitionConfig::new(Duration::from_millis(100), Easing::Linear);
    let tween = Tween::new(Rgb::LIGHT_STEEL_BLUE, Rgb::WHITE, clock.now(), config);
    assert_eq!(tween.value_at(clock.now()), Rgb::LIGHT_STEEL_BLUE);
    clock.advance(Duration::from_millis(100));
    assert_eq!(tween.value_at(clock.now()), Rgb::WHITE);
}
