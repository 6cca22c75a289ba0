use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::geometry::Point;
use crate::transitions::{Easing, TransitionConfig};
use crate::types::Rgb;

/// A value that can be interpolated between two endpoints.
pub trait Interpolate: Clone + PartialEq {
    fn interpolate(&self, other: &Self, t: f64) -> Self;
}

impl Interpolate for f64 {
    fn interpolate(&self, other: &Self, t: f64) -> Self {
        self + (other - self) * t
    }
}

impl Interpolate for Point {
    fn interpolate(&self, other: &Self, t: f64) -> Self {
        Point::new(
            self.x.interpolate(&other.x, t),
            self.y.interpolate(&other.y, t),
        )
    }
}

impl Interpolate for Rgb {
    fn interpolate(&self, other: &Self, t: f64) -> Self {
        self.lerp(*other, t)
    }
}

/// Source of the current instant for animations.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock driven by hand. Clones share the same instant.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// A single retargetable transition of one property.
#[derive(Debug, Clone)]
pub struct Tween<T: Interpolate> {
    from: T,
    to: T,
    start: Instant,
    duration: Duration,
    easing: Easing,
}

impl<T: Interpolate> Tween<T> {
    /// A tween already resting at `value`.
    pub fn settled(value: T, now: Instant) -> Self {
        Self {
            from: value.clone(),
            to: value,
            start: now,
            duration: Duration::ZERO,
            easing: Easing::Linear,
        }
    }

    /// A tween from `from` to `to` starting at `now`.
    pub fn new(from: T, to: T, now: Instant, config: TransitionConfig) -> Self {
        Self {
            from,
            to,
            start: now,
            duration: config.duration,
            easing: config.easing,
        }
    }

    /// Point the tween at a new target. The new transition starts from the
    /// value interpolated at `now`, so an in-flight animation never jumps.
    /// A settled tween asked to stay where it is does nothing.
    pub fn retarget(&mut self, to: T, now: Instant, config: TransitionConfig) {
        if self.to == to && self.is_finished(now) {
            return;
        }
        self.from = self.value_at(now);
        self.to = to;
        self.start = now;
        self.duration = config.duration;
        self.easing = config.easing;
    }

    /// Jump straight to `value` with no transition.
    pub fn set(&mut self, value: T, now: Instant) {
        *self = Self::settled(value, now);
    }

    pub fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn value_at(&self, now: Instant) -> T {
        let progress = self.progress(now);
        if progress >= 1.0 {
            return self.to.clone();
        }
        self.from.interpolate(&self.to, self.easing.apply(progress))
    }

    pub fn target(&self) -> &T {
        &self.to
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }
}
