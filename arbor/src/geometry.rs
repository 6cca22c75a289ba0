//! Screen-space geometry.
//!
//! `x` is the horizontal axis (depth grows to the right) and `y` the vertical
//! axis (siblings are spread top to bottom).

/// A point on the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Cubic Bézier connector between a child and its parent.
///
/// Both control points sit halfway along the horizontal axis, so the curve
/// leaves each endpoint horizontally and bends in the middle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Diagonal {
    pub start: Point,
    pub control1: Point,
    pub control2: Point,
    pub end: Point,
}

impl Diagonal {
    pub fn new(start: Point, end: Point) -> Self {
        let mid_x = (start.x + end.x) / 2.0;
        Self {
            start,
            control1: Point::new(mid_x, start.y),
            control2: Point::new(mid_x, end.y),
            end,
        }
    }

    /// Point on the curve at parameter `t` in `[0, 1]`.
    pub fn sample(&self, t: f64) -> Point {
        let t = t.clamp(0.0, 1.0);
        let u = 1.0 - t;
        let a = u * u * u;
        let b = 3.0 * u * u * t;
        let c = 3.0 * u * t * t;
        let d = t * t * t;
        Point::new(
            a * self.start.x + b * self.control1.x + c * self.control2.x + d * self.end.x,
            a * self.start.y + b * self.control1.y + c * self.control2.y + d * self.end.y,
        )
    }

    /// Approximate arc length from `segments` straight chords.
    pub fn length(&self, segments: usize) -> f64 {
        let segments = segments.max(1);
        let mut total = 0.0;
        let mut prev = self.start;
        for i in 1..=segments {
            let p = self.sample(i as f64 / segments as f64);
            total += prev.distance(p);
            prev = p;
        }
        total
    }

    /// SVG path data, `M sx sy C c1x c1y, c2x c2y, ex ey`.
    pub fn to_svg_path(&self) -> String {
        format!(
            "M {} {} C {} {}, {} {}, {} {}",
            self.start.x,
            self.start.y,
            self.control1.x,
            self.control1.y,
            self.control2.x,
            self.control2.y,
            self.end.x,
            self.end.y
        )
    }
}
