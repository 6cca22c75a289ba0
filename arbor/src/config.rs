use std::time::Duration;

use serde::Deserialize;

use crate::geometry::Point;
use crate::transitions::{Easing, TransitionConfig};
use crate::types::Rgb;

/// The rectangle a renderer draws into. Owned by whoever mounts the
/// renderer; the renderer never creates or destroys it.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    pub id: String,
    pub width: f64,
    pub height: f64,
}

impl Surface {
    pub fn new(id: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            width,
            height,
        }
    }

    /// Where the root sits before the first layout: horizontal origin,
    /// vertical center.
    pub fn anchor(&self) -> Point {
        Point::new(0.0, self.height / 2.0)
    }
}

/// Tunables of the tree renderer.
///
/// Deserializes from any serde format with every field optional.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Length of node and link transitions, in milliseconds.
    pub duration_ms: u64,
    pub easing: Easing,
    /// Horizontal distance between depths.
    pub depth_spacing: f64,
    pub node_radius: f64,
    /// Distance between a node's center and its label.
    pub label_offset: f64,
    /// Fill of nodes with hidden children.
    pub collapsed_fill: Rgb,
    /// Fill of every other node.
    pub expanded_fill: Rgb,
    pub hint_text: String,
    /// Hint position relative to the surface origin.
    pub hint_x: f64,
    pub hint_y: f64,
    pub hint_fade_in_ms: u64,
    pub hint_fade_out_ms: u64,
    /// When set, every transition completes immediately.
    pub reduced_motion: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            duration_ms: 750,
            easing: Easing::CubicInOut,
            depth_spacing: 180.0,
            node_radius: 10.0,
            label_offset: 13.0,
            collapsed_fill: Rgb::LIGHT_STEEL_BLUE,
            expanded_fill: Rgb::WHITE,
            hint_text: "Click to Return".to_string(),
            hint_x: -50.0,
            hint_y: 150.0,
            hint_fade_in_ms: 350,
            hint_fade_out_ms: 450,
            reduced_motion: false,
        }
    }
}

impl RendererConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration_ms = duration.as_millis() as u64;
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn depth_spacing(mut self, spacing: f64) -> Self {
        self.depth_spacing = spacing;
        self
    }

    pub fn reduced_motion(mut self, enabled: bool) -> Self {
        self.reduced_motion = enabled;
        self
    }

    /// Transition used for node and link movement.
    pub fn transition(&self) -> TransitionConfig {
        self.timed(self.duration_ms)
    }

    pub fn hint_fade_in(&self) -> TransitionConfig {
        self.timed(self.hint_fade_in_ms)
    }

    pub fn hint_fade_out(&self) -> TransitionConfig {
        self.timed(self.hint_fade_out_ms)
    }

    pub fn hint_position(&self) -> Point {
        Point::new(self.hint_x, self.hint_y)
    }

    fn timed(&self, ms: u64) -> TransitionConfig {
        if self.reduced_motion {
            TransitionConfig::instant()
        } else {
            TransitionConfig::new(Duration::from_millis(ms), self.easing)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders_feed_transitions() {
        let config = RendererConfig::new()
            .duration(Duration::from_millis(200))
            .easing(Easing::Linear)
            .depth_spacing(120.0);
        assert_eq!(
            config.transition(),
            TransitionConfig::new(Duration::from_millis(200), Easing::Linear)
        );
        assert_eq!(config.depth_spacing, 120.0);
        assert_eq!(config.hint_fade_in().duration, Duration::from_millis(350));
        assert_eq!(config.hint_fade_out().duration, Duration::from_millis(450));
    }

    #[test]
    fn test_reduced_motion_is_instant() {
        let config = RendererConfig::default().reduced_motion(true);
        assert_eq!(config.transition(), TransitionConfig::instant());
        assert_eq!(config.hint_fade_in(), TransitionConfig::instant());
    }

    #[test]
    fn test_anchor_is_vertical_center() {
        assert_eq!(Surface::new("vis_1", 780.0, 450.0).anchor(), Point::new(0.0, 225.0));
    }
}
