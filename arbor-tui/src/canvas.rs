//! Rasterizes renderer frames onto terminal cells.

use arbor::{Frame, LabelAnchor, NodeFrame, NodeId, Point, Rgb};

use crate::buffer::{Buffer, Cell};
use crate::config::{SurfaceConfig, ThemeConfig};
use crate::rect::Rect;
use crate::text::display_width;

/// Below this radius a node is drawn as a dot.
const SMALL_RADIUS: f64 = 4.0;

/// A bordered drawing area and its mapping from surface units to cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    outer: Rect,
    inner: Rect,
    metrics: SurfaceConfig,
}

impl Canvas {
    pub fn new(outer: Rect, metrics: SurfaceConfig) -> Self {
        Self {
            outer,
            inner: outer.shrink(1, 1, 1, 1),
            metrics,
        }
    }

    pub fn area(&self) -> Rect {
        self.inner
    }

    /// Logical surface size, margins excluded.
    pub fn surface_size(&self) -> (f64, f64) {
        let m = &self.metrics;
        let width = self.inner.width as f64 * m.cell_width - m.margin_left - m.margin_right;
        let height = self.inner.height as f64 * m.cell_height - m.margin_top - m.margin_bottom;
        (width.max(0.0), height.max(0.0))
    }

    /// Cell covering `point`, if it lies inside the canvas.
    pub fn to_cell(&self, point: Point) -> Option<(u16, u16)> {
        let (col, row) = self.to_cell_unclipped(point);
        let inside = col >= self.inner.x as i32
            && col < self.inner.right() as i32
            && row >= self.inner.y as i32
            && row < self.inner.bottom() as i32;
        inside.then_some((col as u16, row as u16))
    }

    fn to_cell_unclipped(&self, point: Point) -> (i32, i32) {
        let m = &self.metrics;
        let col = ((point.x + m.margin_left) / m.cell_width).floor() as i32;
        let row = ((point.y + m.margin_top) / m.cell_height).floor() as i32;
        (self.inner.x as i32 + col, self.inner.y as i32 + row)
    }

    /// Surface point at the center of a cell.
    pub fn to_surface(&self, col: u16, row: u16) -> Option<Point> {
        if !self.inner.contains(col, row) {
            return None;
        }
        let m = &self.metrics;
        let x = (col - self.inner.x) as f64 + 0.5;
        let y = (row - self.inner.y) as f64 + 0.5;
        Some(Point::new(
            x * m.cell_width - m.margin_left,
            y * m.cell_height - m.margin_top,
        ))
    }

    /// The live node nearest to the cell, if the cell falls within its
    /// radius. Cells are coarse, so any node inside the cell counts.
    pub fn hit_node(&self, frame: &Frame, col: u16, row: u16) -> Option<NodeId> {
        let point = self.to_surface(col, row)?;
        let slack = self.metrics.cell_width.hypot(self.metrics.cell_height) / 2.0;
        frame
            .nodes
            .iter()
            .filter(|n| !n.exiting)
            .map(|n| (n, n.center.distance(point)))
            .filter(|(n, d)| *d <= n.radius.max(slack))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(n, _)| n.id)
    }

    /// Draw the border, links, nodes, labels and hint of `frame`.
    pub fn draw(&self, frame: &Frame, theme: &ThemeConfig, buffer: &mut Buffer) {
        buffer.fill(self.outer, theme.background);
        buffer.draw_border(self.outer, theme.border);

        for link in &frame.links {
            let cell = self.metrics.cell_width.min(self.metrics.cell_height);
            let steps = (link.path.length(16) / cell).ceil().max(1.0) as usize * 2;
            for i in 0..=steps {
                let point = link.path.sample(i as f64 / steps as f64);
                if let Some((x, y)) = self.to_cell(point) {
                    buffer.put_char(x, y, '·', theme.link);
                }
            }
        }

        for node in &frame.nodes {
            self.draw_node(node, theme, buffer);
        }

        if let Some(hint) = &frame.hint {
            let (col, row) = self.to_cell_unclipped(hint.position);
            if row >= 0 && row <= u16::MAX as i32 {
                let fg = theme.background.lerp(theme.text, hint.opacity);
                buffer.put_str(col, row as u16, &hint.text, fg, self.inner);
            }
        }
    }

    fn draw_node(&self, node: &NodeFrame, theme: &ThemeConfig, buffer: &mut Buffer) {
        if node.radius <= 0.5 {
            return;
        }
        let Some((x, y)) = self.to_cell(node.center) else { return };

        let glyph = if node.radius < SMALL_RADIUS {
            '•'
        } else if is_light(node.fill) && node.fill != Rgb::WHITE {
            '●'
        } else {
            '○'
        };
        let fg = if glyph == '○' { theme.node_stroke } else { node.fill };
        buffer.set(x, y, Cell::new(glyph).with_fg(fg).with_bg(theme.background));

        if node.label_opacity <= 0.0 {
            return;
        }
        let fg = theme.background.lerp(theme.text, node.label_opacity);
        let offset = (node.label_dx.abs() / self.metrics.cell_width).round().max(1.0) as i32;
        let start = match node.anchor {
            LabelAnchor::End => x as i32 - offset - display_width(&node.label) as i32 + 1,
            LabelAnchor::Start => x as i32 + offset,
        };
        buffer.put_str(start, y, &node.label, fg, self.inner);
    }
}

fn is_light(color: Rgb) -> bool {
    color.r as u16 + color.g as u16 + color.b as u16 > 3 * 128
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> Canvas {
        Canvas::new(Rect::new(0, 2, 40, 20), SurfaceConfig::default())
    }

    #[test]
    fn test_surface_size_excludes_margins() {
        // 38 x 18 inner cells
        assert_eq!(canvas().surface_size(), (38.0 * 8.0 - 180.0, 18.0 * 16.0 - 50.0));
    }

    #[test]
    fn test_origin_maps_past_margins() {
        let canvas = canvas();
        // inner starts at (1, 3); left margin is 90 / 8 = 11.25 cells
        assert_eq!(canvas.to_cell(Point::new(0.0, 0.0)), Some((12, 4)));
        assert_eq!(canvas.to_cell(Point::new(-200.0, 0.0)), None);
    }

    #[test]
    fn test_to_surface_round_trips_through_cell() {
        let canvas = canvas();
        let point = canvas.to_surface(20, 10).unwrap();
        assert_eq!(canvas.to_cell(point), Some((20, 10)));
        assert_eq!(canvas.to_surface(0, 0), None);
    }
}
