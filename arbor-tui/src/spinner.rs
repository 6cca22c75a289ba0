//! Spinner shown while data is being collected.
//!
//! Based on the snake spinner pattern - a bouncing gradient bar.

use std::time::Duration;

use arbor::Rgb;

use crate::buffer::Buffer;
use crate::rect::Rect;

/// Configuration for the spinner.
#[derive(Clone, Debug)]
pub struct Spinner {
    /// Width of the track in characters.
    track_width: u16,
    /// Length of the snake/bar.
    snake_len: u16,
    /// Pause frames at right end.
    right_pause: usize,
    /// Pause frames at left end.
    left_pause: usize,
    /// Frame duration in milliseconds.
    frame_ms: u64,
    color: Rgb,
}

impl Default for Spinner {
    fn default() -> Self {
        Self {
            track_width: 8,
            snake_len: 6,
            right_pause: 1,
            left_pause: 20,
            frame_ms: 60,
            color: Rgb::new(255, 153, 51),
        }
    }
}

impl Spinner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track_width(mut self, width: u16) -> Self {
        self.track_width = width;
        self
    }

    pub fn snake_len(mut self, len: u16) -> Self {
        self.snake_len = len.max(2);
        self
    }

    pub fn frame_ms(mut self, ms: u64) -> Self {
        self.frame_ms = ms.max(1);
        self
    }

    pub fn color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub fn width(&self) -> u16 {
        self.track_width
    }

    fn sweep_len(&self) -> usize {
        (self.track_width + self.snake_len - 1) as usize
    }

    /// Number of frames in one full cycle.
    pub fn frame_count(&self) -> usize {
        2 * self.sweep_len() + self.right_pause + self.left_pause
    }

    /// Cells of the frame shown after `elapsed`.
    pub fn frame(&self, elapsed: Duration) -> Vec<(char, Rgb)> {
        let index = (elapsed.as_millis() / self.frame_ms as u128) as usize % self.frame_count();
        let sweep = self.sweep_len();

        if index < sweep {
            self.snake_frame(index as i32, true)
        } else if index < sweep + self.right_pause {
            self.empty_frame()
        } else if index < 2 * sweep + self.right_pause {
            let head = (2 * sweep + self.right_pause - 1 - index) as i32;
            self.snake_frame(head, false)
        } else {
            self.empty_frame()
        }
    }

    /// Draw the frame shown after `elapsed` at the left edge of `area`.
    pub fn render(&self, elapsed: Duration, buffer: &mut Buffer, area: Rect) {
        for (i, (ch, fg)) in self.frame(elapsed).into_iter().enumerate() {
            let x = area.x.saturating_add(i as u16);
            if x < area.right() {
                buffer.put_char(x, area.y, ch, fg);
            }
        }
    }

    fn track_color(&self) -> Rgb {
        self.color.lerp(Rgb::BLACK, 0.5)
    }

    fn empty_frame(&self) -> Vec<(char, Rgb)> {
        vec![('⬝', self.track_color()); self.track_width as usize]
    }

    fn snake_frame(&self, head_pos: i32, moving_right: bool) -> Vec<(char, Rgb)> {
        let snake_len = self.snake_len as i32;
        let snake_start = head_pos - snake_len + 1;

        (0..self.track_width as i32)
            .map(|i| {
                if i < snake_start || i > head_pos {
                    return ('⬝', self.track_color());
                }
                let snake_idx = i - snake_start;
                let t = snake_idx as f64 / (snake_len - 1) as f64;
                let t = if moving_right { t } else { 1.0 - t };
                // Tail is dim, head is bright
                ('■', self.color.lerp(Rgb::BLACK, 0.4 * (1.0 - t)))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames_have_track_width() {
        let spinner = Spinner::new();
        for i in 0..spinner.frame_count() as u64 {
            let frame = spinner.frame(Duration::from_millis(i * 60));
            assert_eq!(frame.len(), 8);
        }
    }

    #[test]
    fn test_first_frame_shows_head_only() {
        let spinner = Spinner::new();
        let frame = spinner.frame(Duration::ZERO);
        assert_eq!(frame[0].0, '■');
        assert!(frame[1..].iter().all(|(c, _)| *c == '⬝'));
    }

    #[test]
    fn test_cycle_wraps() {
        let spinner = Spinner::new();
        let cycle = Duration::from_millis(60 * spinner.frame_count() as u64);
        assert_eq!(spinner.frame(Duration::ZERO), spinner.frame(cycle));
    }
}
