/// A rectangle of terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn from_size(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    pub fn shrink(self, top: u16, right: u16, bottom: u16, left: u16) -> Self {
        Self {
            x: self.x.saturating_add(left),
            y: self.y.saturating_add(top),
            width: self.width.saturating_sub(left.saturating_add(right)),
            height: self.height.saturating_sub(top.saturating_add(bottom)),
        }
    }

    /// Split off the top `height` rows, returning `(top, rest)`.
    pub fn split_top(self, height: u16) -> (Self, Self) {
        let height = height.min(self.height);
        let top = Self::new(self.x, self.y, self.width, height);
        let rest = Self::new(self.x, self.y + height, self.width, self.height - height);
        (top, rest)
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shrink_and_contains() {
        let rect = Rect::from_size(10, 5).shrink(1, 1, 1, 1);
        assert_eq!(rect, Rect::new(1, 1, 8, 3));
        assert!(rect.contains(1, 1));
        assert!(!rect.contains(9, 1));
        assert!(!rect.contains(0, 2));
    }

    #[test]
    fn test_split_top() {
        let (top, rest) = Rect::from_size(10, 5).split_top(2);
        assert_eq!(top, Rect::new(0, 0, 10, 2));
        assert_eq!(rest, Rect::new(0, 2, 10, 3));
        let (_, rest) = Rect::from_size(10, 1).split_top(2);
        assert!(rest.is_empty());
    }
}
