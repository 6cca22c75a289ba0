use arbor::Rgb;

use super::Cell;
use crate::rect::Rect;
use crate::text::char_width;

#[derive(Debug, Clone)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    pub fn new(width: u16, height: u16) -> Self {
        let cells = vec![Cell::default(); (width as usize) * (height as usize)];
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn area(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if x < self.width && y < self.height {
            Some(&self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            Some(&mut self.cells[idx])
        } else {
            None
        }
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            self.cells[idx] = cell;
        }
    }

    /// Replace the character and foreground of a cell, keeping its background.
    pub fn put_char(&mut self, x: u16, y: u16, ch: char, fg: Rgb) {
        if let Some(cell) = self.get_mut(x, y) {
            cell.char = ch;
            cell.fg = fg;
            cell.bold = false;
            cell.wide_continuation = false;
        }
    }

    /// Write `text` starting at `(x, y)`, clipped to `clip`. Wide characters
    /// occupy two cells; one that would straddle the clip edge is dropped.
    /// Returns the number of columns written.
    pub fn put_str(&mut self, x: i32, y: u16, text: &str, fg: Rgb, clip: Rect) -> u16 {
        if y < clip.y || y >= clip.bottom() {
            return 0;
        }
        let mut col = x;
        let mut written = 0;
        for ch in text.chars() {
            let width = char_width(ch).max(1) as i32;
            let fits = col >= clip.x as i32 && col + width <= clip.right() as i32;
            if fits {
                let at = col as u16;
                self.put_char(at, y, ch, fg);
                if width == 2 {
                    self.put_char(at + 1, y, ' ', fg);
                    if let Some(cell) = self.get_mut(at + 1, y) {
                        cell.wide_continuation = true;
                    }
                }
                written += width as u16;
            }
            col += width;
        }
        written
    }

    /// Fill `rect` with blank cells of background `bg`.
    pub fn fill(&mut self, rect: Rect, bg: Rgb) {
        for y in rect.y..rect.bottom().min(self.height) {
            for x in rect.x..rect.right().min(self.width) {
                self.set(x, y, Cell::new(' ').with_bg(bg));
            }
        }
    }

    /// Draw a single-line box along the edge of `rect`.
    pub fn draw_border(&mut self, rect: Rect, fg: Rgb) {
        if rect.width < 2 || rect.height < 2 {
            return;
        }
        let (left, top) = (rect.x, rect.y);
        let (right, bottom) = (rect.right() - 1, rect.bottom() - 1);
        for x in left + 1..right {
            self.put_char(x, top, '─', fg);
            self.put_char(x, bottom, '─', fg);
        }
        for y in top + 1..bottom {
            self.put_char(left, y, '│', fg);
            self.put_char(right, y, '│', fg);
        }
        self.put_char(left, top, '┌', fg);
        self.put_char(right, top, '┐', fg);
        self.put_char(left, bottom, '└', fg);
        self.put_char(right, bottom, '┘', fg);
    }

    fn index(&self, x: u16, y: u16) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    pub fn diff<'a>(&'a self, other: &'a Buffer) -> impl Iterator<Item = (u16, u16, &'a Cell)> {
        self.cells
            .iter()
            .zip(other.cells.iter())
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(move |(i, (cell, _))| {
                let x = (i % self.width as usize) as u16;
                let y = (i / self.width as usize) as u16;
                (x, y, cell)
            })
    }

    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = Cell::default();
        }
    }

    /// Rows as plain strings, for tests and debugging.
    pub fn lines(&self) -> Vec<String> {
        (0..self.height)
            .map(|y| {
                (0..self.width)
                    .filter_map(|x| self.get(x, y))
                    .filter(|c| !c.wide_continuation)
                    .map(|c| c.char)
                    .collect::<String>()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_str_clips() {
        let mut buffer = Buffer::new(6, 1);
        let clip = Rect::new(1, 0, 4, 1);
        let written = buffer.put_str(-1, 0, "abcdefg", Rgb::WHITE, clip);
        assert_eq!(written, 4);
        assert_eq!(buffer.lines(), vec![" cdef ".to_string()]);
    }

    #[test]
    fn test_wide_char_marks_continuation() {
        let mut buffer = Buffer::new(4, 1);
        buffer.put_str(0, 0, "日x", Rgb::WHITE, buffer.area());
        assert!(buffer.get(1, 0).is_some_and(|c| c.wide_continuation));
        assert_eq!(buffer.lines(), vec!["日x ".to_string()]);
    }

    #[test]
    fn test_diff_reports_changed_cells() {
        let mut a = Buffer::new(3, 2);
        let b = Buffer::new(3, 2);
        a.set(2, 1, Cell::new('x'));
        let changed: Vec<_> = a.diff(&b).map(|(x, y, c)| (x, y, c.char)).collect();
        assert_eq!(changed, vec![(2, 1, 'x')]);
    }
}
