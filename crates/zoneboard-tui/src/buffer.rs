#![forbid(unsafe_code)]

//! Cell buffer the view renders into.
//!
//! One frame = one full-size buffer of styled cells. Wide graphemes occupy
//! their leading cell; the cells they cover are blanked so the writer never
//! emits half a glyph.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;
use zoneboard_style::Style;

use crate::geometry::Rect;

/// A single terminal cell: a character plus its style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// The character shown in the cell.
    pub ch: char,
    /// The cell's style.
    pub style: Style,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            style: Style::default(),
        }
    }
}

impl Cell {
    /// A cell holding `ch` with the default style.
    #[must_use]
    pub fn from_char(ch: char) -> Self {
        Self {
            ch,
            style: Style::default(),
        }
    }
}

/// A rectangular grid of cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    /// Create a buffer of blank cells.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    /// Buffer width in columns.
    #[must_use]
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Buffer height in rows.
    #[must_use]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// The whole buffer as a rectangle at the origin.
    #[must_use]
    pub fn area(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// The cell at `(x, y)`, if in bounds.
    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Mutable access to the cell at `(x, y)`.
    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        self.index(x, y).map(move |i| &mut self.cells[i])
    }

    /// Overwrite the cell at `(x, y)`. Out-of-bounds writes are dropped.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    /// Set a character with a style.
    pub fn set_char(&mut self, x: u16, y: u16, ch: char, style: Style) {
        self.set(x, y, Cell { ch, style });
    }

    /// One row of cells.
    #[must_use]
    pub fn row(&self, y: u16) -> &[Cell] {
        if y >= self.height {
            return &[];
        }
        let start = y as usize * self.width as usize;
        &self.cells[start..start + self.width as usize]
    }

    /// Reset every cell to blank.
    pub fn reset(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Resize the buffer, clearing all content.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells = vec![Cell::default(); width as usize * height as usize];
    }

    /// Fill an area with blank cells in `style`.
    pub fn fill(&mut self, area: Rect, style: Style) {
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                self.set(x, y, Cell { ch: ' ', style });
            }
        }
    }

    /// Merge a style over every cell in an area, preserving content.
    pub fn apply_style(&mut self, area: Rect, style: Style) {
        if style.is_empty() {
            return;
        }
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                if let Some(cell) = self.get_mut(x, y) {
                    cell.style = cell.style.patch(style);
                }
            }
        }
    }

    /// Draw a text span at `(x, y)`, clipped at `max_x` (exclusive).
    ///
    /// Returns the x position after the last drawn grapheme. Wide
    /// graphemes that would cross the clip edge are dropped; the trailing
    /// cells they cover are blanked.
    pub fn draw_text(&mut self, mut x: u16, y: u16, content: &str, style: Style, max_x: u16) -> u16 {
        let max_x = max_x.min(self.width);
        for grapheme in content.graphemes(true) {
            if x >= max_x {
                break;
            }
            let w = UnicodeWidthStr::width(grapheme) as u16;
            if w == 0 {
                continue;
            }
            if x + w > max_x {
                break;
            }
            if let Some(c) = grapheme.chars().next() {
                self.set(x, y, Cell { ch: c, style });
                for dx in 1..w {
                    self.set(x + dx, y, Cell { ch: ' ', style });
                }
            }
            x = x.saturating_add(w);
        }
        x
    }

    /// The row's text content, trailing spaces trimmed (test helper).
    #[must_use]
    pub fn row_text(&self, y: u16) -> String {
        let s: String = self.row(y).iter().map(|c| c.ch).collect();
        s.trim_end().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zoneboard_style::Color;

    #[test]
    fn out_of_bounds_writes_are_dropped() {
        let mut buf = Buffer::new(4, 2);
        buf.set_char(10, 10, 'x', Style::default());
        assert!(buf.get(10, 10).is_none());
        assert_eq!(buf.row_text(0), "");
    }

    #[test]
    fn draw_text_clips_at_max_x() {
        let mut buf = Buffer::new(10, 1);
        let end = buf.draw_text(0, 0, "hello world", Style::default(), 5);
        assert_eq!(end, 5);
        assert_eq!(buf.row_text(0), "hello");
    }

    #[test]
    fn draw_text_applies_style() {
        let mut buf = Buffer::new(10, 1);
        let style = Style::new().fg(Color::rgb(1, 2, 3));
        buf.draw_text(0, 0, "ab", style, 10);
        assert_eq!(buf.get(0, 0).unwrap().style.fg, Some(Color::rgb(1, 2, 3)));
    }

    #[test]
    fn wide_grapheme_blanks_covered_cell() {
        let mut buf = Buffer::new(6, 1);
        let end = buf.draw_text(0, 0, "日x", Style::default(), 6);
        assert_eq!(end, 3);
        assert_eq!(buf.get(0, 0).unwrap().ch, '日');
        assert_eq!(buf.get(1, 0).unwrap().ch, ' ');
        assert_eq!(buf.get(2, 0).unwrap().ch, 'x');
    }

    #[test]
    fn resize_clears() {
        let mut buf = Buffer::new(4, 1);
        buf.draw_text(0, 0, "abcd", Style::default(), 4);
        buf.resize(8, 2);
        assert_eq!(buf.width(), 8);
        assert_eq!(buf.row_text(0), "");
    }

    #[test]
    fn fill_and_apply_style() {
        let mut buf = Buffer::new(4, 2);
        buf.draw_text(0, 0, "abcd", Style::default(), 4);
        buf.apply_style(Rect::new(0, 0, 4, 1), Style::new().bg(Color::rgb(5, 5, 5)));
        assert_eq!(buf.get(0, 0).unwrap().ch, 'a');
        assert_eq!(buf.get(0, 0).unwrap().style.bg, Some(Color::rgb(5, 5, 5)));

        buf.fill(Rect::new(0, 0, 4, 1), Style::default());
        assert_eq!(buf.row_text(0), "");
    }
}
