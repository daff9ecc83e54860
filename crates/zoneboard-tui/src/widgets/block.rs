#![forbid(unsafe_code)]

//! A bordered panel with an optional title.

use zoneboard_style::Style;

use crate::buffer::Buffer;
use crate::geometry::Rect;
use crate::widgets::Widget;

/// Border character sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderType {
    /// Square corners: `┌ ┐ └ ┘`.
    #[default]
    Square,
    /// Rounded corners: `╭ ╮ ╰ ╯`.
    Rounded,
}

impl BorderType {
    fn corners(self) -> [char; 4] {
        match self {
            BorderType::Square => ['┌', '┐', '└', '┘'],
            BorderType::Rounded => ['╭', '╮', '╰', '╯'],
        }
    }
}

/// Title alignment on the top border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    /// Align to the left.
    #[default]
    Left,
    /// Center horizontally.
    Center,
}

/// A widget that draws a border with an optional title and fills its
/// interior with a background style.
#[derive(Debug, Clone, Default)]
pub struct Block<'a> {
    title: Option<&'a str>,
    title_alignment: Alignment,
    title_style: Style,
    border_style: Style,
    border_type: BorderType,
    style: Style,
}

impl<'a> Block<'a> {
    /// Create a new block.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title shown on the top border.
    #[must_use]
    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    /// Set the title alignment.
    #[must_use]
    pub fn title_alignment(mut self, alignment: Alignment) -> Self {
        self.title_alignment = alignment;
        self
    }

    /// Set the title style.
    #[must_use]
    pub fn title_style(mut self, style: Style) -> Self {
        self.title_style = style;
        self
    }

    /// Set the style applied to border characters.
    #[must_use]
    pub fn border_style(mut self, style: Style) -> Self {
        self.border_style = style;
        self
    }

    /// Set the border character set.
    #[must_use]
    pub fn border_type(mut self, border_type: BorderType) -> Self {
        self.border_type = border_type;
        self
    }

    /// Set the background style for the block interior.
    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Compute the inner area inside the borders.
    #[must_use]
    pub fn inner(&self, area: Rect) -> Rect {
        area.inset(1, 1)
    }
}

impl Widget for Block<'_> {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.width < 2 || area.height < 2 {
            return;
        }
        buf.fill(self.inner(area), self.style);

        let [tl, tr, bl, br] = self.border_type.corners();
        let top = area.top();
        let bottom = area.bottom() - 1;
        let left = area.left();
        let right = area.right() - 1;

        for x in left + 1..right {
            buf.set_char(x, top, '─', self.border_style);
            buf.set_char(x, bottom, '─', self.border_style);
        }
        for y in top + 1..bottom {
            buf.set_char(left, y, '│', self.border_style);
            buf.set_char(right, y, '│', self.border_style);
        }
        buf.set_char(left, top, tl, self.border_style);
        buf.set_char(right, top, tr, self.border_style);
        buf.set_char(left, bottom, bl, self.border_style);
        buf.set_char(right, bottom, br, self.border_style);

        if let Some(title) = self.title {
            let inner_width = area.width.saturating_sub(2) as usize;
            let x = match self.title_alignment {
                Alignment::Left => left + 1,
                Alignment::Center => {
                    left + 1 + (inner_width.saturating_sub(title.chars().count()) / 2) as u16
                }
            };
            buf.draw_text(x, top, title, self.title_style, right);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_square_border() {
        let mut buf = Buffer::new(6, 3);
        Block::new().render(Rect::new(0, 0, 6, 3), &mut buf);
        assert_eq!(buf.row_text(0), "┌────┐");
        assert_eq!(buf.row_text(1), "│    │");
        assert_eq!(buf.row_text(2), "└────┘");
    }

    #[test]
    fn rounded_corners() {
        let mut buf = Buffer::new(4, 2);
        Block::new()
            .border_type(BorderType::Rounded)
            .render(Rect::new(0, 0, 4, 2), &mut buf);
        assert_eq!(buf.row_text(0), "╭──╮");
        assert_eq!(buf.row_text(1), "╰──╯");
    }

    #[test]
    fn title_on_top_border() {
        let mut buf = Buffer::new(10, 3);
        Block::new().title("hi").render(Rect::new(0, 0, 10, 3), &mut buf);
        assert_eq!(buf.row_text(0), "┌hi──────┐");
    }

    #[test]
    fn inner_shrinks_by_border() {
        let block = Block::new();
        assert_eq!(block.inner(Rect::new(2, 2, 10, 5)), Rect::new(3, 3, 8, 3));
    }

    #[test]
    fn degenerate_area_is_skipped() {
        let mut buf = Buffer::new(4, 2);
        Block::new().render(Rect::new(0, 0, 1, 1), &mut buf);
        assert_eq!(buf.row_text(0), "");
    }
}
