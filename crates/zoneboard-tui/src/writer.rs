#![forbid(unsafe_code)]

//! Buffer presentation over crossterm.
//!
//! The writer keeps the previously presented buffer and repaints only rows
//! that changed. Style escapes are emitted only at style boundaries within
//! a row; each boundary resets before applying so stale attributes never
//! leak across spans.

use std::io::{self, Stdout, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor};
use zoneboard_style::{Attrs, Color, Style};

use crate::buffer::Buffer;

/// Presents [`Buffer`]s to the terminal with row-level diffing.
#[derive(Debug)]
pub struct TerminalWriter {
    out: Stdout,
    prev: Option<Buffer>,
}

impl Default for TerminalWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalWriter {
    /// Create a writer over stdout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            out: io::stdout(),
            prev: None,
        }
    }

    /// Drop the remembered frame so the next present repaints everything.
    pub fn invalidate(&mut self) {
        self.prev = None;
    }

    /// Present a frame, repainting only changed rows.
    pub fn present(&mut self, buffer: &Buffer) -> io::Result<()> {
        let full = match &self.prev {
            Some(prev) => prev.width() != buffer.width() || prev.height() != buffer.height(),
            None => true,
        };

        let mut painted = 0u16;
        for y in 0..buffer.height() {
            if !full
                && let Some(prev) = &self.prev
                && prev.row(y) == buffer.row(y)
            {
                continue;
            }
            self.paint_row(buffer, y)?;
            painted += 1;
        }

        if painted > 0 {
            queue!(self.out, SetAttribute(Attribute::Reset), ResetColor)?;
            self.out.flush()?;
        }
        tracing::trace!(rows = painted, "frame presented");
        self.prev = Some(buffer.clone());
        Ok(())
    }

    fn paint_row(&mut self, buffer: &Buffer, y: u16) -> io::Result<()> {
        queue!(self.out, MoveTo(0, y))?;
        let mut current: Option<Style> = None;
        for cell in buffer.row(y) {
            if current != Some(cell.style) {
                apply_style(&mut self.out, cell.style)?;
                current = Some(cell.style);
            }
            queue!(self.out, Print(cell.ch))?;
        }
        Ok(())
    }
}

fn apply_style(out: &mut Stdout, style: Style) -> io::Result<()> {
    queue!(out, SetAttribute(Attribute::Reset), ResetColor)?;
    if let Some(fg) = style.fg {
        queue!(out, SetForegroundColor(to_crossterm(fg)))?;
    }
    if let Some(bg) = style.bg {
        queue!(out, SetBackgroundColor(to_crossterm(bg)))?;
    }
    if style.attrs.contains(Attrs::BOLD) {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    if style.attrs.contains(Attrs::DIM) {
        queue!(out, SetAttribute(Attribute::Dim))?;
    }
    if style.attrs.contains(Attrs::ITALIC) {
        queue!(out, SetAttribute(Attribute::Italic))?;
    }
    if style.attrs.contains(Attrs::UNDERLINE) {
        queue!(out, SetAttribute(Attribute::Underlined))?;
    }
    if style.attrs.contains(Attrs::REVERSE) {
        queue!(out, SetAttribute(Attribute::Reverse))?;
    }
    Ok(())
}

fn to_crossterm(color: Color) -> crossterm::style::Color {
    crossterm::style::Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_conversion_preserves_channels() {
        let c = to_crossterm(Color::rgb(1, 2, 3));
        assert_eq!(c, crossterm::style::Color::Rgb { r: 1, g: 2, b: 3 });
    }
}
