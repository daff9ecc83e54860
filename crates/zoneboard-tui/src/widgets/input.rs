#![forbid(unsafe_code)]

//! Single-line text input.
//!
//! Backs the add-zone search box and the date/time entry overlays. The
//! cursor is tracked in characters; rendering highlights the cursor cell.

use zoneboard_style::Style;

use crate::buffer::Buffer;
use crate::event::{KeyCode, KeyEvent};
use crate::geometry::Rect;

/// A single-line editable text field.
#[derive(Debug, Clone, Default)]
pub struct Input {
    value: String,
    cursor: usize,
}

impl Input {
    /// Create an empty input.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an input holding `value`, cursor at the end.
    #[must_use]
    pub fn with_value(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.chars().count();
        Self { value, cursor }
    }

    /// The current text.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Cursor position in characters.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replace the text, moving the cursor to the end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.chars().count();
    }

    /// Clear the text.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map_or(self.value.len(), |(i, _)| i)
    }

    /// Insert a character at the cursor.
    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let at = self.byte_index(self.cursor - 1);
        self.value.remove(at);
        self.cursor -= 1;
    }

    /// Delete the character under the cursor.
    pub fn delete(&mut self) {
        if self.cursor >= self.value.chars().count() {
            return;
        }
        let at = self.byte_index(self.cursor);
        self.value.remove(at);
    }

    /// Route an editing key. Returns whether the key was consumed.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if key.ctrl() || key.alt() {
            return false;
        }
        match key.code {
            KeyCode::Char(c) => {
                self.insert(c);
                true
            }
            KeyCode::Backspace => {
                self.backspace();
                true
            }
            KeyCode::Delete => {
                self.delete();
                true
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                true
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.value.chars().count());
                true
            }
            KeyCode::Home => {
                self.cursor = 0;
                true
            }
            KeyCode::End => {
                self.cursor = self.value.chars().count();
                true
            }
            _ => false,
        }
    }

    /// Render the field, highlighting the cursor cell.
    pub fn render(&self, area: Rect, buf: &mut Buffer, style: Style, cursor_style: Style) {
        if area.is_empty() {
            return;
        }
        buf.fill(Rect::new(area.x, area.y, area.width, 1), style);
        buf.draw_text(area.x, area.y, &self.value, style, area.right());
        let cursor_x = area.x.saturating_add(self.cursor as u16);
        if cursor_x < area.right() {
            let ch = self
                .value
                .chars()
                .nth(self.cursor)
                .unwrap_or(' ');
            buf.set_char(cursor_x, area.y, ch, cursor_style);
        }
    }
}
