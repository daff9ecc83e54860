#![forbid(unsafe_code)]

//! Cell styles: optional foreground/background plus attribute flags.

use crate::color::Color;
use bitflags::bitflags;

bitflags! {
    /// Text attribute flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Attrs: u8 {
        const BOLD = 1 << 0;
        const DIM = 1 << 1;
        const ITALIC = 1 << 2;
        const UNDERLINE = 1 << 3;
        const REVERSE = 1 << 4;
    }
}

impl Default for Attrs {
    fn default() -> Self {
        Self::empty()
    }
}

/// A style to apply to one or more cells.
///
/// `None` foreground/background means "leave the terminal default".
/// Styles are merged with [`Style::patch`]: later styles win for colors,
/// attribute flags are unioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// Foreground color, if any.
    pub fg: Option<Color>,
    /// Background color, if any.
    pub bg: Option<Color>,
    /// Attribute flags.
    pub attrs: Attrs,
}

impl Style {
    /// Create an empty style.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            attrs: Attrs::empty(),
        }
    }

    /// Set the foreground color.
    #[must_use]
    pub const fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    /// Set the background color.
    #[must_use]
    pub const fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    /// Add the bold attribute.
    #[must_use]
    pub fn bold(mut self) -> Self {
        self.attrs |= Attrs::BOLD;
        self
    }

    /// Add the dim attribute.
    #[must_use]
    pub fn dim(mut self) -> Self {
        self.attrs |= Attrs::DIM;
        self
    }

    /// Add the italic attribute.
    #[must_use]
    pub fn italic(mut self) -> Self {
        self.attrs |= Attrs::ITALIC;
        self
    }

    /// Add the underline attribute.
    #[must_use]
    pub fn underline(mut self) -> Self {
        self.attrs |= Attrs::UNDERLINE;
        self
    }

    /// Add the reverse-video attribute.
    #[must_use]
    pub fn reverse(mut self) -> Self {
        self.attrs |= Attrs::REVERSE;
        self
    }

    /// Whether the style sets nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && self.attrs.is_empty()
    }

    /// Merge `other` on top of `self`.
    ///
    /// Colors set in `other` replace those in `self`; attributes union.
    #[must_use]
    pub fn patch(mut self, other: Style) -> Self {
        if other.fg.is_some() {
            self.fg = other.fg;
        }
        if other.bg.is_some() {
            self.bg = other.bg;
        }
        self.attrs |= other.attrs;
        self
    }
}
