#![forbid(unsafe_code)]

//! Styling primitives for zoneboard.
//!
//! Colors are 24-bit RGB; terminals without true-color support are left to
//! the terminal emulator's own downgrade. Theme slots are adaptive: each
//! slot can carry a light and a dark variant and is resolved against the
//! current dark-mode flag at render time.

pub mod color;
pub mod style;
pub mod theme;

pub use color::Color;
pub use style::{Attrs, Style};
pub use theme::{AdaptiveColor, Theme};
