#![forbid(unsafe_code)]

//! Reusable widgets.

pub mod block;
pub mod input;
pub mod slider;

pub use block::{Alignment, Block, BorderType};
pub use input::Input;
pub use slider::TimeSlider;

use crate::buffer::Buffer;
use crate::geometry::Rect;

/// A `Widget` is a renderable component.
///
/// Widgets render themselves into a [`Buffer`] within a given [`Rect`].
pub trait Widget {
    /// Render the widget into the buffer at the given area.
    fn render(&self, area: Rect, buf: &mut Buffer);
}
