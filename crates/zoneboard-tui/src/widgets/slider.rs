#![forbid(unsafe_code)]

//! The per-zone time slider.
//!
//! A horizontal track over a full day (0–1440 minutes) with marks at every
//! third hour, a thumb at the current value, and an optional label row
//! (`12AM 3AM … 9PM`). Values snap to the step (15 minutes).

use zoneboard_style::Style;

use crate::buffer::Buffer;
use crate::geometry::Rect;
use crate::widgets::Widget;

/// Minutes covered by the track.
const SLIDER_MAX: u16 = 1440;
/// Snap step in minutes.
const SLIDER_STEP: u16 = 15;
/// Mark spacing in minutes.
const MARK_SPACING: u16 = 180;

/// Labels under the track, one per mark.
pub const LABELS: [&str; 8] = ["12AM", "3AM", "6AM", "9AM", "12PM", "3PM", "6PM", "9PM"];

/// A time-of-day slider.
#[derive(Debug, Clone, Default)]
pub struct TimeSlider {
    value: u16,
    track_style: Style,
    mark_style: Style,
    thumb_style: Style,
    label_style: Style,
}

impl TimeSlider {
    /// Create a slider at `value` minutes (clamped to the track).
    #[must_use]
    pub fn new(value: u16) -> Self {
        Self {
            value: value.min(SLIDER_MAX),
            ..Self::default()
        }
    }

    /// Set the track style.
    #[must_use]
    pub fn track_style(mut self, style: Style) -> Self {
        self.track_style = style;
        self
    }

    /// Set the mark style.
    #[must_use]
    pub fn mark_style(mut self, style: Style) -> Self {
        self.mark_style = style;
        self
    }

    /// Set the thumb style.
    #[must_use]
    pub fn thumb_style(mut self, style: Style) -> Self {
        self.thumb_style = style;
        self
    }

    /// Set the label style.
    #[must_use]
    pub fn label_style(mut self, style: Style) -> Self {
        self.label_style = style;
        self
    }

    /// The column the thumb occupies for a track area.
    #[must_use]
    pub fn thumb_column(area: Rect, value: u16) -> u16 {
        if area.width <= 1 {
            return area.x;
        }
        let span = u32::from(area.width - 1);
        let value = u32::from(value.min(SLIDER_MAX));
        area.x + (value * span / u32::from(SLIDER_MAX)) as u16
    }

    /// The snapped value for a click/drag at column `x` on the track.
    ///
    /// Columns outside the area clamp to the track ends.
    #[must_use]
    pub fn value_at(area: Rect, x: u16) -> u16 {
        if area.width <= 1 {
            return 0;
        }
        let span = u32::from(area.width - 1);
        let offset = u32::from(x.saturating_sub(area.x)).min(span);
        let raw = (offset * u32::from(SLIDER_MAX) + span / 2) / span;
        let snapped = ((raw + u32::from(SLIDER_STEP) / 2) / u32::from(SLIDER_STEP))
            * u32::from(SLIDER_STEP);
        (snapped as u16).min(SLIDER_MAX)
    }

    fn render_track(&self, area: Rect, buf: &mut Buffer) {
        let y = area.top();
        for x in area.left()..area.right() {
            buf.set_char(x, y, '─', self.track_style);
        }
        let mut minutes = 0;
        while minutes <= SLIDER_MAX {
            let x = Self::thumb_column(area, minutes);
            buf.set_char(x, y, '┼', self.mark_style);
            minutes += MARK_SPACING;
        }
        let thumb = Self::thumb_column(area, self.value);
        buf.set_char(thumb, y, '█', self.thumb_style);
    }

    fn render_labels(&self, area: Rect, buf: &mut Buffer) {
        let y = area.top() + 1;
        for (i, label) in LABELS.iter().enumerate() {
            let minutes = i as u16 * MARK_SPACING;
            let x = Self::thumb_column(Rect::new(area.x, y, area.width, 1), minutes);
            // Keep the last labels inside the track.
            let x = x.min(area.right().saturating_sub(label.len() as u16));
            buf.draw_text(x, y, label, self.label_style, area.right());
        }
    }
}

impl Widget for TimeSlider {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        self.render_track(area, buf);
        if area.height >= 2 {
            self.render_labels(area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thumb_spans_the_track() {
        let area = Rect::new(2, 0, 50, 1);
        assert_eq!(TimeSlider::thumb_column(area, 0), 2);
        assert_eq!(TimeSlider::thumb_column(area, SLIDER_MAX), 51);
        let mid = TimeSlider::thumb_column(area, 720);
        assert!(mid > 2 && mid < 51);
    }

    #[test]
    fn value_at_clamps_and_snaps() {
        let area = Rect::new(0, 0, 49, 1);
        assert_eq!(TimeSlider::value_at(area, 0), 0);
        assert_eq!(TimeSlider::value_at(area, 48), SLIDER_MAX);
        assert_eq!(TimeSlider::value_at(area, 200), SLIDER_MAX);
        assert_eq!(TimeSlider::value_at(area, 24) % SLIDER_STEP, 0);
    }

    #[test]
    fn value_at_inverts_thumb_column_within_a_step() {
        let area = Rect::new(0, 0, 96, 1);
        for value in (0..=SLIDER_MAX).step_by(60) {
            let col = TimeSlider::thumb_column(area, value);
            let back = TimeSlider::value_at(area, col);
            let diff = back.abs_diff(value);
            assert!(diff <= SLIDER_STEP, "value {value} came back as {back}");
        }
    }

    #[test]
    fn renders_track_marks_thumb_and_labels() {
        let mut buf = Buffer::new(60, 2);
        TimeSlider::new(0).render(Rect::new(0, 0, 60, 2), &mut buf);
        let track = buf.row_text(0);
        assert!(track.starts_with('█'));
        assert!(track.contains('─'));
        assert!(track.contains('┼'));
        let labels = buf.row_text(1);
        assert!(labels.contains("12AM"));
        assert!(labels.contains("9PM"));
    }

    #[test]
    fn empty_area_is_skipped() {
        let mut buf = Buffer::new(10, 1);
        TimeSlider::new(0).render(Rect::new(0, 0, 0, 0), &mut buf);
        assert_eq!(buf.row_text(0), "");
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn value_at_is_snapped_and_in_range(width in 2u16..200, x in 0u16..250) {
                let area = Rect::new(0, 0, width, 1);
                let value = TimeSlider::value_at(area, x);
                prop_assert!(value <= SLIDER_MAX);
                prop_assert_eq!(value % SLIDER_STEP, 0);
            }

            #[test]
            fn thumb_stays_on_the_track(width in 2u16..200, value in 0u16..=1440) {
                let area = Rect::new(3, 0, width, 1);
                let col = TimeSlider::thumb_column(area, value);
                prop_assert!(col >= area.left());
                prop_assert!(col < area.right());
            }
        }
    }
}
