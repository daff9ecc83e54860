#![forbid(unsafe_code)]

//! Theme system with semantic color slots.
//!
//! A [`Theme`] maps semantic slot names to [`AdaptiveColor`]s. Each slot is
//! resolved against the dark-mode flag at render time, so one theme value
//! serves both modes and a mode toggle is a single boolean flip.

use crate::color::Color;

/// A color that can change based on light/dark mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdaptiveColor {
    /// A fixed color that doesn't change with mode.
    Fixed(Color),
    /// A color that adapts to light/dark mode.
    Adaptive {
        /// Color used in light mode.
        light: Color,
        /// Color used in dark mode.
        dark: Color,
    },
}

impl AdaptiveColor {
    /// Create a fixed color.
    #[inline]
    #[must_use]
    pub const fn fixed(color: Color) -> Self {
        Self::Fixed(color)
    }

    /// Create an adaptive color with light/dark variants.
    #[inline]
    #[must_use]
    pub const fn adaptive(light: Color, dark: Color) -> Self {
        Self::Adaptive { light, dark }
    }

    /// Resolve the color for the given mode.
    #[inline]
    #[must_use]
    pub const fn resolve(&self, is_dark: bool) -> Color {
        match self {
            Self::Fixed(c) => *c,
            Self::Adaptive { light, dark } => {
                if is_dark { *dark } else { *light }
            }
        }
    }

    /// Check if this color adapts to mode.
    #[inline]
    #[must_use]
    pub const fn is_adaptive(&self) -> bool {
        matches!(self, Self::Adaptive { .. })
    }
}

impl Default for AdaptiveColor {
    fn default() -> Self {
        Self::Fixed(Color::rgb(128, 128, 128))
    }
}

impl From<Color> for AdaptiveColor {
    fn from(color: Color) -> Self {
        Self::Fixed(color)
    }
}

/// A theme with semantic color slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Application title.
    pub title: AdaptiveColor,
    /// Primary accent (controls, thumbs, highlights).
    pub accent: AdaptiveColor,

    /// Main background.
    pub background: AdaptiveColor,
    /// Surface color (row cards, overlays).
    pub surface: AdaptiveColor,

    /// Primary text.
    pub text: AdaptiveColor,
    /// Muted text (zone names, offsets, day labels).
    pub text_muted: AdaptiveColor,
    /// Subtle text (hints, placeholders).
    pub text_subtle: AdaptiveColor,

    /// Default border.
    pub border: AdaptiveColor,
    /// Focused element border.
    pub border_focused: AdaptiveColor,

    /// Selection background.
    pub selection_bg: AdaptiveColor,
    /// Selection foreground.
    pub selection_fg: AdaptiveColor,

    /// Slider track.
    pub track: AdaptiveColor,
    /// Slider thumb.
    pub thumb: AdaptiveColor,

    /// Destructive action color (remove buttons, invalid entry).
    pub danger: AdaptiveColor,
}

impl Default for Theme {
    fn default() -> Self {
        let gray = |v: u8| Color::rgb(v, v, v);
        Self {
            title: AdaptiveColor::adaptive(gray(30), gray(230)),
            accent: AdaptiveColor::fixed(Color::rgb(0, 150, 200)),
            background: AdaptiveColor::adaptive(gray(245), gray(24)),
            surface: AdaptiveColor::adaptive(gray(255), gray(40)),
            text: AdaptiveColor::adaptive(gray(20), gray(235)),
            text_muted: AdaptiveColor::adaptive(gray(100), gray(160)),
            text_subtle: AdaptiveColor::adaptive(gray(150), gray(110)),
            border: AdaptiveColor::adaptive(gray(200), gray(70)),
            border_focused: AdaptiveColor::fixed(Color::rgb(0, 150, 200)),
            selection_bg: AdaptiveColor::fixed(Color::rgb(0, 150, 200)),
            selection_fg: AdaptiveColor::fixed(gray(255)),
            track: AdaptiveColor::adaptive(gray(205), gray(65)),
            thumb: AdaptiveColor::fixed(Color::rgb(0, 150, 200)),
            danger: AdaptiveColor::fixed(Color::rgb(200, 70, 70)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_resolves_same_in_both_modes() {
        let c = AdaptiveColor::fixed(Color::rgb(1, 2, 3));
        assert_eq!(c.resolve(false), c.resolve(true));
        assert!(!c.is_adaptive());
    }

    #[test]
    fn adaptive_resolves_by_mode() {
        let c = AdaptiveColor::adaptive(Color::rgb(0, 0, 0), Color::rgb(255, 255, 255));
        assert_eq!(c.resolve(false), Color::rgb(0, 0, 0));
        assert_eq!(c.resolve(true), Color::rgb(255, 255, 255));
        assert!(c.is_adaptive());
    }

    #[test]
    fn default_theme_backgrounds_differ_by_mode() {
        let theme = Theme::default();
        assert_ne!(
            theme.background.resolve(false),
            theme.background.resolve(true)
        );
    }
}
