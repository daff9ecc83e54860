#![forbid(unsafe_code)]

//! The application palette.
//!
//! Accent and surface values follow the widget's original stylesheet:
//! accent #0098ca, title blue #033f9e, dark surface #2c2f34.

use zoneboard_style::{AdaptiveColor, Color, Theme};

/// Build the zoneboard palette.
#[must_use]
pub fn palette() -> Theme {
    let accent = Color::rgb(0x00, 0x98, 0xca);
    Theme {
        title: AdaptiveColor::adaptive(Color::rgb(0x03, 0x3f, 0x9e), Color::rgb(0x7a, 0xb7, 0xff)),
        accent: AdaptiveColor::fixed(accent),
        background: AdaptiveColor::adaptive(Color::rgb(0xf4, 0xf6, 0xf8), Color::rgb(0x1b, 0x1d, 0x21)),
        surface: AdaptiveColor::adaptive(Color::rgb(0xff, 0xff, 0xff), Color::rgb(0x2c, 0x2f, 0x34)),
        text: AdaptiveColor::adaptive(Color::rgb(0x1a, 0x1a, 0x1a), Color::rgb(0xff, 0xff, 0xff)),
        text_muted: AdaptiveColor::adaptive(Color::rgb(0x5a, 0x62, 0x70), Color::rgb(0x9a, 0xa3, 0xad)),
        text_subtle: AdaptiveColor::adaptive(Color::rgb(0x96, 0x9b, 0xa5), Color::rgb(0x6e, 0x74, 0x7d)),
        border: AdaptiveColor::adaptive(Color::rgb(0xd0, 0xd7, 0xde), Color::rgb(0x3a, 0x3f, 0x46)),
        border_focused: AdaptiveColor::fixed(accent),
        selection_bg: AdaptiveColor::fixed(accent),
        selection_fg: AdaptiveColor::fixed(Color::rgb(0xff, 0xff, 0xff)),
        track: AdaptiveColor::adaptive(Color::rgb(0xc6, 0xdb, 0xe4), Color::rgb(0x3f, 0x46, 0x50)),
        thumb: AdaptiveColor::fixed(accent),
        danger: AdaptiveColor::fixed(Color::rgb(0xd9, 0x53, 0x4f)),
    }
}
