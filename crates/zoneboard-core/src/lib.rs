#![forbid(unsafe_code)]

//! Domain core for zoneboard: the tracked timezone set, the time
//! synchronization engine, and the formatting helpers.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         ZoneBoard                             │
//! │   - Ordered rows: zone-key → (IANA id, TimeZone, minutes)     │
//! │   - add / remove / reorder (stable move)                      │
//! │   - edit_zone: one edit re-projects every other row           │
//! │   - reference date shared by all rows                         │
//! └──────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │                           sync                                │
//! │   civil wall-clock + reference date + zone  →  instant        │
//! │   instant  →  any zone's wall-clock time-of-day               │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! All timezone mathematics is delegated to `jiff`. The crate performs no
//! I/O and holds no terminal state.

use std::fmt;

pub mod board;
pub mod catalog;
pub mod format;
pub mod sync;
pub mod zone;

pub use board::{ZoneBoard, ZoneRow};
pub use catalog::ZoneCatalog;
pub use zone::ZoneKey;

/// Minutes in a full day; the inclusive upper bound of a slider edit.
pub const MINUTES_PER_DAY: u16 = 1440;

/// Errors produced by the domain core.
#[derive(Debug)]
pub enum Error {
    /// A timezone identifier could not be resolved against the database.
    UnknownZone {
        /// The identifier as given.
        name: String,
        /// The underlying lookup error.
        source: jiff::Error,
    },
    /// Date/time arithmetic left the representable range.
    OutOfRange(jiff::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownZone { name, source } => {
                write!(f, "unresolvable timezone `{name}`: {source}")
            }
            Error::OutOfRange(e) => write!(f, "date/time arithmetic out of range: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::UnknownZone { source, .. } => Some(source),
            Error::OutOfRange(e) => Some(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_names_the_zone() {
        let err = jiff::tz::TimeZone::get("Not/A_Zone").unwrap_err();
        let e = Error::UnknownZone {
            name: "Not/A_Zone".into(),
            source: err,
        };
        assert!(e.to_string().contains("Not/A_Zone"));
    }
}
