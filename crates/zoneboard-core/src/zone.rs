#![forbid(unsafe_code)]

//! Zone keys: row identities derived from IANA names.

use std::fmt;

/// Identity of a tracked timezone row.
///
/// Derived from the IANA identifier with path separators replaced
/// (`Asia/Kolkata` → `Asia-Kolkata`). The mapping is not invertible for
/// names that contain real hyphens (`America/Port-au-Prince`), so rows
/// carry the original identifier alongside their key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ZoneKey(String);

impl ZoneKey {
    /// Derive the key for an IANA identifier.
    #[must_use]
    pub fn from_iana(name: &str) -> Self {
        Self(name.replace('/', "-"))
    }

    /// The key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ZoneKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ZoneKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slashes_become_dashes() {
        assert_eq!(ZoneKey::from_iana("Asia/Kolkata").as_str(), "Asia-Kolkata");
        assert_eq!(
            ZoneKey::from_iana("America/Indiana/Indianapolis").as_str(),
            "America-Indiana-Indianapolis"
        );
    }

    #[test]
    fn names_without_slashes_pass_through() {
        assert_eq!(ZoneKey::from_iana("UTC").as_str(), "UTC");
    }

    #[test]
    fn existing_hyphens_are_kept() {
        assert_eq!(
            ZoneKey::from_iana("America/Port-au-Prince").as_str(),
            "America-Port-au-Prince"
        );
    }

    #[test]
    fn same_identifier_same_key() {
        assert_eq!(
            ZoneKey::from_iana("Europe/London"),
            ZoneKey::from_iana("Europe/London")
        );
    }
}
