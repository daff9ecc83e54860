#![forbid(unsafe_code)]

//! The selectable timezone universe for the add-zone picker.

/// All IANA timezone names known to the time library's database.
///
/// Loaded once; filtering is a case-insensitive substring match, which is
/// what a picker over ~600 names needs.
#[derive(Debug, Clone)]
pub struct ZoneCatalog {
    names: Vec<String>,
}

impl ZoneCatalog {
    /// Load the full name list from the timezone database.
    ///
    /// Names arrive in lexicographic order from the database.
    #[must_use]
    pub fn load() -> Self {
        let names: Vec<String> = jiff::tz::db().available().map(|n| n.to_string()).collect();
        tracing::debug!(count = names.len(), "timezone catalog loaded");
        Self { names }
    }

    /// Build a catalog from explicit names (tests).
    #[must_use]
    pub fn from_names(names: Vec<String>) -> Self {
        Self { names }
    }

    /// All names.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Case-insensitive substring filter. An empty query matches all.
    #[must_use]
    pub fn filter(&self, query: &str) -> Vec<&str> {
        let query = query.trim().to_ascii_lowercase();
        self.names
            .iter()
            .filter(|n| query.is_empty() || n.to_ascii_lowercase().contains(&query))
            .map(String::as_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_contains_the_usual_suspects() {
        let catalog = ZoneCatalog::load();
        assert!(!catalog.is_empty());
        for name in ["UTC", "Asia/Kolkata", "America/New_York", "Europe/London"] {
            assert!(
                catalog.names().iter().any(|n| n == name),
                "missing {name}"
            );
        }
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        let catalog = ZoneCatalog::from_names(vec![
            "Asia/Kolkata".into(),
            "Asia/Tokyo".into(),
            "Europe/London".into(),
        ]);
        assert_eq!(catalog.filter("kolk"), ["Asia/Kolkata"]);
        assert_eq!(catalog.filter("ASIA"), ["Asia/Kolkata", "Asia/Tokyo"]);
        assert_eq!(catalog.filter(""), ["Asia/Kolkata", "Asia/Tokyo", "Europe/London"]);
        assert!(catalog.filter("mars").is_empty());
    }
}
