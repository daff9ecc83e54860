#![forbid(unsafe_code)]

//! Preference persistence.
//!
//! The application persists exactly one flag (`isDark`), read once at
//! startup and written on every toggle. No migration, no versioning.
//!
//! # Design Invariants
//!
//! 1. **Graceful degradation**: storage failures never panic; operations
//!    return `Result` and callers absorb failures.
//! 2. **Atomic writes**: file storage uses a write-rename pattern so a
//!    crash mid-write cannot corrupt the preference file.
//! 3. **Falsy defaults**: a missing or malformed file reads as all
//!    preferences off.

use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

/// The persisted preferences. One key, boolean, matching the widget's
/// stored `isDark` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Preferences {
    /// Whether dark mode is on.
    #[serde(rename = "isDark", default)]
    pub dark_mode: bool,
}

/// Errors that can occur during preference storage operations.
#[derive(Debug)]
pub enum StorageError {
    /// I/O error during file operations.
    Io(io::Error),
    /// Serialization error while writing.
    Serialization(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "I/O error: {e}"),
            StorageError::Serialization(msg) => write!(f, "serialization error: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(e) => Some(e),
            StorageError::Serialization(_) => None,
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(e: io::Error) -> Self {
        StorageError::Io(e)
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for pluggable preference storage backends.
pub trait StorageBackend: Send + Sync {
    /// Human-readable name for logging.
    fn name(&self) -> &str;

    /// Load preferences.
    ///
    /// Missing or malformed stored data reads as `Preferences::default()`;
    /// only genuine I/O failures surface as errors.
    fn load(&self) -> StorageResult<Preferences>;

    /// Persist preferences, replacing whatever was stored.
    fn save(&self, prefs: &Preferences) -> StorageResult<()>;
}

/// In-memory backend for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemoryPrefs {
    data: RwLock<Option<Preferences>>,
}

impl MemoryPrefs {
    /// Create an empty in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryPrefs {
    fn name(&self) -> &str {
        "MemoryPrefs"
    }

    fn load(&self) -> StorageResult<Preferences> {
        Ok(self
            .data
            .read()
            .map(|guard| guard.unwrap_or_default())
            .unwrap_or_default())
    }

    fn save(&self, prefs: &Preferences) -> StorageResult<()> {
        if let Ok(mut guard) = self.data.write() {
            *guard = Some(*prefs);
        }
        Ok(())
    }
}

/// File-based backend storing JSON at a fixed path.
///
/// # Atomic Writes
///
/// 1. Write to `{path}.tmp`
/// 2. Flush and sync
/// 3. Rename `{path}.tmp` → `{path}`
#[derive(Debug)]
pub struct FilePrefs {
    path: PathBuf,
}

impl FilePrefs {
    /// Create a file backend at the given path.
    ///
    /// The file does not need to exist; it is created on first save.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The default preference path for the application:
    /// `$XDG_CONFIG_HOME/zoneboard/prefs.json` or the platform equivalent.
    #[must_use]
    pub fn default_path() -> PathBuf {
        config_dir_or_fallback().join("zoneboard").join("prefs.json")
    }

    /// The path this backend reads and writes.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone();
        tmp.set_extension("json.tmp");
        tmp
    }
}

/// Get the config directory, falling back to the current dir if unavailable.
fn config_dir_or_fallback() -> PathBuf {
    if let Ok(config_home) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(config_home);
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".config");
    }
    PathBuf::from(".")
}

impl StorageBackend for FilePrefs {
    fn name(&self) -> &str {
        "FilePrefs"
    }

    fn load(&self) -> StorageResult<Preferences> {
        if !self.path.exists() {
            // First run, nothing stored yet.
            return Ok(Preferences::default());
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        match serde_json::from_reader(reader) {
            Ok(prefs) => Ok(prefs),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "malformed preference file, using defaults"
                );
                Ok(Preferences::default())
            }
        }
    }

    fn save(&self, prefs: &Preferences) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = self.temp_path();
        {
            let file = File::create(&tmp_path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer(&mut writer, prefs)
                .map_err(|e| StorageError::Serialization(e.to_string()))?;
            writer.flush()?;
            writer.get_ref().sync_all()?;
        }
        fs::rename(&tmp_path, &self.path)?;

        tracing::debug!(path = %self.path.display(), dark = prefs.dark_mode, "preferences saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn memory_round_trip() {
        let store = MemoryPrefs::new();
        assert!(!store.load().unwrap().dark_mode);

        store.save(&Preferences { dark_mode: true }).unwrap();
        assert!(store.load().unwrap().dark_mode);
    }

    #[test]
    fn file_round_trip() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("prefs.json");
        let store = FilePrefs::new(&path);

        store.save(&Preferences { dark_mode: true }).unwrap();
        assert!(path.exists());

        // A fresh backend at the same path sees the persisted value.
        let reloaded = FilePrefs::new(&path);
        assert!(reloaded.load().unwrap().dark_mode);
    }

    #[test]
    fn missing_file_reads_as_defaults() {
        let tmp = TempDir::new().unwrap();
        let store = FilePrefs::new(tmp.path().join("absent.json"));
        assert_eq!(store.load().unwrap(), Preferences::default());
    }

    #[test]
    fn malformed_file_reads_as_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("prefs.json");
        fs::write(&path, "not json at all").unwrap();

        let store = FilePrefs::new(&path);
        assert_eq!(store.load().unwrap(), Preferences::default());
    }

    #[test]
    fn stored_format_is_the_single_flag() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("prefs.json");
        FilePrefs::new(&path)
            .save(&Preferences { dark_mode: true })
            .unwrap();
        let raw = fs::read_to_string(&path).unwrap();
        assert_eq!(raw, r#"{"isDark":true}"#);
    }

    #[test]
    fn save_creates_parent_dirs() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("dir").join("prefs.json");
        FilePrefs::new(&path)
            .save(&Preferences { dark_mode: false })
            .unwrap();
        assert!(path.exists());
    }

    #[test]
    fn unknown_keys_are_tolerated() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("prefs.json");
        fs::write(&path, r#"{"isDark":true,"later":1}"#).unwrap();
        assert!(FilePrefs::new(&path).load().unwrap().dark_mode);
    }
}
