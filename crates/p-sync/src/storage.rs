//! Durable theme storage.
//!
//! The store is a flat string key/value map, the same contract as a
//! browser's `localStorage`. One key holds the whole theme as JSON:
//!
//! ```json
//! { "theme": "dark", "colors": { "primary": { "50": "#F0F4FF", ... }, ... } }
//! ```
//!
//! `colors` may be missing; such a snapshot still carries the mode.
//!
//! Two backends ship here: [`MemoryStorage`] for tests and embedding, and
//! [`FileStorage`], which keeps each key in `<dir>/<key>.json`.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use p_theme::ThemePalette;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::SyncError;
use crate::mode::Mode;

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Everything persisted between sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeSnapshot {
    pub theme: Mode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<ThemePalette>,
}

impl ThemeSnapshot {
    /// Load and decode the snapshot under `key`. `Ok(None)` if absent.
    ///
    /// # Errors
    ///
    /// Propagates backend read errors and [`SyncError::Snapshot`] for
    /// content that does not decode.
    pub fn load(storage: &impl ThemeStorage, key: &str) -> Result<Option<Self>, SyncError> {
        storage
            .get(key)?
            .map(|raw| serde_json::from_str(&raw).map_err(SyncError::from))
            .transpose()
    }

    /// Encode and store under `key`.
    ///
    /// # Errors
    ///
    /// Propagates backend write errors.
    pub fn save(&self, storage: &mut impl ThemeStorage, key: &str) -> Result<(), SyncError> {
        let raw = serde_json::to_string(self)?;
        storage.set(key, &raw)
    }
}

// ---------------------------------------------------------------------------
// ThemeStorage
// ---------------------------------------------------------------------------

/// A string key/value store.
pub trait ThemeStorage {
    /// The value under `key`, or `None` if nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, SyncError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError`] if the backend rejects the write.
    fn set(&mut self, key: &str, value: &str) -> Result<(), SyncError>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError`] if the backend rejects the removal.
    fn remove(&mut self, key: &str) -> Result<(), SyncError>;
}

/// In-memory store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStorage {
    entries: BTreeMap<String, String>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ThemeStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, SyncError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SyncError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), SyncError> {
        self.entries.remove(key);
        Ok(())
    }
}

impl<T: ThemeStorage + ?Sized> ThemeStorage for &mut T {
    fn get(&self, key: &str) -> Result<Option<String>, SyncError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SyncError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), SyncError> {
        (**self).remove(key)
    }
}

/// File-backed store: one `<key>.json` file per key under a directory.
///
/// The directory is created on first write. Keys are restricted to ASCII
/// alphanumerics, `-`, `_` and `.` so a key can never address a path
/// outside the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The file that holds `key`, if the key is acceptable.
    #[must_use]
    pub fn path_for(&self, key: &str) -> Option<PathBuf> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        valid.then(|| self.dir.join(format!("{key}.json")))
    }
}

impl ThemeStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, SyncError> {
        let path = self.path_for(key).ok_or_else(|| SyncError::StorageRead {
            key: key.to_owned(),
            reason: "invalid storage key".to_owned(),
        })?;
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SyncError> {
        let path = self.path_for(key).ok_or_else(|| SyncError::StorageWrite {
            key: key.to_owned(),
            reason: "invalid storage key".to_owned(),
        })?;
        fs::create_dir_all(&self.dir)?;
        fs::write(&path, value)?;
        debug!(path = %path.display(), bytes = value.len(), "wrote theme storage");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), SyncError> {
        let path = self.path_for(key).ok_or_else(|| SyncError::StorageWrite {
            key: key.to_owned(),
            reason: "invalid storage key".to_owned(),
        })?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use p_theme::builtin::default_palette;
    use pretty_assertions::assert_eq;

    fn snapshot(theme: Mode) -> ThemeSnapshot {
        ThemeSnapshot { theme, colors: Some(default_palette()) }
    }

    // ── Snapshot ──

    #[test]
    fn snapshot_json_shape() {
        let json: serde_json::Value = serde_json::to_value(snapshot(Mode::Dark)).unwrap();
        assert_eq!(json["theme"], "dark");
        assert_eq!(json["colors"]["primary"]["900"], "#0A0E27");
        assert_eq!(json["colors"]["accent"]["cyan"], "#00D4FF");
        assert_eq!(json["colors"]["semantic"]["error"], "#EF4444");
    }

    #[test]
    fn load_missing_is_none() {
        let storage = MemoryStorage::new();
        assert!(ThemeSnapshot::load(&storage, "portfolio-theme").unwrap().is_none());
    }

    #[test]
    fn save_then_load() {
        let mut storage = MemoryStorage::new();
        let snap = snapshot(Mode::Dark);
        snap.save(&mut storage, "portfolio-theme").unwrap();
        assert_eq!(ThemeSnapshot::load(&storage, "portfolio-theme").unwrap(), Some(snap));
    }

    #[test]
    fn load_mode_only() {
        let mut storage = MemoryStorage::new();
        storage.set("portfolio-theme", r#"{"theme":"dark"}"#).unwrap();
        let snap = ThemeSnapshot::load(&storage, "portfolio-theme").unwrap().unwrap();
        assert_eq!(snap, ThemeSnapshot { theme: Mode::Dark, colors: None });
    }

    #[test]
    fn mode_only_snapshot_omits_colors() {
        let snap = ThemeSnapshot { theme: Mode::Light, colors: None };
        assert_eq!(serde_json::to_string(&snap).unwrap(), r#"{"theme":"light"}"#);
    }

    #[test]
    fn load_malformed_is_snapshot_error() {
        let mut storage = MemoryStorage::new();
        storage.set("portfolio-theme", "{not json").unwrap();
        let err = ThemeSnapshot::load(&storage, "portfolio-theme").unwrap_err();
        assert!(matches!(err, SyncError::Snapshot(_)), "{err}");
    }

    #[test]
    fn load_incomplete_palette_is_snapshot_error() {
        let mut storage = MemoryStorage::new();
        storage
            .set("portfolio-theme", r##"{"theme":"light","colors":{"primary":{"50":"#FFFFFF"}}}"##)
            .unwrap();
        assert!(ThemeSnapshot::load(&storage, "portfolio-theme").is_err());
    }

    // ── MemoryStorage ──

    #[test]
    fn memory_remove_is_idempotent() {
        let mut storage = MemoryStorage::new();
        storage.set("k", "v").unwrap();
        storage.remove("k").unwrap();
        storage.remove("k").unwrap();
        assert!(storage.is_empty());
    }

    // ── FileStorage ──

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path().join("nested"));
        assert_eq!(storage.get("portfolio-theme").unwrap(), None);

        storage.set("portfolio-theme", "{}").unwrap();
        assert!(dir.path().join("nested/portfolio-theme.json").is_file());
        assert_eq!(storage.get("portfolio-theme").unwrap().as_deref(), Some("{}"));

        storage.remove("portfolio-theme").unwrap();
        storage.remove("portfolio-theme").unwrap();
        assert_eq!(storage.get("portfolio-theme").unwrap(), None);
    }

    #[test]
    fn file_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path());
        for key in ["", "../escape", "a/b", ".hidden"] {
            assert!(storage.path_for(key).is_none(), "{key:?}");
            assert!(matches!(storage.set(key, "x"), Err(SyncError::StorageWrite { .. })));
            assert!(matches!(storage.get(key), Err(SyncError::StorageRead { .. })));
        }
    }

    #[test]
    fn file_snapshot_survives_new_handle() {
        let dir = tempfile::tempdir().unwrap();
        let snap = snapshot(Mode::Light);
        snap.save(&mut FileStorage::new(dir.path()), "theme").unwrap();
        let reopened = FileStorage::new(dir.path());
        assert_eq!(ThemeSnapshot::load(&reopened, "theme").unwrap(), Some(snap));
    }
}
