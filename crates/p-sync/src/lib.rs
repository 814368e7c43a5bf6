//! # p-sync — the theme synchronizer for prism
//!
//! Owns the mutable side of theming and keeps three things consistent:
//!
//! - **[`synchronizer`]** — `Synchronizer`, the single owner of the palette
//!   and the light/dark [`Mode`]
//! - **[`storage`]** — durable snapshots behind the [`ThemeStorage`] trait
//!   (in memory or one JSON file per key)
//! - **[`document`]** — the style root behind the [`StyleRoot`] trait, with
//!   custom properties, class markers, and attribute observers
//! - **[`config`]** — storage key, starting mode, and the rule set
//!
//! The synchronizer is generic over both traits so it runs the same against
//! a real page binding, a file-backed CLI store, or the in-memory test
//! doubles shipped here.

pub mod config;
pub mod document;
pub mod mode;
pub mod storage;
pub mod synchronizer;

pub use config::SyncConfig;
pub use document::{AttributeFilter, Computed, Document, MutationRecord, ObserverId, StyleRoot};
pub use mode::Mode;
pub use storage::{FileStorage, MemoryStorage, ThemeSnapshot, ThemeStorage};
pub use synchronizer::{MonitorGuard, Phase, SubscriptionId, Synchronizer};

use thiserror::Error;

/// Errors from persistence and snapshot handling.
///
/// The synchronizer itself recovers from storage failures by logging and
/// keeping its in-memory state. These surface only through the storage API
/// and the explicit `save` / `clear_storage` calls.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The backing store could not be read.
    #[error("failed to read {key:?} from storage: {reason}")]
    StorageRead { key: String, reason: String },

    /// The backing store rejected a write or removal.
    #[error("failed to write {key:?} to storage: {reason}")]
    StorageWrite { key: String, reason: String },

    /// A stored snapshot is not valid JSON for the expected shape.
    #[error("malformed theme snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// Filesystem error from a file-backed store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
