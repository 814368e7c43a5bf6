//! Synchronizer configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config:
//!
//! ```json
//! { "storageKey": "portfolio-theme", "defaultMode": "light", "rules": [ ... ] }
//! ```

use p_theme::ValidationRule;
use p_theme::builtin::default_rules;
use serde::{Deserialize, Serialize};

use crate::mode::Mode;

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "portfolio-theme";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SyncConfig {
    /// Key the snapshot is stored under.
    pub storage_key: String,
    /// Mode used until a snapshot says otherwise.
    pub default_mode: Mode,
    /// Rules checked by an accessibility pass, in order.
    pub rules: Vec<ValidationRule>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            default_mode: Mode::Light,
            rules: default_rules(),
        }
    }
}
