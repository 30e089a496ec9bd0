//! Tracking configuration
//!
//! Controls the two bookkeeping behaviours a [`DirtyMap`](crate::DirtyMap)
//! leaves open: whether bulk inserts checkpoint the keys they write, and
//! whether removing a key also drops its snapshot and known-dirty residue.

use serde::{Deserialize, Serialize};

use crate::errors::{DirtyMapError, Result};

/// Bookkeeping knobs for a dirty map
///
/// # Example
/// ```
/// use corn_dirty::TrackingConfig;
///
/// let config = TrackingConfig::from_toml_str("purge_on_remove = true").unwrap();
/// assert!(config.refresh_on_bulk_insert);
/// assert!(config.purge_on_remove);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrackingConfig {
    /// Refresh the snapshot of every key written by `put_all`, matching `put`.
    ///
    /// When disabled, bulk-inserted keys have no checkpoint and report dirty
    /// on their first query.
    pub refresh_on_bulk_insert: bool,

    /// Drop snapshot and known-dirty bookkeeping for a key on `remove`.
    ///
    /// When disabled, residue for removed keys lingers until the next
    /// `clean()` or `clear()`.
    pub purge_on_remove: bool,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            refresh_on_bulk_insert: true,
            purge_on_remove: false,
        }
    }
}

impl TrackingConfig {
    /// Parse a config from a TOML document
    ///
    /// Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the document is not valid TOML, a value has
    /// the wrong type, or an unknown key is present.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        toml::from_str(input).map_err(|e| DirtyMapError::InvalidConfig {
            reason: e.to_string(),
        })
    }

    /// Set `refresh_on_bulk_insert`
    pub fn with_refresh_on_bulk_insert(mut self, enabled: bool) -> Self {
        self.refresh_on_bulk_insert = enabled;
        self
    }

    /// Set `purge_on_remove`
    pub fn with_purge_on_remove(mut self, enabled: bool) -> Self {
        self.purge_on_remove = enabled;
        self
    }
}
