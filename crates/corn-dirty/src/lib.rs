//! corn dirty - change-tracking map kernel
//!
//! This crate wraps a key-value store and tells a caller which entries changed
//! since the last checkpoint, without diffing against external storage:
//! - `Snapshot` capability for tracked values, with a named-property variant
//! - `DirtyMap` decorator with a memoized known-dirty set
//! - `TrackingConfig` for bulk-insert refresh and purge-on-remove behaviour
//! - `sweep` to drive one observation window (collect, write, clean)
//!
//! Single-owner, synchronous design: all mutation goes through `&mut self`.

pub mod config;
pub mod dirty_map;
pub mod errors;
pub mod logging_facility;
pub mod snapshot;
pub mod sweep;

pub use corn_core_types::schema;

// Re-export commonly used types
pub use config::TrackingConfig;
pub use dirty_map::DirtyMap;
pub use errors::{DirtyMapError, ExError, ExErrorKind, Result};
pub use snapshot::{Property, PropertyHolder, PropertySnapshot, Snapshot};
pub use sweep::{sweep, SweepReport};
