//! Snapshot capability for tracked values.
//!
//! A tracked value exposes its observable state as a comparable snapshot.
//! The dirty map records one snapshot per key at each checkpoint and later
//! compares it against a fresh one to decide whether the value changed.
//!
//! ## Responsibilities
//!
//! - Define the `Snapshot` capability the dirty map is generic over
//! - Provide `PropertySnapshot`, a named-property representation for values
//!   that describe themselves as a list of fields
//!
//! ## Comparison
//!
//! Two snapshots are the same state iff they are structurally equal
//! (`PartialEq`). For `PropertySnapshot` that means the same names with the
//! same values in the same order.

pub mod property;

pub use property::{Property, PropertyHolder, PropertySnapshot, PropertySnapshotBuilder};

/// A value that can produce a comparable snapshot of its current state
///
/// Two snapshots taken without an intervening logical change must compare
/// equal, and any logical change must produce an unequal snapshot.
/// `snapshot()` is expected to be a cheap read with no side effects.
///
/// # Example
/// ```
/// use corn_dirty::Snapshot;
///
/// struct Counter {
///     hits: u32,
/// }
///
/// impl Snapshot for Counter {
///     type State = u32;
///
///     fn snapshot(&self) -> u32 {
///         self.hits
///     }
/// }
///
/// let counter = Counter { hits: 3 };
/// assert_eq!(counter.snapshot(), 3);
/// ```
pub trait Snapshot {
    /// Comparable representation of the value's observable state
    type State: PartialEq;

    /// Capture the current state
    fn snapshot(&self) -> Self::State;
}
