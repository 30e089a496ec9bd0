//! Observation-window sweep with boundary logging.
//!
//! A sweep hands every dirty entry to a caller-supplied writer and, once all
//! of them were accepted, checkpoints the map so the next window starts
//! clean. Where the entries end up is the writer's business.
//!
//! ## Logging Ownership
//!
//! The sweep owns lifecycle logging for a window:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure

use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::time::Instant;

use crate::dirty_map::DirtyMap;
use crate::errors::{DirtyMapError, Result};
use crate::snapshot::Snapshot;
use crate::{log_op_end, log_op_error, log_op_start};

const OP: &str = "dirty_sweep";

/// Outcome of a successful sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepReport {
    /// Number of dirty entries handed to the writer
    pub written: usize,
}

/// Write out every dirty entry, then clean the map
///
/// Entries are passed to `writer` in the map's iteration order. The map is
/// cleaned only after every entry was written.
///
/// # Errors
///
/// Returns `SweepFailed` for the first entry the writer rejects. Writing
/// stops there and the map is left as it was, so every dirty entry (written
/// or not) is offered again on the next sweep.
///
/// # Example
/// ```
/// use std::collections::HashMap;
/// use corn_dirty::{sweep, DirtyMap, Snapshot};
///
/// struct Level(u8);
///
/// impl Snapshot for Level {
///     type State = u8;
///     fn snapshot(&self) -> u8 {
///         self.0
///     }
/// }
///
/// let mut map = DirtyMap::new(HashMap::from([("alice", Level(1)), ("bob", Level(4))]));
/// map.get_mut("alice").unwrap().0 = 2;
///
/// let mut saved = Vec::new();
/// let report = sweep(&mut map, |key, level| {
///     saved.push((*key, level.0));
///     Ok::<_, std::io::Error>(())
/// })
/// .unwrap();
///
/// assert_eq!(report.written, 1);
/// assert_eq!(saved, vec![("alice", 2)]);
/// assert!(map.dirty().is_empty());
/// ```
pub fn sweep<K, V, W, E>(map: &mut DirtyMap<K, V>, mut writer: W) -> Result<SweepReport>
where
    K: Eq + Hash + Clone + Debug,
    V: Snapshot,
    W: FnMut(&K, &V) -> std::result::Result<(), E>,
    E: Display,
{
    log_op_start!(OP, entries = map.len());
    let start = Instant::now();

    let report = sweep_impl(map, &mut writer).map_err(|e| {
        log_op_error!(
            OP,
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        OP,
        duration_ms = start.elapsed().as_millis() as u64,
        written = report.written
    );

    Ok(report)
}

fn sweep_impl<K, V, W, E>(map: &mut DirtyMap<K, V>, writer: &mut W) -> Result<SweepReport>
where
    K: Eq + Hash + Clone + Debug,
    V: Snapshot,
    W: FnMut(&K, &V) -> std::result::Result<(), E>,
    E: Display,
{
    let mut written = 0;
    for (key, value) in map.dirty_entries() {
        writer(key, value).map_err(|e| DirtyMapError::SweepFailed {
            key: format!("{:?}", key),
            reason: e.to_string(),
        })?;
        written += 1;
    }

    map.clean();
    Ok(SweepReport { written })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct Slot(u32);

    impl Snapshot for Slot {
        type State = u32;

        fn snapshot(&self) -> u32 {
            self.0
        }
    }

    #[test]
    fn test_sweep_clean_map_writes_nothing() {
        let mut map = DirtyMap::new(HashMap::from([(1u32, Slot(1))]));
        let report = sweep(&mut map, |_, _| Ok::<_, String>(())).unwrap();
        assert_eq!(report, SweepReport { written: 0 });
    }

    #[test]
    fn test_sweep_failure_keeps_window_dirty() {
        let mut map = DirtyMap::new(HashMap::from([(1u32, Slot(1))]));
        map.set_dirty(1);

        let result = sweep(&mut map, |_, _| Err("disk full"));
        assert_eq!(
            result,
            Err(DirtyMapError::SweepFailed {
                key: "1".to_string(),
                reason: "disk full".to_string(),
            })
        );
        assert!(map.is_dirty(&1).unwrap());
    }
}
