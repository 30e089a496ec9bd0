use std::borrow::Borrow;
use std::collections::hash_map::{Iter, Keys, Values};
use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

use crate::config::TrackingConfig;
use crate::errors::{DirtyMapError, Result};
use crate::snapshot::Snapshot;

/// Change-tracking decorator over a `HashMap`
///
/// Records a snapshot of every entry at each checkpoint (construction,
/// `clean()`, `put()`) and answers whether an entry has changed since.
/// Positive answers are memoized in a known-dirty set that only grows until
/// the next `clean()` or `clear()`; negative answers are always re-derived,
/// since the value may change again before the next query.
///
/// All mutation goes through `&mut self`, so the map is the single writer of
/// its base store. Not thread-safe (no locking) - designed for single-owner use.
///
/// # Example
/// ```
/// use std::collections::HashMap;
/// use corn_dirty::{DirtyMap, Snapshot};
///
/// struct Stack {
///     amount: u32,
/// }
///
/// impl Snapshot for Stack {
///     type State = u32;
///     fn snapshot(&self) -> u32 {
///         self.amount
///     }
/// }
///
/// let mut map = DirtyMap::new(HashMap::from([("gold", Stack { amount: 1 })]));
/// assert!(!map.is_dirty("gold").unwrap());
///
/// map.get_mut("gold").unwrap().amount = 2;
/// assert!(map.is_dirty("gold").unwrap());
///
/// map.clean();
/// assert!(!map.is_dirty("gold").unwrap());
/// ```
pub struct DirtyMap<K, V: Snapshot> {
    /// Wrapped store
    base: HashMap<K, V>,
    /// Snapshot of each key at its last checkpoint
    snapshots: HashMap<K, V::State>,
    /// Keys confirmed or forced dirty since the last clean
    known_dirty: HashSet<K>,
    config: TrackingConfig,
}

impl<K, V> DirtyMap<K, V>
where
    K: Eq + Hash + Clone + Debug,
    V: Snapshot,
{
    /// Wrap `base` with the default config, checkpointing every entry
    pub fn new(base: HashMap<K, V>) -> Self {
        Self::with_config(base, TrackingConfig::default())
    }

    /// Wrap `base` with an explicit config, checkpointing every entry
    pub fn with_config(base: HashMap<K, V>, config: TrackingConfig) -> Self {
        let mut map = Self {
            base,
            snapshots: HashMap::new(),
            known_dirty: HashSet::new(),
            config,
        };
        map.checkpoint_all();
        map
    }

    /// Check whether the entry at `key` changed since its checkpoint
    ///
    /// Returns `true` immediately for known-dirty keys. Otherwise snapshots
    /// the current value and compares it with the checkpointed one; a
    /// mismatch (or a missing checkpoint) marks the key known-dirty.
    ///
    /// # Errors
    ///
    /// Returns `KeyNotFound` if `key` is not in the base store.
    pub fn is_dirty<Q>(&mut self, key: &Q) -> Result<bool>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
    {
        let (key, value) = self
            .base
            .get_key_value(key)
            .ok_or_else(|| DirtyMapError::key_not_found(key))?;

        Ok(Self::classify(
            &mut self.known_dirty,
            &self.snapshots,
            key,
            value,
        ))
    }

    /// Values of every dirty entry, in base iteration order
    pub fn dirty(&mut self) -> Vec<&V> {
        self.dirty_entries()
            .into_iter()
            .map(|(_, value)| value)
            .collect()
    }

    /// Key/value pairs of every dirty entry, in base iteration order
    pub fn dirty_entries(&mut self) -> Vec<(&K, &V)> {
        let Self {
            base,
            snapshots,
            known_dirty,
            ..
        } = self;
        let base: &HashMap<K, V> = base;
        let snapshots: &HashMap<K, V::State> = snapshots;

        base.iter()
            .filter(|(key, value)| Self::classify(known_dirty, snapshots, key, value))
            .collect()
    }

    /// Force `key` dirty until the next `clean()`
    ///
    /// For mutations the snapshot cannot observe. `key` need not be present;
    /// a forced key without a live entry never shows up in `dirty()`.
    pub fn set_dirty(&mut self, key: K) {
        tracing::debug!(key = ?key, "Forced entry dirty");
        self.known_dirty.insert(key);
    }

    /// Start a new observation window
    ///
    /// Forgets every known-dirty key and re-checkpoints every entry from the
    /// current base contents. Bookkeeping left behind by removed keys is
    /// dropped here.
    pub fn clean(&mut self) {
        self.known_dirty.clear();
        self.snapshots.clear();
        self.checkpoint_all();

        tracing::debug!(entries = self.base.len(), "Checkpointed dirty map");
    }

    /// Insert or overwrite an entry, checkpointing the new value
    ///
    /// A key that was already known-dirty stays dirty.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        self.snapshots.insert(key.clone(), value.snapshot());
        self.base.insert(key, value)
    }

    /// Insert many entries at once
    ///
    /// Checkpoints each inserted value when `refresh_on_bulk_insert` is set;
    /// otherwise the inserted keys report dirty on their next query.
    pub fn put_all<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let refresh = self.config.refresh_on_bulk_insert;
        for (key, value) in entries {
            if refresh {
                self.snapshots.insert(key.clone(), value.snapshot());
            }
            self.base.insert(key, value);
        }
    }

    /// Remove an entry from the base store
    ///
    /// Snapshot and known-dirty bookkeeping for `key` is kept until the next
    /// `clean()` unless `purge_on_remove` is set.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if self.config.purge_on_remove {
            self.snapshots.remove(key);
            self.known_dirty.remove(key);
        }
        self.base.remove(key)
    }

    /// Empty the base store and all bookkeeping
    pub fn clear(&mut self) {
        self.base.clear();
        self.snapshots.clear();
        self.known_dirty.clear();
    }

    /// Number of entries in the base store
    pub fn len(&self) -> usize {
        self.base.len()
    }

    /// Check if the base store has no entries
    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }

    /// Check if the base store holds `key`
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.base.contains_key(key)
    }

    /// Check if any entry equals `value`
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.base.values().any(|v| v == value)
    }

    /// Get an entry by key
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.base.get(key)
    }

    /// Mutable access to an entry
    ///
    /// Changes made through the returned reference are picked up by the next
    /// snapshot comparison.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.base.get_mut(key)
    }

    /// Iterate keys in base store order
    pub fn keys(&self) -> Keys<'_, K, V> {
        self.base.keys()
    }

    /// Iterate values in base store order
    pub fn values(&self) -> Values<'_, K, V> {
        self.base.values()
    }

    /// Iterate entries in base store order
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.base.iter()
    }

    /// Number of keys currently memoized as dirty
    pub fn known_dirty_len(&self) -> usize {
        self.known_dirty.len()
    }

    /// Number of checkpointed snapshots, including residue from removed keys
    pub fn snapshot_len(&self) -> usize {
        self.snapshots.len()
    }

    /// Get the active tracking configuration
    pub fn config(&self) -> &TrackingConfig {
        &self.config
    }

    /// Unwrap into the base store, discarding bookkeeping
    pub fn into_inner(self) -> HashMap<K, V> {
        self.base
    }

    fn checkpoint_all(&mut self) {
        for (key, value) in &self.base {
            self.snapshots.insert(key.clone(), value.snapshot());
        }
    }

    fn classify(
        known_dirty: &mut HashSet<K>,
        snapshots: &HashMap<K, V::State>,
        key: &K,
        value: &V,
    ) -> bool {
        if known_dirty.contains(key) {
            return true;
        }

        let unchanged = snapshots
            .get(key)
            .is_some_and(|previous| *previous == value.snapshot());
        if unchanged {
            return false;
        }

        tracing::trace!(key = ?key, "Entry diverged from checkpoint");
        known_dirty.insert(key.clone());
        true
    }
}

impl<K, V> Default for DirtyMap<K, V>
where
    K: Eq + Hash + Clone + Debug,
    V: Snapshot,
{
    fn default() -> Self {
        Self::new(HashMap::new())
    }
}

impl<K, V> From<HashMap<K, V>> for DirtyMap<K, V>
where
    K: Eq + Hash + Clone + Debug,
    V: Snapshot,
{
    fn from(base: HashMap<K, V>) -> Self {
        Self::new(base)
    }
}

impl<K, V> Extend<(K, V)> for DirtyMap<K, V>
where
    K: Eq + Hash + Clone + Debug,
    V: Snapshot,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.put_all(iter);
    }
}

impl<K, V> Debug for DirtyMap<K, V>
where
    K: Debug,
    V: Snapshot + Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirtyMap")
            .field("base", &self.base)
            .field("known_dirty", &self.known_dirty)
            .field("snapshots", &self.snapshots.len())
            .field("config", &self.config)
            .finish()
    }
}
