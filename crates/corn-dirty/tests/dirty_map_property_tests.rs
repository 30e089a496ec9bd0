//! Property tests: the map is checked against a plain reference model of
//! checkpoint and known-dirty bookkeeping under random operation sequences.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::collections::{HashMap, HashSet};

use common::{val, Val};
use corn_dirty::DirtyMap;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Mutate(u8, u32),
    Put(u8, u32),
    PutAll(Vec<(u8, u32)>),
    Remove(u8),
    SetDirty(u8),
    Clean,
    Query(u8),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let key = 0u8..6;
    let state = 0u32..4;
    prop_oneof![
        4 => (key.clone(), state.clone()).prop_map(|(k, v)| Op::Mutate(k, v)),
        2 => (key.clone(), state.clone()).prop_map(|(k, v)| Op::Put(k, v)),
        1 => prop::collection::vec((key.clone(), state), 0..4).prop_map(Op::PutAll),
        1 => key.clone().prop_map(Op::Remove),
        1 => key.clone().prop_map(Op::SetDirty),
        1 => Just(Op::Clean),
        3 => key.prop_map(Op::Query),
    ]
}

fn base_strategy() -> impl Strategy<Value = HashMap<u8, u32>> {
    prop::collection::hash_map(0u8..6, 0u32..4, 0..6)
}

/// Reference bookkeeping with the same memoize-positive-only rule
#[derive(Debug, Default)]
struct Model {
    base: HashMap<u8, u32>,
    checkpoint: HashMap<u8, u32>,
    known: HashSet<u8>,
}

impl Model {
    fn new(base: &HashMap<u8, u32>) -> Self {
        Self {
            base: base.clone(),
            checkpoint: base.clone(),
            known: HashSet::new(),
        }
    }

    fn is_dirty(&mut self, key: u8) -> Option<bool> {
        let current = *self.base.get(&key)?;
        if self.known.contains(&key) {
            return Some(true);
        }
        if self.checkpoint.get(&key) == Some(&current) {
            return Some(false);
        }
        self.known.insert(key);
        Some(true)
    }

    fn apply(&mut self, op: &Op) {
        match op {
            Op::Mutate(k, v) => {
                if let Some(state) = self.base.get_mut(k) {
                    *state = *v;
                }
            }
            Op::Put(k, v) => {
                self.checkpoint.insert(*k, *v);
                self.base.insert(*k, *v);
            }
            Op::PutAll(entries) => {
                for (k, v) in entries {
                    self.checkpoint.insert(*k, *v);
                    self.base.insert(*k, *v);
                }
            }
            Op::Remove(k) => {
                self.base.remove(k);
            }
            Op::SetDirty(k) => {
                self.known.insert(*k);
            }
            Op::Clean => {
                self.known.clear();
                self.checkpoint = self.base.clone();
            }
            Op::Query(k) => {
                self.is_dirty(*k);
            }
        }
    }
}

fn tracked(base: &HashMap<u8, u32>) -> DirtyMap<u8, Val> {
    DirtyMap::new(base.iter().map(|(k, v)| (*k, val(*v))).collect())
}

fn apply(map: &mut DirtyMap<u8, Val>, op: &Op) {
    match op {
        Op::Mutate(k, v) => {
            if let Some(entry) = map.get_mut(k) {
                entry.state = *v;
            }
        }
        Op::Put(k, v) => {
            map.put(*k, val(*v));
        }
        Op::PutAll(entries) => map.put_all(entries.iter().map(|(k, v)| (*k, val(*v)))),
        Op::Remove(k) => {
            map.remove(k);
        }
        Op::SetDirty(k) => map.set_dirty(*k),
        Op::Clean => map.clean(),
        Op::Query(k) => {
            let _ = map.is_dirty(k);
        }
    }
}

fn dirty_states_by_query(map: &mut DirtyMap<u8, Val>) -> Vec<u32> {
    let keys: Vec<u8> = map.keys().copied().collect();
    let mut states = Vec::new();
    for key in keys {
        if map.is_dirty(&key).unwrap() {
            states.push(map.get(&key).unwrap().state);
        }
    }
    states
}

proptest! {
    #[test]
    fn prop_matches_reference_model(
        base in base_strategy(),
        ops in prop::collection::vec(op_strategy(), 0..40),
    ) {
        let mut map = tracked(&base);
        let mut model = Model::new(&base);

        for op in &ops {
            apply(&mut map, op);
            model.apply(op);

            for key in 0u8..6 {
                let actual = map.is_dirty(&key).ok();
                prop_assert_eq!(actual, model.is_dirty(key), "key {} after {:?}", key, op);
            }
        }
    }

    #[test]
    fn prop_dirty_equals_filter_by_is_dirty(
        base in base_strategy(),
        ops in prop::collection::vec(op_strategy(), 0..40),
    ) {
        let mut map = tracked(&base);
        for op in &ops {
            apply(&mut map, op);
        }

        let from_dirty: Vec<u32> = map.dirty().into_iter().map(|v| v.state).collect();
        let from_query = dirty_states_by_query(&mut map);
        prop_assert_eq!(from_dirty, from_query);
    }

    #[test]
    fn prop_clean_checkpoint_is_pure(
        base in base_strategy(),
        ops in prop::collection::vec(op_strategy(), 0..40),
    ) {
        let mut map = tracked(&base);
        for key in base.keys() {
            prop_assert!(!map.is_dirty(key).unwrap());
        }

        for op in &ops {
            apply(&mut map, op);
        }
        map.clean();

        let keys: Vec<u8> = map.keys().copied().collect();
        for key in keys {
            prop_assert!(!map.is_dirty(&key).unwrap());
        }
        prop_assert!(map.dirty().is_empty());
    }

    #[test]
    fn prop_dirtiness_is_monotonic(
        base in prop::collection::hash_map(0u8..6, 0u32..4, 1..6),
        first in 4u32..8,
        later in prop::collection::vec(0u32..8, 1..10),
    ) {
        let mut map = tracked(&base);
        let key = *base.keys().next().unwrap();

        // A real change marks the key dirty...
        map.get_mut(&key).unwrap().state = first;
        prop_assert!(map.is_dirty(&key).unwrap());

        // ...and no later state, including the checkpointed one, clears it.
        for state in later.into_iter().chain(std::iter::once(base[&key])) {
            map.get_mut(&key).unwrap().state = state;
            prop_assert!(map.is_dirty(&key).unwrap());
        }
    }

    #[test]
    fn prop_unchanged_state_stays_clean(
        base in base_strategy(),
        repeats in 1usize..10,
    ) {
        let mut map = tracked(&base);
        for _ in 0..repeats {
            for key in base.keys() {
                prop_assert!(!map.is_dirty(key).unwrap());
            }
        }
        prop_assert_eq!(map.known_dirty_len(), 0);
    }
}
