use std::collections::HashMap;

use corn_dirty::{DirtyMap, PropertyHolder, PropertySnapshot, Snapshot};

/// Value whose whole observable state is one comparable number
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq)]
pub struct Val {
    pub state: u32,
}

impl Snapshot for Val {
    type State = u32;

    fn snapshot(&self) -> u32 {
        self.state
    }
}

#[allow(dead_code)]
pub fn val(state: u32) -> Val {
    Val { state }
}

/// Item stack described by named properties
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq)]
pub struct ItemStack {
    pub material: String,
    pub amount: u32,
    pub lore: Vec<String>,
    /// Not part of the property snapshot; changes are invisible to comparison
    pub cooldown_ticks: u32,
}

impl PropertyHolder for ItemStack {
    fn properties(&self) -> PropertySnapshot {
        PropertySnapshot::builder()
            .property("material", self.material.as_str())
            .property("amount", self.amount)
            .property("lore", self.lore.clone())
            .build()
    }
}

#[allow(dead_code)]
pub fn item(material: &str, amount: u32) -> ItemStack {
    ItemStack {
        material: material.to_string(),
        amount,
        lore: Vec::new(),
        cooldown_ticks: 0,
    }
}

/// Build a tracked map of `Val`s keyed by owned strings
#[allow(dead_code)]
pub fn val_map(entries: &[(&str, u32)]) -> DirtyMap<String, Val> {
    DirtyMap::new(
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), val(*v)))
            .collect::<HashMap<_, _>>(),
    )
}

/// Build a tracked map of item stacks keyed by slot
#[allow(dead_code)]
pub fn inventory(slots: &[(u8, &str, u32)]) -> DirtyMap<u8, ItemStack> {
    DirtyMap::new(
        slots
            .iter()
            .map(|(slot, material, amount)| (*slot, item(material, *amount)))
            .collect::<HashMap<_, _>>(),
    )
}
