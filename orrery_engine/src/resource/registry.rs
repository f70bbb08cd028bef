/// Name-addressed catalog of append-only resources.
///
/// Values live in a `GrowableList` and are referenced by slot index; the
/// name map is only consulted when a node is created. Registering a name
/// twice points the name at the newer slot; the older value keeps its
/// slot and stays reachable by index.

use rustc_hash::FxHashMap;
use crate::error::Result;
use crate::utils::GrowableList;

pub struct Registry<T> {
    items: GrowableList<T>,
    names: FxHashMap<String, u32>,
}

impl<T> Registry<T> {
    pub fn new() -> Self {
        Self {
            items: GrowableList::new(),
            names: FxHashMap::default(),
        }
    }

    /// Append `value` under `name` and return its slot
    pub fn insert(&mut self, name: &str, value: T) -> Result<u32> {
        self.names.try_reserve(1)?;
        let slot = self.items.push(value)?;
        self.names.insert(name.to_string(), slot);
        Ok(slot)
    }

    /// Slot currently registered under `name`
    pub fn slot(&self, name: &str) -> Option<u32> {
        self.names.get(name).copied()
    }

    /// Value at `slot` (panics on a slot this registry never returned)
    pub fn get(&self, slot: u32) -> &T {
        self.items.get(slot)
    }

    /// Value registered under `name`
    pub fn by_name(&self, name: &str) -> Option<&T> {
        self.slot(name).map(|slot| self.items.get(slot))
    }

    /// Number of stored values (including shadowed duplicates)
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Registered names, in no particular order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.keys().map(String::as_str)
    }
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
