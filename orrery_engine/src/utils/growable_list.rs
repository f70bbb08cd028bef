/// Append-only indexed list with fallible growth.
///
/// Slot indices are stable for the lifetime of the list: there is no
/// removal. Indexing with an index the list never returned is a bug and
/// panics.

use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct GrowableList<T> {
    items: Vec<T>,
}

impl<T> GrowableList<T> {
    /// Create an empty list
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Append `value`, returning its slot index
    ///
    /// # Errors
    ///
    /// `Error::OutOfMemory` when the list cannot grow.
    pub fn push(&mut self, value: T) -> Result<u32> {
        let slot = u32::try_from(self.items.len()).map_err(|_| Error::OutOfMemory)?;
        self.items.try_reserve(1)?;
        self.items.push(value);
        Ok(slot)
    }

    /// Value at `slot`
    ///
    /// # Panics
    ///
    /// If `slot` was not returned by `push`.
    pub fn get(&self, slot: u32) -> &T {
        &self.items[slot as usize]
    }

    /// Value at `slot`, or `None` when out of range
    pub fn try_get(&self, slot: u32) -> Option<&T> {
        self.items.get(slot as usize)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate in slot order
    pub fn iter(&self) -> impl Iterator<Item = (u32, &T)> {
        self.items.iter().enumerate().map(|(slot, item)| (slot as u32, item))
    }
}

impl<T> Default for GrowableList<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "growable_list_tests.rs"]
mod tests;
