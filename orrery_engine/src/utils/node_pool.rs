use rustc_hash::FxHashSet;
use slotmap::{Key, SlotMap};
use crate::error::{Error, Result};

struct Entry<T> {
    value: T,
    live: bool,
}

/// Fixed-capacity pool with deferred insertion and removal.
///
/// Values are addressed by generation-checked slotmap keys: a key whose
/// value was freed never resolves to a different value, even after the
/// slot is reused.
///
/// Inserts and frees are queued and only applied by `flush_inserts` /
/// `flush_frees`, so iteration and lookups stay stable for the whole
/// frame. A pending insert is invisible to `get` and iteration until
/// flushed; a pending free stays visible until flushed.
///
/// # Example
///
/// ```ignore
/// let mut pool: NodePool<NodeKey, u32> = NodePool::with_capacity(16);
/// let key = pool.insert_deferred(7)?;
/// assert!(pool.get(key).is_none());
/// pool.flush_inserts()?;
/// assert_eq!(pool.get(key), Some(&7));
/// ```
pub struct NodePool<K: Key, T> {
    slots: SlotMap<K, Entry<T>>,
    capacity: usize,
    live: usize,
    pending_inserts: Vec<K>,
    pending_frees: FxHashSet<K>,
    /// Keys made live by flush_inserts, not yet consumed
    inserted: Vec<K>,
}

impl<K: Key, T> NodePool<K, T> {
    /// Create an empty pool holding at most `capacity` values (live + pending)
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: SlotMap::with_key(),
            capacity,
            live: 0,
            pending_inserts: Vec::new(),
            pending_frees: FxHashSet::default(),
            inserted: Vec::new(),
        }
    }

    /// Queue `value` for insertion and return its key
    ///
    /// The key resolves once `flush_inserts` has run.
    ///
    /// # Errors
    ///
    /// `Error::OutOfMemory` when the pool is at capacity or the queue
    /// cannot grow. Nothing is inserted in that case.
    pub fn insert_deferred(&mut self, value: T) -> Result<K> {
        if self.slots.len() >= self.capacity {
            return Err(Error::OutOfMemory);
        }
        self.pending_inserts.try_reserve(1)?;
        let key = self.slots.insert(Entry { value, live: false });
        self.pending_inserts.push(key);
        Ok(key)
    }

    /// Queue removal of a live or pending value
    ///
    /// Returns `Ok(false)` for unknown or stale keys. Freeing the same key
    /// twice before a flush is a no-op.
    pub fn free_deferred(&mut self, key: K) -> Result<bool> {
        if !self.slots.contains_key(key) {
            return Ok(false);
        }
        self.pending_frees.try_reserve(1)?;
        self.pending_frees.insert(key);
        Ok(true)
    }

    /// Remove every queued value; their keys become stale
    pub fn flush_frees(&mut self) {
        for key in self.pending_frees.drain() {
            if let Some(entry) = self.slots.remove(key) {
                if entry.live {
                    self.live -= 1;
                }
            }
        }
    }

    /// Make every queued value live
    ///
    /// Values freed before they were flushed are skipped. The keys made
    /// live are kept for `pending_inserts`.
    pub fn flush_inserts(&mut self) -> Result<()> {
        self.inserted.try_reserve(self.pending_inserts.len())?;
        for key in self.pending_inserts.drain(..) {
            if let Some(entry) = self.slots.get_mut(key) {
                entry.live = true;
                self.live += 1;
                self.inserted.push(key);
            }
        }
        Ok(())
    }

    /// Keys made live by insert flushes and not yet consumed, in flush
    /// order
    ///
    /// A key freed since stays listed; check it with `get`.
    pub fn pending_inserts(&self) -> &[K] {
        &self.inserted
    }

    /// Forget the first `count` keys of `pending_inserts`
    pub fn consume_pending_inserts(&mut self, count: usize) {
        let count = count.min(self.inserted.len());
        self.inserted.drain(..count);
    }

    /// Liveness-checked lookup
    ///
    /// `None` for pending, freed and unknown keys.
    pub fn get(&self, key: K) -> Option<&T> {
        self.slots.get(key).filter(|entry| entry.live).map(|entry| &entry.value)
    }

    /// Liveness-checked mutable lookup
    pub fn get_mut(&mut self, key: K) -> Option<&mut T> {
        self.slots.get_mut(key).filter(|entry| entry.live).map(|entry| &mut entry.value)
    }

    /// Whether `key` resolves to a live value
    pub fn contains(&self, key: K) -> bool {
        self.get(key).is_some()
    }

    /// Access a pending (not yet flushed) value
    pub fn get_pending(&self, key: K) -> Option<&T> {
        self.slots.get(key).filter(|entry| !entry.live).map(|entry| &entry.value)
    }

    /// Iterate over live values
    pub fn iter(&self) -> impl Iterator<Item = (K, &T)> {
        self.slots.iter().filter(|(_, entry)| entry.live).map(|(key, entry)| (key, &entry.value))
    }

    /// Iterate mutably over live values
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (K, &mut T)> {
        self.slots.iter_mut().filter(|(_, entry)| entry.live).map(|(key, entry)| (key, &mut entry.value))
    }

    /// Keys of live values
    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.iter().map(|(key, _)| key)
    }

    /// Number of live values
    pub fn len(&self) -> usize {
        self.live
    }

    /// Whether no value is live
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Number of allocated slots (live + pending insert)
    pub fn allocated(&self) -> usize {
        self.slots.len()
    }

    /// Maximum number of allocated slots
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
#[path = "node_pool_tests.rs"]
mod tests;
