//! Fixed-capacity record pool with stable keys.
//!
//! A [`Pool`] owns payload records and hands out integer keys that stay
//! valid until the record is explicitly removed. Heaps and queues then
//! order *keys* instead of records, so their swaps never move payloads.
//!
//! Vacant slots are tracked with a LIFO free stack: insertion and removal
//! are O(1), and a freed slot is the first one reused. Keys are plain
//! indices: after a remove, a later insert may hand the same key out
//! again, and it is the caller's job not to hold stale keys across that.

use crate::Key;

use std::fmt;

/// Error returned when a [`Pool`] or heap is at capacity.
///
/// Carries the rejected value so the caller can retry or drop it
/// deliberately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Full<T>(pub T);

impl<T> Full<T> {
    /// Returns the value that could not be inserted.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Display for Full<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("container is full")
    }
}

impl<T: fmt::Debug> std::error::Error for Full<T> {}

/// Fixed-capacity slot pool with O(1) insert, remove, and lookup.
///
/// # Example
///
/// ```
/// use tempo_collections::Pool;
///
/// let mut pool: Pool<u64> = Pool::with_capacity(4);
///
/// let key = pool.try_insert(42).unwrap();
/// assert_eq!(pool.get(key), Some(&42));
///
/// assert_eq!(pool.remove(key), Some(42));
/// assert_eq!(pool.get(key), None);
/// ```
pub struct Pool<T, K: Key = u32> {
    entries: Vec<Option<T>>,
    free: Vec<K>,
}

impl<T, K: Key> Pool<T, K> {
    /// Creates a pool with exactly `capacity` slots.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0 or does not fit below the key type's
    /// sentinel.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be > 0");
        assert!(
            capacity < K::NONE.as_usize(),
            "capacity exceeds key type range"
        );

        let mut entries = Vec::with_capacity(capacity);
        entries.resize_with(capacity, || None);

        // Reversed so the stack pops slot 0 first.
        let free = (0..capacity).rev().map(K::from_usize).collect();

        Self { entries, free }
    }

    /// Returns the number of slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Returns the number of occupied slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len() - self.free.len()
    }

    /// Returns `true` if no slots are occupied.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.free.len() == self.entries.len()
    }

    /// Returns `true` if every slot is occupied.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.free.is_empty()
    }

    /// Inserts a value, returning its key.
    ///
    /// # Errors
    ///
    /// Returns `Err(Full(value))` when every slot is occupied.
    #[inline]
    pub fn try_insert(&mut self, value: T) -> Result<K, Full<T>> {
        match self.free.pop() {
            Some(key) => {
                self.entries[key.as_usize()] = Some(value);
                Ok(key)
            }
            None => Err(Full(value)),
        }
    }

    /// Removes and returns the value at `key`.
    ///
    /// Returns `None` for vacant or out-of-range keys; removing twice is a
    /// no-op.
    #[inline]
    pub fn remove(&mut self, key: K) -> Option<T> {
        let value = self.entries.get_mut(key.as_usize())?.take()?;
        self.free.push(key);
        Some(value)
    }

    /// Returns a reference to the value at `key`, if occupied.
    #[inline]
    pub fn get(&self, key: K) -> Option<&T> {
        self.entries.get(key.as_usize())?.as_ref()
    }

    /// Returns a mutable reference to the value at `key`, if occupied.
    #[inline]
    pub fn get_mut(&mut self, key: K) -> Option<&mut T> {
        self.entries.get_mut(key.as_usize())?.as_mut()
    }

    /// Returns `true` if `key` refers to an occupied slot.
    #[inline]
    pub fn contains(&self, key: K) -> bool {
        matches!(self.entries.get(key.as_usize()), Some(Some(_)))
    }

    /// Drops every record and returns all slots to the free stack.
    ///
    /// Keys handed out before the clear must not be used afterwards; any
    /// structure ordering those keys must be cleared in the same breath.
    pub fn clear(&mut self) {
        for entry in &mut self.entries {
            *entry = None;
        }
        self.free.clear();
        self.free
            .extend((0..self.entries.len()).rev().map(K::from_usize));
    }
}

impl<T, K: Key> fmt::Debug for Pool<T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pool")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish_non_exhaustive()
    }
}
