//! Ordered collection with monotonically assigned integer keys.
//!
//! `KeyedCollection` backs both the dot store and the shape store. Values live
//! in a dense vector of `(key, value)` pairs kept in ascending key order, next
//! to a counter that hands out the next key. Because keys are only ever
//! appended at the counter, the vector stays sorted without re-sorting.
//!
//! Costs, for the tens of entries an editing session holds:
//!
//! | Operation | Cost |
//! |-----------|------|
//! | `insert_next` | O(1) amortized |
//! | `get` / `set` | O(log n) binary search over the dense store |
//! | `get_by_position` | O(1) |
//! | `delete` | O(n) shift |
//!
//! A deleted key is never handed out again. Only [`KeyedCollection::replace_all`]
//! resets the counter, renumbering the new contents from zero.

#[cfg(test)]
#[path = "keyed_test.rs"]
mod keyed_test;

use serde::{Serialize, Serializer};

/// Stable integer key of an entry.
pub type Key = u32;

/// Ordered associative store keyed by a monotonic counter.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedCollection<T> {
    entries: Vec<(Key, T)>,
    next_key: Key,
}

impl<T> KeyedCollection<T> {
    /// Create an empty collection whose first key will be `0`.
    #[must_use]
    pub fn new() -> Self {
        Self { entries: Vec::new(), next_key: 0 }
    }

    /// Append `value` under a fresh key and return that key.
    pub fn insert_next(&mut self, value: T) -> Key {
        let key = self.next_key;
        self.entries.push((key, value));
        self.next_key += 1;
        key
    }

    /// Replace the value stored under `key`.
    ///
    /// Returns `false` and leaves the collection untouched when `key` is absent;
    /// `set` never creates an entry.
    pub fn set(&mut self, key: Key, value: T) -> bool {
        match self.position_of(key) {
            Some(index) => {
                self.entries[index].1 = value;
                true
            }
            None => false,
        }
    }

    /// Remove the entry under `key`, returning its value if it was present.
    pub fn delete(&mut self, key: Key) -> Option<T> {
        let index = self.position_of(key)?;
        Some(self.entries.remove(index).1)
    }

    /// Look up a value by key.
    #[must_use]
    pub fn get(&self, key: Key) -> Option<&T> {
        self.position_of(key).map(|index| &self.entries[index].1)
    }

    /// Look up a value by its 0-based position in key order.
    #[must_use]
    pub fn get_by_position(&self, index: usize) -> Option<&T> {
        self.entries.get(index).map(|(_, value)| value)
    }

    /// Whether an entry exists under `key`.
    #[must_use]
    pub fn contains(&self, key: Key) -> bool {
        self.position_of(key).is_some()
    }

    /// Clear the collection and re-insert `values` under keys `0, 1, 2, …`.
    ///
    /// This is the only operation that resets the key counter.
    pub fn replace_all<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.entries.clear();
        self.next_key = 0;
        for value in values {
            self.insert_next(value);
        }
    }

    /// The key the next `insert_next` will assign.
    #[must_use]
    pub fn next_key(&self) -> Key {
        self.next_key
    }

    /// Iterate `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (Key, &T)> + ExactSizeIterator {
        self.entries.iter().map(|(key, value)| (*key, value))
    }

    /// Iterate keys in ascending order.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = Key> + ExactSizeIterator + '_ {
        self.entries.iter().map(|(key, _)| *key)
    }

    /// Iterate values in key order.
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.entries.iter().map(|(_, value)| value)
    }

    /// Number of entries currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the collection holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position_of(&self, key: Key) -> Option<usize> {
        match self.entries.binary_search_by_key(&key, |(k, _)| *k) {
            Ok(index) => Some(index),
            Err(_) => None,
        }
    }
}

impl<T: Clone> KeyedCollection<T> {
    /// Values in key order, cloned into a vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.values().cloned().collect()
    }
}

impl<T> Default for KeyedCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for KeyedCollection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut collection = Self::new();
        collection.replace_all(iter);
        collection
    }
}

/// Serializes as a sequence of `[key, value]` pairs in key order.
impl<T: Serialize> Serialize for KeyedCollection<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entries.iter())
    }
}
