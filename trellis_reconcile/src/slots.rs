// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Index-keyed storage for cache entries.

use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::fmt::Debug;

use hashbrown::HashMap;

/// Storage for cache entries keyed by row or column index.
///
/// Implementations differ only in cost: both must behave like a map.
pub trait Slots<V>: Default + Debug {
    /// Entry at `key`.
    fn get(&self, key: usize) -> Option<&V>;

    /// Mutable entry at `key`.
    fn get_mut(&mut self, key: usize) -> Option<&mut V>;

    /// Returns `true` if `key` is present.
    fn contains(&self, key: usize) -> bool {
        self.get(key).is_some()
    }

    /// Inserts an entry, returning the previous one.
    fn insert(&mut self, key: usize, value: V) -> Option<V>;

    /// Removes an entry.
    fn remove(&mut self, key: usize) -> Option<V>;

    /// Number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if there are no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All keys in ascending order.
    fn keys(&self) -> Vec<usize>;

    /// Entries in unspecified order.
    fn iter<'a>(&'a self) -> impl Iterator<Item = (usize, &'a V)> + 'a
    where
        V: 'a;

    /// Entry with the smallest key greater than `key`.
    fn next_after(&self, key: usize) -> Option<(usize, &V)>;

    /// Removes every entry, in unspecified order.
    fn drain(&mut self) -> Vec<(usize, V)>;
}

/// Hash-addressed slots. Cheap point access, unordered iteration.
#[derive(Clone, Debug)]
pub struct HashSlots<V> {
    map: HashMap<usize, V>,
}

impl<V> Default for HashSlots<V> {
    fn default() -> Self {
        Self {
            map: HashMap::new(),
        }
    }
}

impl<V: Debug> Slots<V> for HashSlots<V> {
    fn get(&self, key: usize) -> Option<&V> {
        self.map.get(&key)
    }

    fn get_mut(&mut self, key: usize) -> Option<&mut V> {
        self.map.get_mut(&key)
    }

    fn insert(&mut self, key: usize, value: V) -> Option<V> {
        self.map.insert(key, value)
    }

    fn remove(&mut self, key: usize) -> Option<V> {
        self.map.remove(&key)
    }

    fn len(&self) -> usize {
        self.map.len()
    }

    fn keys(&self) -> Vec<usize> {
        let mut keys: Vec<usize> = self.map.keys().copied().collect();
        keys.sort_unstable();
        keys
    }

    fn iter<'a>(&'a self) -> impl Iterator<Item = (usize, &'a V)> + 'a
    where
        V: 'a,
    {
        self.map.iter().map(|(k, v)| (*k, v))
    }

    fn next_after(&self, key: usize) -> Option<(usize, &V)> {
        self.map
            .iter()
            .filter(|(k, _)| **k > key)
            .min_by_key(|(k, _)| **k)
            .map(|(k, v)| (*k, v))
    }

    fn drain(&mut self) -> Vec<(usize, V)> {
        self.map.drain().collect()
    }
}

/// Slots kept sorted by key.
///
/// Point access is a binary search; inserting or removing at either end is
/// `O(1)` amortized, which is where edge scrolling touches the structure.
#[derive(Clone, Debug)]
pub struct OrderedSlots<V> {
    entries: VecDeque<(usize, V)>,
}

impl<V> Default for OrderedSlots<V> {
    fn default() -> Self {
        Self {
            entries: VecDeque::new(),
        }
    }
}

impl<V> OrderedSlots<V> {
    fn find(&self, key: usize) -> Result<usize, usize> {
        self.entries.binary_search_by_key(&key, |(k, _)| *k)
    }
}

impl<V: Debug> Slots<V> for OrderedSlots<V> {
    fn get(&self, key: usize) -> Option<&V> {
        let i = self.find(key).ok()?;
        self.entries.get(i).map(|(_, v)| v)
    }

    fn get_mut(&mut self, key: usize) -> Option<&mut V> {
        let i = self.find(key).ok()?;
        self.entries.get_mut(i).map(|(_, v)| v)
    }

    fn insert(&mut self, key: usize, value: V) -> Option<V> {
        match self.find(key) {
            Ok(i) => self
                .entries
                .get_mut(i)
                .map(|(_, v)| core::mem::replace(v, value)),
            Err(i) => {
                self.entries.insert(i, (key, value));
                None
            }
        }
    }

    fn remove(&mut self, key: usize) -> Option<V> {
        let i = self.find(key).ok()?;
        self.entries.remove(i).map(|(_, v)| v)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn keys(&self) -> Vec<usize> {
        self.entries.iter().map(|(k, _)| *k).collect()
    }

    fn iter<'a>(&'a self) -> impl Iterator<Item = (usize, &'a V)> + 'a
    where
        V: 'a,
    {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    fn next_after(&self, key: usize) -> Option<(usize, &V)> {
        let i = self.entries.partition_point(|(k, _)| *k <= key);
        self.entries.get(i).map(|(k, v)| (*k, v))
    }

    fn drain(&mut self) -> Vec<(usize, V)> {
        self.entries.drain(..).collect()
    }
}
