//! IndexedMap: key -> value store plus an explicit, reorderable key order.
//!
//! Invariants:
//! - `order` holds no duplicate keys.
//! - The keys in `order` are exactly the keys of `entries`.
//! - `order[i]` is the key at logical index `i`.
//!
//! Reordering (`sort_keys`, `swap_keys`, `move_key`) touches `order` only;
//! values never move between keys. Updating an existing key's value keeps
//! its position.

use crate::error::{check_index, CollectionError, Result};
use crate::sync::Synchronized;
use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use hashbrown::{HashMap, HashSet};
use std::collections::hash_map::RandomState;

const PRESENT: &str = "key in order must be present in map";

#[derive(Clone)]
pub struct IndexedMap<K, V, S = RandomState> {
    entries: HashMap<K, V, S>,
    order: Vec<K>, // logical index -> key
}

/// An `IndexedMap` behind one lock; see `Synchronized`.
pub type SyncIndexedMap<K, V, S = RandomState> = Synchronized<IndexedMap<K, V, S>>;

impl<K, V> IndexedMap<K, V>
where
    K: Clone + Eq + Hash,
{
    pub fn new() -> Self {
        Self::with_hasher(Default::default())
    }

    /// An empty map shared behind a single mutex. Compound operations such
    /// as `put` update the entries and the order under the same lock.
    pub fn thread_safe() -> SyncIndexedMap<K, V> {
        Synchronized::new(Self::new())
    }
}

impl<K, V> Default for IndexedMap<K, V>
where
    K: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

/// In-order iterator over `(&K, &V)`.
pub struct Iter<'a, K, V, S> {
    keys: core::slice::Iter<'a, K>,
    entries: &'a HashMap<K, V, S>,
}

impl<'a, K, V, S> Iterator for Iter<'a, K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let k = self.keys.next()?;
        Some((k, self.entries.get(k).expect(PRESENT)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

impl<'a, K, V, S> DoubleEndedIterator for Iter<'a, K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        let k = self.keys.next_back()?;
        Some((k, self.entries.get(k).expect(PRESENT)))
    }
}

impl<'a, K, V, S> ExactSizeIterator for Iter<'a, K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
}

impl<K, V, S> IndexedMap<K, V, S>
where
    K: Clone + Eq + Hash,
    S: BuildHasher + Clone,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            entries: HashMap::with_hasher(hasher),
            order: Vec::new(),
        }
    }

    /// Adopt an existing map and key order after checking that `order`
    /// lists every key of `entries` exactly once.
    pub fn from_parts(entries: HashMap<K, V, S>, order: Vec<K>) -> Result<Self> {
        let mut seen: HashSet<&K, S> =
            HashSet::with_capacity_and_hasher(order.len(), entries.hasher().clone());
        let mut problem = None;
        for k in &order {
            if !entries.contains_key(k) {
                problem = Some("order names a key missing from the map");
                break;
            }
            if !seen.insert(k) {
                problem = Some("order repeats a key");
                break;
            }
        }
        if problem.is_none() && seen.len() != entries.len() {
            problem = Some("map holds keys missing from order");
        }
        drop(seen);
        if let Some(reason) = problem {
            tracing::debug!(reason, "rejected map/order pair");
            return Err(CollectionError::KeyOrderMismatch { reason });
        }
        Ok(Self { entries, order })
    }

    /// Split back into the map and the key order.
    pub fn into_parts(self) -> (HashMap<K, V, S>, Vec<K>) {
        (self.entries, self.order)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains_key<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.entries.contains_key(q)
    }

    pub fn get<Q>(&self, q: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.entries.get(q)
    }

    pub fn get_mut<Q>(&mut self, q: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.entries.get_mut(q)
    }

    /// Insert or update. A new key is appended to the order; an existing key
    /// keeps its position. Returns the previous value.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        if !self.entries.contains_key(&key) {
            self.order.push(key.clone());
        }
        let prev = self.entries.insert(key, value);
        self.debug_check();
        prev
    }

    /// `put` each pair in iteration order.
    pub fn put_all(&mut self, pairs: impl IntoIterator<Item = (K, V)>) {
        for (k, v) in pairs {
            self.put(k, v);
        }
    }

    /// Remove `q` if the order list knows it. The order list decides
    /// membership; the map is only consulted once the key is unlinked.
    pub fn remove<Q>(&mut self, q: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let index = self.order.iter().position(|k| k.borrow() == q)?;
        let _key = self.order.remove(index);
        let value = self.entries.remove(q);
        self.debug_check();
        value
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    /// Value of the key at logical `index`.
    pub fn get_at(&self, index: usize) -> Result<&V> {
        let key = self.key_at(index)?;
        Ok(self.entries.get(key).expect(PRESENT))
    }

    pub fn get_at_mut(&mut self, index: usize) -> Result<&mut V> {
        check_index(index, self.order.len())?;
        let key = &self.order[index];
        Ok(self.entries.get_mut(key).expect(PRESENT))
    }

    pub fn key_at(&self, index: usize) -> Result<&K> {
        check_index(index, self.order.len())?;
        Ok(&self.order[index])
    }

    pub fn index_of<Q>(&self, q: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.order.iter().position(|k| k.borrow() == q)
    }

    /// First key, in order, whose value equals `value`.
    pub fn key_of(&self, value: &V) -> Option<&K>
    where
        V: PartialEq,
    {
        self.order
            .iter()
            .find(|k| self.entries.get(*k) == Some(value))
    }

    /// Read-only view of the key order.
    pub fn keys(&self) -> &[K] {
        &self.order
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }

    pub fn iter(&self) -> Iter<'_, K, V, S> {
        Iter {
            keys: self.order.iter(),
            entries: &self.entries,
        }
    }

    pub fn sort_keys<F>(&mut self, compare: F)
    where
        F: FnMut(&K, &K) -> Ordering,
    {
        self.order.sort_by(compare);
    }

    pub fn swap_keys(&mut self, a: usize, b: usize) -> Result<()> {
        let len = self.order.len();
        check_index(a, len)?;
        check_index(b, len)?;
        self.order.swap(a, b);
        Ok(())
    }

    /// Move `q` so it ends up at `new_index`. Both the key and the index are
    /// validated before the order changes.
    pub fn move_key<Q>(&mut self, q: &Q, new_index: usize) -> Result<()>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let from = self.index_of(q).ok_or(CollectionError::UnknownKey)?;
        check_index(new_index, self.order.len())?;
        let key = self.order.remove(from);
        self.order.insert(new_index, key);
        Ok(())
    }

    #[inline]
    fn debug_check(&self) {
        debug_assert_eq!(
            self.entries.len(),
            self.order.len(),
            "key order out of sync with map"
        );
    }
}

impl<'a, K, V, S> IntoIterator for &'a IndexedMap<K, V, S>
where
    K: Clone + Eq + Hash,
    S: BuildHasher + Clone,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, S> Extend<(K, V)> for IndexedMap<K, V, S>
where
    K: Clone + Eq + Hash,
    S: BuildHasher + Clone,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.put_all(iter);
    }
}

impl<K, V, S> FromIterator<(K, V)> for IndexedMap<K, V, S>
where
    K: Clone + Eq + Hash,
    S: BuildHasher + Clone + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::with_hasher(S::default());
        map.put_all(iter);
        map
    }
}

impl<K, V, S> fmt::Debug for IndexedMap<K, V, S>
where
    K: Clone + Eq + Hash + fmt::Debug,
    V: fmt::Debug,
    S: BuildHasher + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> PartialEq for IndexedMap<K, V, S>
where
    K: Clone + Eq + Hash,
    V: PartialEq,
    S: BuildHasher + Clone,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K, V, S> Eq for IndexedMap<K, V, S>
where
    K: Clone + Eq + Hash,
    V: Eq,
    S: BuildHasher + Clone,
{
}
