//! Synchronized: a whole collection behind one `parking_lot::Mutex`.
//!
//! Both internal structures of a list or map sit under the same lock, so a
//! compound operation (`put` touching entries and order, a list insert
//! touching sequence and set) is never observed half-applied by another
//! thread. For several calls that must appear atomic together, hold
//! `lock()` across them.
//!
//! The lock stays held while user code runs inside an operation: `Eq`,
//! `Hash` and `Ord` impls, `sort_keys` comparators, `with` closures.
//! Calling back into the same `Synchronized` from there deadlocks.

use crate::error::Result;
use crate::indexed_map::IndexedMap;
use crate::policy::DuplicatePolicy;
use crate::unique_list::UniqueList;
use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use parking_lot::{Mutex, MutexGuard};

pub struct Synchronized<T> {
    inner: Mutex<T>,
}

impl<T> Synchronized<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(value),
        }
    }

    /// Exclusive access for as long as the guard lives.
    pub fn lock(&self) -> MutexGuard<'_, T> {
        self.inner.lock()
    }

    /// Run `f` with exclusive access.
    pub fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut guard)
    }

    pub fn get_mut(&mut self) -> &mut T {
        self.inner.get_mut()
    }

    pub fn into_inner(self) -> T {
        self.inner.into_inner()
    }
}

impl<T: Default> Default for Synchronized<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Synchronized<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Synchronized")
            .field("inner", &self.inner)
            .finish()
    }
}

impl<K, V, S> Synchronized<IndexedMap<K, V, S>>
where
    K: Clone + Eq + Hash,
    S: BuildHasher + Clone,
{
    pub fn put(&self, key: K, value: V) -> Option<V> {
        self.inner.lock().put(key, value)
    }

    pub fn remove<Q>(&self, q: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.lock().remove(q)
    }

    pub fn contains_key<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.lock().contains_key(q)
    }

    pub fn get_cloned<Q>(&self, q: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: Clone,
    {
        self.inner.lock().get(q).cloned()
    }

    pub fn get_at_cloned(&self, index: usize) -> Result<V>
    where
        V: Clone,
    {
        self.inner.lock().get_at(index).cloned()
    }

    pub fn key_at_cloned(&self, index: usize) -> Result<K> {
        self.inner.lock().key_at(index).cloned()
    }

    pub fn index_of<Q>(&self, q: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.inner.lock().index_of(q)
    }

    pub fn swap_keys(&self, a: usize, b: usize) -> Result<()> {
        self.inner.lock().swap_keys(a, b)
    }

    pub fn move_key<Q>(&self, q: &Q, new_index: usize) -> Result<()>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.inner.lock().move_key(q, new_index)
    }

    pub fn sort_keys<F>(&self, compare: F)
    where
        F: FnMut(&K, &K) -> Ordering,
    {
        self.inner.lock().sort_keys(compare)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn clear(&self) {
        self.inner.lock().clear()
    }

    /// Consistent copy taken under the lock.
    pub fn snapshot(&self) -> IndexedMap<K, V, S>
    where
        V: Clone,
    {
        self.inner.lock().clone()
    }
}

impl<E, P> Synchronized<UniqueList<E, P>>
where
    P: DuplicatePolicy<E>,
{
    pub fn push(&self, value: E) -> bool {
        self.inner.lock().push(value)
    }

    pub fn insert(&self, index: usize, value: E) -> Result<bool> {
        self.inner.lock().insert(index, value)
    }

    pub fn remove(&self, value: &E) -> Option<E>
    where
        E: PartialEq,
    {
        self.inner.lock().remove(value)
    }

    pub fn contains(&self, value: &E) -> bool {
        self.inner.lock().contains(value)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn to_vec(&self) -> Vec<E>
    where
        E: Clone,
    {
        self.inner.lock().to_vec()
    }
}
