//! UniqueList: an ordered, index-addressable sequence that never holds two
//! equal elements.
//!
//! Every insertion path (`insert`, `insert_all`, `push`, `extend`, cursor
//! inserts, seeding) funnels through one primitive: insert `value` at
//! `index`, or do nothing when the policy reports it as already present.
//! A skipped duplicate is not an error; callers see `false`.
//!
//! The duplicate policy `P` owns any auxiliary state (see `policy`). The
//! sequence and the policy are private to this module; the child `cursor`
//! module is the only other code that touches them.
//!
//! Replace merges duplicates: `replace(i, v)` when `v` already sits at
//! `j != i` writes `v` at `i` and then removes the stale copy at `j`, so
//! the list shrinks by one. This differs from `Vec` index assignment and is
//! part of the public contract.

mod cursor;
mod snapshot;

pub use cursor::Cursor;
pub use snapshot::Snapshot;

use crate::error::{check_index, check_position, CollectionError, Result};
use crate::policy::{DuplicatePolicy, LinearScan, SetBacked};
use core::cmp::Ordering;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::ops::{Deref, Range};

/// A `Vec`-like sequence with a no-duplicates invariant enforced by `P`.
#[derive(Clone)]
pub struct UniqueList<E, P = LinearScan> {
    items: Vec<E>,
    policy: P,
}

impl<E> UniqueList<E, LinearScan>
where
    E: PartialEq,
{
    /// Empty list with O(n) membership checks.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            policy: LinearScan,
        }
    }
}

impl<E> UniqueList<E, SetBacked<E>>
where
    E: Clone + Hash + Eq,
{
    /// Empty list backed by a hash set for O(1) membership checks.
    pub fn hashed() -> Self {
        Self {
            items: Vec::new(),
            policy: SetBacked::new(),
        }
    }
}

impl<E, S> UniqueList<E, SetBacked<E, S>>
where
    E: Clone + Hash + Eq,
    S: BuildHasher + Clone,
{
    /// Read-only view of the backing set.
    pub fn set(&self) -> &hashbrown::HashSet<E, S> {
        self.policy.set()
    }
}

impl<E, P> Default for UniqueList<E, P>
where
    P: DuplicatePolicy<E> + Default,
{
    fn default() -> Self {
        Self {
            items: Vec::new(),
            policy: P::default(),
        }
    }
}

impl<E, P> UniqueList<E, P>
where
    P: DuplicatePolicy<E>,
{
    /// Seed a list from possibly duplicate-containing `storage`.
    ///
    /// The input is snapshotted, `storage` and `policy` are emptied, and
    /// every snapshotted element is replayed through `push`. Later
    /// duplicates are dropped; first occurrences keep their relative order.
    /// `storage`'s allocation is reused.
    pub fn with_policy(mut storage: Vec<E>, mut policy: P) -> Self {
        policy.clear();
        if storage.is_empty() {
            return Self {
                items: storage,
                policy,
            };
        }
        let snapshot: Vec<E> = storage.drain(..).collect();
        let seeded = snapshot.len();
        let mut list = Self {
            items: storage,
            policy,
        };
        list.extend(snapshot);
        let dropped = seeded - list.len();
        if dropped > 0 {
            tracing::debug!(seeded, dropped, "dropped duplicates while seeding");
        }
        list.debug_check();
        list
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[E] {
        &self.items
    }

    /// Read-only view of the duplicate policy.
    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn into_vec(self) -> Vec<E> {
        self.items
    }

    /// Membership per the policy: O(1) when set-backed, O(n) otherwise.
    pub fn contains(&self, value: &E) -> bool {
        self.policy.contains(&self.items, value)
    }

    pub fn contains_all<'v>(&self, values: impl IntoIterator<Item = &'v E>) -> bool
    where
        E: 'v,
    {
        values.into_iter().all(|v| self.contains(v))
    }

    /// Position of `value`, if present.
    pub fn index_of(&self, value: &E) -> Option<usize>
    where
        E: PartialEq,
    {
        if !self.contains(value) {
            return None;
        }
        self.items.iter().position(|e| e == value)
    }

    /// Insert `value` at `index` unless it is already present.
    ///
    /// Returns `Ok(false)` for a duplicate, which is checked before the
    /// index; `Err(IndexOutOfBounds)` when a new value targets
    /// `index > len`.
    pub fn insert(&mut self, index: usize, value: E) -> Result<bool> {
        if self.contains(&value) {
            return Ok(false);
        }
        check_position(index, self.items.len())?;
        self.insert_new(index, value);
        Ok(true)
    }

    /// Append `value` unless it is already present.
    pub fn push(&mut self, value: E) -> bool {
        if self.contains(&value) {
            return false;
        }
        let end = self.items.len();
        self.insert_new(end, value);
        true
    }

    /// Insert each of `values` in order starting at `index`, skipping any
    /// value already present by the time it is reached. Accepted values end
    /// up contiguous and in input order. Returns whether anything was added.
    pub fn insert_all(&mut self, index: usize, values: impl IntoIterator<Item = E>) -> Result<bool> {
        check_position(index, self.items.len())?;
        let mut at = index;
        for value in values {
            if !self.contains(&value) {
                self.insert_new(at, value);
                at += 1;
            }
        }
        Ok(at != index)
    }

    /// Append every new value from `values`. Returns whether anything was
    /// added.
    pub fn extend_unique(&mut self, values: impl IntoIterator<Item = E>) -> bool {
        let before = self.items.len();
        self.extend(values);
        self.items.len() != before
    }

    /// Replace the element at `index` with `value`, returning the displaced
    /// element.
    ///
    /// If `value` already sits at another index `j`, that stale copy is
    /// removed after the write and the list shrinks by one. When `j < index`
    /// the written value ends up at `index - 1`.
    pub fn replace(&mut self, index: usize, value: E) -> Result<E>
    where
        E: PartialEq,
    {
        check_index(index, self.items.len())?;
        let existing = self.index_of(&value);
        let displaced = core::mem::replace(&mut self.items[index], value);
        match existing {
            Some(j) if j != index => {
                tracing::debug!(index, stale = j, "replace merged a duplicate");
                let _stale = self.items.remove(j);
            }
            _ => {}
        }
        self.policy.forget(&displaced);
        let written = if matches!(existing, Some(j) if j < index) {
            index - 1
        } else {
            index
        };
        self.policy.record(&self.items[written]);
        self.debug_check();
        Ok(displaced)
    }

    pub fn remove_at(&mut self, index: usize) -> Result<E> {
        check_index(index, self.items.len())?;
        let removed = self.items.remove(index);
        self.policy.forget(&removed);
        Ok(removed)
    }

    /// Remove `value` if present and hand it back.
    pub fn remove(&mut self, value: &E) -> Option<E>
    where
        E: PartialEq,
    {
        let index = self.index_of(value)?;
        let removed = self.items.remove(index);
        self.policy.forget(&removed);
        Some(removed)
    }

    pub fn pop(&mut self) -> Option<E> {
        let removed = self.items.pop()?;
        self.policy.forget(&removed);
        Some(removed)
    }

    /// Remove every element matching `pred`. The predicate is applied to
    /// each structure independently, so it must depend only on the value.
    pub fn remove_if<F>(&mut self, pred: F) -> bool
    where
        F: FnMut(&E) -> bool,
    {
        let removed = self.policy.remove_if(&mut self.items, pred);
        self.debug_check();
        removed
    }

    /// Keep only the elements matching `keep`.
    pub fn retain<F>(&mut self, mut keep: F) -> bool
    where
        F: FnMut(&E) -> bool,
    {
        self.remove_if(|e| !keep(e))
    }

    /// Remove each of `values`, one at a time. Returns whether at least one
    /// removal happened.
    pub fn remove_all<'v>(&mut self, values: impl IntoIterator<Item = &'v E>) -> bool
    where
        E: PartialEq + 'v,
    {
        let mut removed = false;
        for value in values {
            removed |= self.remove(value).is_some();
        }
        removed
    }

    /// Keep only the elements also found in `values`. Returns whether
    /// anything was removed.
    pub fn retain_all(&mut self, values: &[E]) -> bool {
        let changed = self.policy.retain_all(&mut self.items, values);
        self.debug_check();
        changed
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.policy.clear();
    }

    /// Swap two elements. Membership is unaffected.
    pub fn swap(&mut self, a: usize, b: usize) -> Result<()> {
        let len = self.items.len();
        check_index(a, len)?;
        check_index(b, len)?;
        self.items.swap(a, b);
        Ok(())
    }

    pub fn sort(&mut self)
    where
        E: Ord,
    {
        self.items.sort();
    }

    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&E, &E) -> Ordering,
    {
        self.items.sort_by(compare);
    }

    /// Disconnected, read-only copy of `range` with its own membership state.
    ///
    /// Not a live view: later changes to this list do not reach the snapshot
    /// and the snapshot cannot be mutated.
    pub fn subrange(&self, range: Range<usize>) -> Result<Snapshot<E, P>>
    where
        E: Clone,
    {
        let len = self.items.len();
        check_position(range.end, len)?;
        if range.start > range.end {
            return Err(CollectionError::IndexOutOfBounds {
                index: range.start,
                len: range.end,
            });
        }
        let items = self.items[range].to_vec();
        let policy = self.policy.fork(&items);
        Ok(Snapshot::new(Self { items, policy }))
    }

    /// Bidirectional cursor positioned before the first element.
    pub fn cursor(&mut self) -> Cursor<'_, E, P> {
        Cursor::new(self, 0)
    }

    /// Bidirectional cursor positioned before `index`; `index == len` is
    /// the end.
    pub fn cursor_at(&mut self, index: usize) -> Result<Cursor<'_, E, P>> {
        check_position(index, self.items.len())?;
        Ok(Cursor::new(self, index))
    }

    /// Caller has already established that `value` is absent and `index`
    /// is a valid position.
    fn insert_new(&mut self, index: usize, value: E) {
        self.policy.record(&value);
        self.items.insert(index, value);
    }

    #[inline]
    fn debug_check(&self) {
        debug_assert!(
            self.policy.consistent_with(&self.items),
            "duplicate policy out of sync with list contents"
        );
    }
}

impl<E, P> Deref for UniqueList<E, P> {
    type Target = [E];

    fn deref(&self) -> &[E] {
        &self.items
    }
}

impl<E, P> AsRef<[E]> for UniqueList<E, P> {
    fn as_ref(&self) -> &[E] {
        &self.items
    }
}

impl<E, P> Extend<E> for UniqueList<E, P>
where
    P: DuplicatePolicy<E>,
{
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<E, P> FromIterator<E> for UniqueList<E, P>
where
    P: DuplicatePolicy<E> + Default,
{
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let mut list = Self::default();
        list.extend(iter);
        list
    }
}

impl<E, P> From<Vec<E>> for UniqueList<E, P>
where
    P: DuplicatePolicy<E> + Default,
{
    fn from(items: Vec<E>) -> Self {
        Self::with_policy(items, P::default())
    }
}

impl<'a, E, P> IntoIterator for &'a UniqueList<E, P> {
    type Item = &'a E;
    type IntoIter = core::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<E, P> IntoIterator for UniqueList<E, P> {
    type Item = E;
    type IntoIter = std::vec::IntoIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<E: fmt::Debug, P> fmt::Debug for UniqueList<E, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

impl<E: PartialEq, P, Q> PartialEq<UniqueList<E, Q>> for UniqueList<E, P> {
    fn eq(&self, other: &UniqueList<E, Q>) -> bool {
        self.items == other.items
    }
}

impl<E: Eq, P> Eq for UniqueList<E, P> {}

impl<E: PartialEq, P> PartialEq<[E]> for UniqueList<E, P> {
    fn eq(&self, other: &[E]) -> bool {
        self.items == other
    }
}

impl<E: PartialEq, P, const N: usize> PartialEq<[E; N]> for UniqueList<E, P> {
    fn eq(&self, other: &[E; N]) -> bool {
        self.items == other
    }
}

impl<E: PartialEq, P> PartialEq<Vec<E>> for UniqueList<E, P> {
    fn eq(&self, other: &Vec<E>) -> bool {
        &self.items == other
    }
}
