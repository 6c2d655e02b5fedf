//! Duplicate policies: how a `UniqueList` answers "is this value already here?"
//!
//! A policy is injected into the list at construction and owns whatever
//! auxiliary state the membership test needs. The list calls back into the
//! policy on every structural change so the two stay in lock-step; nothing
//! else holds a mutable path to that state.
//!
//! - `LinearScan`: no extra state, membership is an O(n) equality scan of
//!   the sequence itself.
//! - `SetBacked`: a hash set mirrors the sequence's elements for O(1)
//!   membership. Invariant: between public operations the set and the
//!   sequence hold exactly the same values.

use core::fmt;
use core::hash::{BuildHasher, Hash};
use hashbrown::HashSet;
use std::collections::hash_map::RandomState;
use std::sync::Arc;

/// Membership strategy plugged into a `UniqueList`.
///
/// Implementations receive the list's current elements wherever they need
/// them and must keep any auxiliary state equal to that slice. Bulk filters
/// are routed here so a policy can pick the cheapest way to filter both
/// structures together.
pub trait DuplicatePolicy<E> {
    /// Whether `value` is already one of `items`.
    fn contains(&self, items: &[E], value: &E) -> bool;

    /// `value` was just written into the sequence.
    fn record(&mut self, value: &E);

    /// `value` was just taken out of the sequence.
    fn forget(&mut self, value: &E);

    /// Drop every element matching `pred` from `items` and from the
    /// auxiliary state. `pred` must depend on the value only. Returns
    /// whether anything was removed.
    fn remove_if<F>(&mut self, items: &mut Vec<E>, pred: F) -> bool
    where
        F: FnMut(&E) -> bool;

    /// Keep only the elements that also appear in `values`. Returns whether
    /// anything was removed.
    fn retain_all(&mut self, items: &mut Vec<E>, values: &[E]) -> bool;

    /// Forget everything; the list clears its sequence alongside.
    fn clear(&mut self);

    /// A fresh policy of the same flavor describing exactly `items`.
    fn fork(&self, items: &[E]) -> Self
    where
        Self: Sized;

    /// Debug hook: whether the auxiliary state mirrors `items`.
    fn consistent_with(&self, _items: &[E]) -> bool {
        true
    }
}

/// Membership by scanning the sequence. O(n) per mutating call, no
/// auxiliary state to keep in sync.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LinearScan;

impl<E: PartialEq> DuplicatePolicy<E> for LinearScan {
    #[inline]
    fn contains(&self, items: &[E], value: &E) -> bool {
        items.contains(value)
    }

    #[inline]
    fn record(&mut self, _value: &E) {}

    #[inline]
    fn forget(&mut self, _value: &E) {}

    fn remove_if<F>(&mut self, items: &mut Vec<E>, mut pred: F) -> bool
    where
        F: FnMut(&E) -> bool,
    {
        let before = items.len();
        items.retain(|e| !pred(e));
        items.len() != before
    }

    fn retain_all(&mut self, items: &mut Vec<E>, values: &[E]) -> bool {
        let before = items.len();
        items.retain(|e| values.contains(e));
        items.len() != before
    }

    #[inline]
    fn clear(&mut self) {}

    fn fork(&self, _items: &[E]) -> Self {
        LinearScan
    }
}

/// Builds the empty set used when a derived list needs its own backing set.
/// Receives the number of elements about to be inserted.
pub type SetFactory<E, S> = Arc<dyn Fn(usize) -> HashSet<E, S> + Send + Sync>;

/// Membership through a backing hash set kept in lock-step with the list.
pub struct SetBacked<E, S = RandomState> {
    set: HashSet<E, S>,
    factory: Option<SetFactory<E, S>>,
}

impl<E> SetBacked<E>
where
    E: Clone + Hash + Eq,
{
    pub fn new() -> Self {
        Self::with_hasher(Default::default())
    }
}

impl<E> Default for SetBacked<E>
where
    E: Clone + Hash + Eq,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E, S> SetBacked<E, S>
where
    E: Clone + Hash + Eq,
    S: BuildHasher + Clone,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            set: HashSet::with_hasher(hasher),
            factory: None,
        }
    }

    /// Start from a caller-supplied set. Its current contents are discarded
    /// when a list is seeded with this policy; only its hasher is kept.
    pub fn with_set(set: HashSet<E, S>) -> Self {
        Self { set, factory: None }
    }

    /// Use `factory` to create every backing set, including the ones built
    /// for snapshots.
    pub fn with_factory<F>(factory: F) -> Self
    where
        F: Fn(usize) -> HashSet<E, S> + Send + Sync + 'static,
    {
        let factory: SetFactory<E, S> = Arc::new(factory);
        Self {
            set: factory(0),
            factory: Some(factory),
        }
    }

    /// Read-only view of the backing set.
    pub fn set(&self) -> &HashSet<E, S> {
        &self.set
    }

    fn empty_set(&self, capacity: usize) -> HashSet<E, S> {
        match &self.factory {
            Some(factory) => {
                let mut set = factory(capacity);
                set.clear();
                set
            }
            None => {
                tracing::trace!(capacity, "no set factory configured; reusing hasher");
                HashSet::with_capacity_and_hasher(capacity, self.set.hasher().clone())
            }
        }
    }
}

impl<E, S> DuplicatePolicy<E> for SetBacked<E, S>
where
    E: Clone + Hash + Eq,
    S: BuildHasher + Clone,
{
    #[inline]
    fn contains(&self, _items: &[E], value: &E) -> bool {
        self.set.contains(value)
    }

    #[inline]
    fn record(&mut self, value: &E) {
        if !self.set.contains(value) {
            self.set.insert(value.clone());
        }
    }

    #[inline]
    fn forget(&mut self, value: &E) {
        self.set.remove(value);
    }

    fn remove_if<F>(&mut self, items: &mut Vec<E>, mut pred: F) -> bool
    where
        F: FnMut(&E) -> bool,
    {
        // Both structures are filtered by value; neither is derived from the other.
        let before = items.len();
        items.retain(|e| !pred(e));
        self.set.retain(|e| !pred(e));
        items.len() != before
    }

    fn retain_all(&mut self, items: &mut Vec<E>, values: &[E]) -> bool {
        let before = self.set.len();
        self.set.retain(|e| values.contains(e));
        if self.set.len() == before {
            return false;
        }
        if self.set.is_empty() {
            tracing::debug!(removed = items.len(), "retain_all left nothing; clearing list");
            items.clear();
        } else {
            // Filter against the reduced set: O(1) per element instead of a
            // scan of `values`.
            let set = &self.set;
            items.retain(|e| set.contains(e));
        }
        true
    }

    fn clear(&mut self) {
        self.set.clear();
    }

    fn fork(&self, items: &[E]) -> Self {
        let mut set = self.empty_set(items.len());
        set.extend(items.iter().cloned());
        Self {
            set,
            factory: self.factory.clone(),
        }
    }

    fn consistent_with(&self, items: &[E]) -> bool {
        self.set.len() == items.len() && items.iter().all(|e| self.set.contains(e))
    }
}

impl<E, S> Clone for SetBacked<E, S>
where
    E: Clone,
    S: Clone,
{
    fn clone(&self) -> Self {
        Self {
            set: self.set.clone(),
            factory: self.factory.clone(),
        }
    }
}

impl<E: fmt::Debug, S> fmt::Debug for SetBacked<E, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SetBacked")
            .field("set", &self.set)
            .field("factory", &self.factory.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Invariant: the linear policy answers membership from the slice alone.
    #[test]
    fn linear_scan_reads_the_sequence() {
        let items = ["a", "b"];
        assert!(LinearScan.contains(&items[..], &"a"));
        assert!(!LinearScan.contains(&items[..], &"z"));
    }

    /// Invariant: record/forget keep the set equal to the sequence.
    #[test]
    fn set_backed_tracks_record_and_forget() {
        let mut p: SetBacked<&str> = SetBacked::new();
        let mut items = Vec::new();
        for v in ["a", "b", "c"] {
            items.push(v);
            p.record(&v);
        }
        assert!(p.consistent_with(items.as_slice()));
        let gone = items.remove(1);
        p.forget(&gone);
        assert!(p.consistent_with(items.as_slice()));
        assert!(!p.contains(items.as_slice(), &"b"));
    }

    /// Invariant: remove_if filters both structures with the same predicate.
    #[test]
    fn set_backed_remove_if_filters_both() {
        let mut p: SetBacked<i32> = SetBacked::new();
        let mut items: Vec<i32> = (0..10).collect();
        for v in &items {
            p.record(v);
        }
        assert!(p.remove_if(&mut items, |v| v % 2 == 0));
        assert_eq!(items, vec![1, 3, 5, 7, 9]);
        assert!(p.consistent_with(items.as_slice()));
        assert!(!p.remove_if(&mut items, |v| *v > 100));
    }

    /// Invariant: retain_all reports no change when every element survives,
    /// and clears the sequence outright when nothing does.
    #[test]
    fn set_backed_retain_all_paths() {
        let mut p: SetBacked<&str> = SetBacked::new();
        let mut items = vec!["a", "b", "c"];
        for v in &items {
            p.record(v);
        }
        assert!(!p.retain_all(&mut items, &["a", "b", "c", "d"][..]));
        assert!(p.retain_all(&mut items, &["c", "a"][..]));
        assert_eq!(items, vec!["a", "c"]);
        assert!(p.consistent_with(items.as_slice()));
        assert!(p.retain_all(&mut items, &["z"][..]));
        assert!(items.is_empty());
        assert!(p.set().is_empty());
    }

    /// Invariant: fork builds a set scoped to the given elements, through the
    /// configured factory when one exists.
    #[test]
    fn fork_uses_factory_and_scopes_contents() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        let mut p: SetBacked<u32> = SetBacked::with_factory(move |cap| {
            seen.fetch_add(1, Ordering::SeqCst);
            HashSet::with_capacity_and_hasher(cap, RandomState::new())
        });
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        for v in [1, 2, 3, 4] {
            p.record(&v);
        }
        let child = p.fork(&[2u32, 3][..]);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(child.consistent_with(&[2u32, 3][..]));
        assert_eq!(p.set().len(), 4, "parent untouched");
    }

    /// Invariant: without a factory, fork still yields a correctly scoped set.
    #[test]
    fn fork_falls_back_to_hasher_clone() {
        let mut p: SetBacked<u32> = SetBacked::new();
        for v in [7, 8, 9] {
            p.record(&v);
        }
        let child = p.fork(&[9u32][..]);
        assert!(child.consistent_with(&[9u32][..]));
        assert!(!child.set().contains(&7));
    }
}
