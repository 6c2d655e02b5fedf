//! Snapshot: the immutable result of `UniqueList::subrange`.

use super::UniqueList;
use crate::policy::DuplicatePolicy;
use core::fmt;
use core::ops::Deref;

/// Owned, read-only copy of part of a `UniqueList`.
///
/// Carries its own policy state scoped to the copied elements, so
/// membership stays as cheap as in the source list. Nothing links it back
/// to the source.
#[derive(Clone)]
pub struct Snapshot<E, P> {
    list: UniqueList<E, P>,
}

impl<E, P> Snapshot<E, P>
where
    P: DuplicatePolicy<E>,
{
    pub(super) fn new(list: UniqueList<E, P>) -> Self {
        Self { list }
    }

    pub fn contains(&self, value: &E) -> bool {
        self.list.contains(value)
    }

    pub fn as_slice(&self) -> &[E] {
        self.list.as_slice()
    }

    /// A mutable, equally disconnected copy.
    pub fn to_list(&self) -> UniqueList<E, P>
    where
        E: Clone,
        P: Clone,
    {
        self.list.clone()
    }
}

impl<E, P> Deref for Snapshot<E, P> {
    type Target = [E];

    fn deref(&self) -> &[E] {
        &self.list
    }
}

impl<'a, E, P> IntoIterator for &'a Snapshot<E, P> {
    type Item = &'a E;
    type IntoIter = core::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.iter()
    }
}

impl<E: fmt::Debug, P> fmt::Debug for Snapshot<E, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.list, f)
    }
}

impl<E: PartialEq, P, const N: usize> PartialEq<[E; N]> for Snapshot<E, P> {
    fn eq(&self, other: &[E; N]) -> bool {
        *self.list == other[..]
    }
}
