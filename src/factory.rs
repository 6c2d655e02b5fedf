//! Factory functions for building unique lists from existing data.
//!
//! Seeding replays every input element through the list's own insert
//! primitive, so deduplication here behaves exactly like inserting the
//! elements one by one: first occurrences win and keep their order.

use crate::policy::{LinearScan, SetBacked};
use crate::unique_list::UniqueList;
use core::hash::{BuildHasher, Hash};

/// Empty list with linear-scan membership.
pub fn linear<E: PartialEq>() -> UniqueList<E, LinearScan> {
    UniqueList::new()
}

/// Linear-scan list seeded from `items`, reusing its allocation.
pub fn linear_from<E: PartialEq>(items: Vec<E>) -> UniqueList<E, LinearScan> {
    UniqueList::with_policy(items, LinearScan)
}

/// Empty set-backed list.
pub fn hashed<E>() -> UniqueList<E, SetBacked<E>>
where
    E: Clone + Hash + Eq,
{
    UniqueList::hashed()
}

/// Set-backed list seeded from `items`.
pub fn hashed_from<E>(items: Vec<E>) -> UniqueList<E, SetBacked<E>>
where
    E: Clone + Hash + Eq,
{
    UniqueList::with_policy(items, SetBacked::new())
}

/// Set-backed list seeded from `items` using a caller-configured policy
/// (custom hasher or set factory). Any contents already in the policy's
/// set are discarded before seeding.
pub fn hashed_from_with<E, S>(items: Vec<E>, policy: SetBacked<E, S>) -> UniqueList<E, SetBacked<E, S>>
where
    E: Clone + Hash + Eq,
    S: BuildHasher + Clone,
{
    UniqueList::with_policy(items, policy)
}
