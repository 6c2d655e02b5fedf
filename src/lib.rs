//! unique-collections: duplicate-free, index-addressable lists and an
//! index-addressable ordered map.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: sequences and maps whose two internal structures (elements plus
//!   membership set, entries plus key order) can never drift apart, no
//!   matter which public path mutates them.
//! - Layers:
//!   - DuplicatePolicy<E>: pluggable membership strategy. `LinearScan`
//!     scans the sequence; `SetBacked` mirrors it in a hash set.
//!   - UniqueList<E, P>: one concrete `Vec`-backed sequence. Every insert
//!     path funnels into "insert at index unless present"; every removal
//!     and filter calls back into the policy.
//!   - Cursor: bidirectional traversal that can remove/insert while keeping
//!     the policy in step. Lives in a child module of the list so it is the
//!     only code besides the list itself that reaches the private fields.
//!   - IndexedMap<K, V, S>: hashbrown map plus an explicit key order that
//!     supports index lookup and reordering.
//!   - Synchronized<T>: one mutex around a whole list or map.
//!
//! Constraints
//! - Duplicate inserts are silent no-ops reporting `false`; never errors.
//! - Index-taking operations return `Result` with `IndexOutOfBounds`.
//! - No `DerefMut` and no `&mut` access to auxiliary state: read-only views
//!   only (`as_slice`, `set`, `keys`, `policy`).
//! - `UniqueList::replace` merges duplicates: writing a value that already
//!   sits elsewhere removes the stale copy, shrinking the list by one.
//! - `UniqueList::subrange` returns a disconnected, read-only `Snapshot`,
//!   not a live view.
//!
//! Concurrency
//! - The plain types are ordinary single-owner structures (`&mut self` for
//!   every mutation). `Synchronized` guards both internal structures with a
//!   single `parking_lot::Mutex`, so compound operations are atomic with
//!   respect to each other. Hold `lock()` to make several calls atomic.
//!
//! Derived sets
//! - A snapshot needs its own backing set. `SetBacked::with_factory`
//!   supplies the constructor; without one the parent's hasher is cloned.
//!
//! Notes and non-goals
//! - No persistence.
//! - No live sub-views.
//! - Logging is `tracing` at debug/trace level; the crate installs no
//!   subscriber.

mod error;
pub mod factory;
mod indexed_map;
mod indexed_map_proptest;
pub mod policy;
#[cfg(feature = "serde")]
mod serde_impls;
mod sync;
mod unique_list;
mod unique_list_proptest;

// Public surface
pub use error::{CollectionError, Result};
pub use indexed_map::{IndexedMap, Iter, SyncIndexedMap};
pub use policy::{DuplicatePolicy, LinearScan, SetBacked, SetFactory};
pub use sync::Synchronized;
pub use unique_list::{Cursor, Snapshot, UniqueList};

/// `UniqueList` with O(1) membership through a backing hash set.
pub type HashedUniqueList<E, S = std::collections::hash_map::RandomState> =
    UniqueList<E, SetBacked<E, S>>;
