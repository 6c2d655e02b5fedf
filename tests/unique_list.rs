// UniqueList integration test suite.
//
// Each test documents what behavior is being verified and which
// invariants are assumed or asserted. The core invariants exercised:
// - Uniqueness: no two positions ever hold equal elements.
// - Dedup-on-seed: building from dirty data keeps first occurrences.
// - Duplicate inserts: silent no-ops that report `false`.
// - Replace merges: writing a value present elsewhere drops the stale copy.
// - Set sync: the backing set mirrors the list after every operation,
//   including mutation through a cursor.
// - Snapshot isolation: subranges are disconnected copies.
use unique_collections::factory;
use unique_collections::{CollectionError, HashedUniqueList, LinearScan, SetBacked, UniqueList};

fn assert_synced<E, S>(l: &UniqueList<E, SetBacked<E, S>>)
where
    E: Clone + std::hash::Hash + Eq + std::fmt::Debug,
    S: std::hash::BuildHasher + Clone,
{
    assert_eq!(l.set().len(), l.len(), "set size differs from list: {:?}", l);
    for e in l.iter() {
        assert!(l.set().contains(e), "set lost {:?}", e);
    }
}

// Test: dedupe on seed for both variants.
// Assumes: factory functions replay inputs through the insert primitive.
// Verifies: [a, b, a, c] -> [a, b, c].
#[test]
fn seed_keeps_first_occurrence() {
    let l = factory::linear_from(vec!["a", "b", "a", "c"]);
    assert_eq!(l, ["a", "b", "c"]);
    let h = factory::hashed_from(vec!["a", "b", "a", "c"]);
    assert_eq!(h, ["a", "b", "c"]);
    assert_synced(&h);
}

// Test: insert idempotence under duplication.
// Assumes: membership checked before any structural change.
// Verifies: sequence unchanged, no-op reported, length delta zero.
#[test]
fn duplicate_insert_reports_noop() {
    let mut l = factory::hashed_from(vec!["a".to_string(), "b".to_string()]);
    let before = l.len();
    assert_eq!(l.insert(1, "a".to_string()), Ok(false));
    assert!(!l.push("a".to_string()));
    assert!(!l.extend_unique(["b".to_string()]));
    assert_eq!(l.len(), before);
    assert_eq!(l, ["a", "b"].map(String::from));
    assert_synced(&l);
}

// Test: replace merges a duplicate.
// Assumes: stale copy removed after the positional write.
// Verifies: [a, b].replace(0, b) -> [b].
#[test]
fn replace_merges_duplicate() {
    let mut h = factory::hashed_from(vec!["a", "b"]);
    assert_eq!(h.replace(0, "b"), Ok("a"));
    assert_eq!(h, ["b"]);
    assert_synced(&h);

    let mut l = factory::linear_from(vec!["a", "b"]);
    assert_eq!(l.replace(0, "b"), Ok("a"));
    assert_eq!(l.len(), 1);
}

// Test: retain_all with no overlap.
// Assumes: empty intersection clears the list outright.
// Verifies: [a, b, c].retain_all([z]) -> [].
#[test]
fn retain_all_disjoint_clears() {
    let mut h = factory::hashed_from(vec!["a", "b", "c"]);
    assert!(h.retain_all(&["z"]));
    assert!(h.is_empty());
    assert_synced(&h);
    assert!(!h.retain_all(&["z"]), "nothing left to remove");
}

// Test: snapshot isolation.
// Assumes: subrange copies elements and builds its own set.
// Verifies: mutating the source after the snapshot leaves it untouched.
#[test]
fn subrange_snapshot_is_isolated() {
    let mut h: HashedUniqueList<u32> = (0..10).collect();
    let snap = h.subrange(2..5).unwrap();
    assert_eq!(snap, [2, 3, 4]);

    h.remove(&3);
    h.replace(2, 99).unwrap();
    h.insert(0, 42).unwrap();
    assert_eq!(snap, [2, 3, 4]);
    assert!(snap.contains(&3));
    assert!(!snap.contains(&0));

    // A mutable copy of the snapshot is equally disconnected.
    let mut copy = snap.to_list();
    copy.push(7);
    assert_eq!(copy, [2, 3, 4, 7]);
    assert_eq!(snap.len(), 3);
}

// Test: out-of-range indices.
// Assumes: every index-taking operation validates before mutating.
// Verifies: IndexOutOfBounds with the offending index and current length.
#[test]
fn invalid_indices_fail() {
    fn oob<T>(index: usize) -> Result<T, CollectionError> {
        Err(CollectionError::IndexOutOfBounds { index, len: 2 })
    }
    let mut l: UniqueList<i32, LinearScan> = factory::linear_from(vec![1, 2]);
    assert_eq!(l.insert(3, 9), oob(3));
    assert_eq!(l.remove_at(2), oob(2));
    assert_eq!(l.replace(2, 9), oob(2));
    assert_eq!(l.insert_all(3, [7]), oob(3));
    assert!(l.subrange(1..3).is_err());
    assert!(l.cursor_at(3).is_err());
    assert_eq!(l, [1, 2]);
}

// Test: cursor-driven mutation keeps the set in sync.
// Assumes: remove/insert through the cursor apply to both structures.
// Verifies: set equals list after a mixed traversal; set() is rejected.
#[test]
fn cursor_mutation_syncs_set() {
    let mut h: HashedUniqueList<u32> = (1..=6).collect();
    {
        let mut c = h.cursor();
        while let Some(&v) = c.next() {
            if v % 2 == 0 {
                c.remove().unwrap();
                // Re-inserting a present odd value is dropped.
                assert!(!c.insert(1));
            } else if v == 5 {
                assert!(c.insert(50));
            }
        }
        assert!(matches!(c.set(0), Err(CollectionError::Unsupported(_))));
    }
    assert_eq!(h, [1, 3, 5, 50]);
    assert_synced(&h);
}

// Test: bulk removal helpers.
// Assumes: remove_all is repeated single removal; remove_if applies one
// value-only predicate to both structures.
// Verifies: return values and final contents.
#[test]
fn bulk_removal() {
    let mut h = factory::hashed_from(vec![1, 2, 3, 4, 5, 6]);
    assert!(h.remove_all(&[2, 20]));
    assert!(!h.remove_all(&[20]));
    assert!(h.remove_if(|v| *v > 4));
    assert_eq!(h, [1, 3, 4]);
    assert_synced(&h);
}

// Test: custom set factory for derived sets.
// Assumes: snapshots build their set through the configured factory.
// Verifies: the factory runs for the snapshot and contents are scoped.
#[test]
fn snapshot_uses_configured_factory() {
    use std::collections::hash_map::RandomState;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let policy: SetBacked<&str> = SetBacked::with_factory(move |cap| {
        counter.fetch_add(1, Ordering::SeqCst);
        hashbrown::HashSet::with_capacity_and_hasher(cap, RandomState::new())
    });
    let h = factory::hashed_from_with(vec!["a", "b", "c"], policy);
    let before = calls.load(Ordering::SeqCst);
    let snap = h.subrange(0..2).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), before + 1);
    assert!(snap.contains(&"a"));
    assert!(!snap.contains(&"c"));
}
