#![cfg(test)]

// Property tests for UniqueList kept inside the crate so they can inspect the
// policy state through `consistent_with` for both policies.

use crate::error::CollectionError;
use crate::policy::{DuplicatePolicy, LinearScan, SetBacked};
use crate::unique_list::UniqueList;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::collections::HashSet;

// Pool-indexed operations: indices shrink to earlier values, positions are
// raw seeds reduced modulo the current length at execution time.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, usize),
    Push(usize),
    InsertAll(usize, Vec<usize>),
    Replace(usize, usize),
    RemoveAt(usize),
    Remove(usize),
    RemoveIf(bool),
    RetainAll(Vec<usize>),
    CursorRemove(usize),
    CursorInsert(usize, usize),
    Subrange(usize, usize),
    Sort,
    Clear,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,3}", 1..=8).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let seed = 0usize..64;
        let seed_list = proptest::collection::vec(idx.clone(), 0..6);
        let inserts = prop_oneof![
            (seed.clone(), idx.clone()).prop_map(|(p, i)| OpI::Insert(p, i)),
            idx.clone().prop_map(OpI::Push),
            (seed.clone(), seed_list.clone()).prop_map(|(p, v)| OpI::InsertAll(p, v)),
            (seed.clone(), idx.clone()).prop_map(|(p, i)| OpI::Replace(p, i)),
            (seed.clone(), idx.clone()).prop_map(|(p, i)| OpI::CursorInsert(p, i)),
        ];
        let removals = prop_oneof![
            seed.clone().prop_map(OpI::RemoveAt),
            idx.clone().prop_map(OpI::Remove),
            any::<bool>().prop_map(OpI::RemoveIf),
            seed_list.prop_map(OpI::RetainAll),
            seed.clone().prop_map(OpI::CursorRemove),
        ];
        let others = prop_oneof![
            (seed.clone(), seed).prop_map(|(a, b)| OpI::Subrange(a, b)),
            Just(OpI::Sort),
            Just(OpI::Clear),
        ];
        // Weighted so the list grows more often than it is wiped.
        let op = prop_oneof![5 => inserts, 4 => removals, 1 => others];
        let seed_items = proptest::collection::vec(
            proptest::sample::select(pool.clone()),
            0..10,
        );
        (seed_items, proptest::collection::vec(op, 1..60))
            .prop_map(move |(items, ops)| (pool.clone(), items, ops))
    })
}

fn first_occurrences(items: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for v in items {
        if !out.contains(v) {
            out.push(v.clone());
        }
    }
    out
}

// State-machine equivalence against a plain Vec with uniqueness applied by
// hand. After every step:
// - contents and order equal the model;
// - no two positions hold equal elements;
// - the policy's auxiliary state mirrors the list.
fn run<P>(pool: &[String], seed: Vec<String>, ops: Vec<OpI>) -> Result<(), TestCaseError>
where
    P: DuplicatePolicy<String> + Default,
{
    let mut model = first_occurrences(&seed);
    let mut sut: UniqueList<String, P> = UniqueList::with_policy(seed, P::default());
    prop_assert_eq!(sut.as_slice(), model.as_slice());

    for op in ops {
        match op {
            OpI::Insert(p, i) => {
                let k = pool[i].clone();
                let pos = p % (model.len() + 1);
                let fresh = !model.contains(&k);
                if fresh {
                    model.insert(pos, k.clone());
                }
                prop_assert_eq!(sut.insert(pos, k), Ok(fresh));
            }
            OpI::Push(i) => {
                let k = pool[i].clone();
                let fresh = !model.contains(&k);
                if fresh {
                    model.push(k.clone());
                }
                prop_assert_eq!(sut.push(k), fresh);
            }
            OpI::InsertAll(p, is) => {
                let pos = p % (model.len() + 1);
                let values: Vec<String> = is.iter().map(|&i| pool[i].clone()).collect();
                let mut at = pos;
                for v in &values {
                    if !model.contains(v) {
                        model.insert(at, v.clone());
                        at += 1;
                    }
                }
                prop_assert_eq!(sut.insert_all(pos, values), Ok(at != pos));
            }
            OpI::Replace(p, i) => {
                let k = pool[i].clone();
                if model.is_empty() {
                    prop_assert!(sut.replace(p, k).is_err());
                } else {
                    let idx = p % model.len();
                    let existing = model.iter().position(|e| *e == k);
                    let displaced = std::mem::replace(&mut model[idx], k.clone());
                    if let Some(j) = existing {
                        if j != idx {
                            model.remove(j);
                        }
                    }
                    prop_assert_eq!(sut.replace(idx, k), Ok(displaced));
                }
            }
            OpI::RemoveAt(p) => {
                if model.is_empty() {
                    let res = sut.remove_at(p);
                    prop_assert_eq!(
                        res,
                        Err(CollectionError::IndexOutOfBounds { index: p, len: 0 })
                    );
                } else {
                    let idx = p % model.len();
                    let expected = model.remove(idx);
                    prop_assert_eq!(sut.remove_at(idx), Ok(expected));
                }
            }
            OpI::Remove(i) => {
                let k = &pool[i];
                let position = model.iter().position(|e| e == k);
                let expected = position.map(|j| model.remove(j));
                prop_assert_eq!(sut.remove(k), expected);
            }
            OpI::RemoveIf(even) => {
                let pred = |e: &String| (e.len() % 2 == 0) == even;
                let before = model.len();
                model.retain(|e| !pred(e));
                prop_assert_eq!(sut.remove_if(pred), model.len() != before);
            }
            OpI::RetainAll(is) => {
                let values: Vec<String> = is.iter().map(|&i| pool[i].clone()).collect();
                let before = model.len();
                model.retain(|e| values.contains(e));
                prop_assert_eq!(sut.retain_all(&values), model.len() != before);
            }
            OpI::CursorRemove(p) => {
                if !model.is_empty() {
                    let idx = p % model.len();
                    let expected = model.remove(idx);
                    let mut c = sut.cursor_at(idx).expect("position in range");
                    prop_assert_eq!(c.next().cloned(), Some(expected.clone()));
                    prop_assert_eq!(c.remove(), Ok(expected));
                    prop_assert_eq!(c.next_index(), idx);
                }
            }
            OpI::CursorInsert(p, i) => {
                let k = pool[i].clone();
                let pos = p % (model.len() + 1);
                let fresh = !model.contains(&k);
                if fresh {
                    model.insert(pos, k.clone());
                }
                let mut c = sut.cursor_at(pos).expect("position in range");
                prop_assert_eq!(c.insert(k), fresh);
                prop_assert_eq!(c.next_index(), if fresh { pos + 1 } else { pos });
            }
            OpI::Subrange(a, b) => {
                let len = model.len() + 1;
                let (lo, hi) = {
                    let (x, y) = (a % len, b % len);
                    (x.min(y), x.max(y))
                };
                let snap = sut.subrange(lo..hi).expect("range in bounds");
                prop_assert_eq!(&*snap, &model[lo..hi]);
                for v in pool {
                    prop_assert_eq!(snap.contains(v), model[lo..hi].contains(v));
                }
                // Mutating the source afterwards must not reach the snapshot.
                sut.clear();
                sut.extend(model.iter().cloned());
                prop_assert_eq!(&*snap, &model[lo..hi]);
            }
            OpI::Sort => {
                model.sort();
                sut.sort();
            }
            OpI::Clear => {
                model.clear();
                sut.clear();
            }
        }

        prop_assert_eq!(sut.as_slice(), model.as_slice());
        let distinct: HashSet<&String> = sut.iter().collect();
        prop_assert_eq!(distinct.len(), sut.len());
        prop_assert!(sut.policy().consistent_with(sut.as_slice()));
        for v in pool {
            prop_assert_eq!(sut.contains(v), model.contains(v));
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_linear((pool, seed, ops) in arb_scenario()) {
        run::<LinearScan>(&pool, seed, ops)?;
    }

    #[test]
    fn prop_state_machine_set_backed((pool, seed, ops) in arb_scenario()) {
        run::<SetBacked<String>>(&pool, seed, ops)?;
    }
}
