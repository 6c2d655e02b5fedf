#![cfg(test)]

// Property tests for IndexedMap kept inside the crate alongside the unit
// tests.

use crate::error::CollectionError;
use crate::indexed_map::IndexedMap;
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};

#[derive(Clone, Debug)]
enum OpI {
    Put(usize, i32),
    Remove(usize),
    GetAt(usize),
    Swap(usize, usize),
    Move(usize, usize),
    Sort,
    KeyOf(i32),
    Clear,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,4}", 1..=8).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let seed = 0usize..32;
        // Small value range so key_of sees repeated values.
        let value = -3i32..3;
        let op = prop_oneof![
            4 => (idx.clone(), value.clone()).prop_map(|(i, v)| OpI::Put(i, v)),
            2 => idx.clone().prop_map(OpI::Remove),
            1 => seed.clone().prop_map(OpI::GetAt),
            1 => (seed.clone(), seed.clone()).prop_map(|(a, b)| OpI::Swap(a, b)),
            1 => (idx, seed).prop_map(|(i, p)| OpI::Move(i, p)),
            1 => Just(OpI::Sort),
            1 => value.prop_map(OpI::KeyOf),
            1 => Just(OpI::Clear),
        ];
        proptest::collection::vec(op, 1..60).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Property: state-machine equivalence against an ordered Vec of pairs.
// Invariants exercised after every step:
// - key order equals the model's order and never repeats a key;
// - the map's key set equals the order's key set;
// - every key maps to the model's value, so reordering never remaps values;
// - index access fails exactly when the index is out of range.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        let mut sut: IndexedMap<String, i32> = IndexedMap::new();
        let mut model: Vec<(String, i32)> = Vec::new();

        for op in ops {
            match op {
                OpI::Put(i, v) => {
                    let k = pool[i].clone();
                    let prev = match model.iter_mut().find(|(mk, _)| *mk == k) {
                        Some(slot) => Some(std::mem::replace(&mut slot.1, v)),
                        None => {
                            model.push((k.clone(), v));
                            None
                        }
                    };
                    prop_assert_eq!(sut.put(k, v), prev);
                }
                OpI::Remove(i) => {
                    let k = &pool[i];
                    let position = model.iter().position(|(mk, _)| mk == k);
                    let expected = position.map(|j| model.remove(j).1);
                    prop_assert_eq!(sut.remove(k.as_str()), expected);
                }
                OpI::GetAt(p) => {
                    match model.get(p) {
                        Some((k, v)) => {
                            prop_assert_eq!(sut.get_at(p), Ok(v));
                            prop_assert_eq!(sut.key_at(p), Ok(k));
                        }
                        None => prop_assert_eq!(
                            sut.get_at(p),
                            Err(CollectionError::IndexOutOfBounds { index: p, len: model.len() })
                        ),
                    }
                }
                OpI::Swap(a, b) => {
                    let res = sut.swap_keys(a, b);
                    if a < model.len() && b < model.len() {
                        model.swap(a, b);
                        prop_assert!(res.is_ok());
                    } else {
                        prop_assert!(res.is_err());
                    }
                }
                OpI::Move(i, p) => {
                    let k = &pool[i];
                    let res = sut.move_key(k.as_str(), p);
                    match model.iter().position(|(mk, _)| mk == k) {
                        None => prop_assert_eq!(res, Err(CollectionError::UnknownKey)),
                        Some(_) if p >= model.len() => prop_assert!(res.is_err()),
                        Some(from) => {
                            let entry = model.remove(from);
                            model.insert(p, entry);
                            prop_assert!(res.is_ok());
                        }
                    }
                }
                OpI::Sort => {
                    model.sort_by(|a, b| a.0.cmp(&b.0));
                    sut.sort_keys(|a, b| a.cmp(b));
                }
                OpI::KeyOf(v) => {
                    let expected = model.iter().find(|(_, mv)| *mv == v).map(|(k, _)| k);
                    prop_assert_eq!(sut.key_of(&v), expected);
                }
                OpI::Clear => {
                    model.clear();
                    sut.clear();
                }
            }

            // Post-conditions after each op
            let order: Vec<&String> = model.iter().map(|(k, _)| k).collect();
            let sut_order: Vec<&String> = sut.keys().iter().collect();
            prop_assert_eq!(sut_order, order);
            let distinct: BTreeSet<&String> = sut.keys().iter().collect();
            prop_assert_eq!(distinct.len(), sut.len());
            let lookup: HashMap<&String, i32> = model.iter().map(|(k, v)| (k, *v)).collect();
            for k in &pool {
                prop_assert_eq!(sut.get(k.as_str()).copied(), lookup.get(k).copied());
                prop_assert_eq!(sut.contains_key(k.as_str()), lookup.contains_key(k));
            }
            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
        }

        // The parts handed back still pass construction validation.
        let expected = sut.clone();
        let (entries, order) = sut.into_parts();
        let rebuilt = IndexedMap::from_parts(entries, order).expect("consistent parts");
        prop_assert_eq!(rebuilt, expected);
    }
}
