#![cfg(test)]

// Property tests for ProbeMap kept inside the crate so they can reach
// RawTable-level details (slot census) through the public map.

use crate::config::{DuplicateKeys, MapConfig};
use crate::probe_map::ProbeMap;
use proptest::prelude::*;
use std::collections::HashMap;

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Put(usize, i32),
    Remove(usize),
    Get(usize),
    Contains(String),
    Mutate(usize, i32),
    Rehash,
    Clear,
}

fn arb_config() -> impl Strategy<Value = MapConfig> {
    (
        proptest::sample::select(vec![1usize, 2, 4, 8]),
        proptest::sample::select(vec![0.25f64, 0.5, 0.75, 1.0]),
    )
        .prop_map(|(capacity, load_factor)| {
            MapConfig::new()
                .with_capacity(capacity)
                .with_load_factor(load_factor)
        })
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,4}", 1..=8).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            4 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Put(i, v)),
            2 => idx.clone().prop_map(OpI::Remove),
            2 => idx.clone().prop_map(OpI::Get),
            1 => prop_oneof![contains_pool, "[a-z]{0,4}".prop_map(|s| s)].prop_map(OpI::Contains),
            1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            1 => Just(OpI::Rehash),
            1 => Just(OpI::Clear),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn sorted(mut v: Vec<i32>) -> Vec<i32> {
    v.sort_unstable();
    v
}

fn check_structure<S>(sut: &ProbeMap<String, i32, S>, expected_len: usize) -> Result<(), TestCaseError> {
    prop_assert_eq!(sut.len(), expected_len);
    prop_assert_eq!(sut.is_empty(), expected_len == 0);
    prop_assert!(sut.capacity().is_power_of_two());
    prop_assert!(sut.len() <= sut.capacity());
    let stats = sut.stats();
    prop_assert_eq!(stats.occupied, sut.len());
    prop_assert_eq!(stats.occupied + stats.tombstones + stats.empty, sut.capacity());
    prop_assert_eq!(sut.iter().count(), sut.len());
    Ok(())
}

// Property: append mode behaves as a multimap.
// Invariants exercised across random operation sequences:
// - `get_all(k)` holds exactly the multiset of values put for `k` and not yet removed.
// - `get(k)` / `remove(k)` return one of those values; `contains_key` parity.
// - rehash preserves every retrievable value; clear empties the map.
// - slot census adds up to capacity, capacity stays a power of two.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_append_mode_multimap(config in arb_config(), (pool, ops) in arb_scenario()) {
        let mut sut: ProbeMap<String, i32> = ProbeMap::with_config(config).unwrap();
        let mut model: HashMap<String, Vec<i32>> = HashMap::new();

        for op in ops {
            match op {
                OpI::Put(i, v) => {
                    let k = pool[i].clone();
                    let before = sut.capacity();
                    prop_assert_eq!(sut.put(k.clone(), v).unwrap(), None);
                    let after = sut.capacity();
                    prop_assert!(after == before || after == before * 2, "at most one doubling per put");
                    model.entry(k).or_default().push(v);
                }
                OpI::Remove(i) => {
                    let k = &pool[i];
                    let got = sut.remove(k.as_str());
                    match model.get_mut(k) {
                        Some(vals) if !vals.is_empty() => {
                            let v = got.expect("model has a value for this key");
                            let pos = vals.iter().position(|x| *x == v);
                            prop_assert!(pos.is_some(), "removed value must come from the model");
                            vals.swap_remove(pos.unwrap());
                        }
                        _ => prop_assert!(got.is_none()),
                    }
                }
                OpI::Get(i) => {
                    let k = &pool[i];
                    let expected = sorted(model.get(k).cloned().unwrap_or_default());
                    let all = sorted(sut.get_all(k.as_str()).into_iter().copied().collect());
                    prop_assert_eq!(&all, &expected);
                    match sut.get(k.as_str()) {
                        Some(v) => prop_assert!(expected.contains(v)),
                        None => prop_assert!(expected.is_empty()),
                    }
                }
                OpI::Contains(s) => {
                    let has_model = model.get(&s).is_some_and(|v| !v.is_empty());
                    prop_assert_eq!(sut.contains_key(s.as_str()), has_model);
                }
                OpI::Mutate(i, d) => {
                    let k = &pool[i];
                    if let Some(v) = sut.get_mut(k.as_str()) {
                        let old = *v;
                        *v = old.wrapping_add(d);
                        let vals = model.get_mut(k).expect("present in model");
                        let pos = vals.iter().position(|x| *x == old).expect("old value tracked");
                        vals[pos] = old.wrapping_add(d);
                    }
                }
                OpI::Rehash => {
                    let before = sut.capacity();
                    sut.rehash().unwrap();
                    prop_assert_eq!(sut.capacity(), before * 2);
                    prop_assert_eq!(sut.stats().tombstones, 0);
                }
                OpI::Clear => {
                    sut.clear();
                    model.clear();
                    prop_assert!(sut.items().is_empty());
                }
            }

            let expected_len: usize = model.values().map(Vec::len).sum();
            check_structure(&sut, expected_len)?;
        }

        for (k, vals) in &model {
            let all = sorted(sut.get_all(k.as_str()).into_iter().copied().collect());
            prop_assert_eq!(all, sorted(vals.clone()));
        }
    }
}

// Property: replace mode is state-machine equivalent to std::collections::HashMap.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_replace_mode_matches_std(config in arb_config(), (pool, ops) in arb_scenario()) {
        let config = config.with_duplicates(DuplicateKeys::Replace);
        let mut sut: ProbeMap<String, i32> = ProbeMap::with_config(config).unwrap();
        let mut model: HashMap<String, i32> = HashMap::new();

        for op in ops {
            match op {
                OpI::Put(i, v) => {
                    let k = pool[i].clone();
                    let prev = sut.put(k.clone(), v).unwrap();
                    prop_assert_eq!(prev, model.insert(k, v));
                }
                OpI::Remove(i) => {
                    let k = &pool[i];
                    prop_assert_eq!(sut.remove(k.as_str()), model.remove(k));
                }
                OpI::Get(i) => {
                    let k = &pool[i];
                    prop_assert_eq!(sut.get(k.as_str()), model.get(k));
                    prop_assert!(sut.get_all(k.as_str()).len() <= 1);
                }
                OpI::Contains(s) => {
                    prop_assert_eq!(sut.contains_key(s.as_str()), model.contains_key(&s));
                }
                OpI::Mutate(i, d) => {
                    let k = &pool[i];
                    if let Some(v) = sut.get_mut(k.as_str()) {
                        *v = v.wrapping_add(d);
                    }
                    if let Some(v) = model.get_mut(k) {
                        *v = v.wrapping_add(d);
                    }
                }
                OpI::Rehash => {
                    sut.rehash().unwrap();
                }
                OpI::Clear => {
                    sut.clear();
                    model.clear();
                }
            }
            check_structure(&sut, model.len())?;
        }

        let mut seen: Vec<(String, i32)> = sut.into_iter().collect();
        let mut expected: Vec<(String, i32)> = model.into_iter().collect();
        seen.sort();
        expected.sort();
        prop_assert_eq!(seen, expected);
    }
}
