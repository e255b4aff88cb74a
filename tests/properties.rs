#![allow(
    missing_docs,
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    clippy::arithmetic_side_effects,
    clippy::cast_precision_loss
)]
use std::collections::HashMap;

use primemap::{
    ChainingMap, OpenAddressingMap, ResizeError, find_mode, hash_function_1, hash_function_2, is_prime,
};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Put(String, u32),
    Remove(String),
    Resize(usize),
}

fn op() -> impl Strategy<Value = Op> {
    // a tiny key alphabet keeps collisions, overwrites and tombstone reuse frequent
    let key = "[a-d]{1,3}";
    prop_oneof![
        6 => (key, any::<u32>()).prop_map(|(key, value)| Op::Put(key, value)),
        3 => key.prop_map(Op::Remove),
        1 => (0_usize..80).prop_map(Op::Resize),
    ]
}

fn within_load_bound(size: usize, capacity: usize) -> bool {
    // growth happens before an insert, so the last insert may land one pair past half
    2 * size <= capacity + 1
}

proptest! {
    #[test]
    fn open_addressing_matches_model(initial in 0_usize..40, ops in prop::collection::vec(op(), 0..200)) {
        let mut map = OpenAddressingMap::new(initial, hash_function_1);
        let mut model = HashMap::new();

        for op in ops {
            match op {
                Op::Put(key, value) => {
                    prop_assert_eq!(map.put(key.clone(), value), model.insert(key, value));
                    prop_assert!(within_load_bound(map.size(), map.capacity()));
                }
                Op::Remove(key) => prop_assert_eq!(map.remove(&key), model.remove(&key)),
                Op::Resize(capacity) => {
                    let resized = map.resize_table(capacity);
                    if capacity < model.len() {
                        prop_assert_eq!(
                            resized,
                            Err(ResizeError::BelowSize { requested: capacity, size: model.len() })
                        );
                    } else {
                        prop_assert_eq!(resized, Ok(()));
                        prop_assert!(map.capacity() >= capacity);
                    }
                }
            }
            prop_assert!(is_prime(map.capacity()));
            prop_assert_eq!(map.size(), model.len());
            prop_assert_eq!(map.empty_buckets(), map.capacity() - map.size());
        }

        for (key, value) in &model {
            prop_assert_eq!(map.get(key), Some(value));
            prop_assert!(map.contains_key(key));
        }
        let mut pairs: Vec<(String, u32)> = map.keys_and_values().into_iter().collect();
        pairs.sort();
        let mut expected: Vec<(String, u32)> = model.into_iter().collect();
        expected.sort();
        prop_assert_eq!(pairs, expected);
    }

    #[test]
    fn chaining_matches_model(initial in 1_usize..40, ops in prop::collection::vec(op(), 0..200)) {
        let mut map = ChainingMap::new(initial, hash_function_2);
        let mut model = HashMap::new();

        for op in ops {
            let capacity_before = map.capacity();
            match op {
                Op::Put(key, value) => {
                    prop_assert_eq!(map.put(key.clone(), value), model.insert(key, value));
                    prop_assert_eq!(map.capacity(), capacity_before);
                }
                Op::Remove(key) => prop_assert_eq!(map.remove(&key), model.remove(&key)),
                Op::Resize(0) => prop_assert_eq!(map.resize_table(0), Err(ResizeError::ZeroCapacity)),
                Op::Resize(capacity) => {
                    prop_assert_eq!(map.resize_table(capacity), Ok(()));
                    prop_assert!(is_prime(map.capacity()));
                    prop_assert!(map.capacity() >= capacity);
                }
            }
            prop_assert_eq!(map.size(), model.len());
            prop_assert_eq!(map.chain_lengths().sum::<usize>(), map.size());
            prop_assert_eq!(
                map.empty_buckets(),
                map.chain_lengths().filter(|&length| length == 0).count()
            );
            prop_assert!((map.table_load() - map.size() as f64 / map.capacity() as f64).abs() < f64::EPSILON);
        }

        for (key, value) in &model {
            prop_assert_eq!(map.get(key), Some(value));
        }
        let mut pairs: Vec<(String, u32)> = map.keys_and_values().into_iter().collect();
        pairs.sort();
        let mut expected: Vec<(String, u32)> = model.into_iter().collect();
        expected.sort();
        prop_assert_eq!(pairs, expected);
    }

    #[test]
    fn colliding_keys_survive_removals(keys in prop::collection::hash_set("[a-z]{1,6}", 1..30)) {
        // every key shares one home bucket, so each lookup walks past tombstones
        let mut map = OpenAddressingMap::new(3, |_: &str| 0_usize);
        let keys: Vec<String> = keys.into_iter().collect();
        for (value, key) in keys.iter().enumerate() {
            map.put(key.as_str(), value);
        }

        let (removed, kept) = keys.split_at(keys.len() / 2);
        for key in removed {
            prop_assert!(map.remove(key).is_some());
        }
        for key in removed {
            prop_assert!(!map.contains_key(key));
        }
        for (offset, key) in kept.iter().enumerate() {
            prop_assert_eq!(map.get(key), Some(&(removed.len() + offset)));
            // updating must hit the live entry rather than a tombstone earlier in the sequence
            prop_assert_eq!(map.put(key.as_str(), usize::MAX), Some(removed.len() + offset));
        }
        prop_assert_eq!(map.size(), kept.len());
        prop_assert_eq!(map.iter().count(), kept.len());
    }

    #[test]
    fn mode_frequency_matches_counts(items in prop::collection::vec("[a-e]", 0..60)) {
        let (modes, frequency) = find_mode(&items);

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for item in &items {
            *counts.entry(item.as_str()).or_default() += 1;
        }
        let highest = counts.values().copied().max().unwrap_or(0);

        prop_assert_eq!(frequency, highest);
        if highest > 1 {
            let mut expected: Vec<&str> =
                counts.iter().filter(|&(_, &count)| count == highest).map(|(&item, _)| item).collect();
            expected.sort_unstable();
            let mut found: Vec<&str> = modes.iter().map(String::as_str).collect();
            found.sort_unstable();
            prop_assert_eq!(found, expected);
        } else {
            prop_assert_eq!(modes.length(), items.len());
        }
    }
}

#[test]
fn open_addressing_grows_through_150_inserts() {
    let mut map = OpenAddressingMap::new(11, hash_function_1);
    for i in 0..150 {
        map.put(format!("str{i}"), i * 100);
        assert!(within_load_bound(map.size(), map.capacity()));
    }
    assert_eq!(map.size(), 150);
    assert!(map.capacity() >= 300);
    assert!(is_prime(map.capacity()));
    for i in 0..150 {
        assert_eq!(map.get(&format!("str{i}")), Some(&(i * 100)));
    }
}

#[test]
fn chaining_resizes_keep_every_pair() {
    let mut map = ChainingMap::new(53, hash_function_1);
    for i in 0..200 {
        map.put(format!("key{i}"), i);
    }
    for capacity in [11, 111, 1000, 2] {
        map.resize_table(capacity).unwrap();
        assert!(is_prime(map.capacity()));
        assert_eq!(map.size(), 200);
        for i in 0..200 {
            assert_eq!(map.get(&format!("key{i}")), Some(&i));
        }
    }
}
