//! Utility functions and traits shared by the `OpenAddressingMap` and `ChainingMap` implementations

use crate::{ChainingMap, KeyHasher, OpenAddressingMap};

/// Extension trait for map implementations that provides additional utility methods
pub trait HashMapExtensions<V> {
    /// Returns the keys of the hash map as a Vec, in bucket order
    fn keys(&self) -> Vec<String>;

    /// Returns the values of the hash map as a Vec, in bucket order
    fn values(&self) -> Vec<V>;

    /// Returns the worst collision run: the longest chain when chaining, the
    /// longest probe sequence of a live key when probing
    fn longest_bucket(&self) -> usize;
}

impl<V, H> HashMapExtensions<V> for OpenAddressingMap<V, H>
where
    V: Clone,
    H: KeyHasher,
{
    fn keys(&self) -> Vec<String> {
        self.iter().map(|(k, _)| k.to_string()).collect()
    }

    fn values(&self) -> Vec<V> {
        self.iter().map(|(_, v)| v.clone()).collect()
    }

    fn longest_bucket(&self) -> usize {
        self.longest_probe()
    }
}

impl<V, H> HashMapExtensions<V> for ChainingMap<V, H>
where
    V: Clone,
    H: KeyHasher,
{
    fn keys(&self) -> Vec<String> {
        self.iter().map(|(k, _)| k.to_string()).collect()
    }

    fn values(&self) -> Vec<V> {
        self.iter().map(|(_, v)| v.clone()).collect()
    }

    fn longest_bucket(&self) -> usize {
        self.chain_lengths().max().unwrap_or(0)
    }
}

/// Creates an `OpenAddressingMap` from an iterator of key-value pairs
pub fn from_pairs<K, V, H, I>(initial_capacity: usize, hasher: H, iter: I) -> OpenAddressingMap<V, H>
where
    K: Into<String>,
    H: KeyHasher,
    I: IntoIterator<Item = (K, V)>,
{
    let mut map = OpenAddressingMap::new(initial_capacity, hasher);
    map.extend(iter);
    map
}

/// Creates a `ChainingMap` from an iterator of key-value pairs
pub fn chained_from_pairs<K, V, H, I>(initial_capacity: usize, hasher: H, iter: I) -> ChainingMap<V, H>
where
    K: Into<String>,
    H: KeyHasher,
    I: IntoIterator<Item = (K, V)>,
{
    let mut map = ChainingMap::new(initial_capacity, hasher);
    map.extend(iter);
    map
}
