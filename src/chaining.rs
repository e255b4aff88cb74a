use std::{fmt, mem};

use crate::{
    chain_list::{self, ChainList},
    error::ResizeError,
    growable_array::{self, GrowableArray},
    hashing::{HashFn, KeyHasher, hash_function_1, next_prime, prime_capacity},
};

/// Bucket count used by [`ChainingMap::default`]
pub const DEFAULT_CAPACITY: usize = 11;

/// A hash map resolving collisions by chaining colliding keys in per-bucket lists.
///
/// Unlike [`OpenAddressingMap`](crate::OpenAddressingMap) this map never resizes on
/// its own: chains simply grow, and callers decide when to call
/// [`resize_table`](Self::resize_table).
#[derive(Clone)]
pub struct ChainingMap<V, H = HashFn> {
    /// One chain per bucket, `capacity == buckets.length()`
    buckets: GrowableArray<ChainList<V>>,
    /// Number of pairs across all chains
    size: usize,
    /// Injected key hasher
    hasher: H,
}

impl<V> Default for ChainingMap<V> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, hash_function_1)
    }
}

impl<V, H> ChainingMap<V, H>
where
    H: KeyHasher,
{
    /// Creates an empty map with capacity rounded up to the next prime
    #[must_use]
    pub fn new(initial_capacity: usize, hasher: H) -> Self {
        Self { buckets: empty_chains(next_prime(initial_capacity)), size: 0, hasher }
    }

    /// Number of key-value pairs
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns true if the map holds no pairs
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of buckets; always prime
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buckets.length()
    }

    /// Index of the bucket `key` hashes to
    #[allow(clippy::arithmetic_side_effects)]
    fn bucket_index(&self, key: &str) -> usize {
        self.hasher.hash_key(key) % self.capacity()
    }

    /// The chain `key` belongs to
    fn chain(&self, key: &str) -> Option<&ChainList<V>> {
        self.buckets.get(self.bucket_index(key)).ok()
    }

    /// Mutable access to the chain `key` belongs to
    fn chain_mut(&mut self, key: &str) -> Option<&mut ChainList<V>> {
        let index = self.bucket_index(key);
        self.buckets.get_mut(index).ok()
    }

    /// Inserts or updates a key-value pair, returning the previous value of an existing key
    pub fn put(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        let previous = self.chain_mut(&key)?.insert(key, value);
        if previous.is_none() {
            self.size = self.size.saturating_add(1);
        }
        previous
    }

    /// Retrieve the value stored under `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.chain(key)?.get(key)
    }

    /// Get a mutable reference to the value stored under `key`
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.chain_mut(key)?.get_mut(key)
    }

    /// Returns true if `key` is present
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.chain(key).is_some_and(|chain| chain.contains(key))
    }

    /// Unlinks `key` from its chain and returns its value; absent keys are a no-op
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let removed = self.chain_mut(key)?.remove(key)?;
        self.size = self.size.saturating_sub(1);
        Some(removed)
    }

    /// Replaces every chain with an empty one, keeping the capacity
    pub fn clear(&mut self) {
        for chain in self.buckets.iter_mut() {
            *chain = ChainList::new();
        }
        self.size = 0;
    }

    /// Rebuilds the table with `new_capacity` buckets (rounded up to a prime).
    ///
    /// Capacities below the current size are accepted; chains absorb the load.
    ///
    /// # Errors
    ///
    /// Returns [`ResizeError::ZeroCapacity`] and leaves the table untouched if
    /// `new_capacity` is zero.
    pub fn resize_table(&mut self, new_capacity: usize) -> Result<(), ResizeError> {
        if new_capacity < 1 {
            return Err(ResizeError::ZeroCapacity);
        }

        let old_buckets = mem::replace(&mut self.buckets, empty_chains(prime_capacity(new_capacity)));
        self.size = 0;

        for (key, value) in old_buckets.into_iter().flatten() {
            self.put(key, value);
        }
        Ok(())
    }

    /// Returns the current load factor, `size / capacity`
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn table_load(&self) -> f64 {
        self.size as f64 / self.capacity() as f64
    }

    /// Returns the number of buckets whose chain is empty
    #[must_use]
    pub fn empty_buckets(&self) -> usize {
        self.buckets.iter().filter(|chain| chain.is_empty()).count()
    }

    /// Length of each bucket's chain, in bucket order
    pub fn chain_lengths(&self) -> impl Iterator<Item = usize> {
        self.buckets.iter().map(ChainList::length)
    }

    /// Returns an iterator over the pairs in bucket order, then chain order
    #[must_use]
    #[allow(clippy::iter_without_into_iter)]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { buckets: self.buckets.iter(), chain: None }
    }
}

impl<V, H> ChainingMap<V, H>
where
    V: Clone,
    H: KeyHasher,
{
    /// Snapshot of every pair in bucket order, then chain order
    #[must_use]
    pub fn keys_and_values(&self) -> GrowableArray<(String, V)> {
        self.iter().map(|(key, value)| (key.to_string(), value.clone())).collect()
    }
}

/// Builds `capacity` empty chains
fn empty_chains<V>(capacity: usize) -> GrowableArray<ChainList<V>> {
    let mut buckets = GrowableArray::with_capacity(capacity);
    for _ in 0..capacity {
        buckets.append(ChainList::new());
    }
    buckets
}

impl<K, V, H> Extend<(K, V)> for ChainingMap<V, H>
where
    K: Into<String>,
    H: KeyHasher,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<V: fmt::Debug, H> fmt::Debug for ChainingMap<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainingMap")
            .field("size", &self.size)
            .field("capacity", &self.buckets.length())
            .field("buckets", &self.buckets)
            .finish_non_exhaustive()
    }
}

impl<V: fmt::Display, H> fmt::Display for ChainingMap<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, chain) in self.buckets.iter().enumerate() {
            writeln!(f, "{index}: {chain}")?;
        }
        Ok(())
    }
}

/// Iterator over the pairs of a [`ChainingMap`]
#[derive(Debug, Clone)]
pub struct Iter<'a, V> {
    /// Buckets not yet visited
    buckets: growable_array::Iter<'a, ChainList<V>>,
    /// Position inside the current bucket's chain
    chain: Option<chain_list::Iter<'a, V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(pair) = self.chain.as_mut().and_then(Iterator::next) {
                return Some(pair);
            }
            self.chain = Some(self.buckets.next()?.iter());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashing::hash_function_2;

    /// Every key lands on bucket 0
    fn colliding(_: &str) -> usize {
        0
    }

    #[test]
    fn test_default() {
        let map: ChainingMap<i32> = ChainingMap::default();
        assert_eq!(map.capacity(), 11);
        assert!(map.is_empty());
        assert_eq!(map.empty_buckets(), 11);
    }

    #[test]
    fn test_put_get_update() {
        let mut map = ChainingMap::new(101, hash_function_1);
        assert_eq!(map.put("key1", 10), None);
        assert_eq!(map.put("key2", 20), None);
        assert_eq!(map.put("key1", 30), Some(10));

        assert_eq!(map.size(), 2);
        assert_eq!(map.get("key1"), Some(&30));
        assert_eq!(map.get("key3"), None);
    }

    #[test]
    fn test_contains_key_and_remove() {
        let mut map = ChainingMap::new(11, hash_function_1);
        map.put("key1", 10);
        map.put("key2", 20);
        map.put("key3", 30);
        assert!(map.contains_key("key3"));

        assert_eq!(map.remove("key3"), Some(30));
        assert!(!map.contains_key("key3"));
        assert_eq!(map.size(), 2);

        assert_eq!(map.remove("key3"), None);
        assert_eq!(map.size(), 2);
    }

    #[test]
    fn test_never_resizes_on_its_own() {
        let mut map = ChainingMap::new(3, hash_function_1);
        for i in 0..50 {
            map.put(format!("str{i}"), i * 100);
        }
        assert_eq!(map.capacity(), 3);
        assert_eq!(map.size(), 50);
        assert!(map.table_load() > 16.0);
    }

    #[test]
    fn test_colliding_keys_share_a_chain() {
        let mut map = ChainingMap::new(7, colliding);
        map.extend([("a", 1), ("b", 2), ("c", 3)]);

        assert_eq!(map.empty_buckets(), 6);
        assert_eq!(map.remove("b"), Some(2));
        assert_eq!(map.get("a"), Some(&1));
        assert_eq!(map.get("c"), Some(&3));
        assert!(map.to_string().starts_with("0: SLL [(a: 1) -> (c: 3)]\n1: SLL []\n"));
    }

    #[test]
    fn test_resize_table() {
        let mut map = ChainingMap::new(53, hash_function_1);
        map.put("key1", 10);
        map.put("key2", 20);

        assert_eq!(map.resize_table(100), Ok(()));
        assert_eq!(map.capacity(), 101);
        assert_eq!(map.size(), 2);
        assert_eq!(map.get("key1"), Some(&10));
        assert_eq!(map.get("key2"), Some(&20));

        map.clear();
        assert_eq!(map.size(), 0);
        assert_eq!(map.capacity(), 101);
        assert_eq!(map.empty_buckets(), 101);
    }

    #[test]
    fn test_resize_below_size_is_allowed() {
        let mut map = ChainingMap::new(79, hash_function_2);
        for key in (1..1000).step_by(13) {
            map.put(key.to_string(), key * 42);
        }
        let size = map.size();

        // 2 is prime, so it is kept as is
        assert_eq!(map.resize_table(2), Ok(()));
        assert_eq!(map.capacity(), 2);
        assert_eq!(map.size(), size);
        for key in (1..1000).step_by(13) {
            assert_eq!(map.get(&key.to_string()), Some(&(key * 42)));
        }

        assert_eq!(map.resize_table(0), Err(ResizeError::ZeroCapacity));
        assert_eq!(map.capacity(), 2);
    }

    #[test]
    fn test_keys_and_values_order() {
        let mut map = ChainingMap::new(5, |key: &str| key.len());
        map.put("bb", 2);
        map.put("a", 1);
        map.put("cc", 3);

        let pairs: Vec<(String, i32)> = map.keys_and_values().into_iter().collect();
        assert_eq!(pairs, vec![("a".to_string(), 1), ("bb".to_string(), 2), ("cc".to_string(), 3)]);
    }

    #[test]
    fn test_get_mut() {
        let mut map: ChainingMap<i32> = ChainingMap::default();
        map.put("apple", 1);
        if let Some(count) = map.get_mut("apple") {
            *count += 1;
        }
        assert_eq!(map.get("apple"), Some(&2));
    }

    #[test]
    fn test_clone_is_independent() {
        let mut map = ChainingMap::new(3, colliding);
        for i in 0..2_000 {
            map.put(format!("key{i}"), i);
        }

        let mut copy = map.clone();
        copy.put("key0", -1);
        assert_eq!(copy.remove("key1999"), Some(1999));

        assert_eq!(map.get("key0"), Some(&0));
        assert_eq!(map.get("key1999"), Some(&1999));
        assert_eq!(map.chain_lengths().max(), Some(2_000));
        assert_eq!(copy.size(), 1_999);
        assert_eq!(copy.get("key0"), Some(&-1));
    }
}
