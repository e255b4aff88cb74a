use std::{fmt, mem};

use crate::{
    error::ResizeError,
    growable_array::{self, GrowableArray},
    hashing::{HashFn, KeyHasher, next_prime, prime_capacity},
};

/// A bucket entry; removal moves the value out and leaves the key behind as a tombstone
#[derive(Debug, Clone)]
struct ProbedEntry<V> {
    /// The key in the key-value pair
    key: String,
    /// The value associated with the key, `None` once the entry is tombstoned
    value: Option<V>,
}

impl<V> ProbedEntry<V> {
    /// A live entry for a freshly inserted pair
    fn live(key: String, value: V) -> Self {
        Self { key, value: Some(value) }
    }

    /// Returns true if the entry has been removed
    fn is_tombstone(&self) -> bool {
        self.value.is_none()
    }
}

impl<V: fmt::Display> fmt::Display for ProbedEntry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "K: {} V: {value} TS: false", self.key),
            None => write!(f, "K: {} V: None TS: true", self.key),
        }
    }
}

/// Where a probe for a key ended
enum Probe {
    /// A live entry already holds the key
    Found(usize),
    /// The key is absent and may be stored at this slot (empty or tombstoned)
    Vacant(usize),
}

/// A hash map resolving collisions with quadratic probing over a prime capacity.
///
/// The table grows to the next prime above twice its capacity whenever a `put`
/// finds the load factor at or above 0.5, which keeps a vacant slot reachable on
/// every probe sequence. Removed entries stay in place as tombstones.
///
/// Note: This implementation is not thread-safe.
#[derive(Clone)]
pub struct OpenAddressingMap<V, H = HashFn> {
    /// The buckets storing the entries, `capacity == buckets.length()`
    buckets: GrowableArray<Option<ProbedEntry<V>>>,
    /// Number of live (non-tombstoned) entries
    size: usize,
    /// Injected key hasher
    hasher: H,
}

impl<V, H> OpenAddressingMap<V, H>
where
    H: KeyHasher,
{
    /// Creates an empty map with capacity rounded up to the next prime
    #[must_use]
    pub fn new(initial_capacity: usize, hasher: H) -> Self {
        Self { buckets: vacant_buckets(next_prime(initial_capacity)), size: 0, hasher }
    }

    /// Number of live key-value pairs
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns true if the map holds no live pairs
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of buckets; always prime
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buckets.length()
    }

    /// Inserts or updates a key-value pair, returning the previous value of an existing key.
    ///
    /// The table is resized to twice its capacity first if the load factor is at or above 0.5.
    ///
    /// # Panics
    ///
    /// Panics if the probe sequence of `key` holds neither the key nor a vacant slot.
    /// Growing before half load keeps such a slot reachable, so this is a broken invariant.
    #[allow(clippy::panic)]
    pub fn put(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        if self.size.saturating_mul(2) >= self.capacity() {
            self.rehash(self.capacity().saturating_mul(2));
        }

        let key = key.into();
        let Some(probe) = self.probe(&key) else {
            panic!("no vacant slot on the probe sequence of {key:?} at capacity {}", self.capacity());
        };
        match probe {
            Probe::Found(index) => {
                let previous = self.buckets[index].replace(ProbedEntry::live(key, value));
                previous.and_then(|entry| entry.value)
            }
            Probe::Vacant(index) => {
                self.buckets[index] = Some(ProbedEntry::live(key, value));
                self.size = self.size.saturating_add(1);
                None
            }
        }
    }

    /// Slot indices `hash + i²` for `i` in `0..capacity`
    #[allow(clippy::arithmetic_side_effects)]
    fn probe_sequence(&self, key: &str) -> impl Iterator<Item = usize> + use<V, H> {
        let capacity = self.capacity();
        let home = self.hasher.hash_key(key) % capacity;
        // offsets 0, 1, 4, 9, ... are reached by adding successive odd steps
        (0..capacity).scan((home, 1 % capacity), move |(index, step), _| {
            let current = *index;
            *index = (*index + *step) % capacity;
            *step = (*step + 2) % capacity;
            Some(current)
        })
    }

    /// Walks the probe sequence of `key`.
    ///
    /// Tombstones do not stop the walk, so a live copy of the key further along is
    /// still found; the first tombstone seen is reused if the key turns out absent.
    fn probe(&self, key: &str) -> Option<Probe> {
        let mut first_tombstone = None;

        for index in self.probe_sequence(key) {
            match &self.buckets[index] {
                None => return Some(Probe::Vacant(first_tombstone.unwrap_or(index))),
                Some(entry) if entry.is_tombstone() => {
                    if first_tombstone.is_none() {
                        first_tombstone = Some(index);
                    }
                }
                Some(entry) if entry.key == key => return Some(Probe::Found(index)),
                Some(_) => {}
            }
        }

        first_tombstone.map(Probe::Vacant)
    }

    /// Index of the live entry holding `key`, found by scanning every bucket
    fn find_live(&self, key: &str) -> Option<usize> {
        self.buckets
            .iter()
            .position(|slot| slot.as_ref().is_some_and(|entry| !entry.is_tombstone() && entry.key == key))
    }

    /// Retrieve the value stored under `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        let index = self.find_live(key)?;
        self.buckets.get(index).ok()?.as_ref()?.value.as_ref()
    }

    /// Get a mutable reference to the value stored under `key`
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let index = self.find_live(key)?;
        self.buckets.get_mut(index).ok()?.as_mut()?.value.as_mut()
    }

    /// Returns true if a live entry holds `key`
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.find_live(key).is_some()
    }

    /// Tombstones the entry holding `key` and returns its value.
    ///
    /// Removing an absent key is a no-op.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let index = self.find_live(key)?;
        let removed = self.buckets.get_mut(index).ok()?.as_mut()?.value.take()?;
        self.size = self.size.saturating_sub(1);
        Some(removed)
    }

    /// Removes all pairs and tombstones, keeping the capacity
    pub fn clear(&mut self) {
        for slot in self.buckets.iter_mut() {
            *slot = None;
        }
        self.size = 0;
    }

    /// Rebuilds the table with `new_capacity` buckets (rounded up to a prime).
    ///
    /// # Errors
    ///
    /// Returns [`ResizeError::BelowSize`] and leaves the table untouched if
    /// `new_capacity` is smaller than the number of live pairs.
    pub fn resize_table(&mut self, new_capacity: usize) -> Result<(), ResizeError> {
        if new_capacity < self.size {
            return Err(ResizeError::BelowSize { requested: new_capacity, size: self.size });
        }
        self.rehash(new_capacity);
        Ok(())
    }

    /// Moves the live pairs out, swaps in fresh storage and replays every pair through `put`
    fn rehash(&mut self, requested: usize) {
        let old_buckets = mem::replace(&mut self.buckets, vacant_buckets(prime_capacity(requested)));
        self.size = 0;

        let live = old_buckets.into_iter().flatten().filter_map(|entry| Some((entry.key, entry.value?)));
        for (key, value) in live {
            self.put(key, value);
        }
    }

    /// Returns the current load factor, `size / capacity`
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn table_load(&self) -> f64 {
        self.size as f64 / self.capacity() as f64
    }

    /// Returns `capacity - size`; tombstoned slots are counted as empty here
    #[must_use]
    pub fn empty_buckets(&self) -> usize {
        self.capacity().saturating_sub(self.size)
    }

    /// Number of slots visited to reach the live key that sits furthest along its
    /// probe sequence, counting the slot it lives in; 0 for an empty map
    #[must_use]
    pub fn longest_probe(&self) -> usize {
        self.buckets
            .iter()
            .enumerate()
            .filter_map(|(slot, entry)| entry.as_ref().filter(|entry| !entry.is_tombstone()).map(|entry| (slot, entry)))
            .map(|(slot, entry)| {
                self.probe_sequence(&entry.key)
                    .position(|index| index == slot)
                    .map_or(self.capacity(), |steps| steps.saturating_add(1))
            })
            .max()
            .unwrap_or(0)
    }

    /// Returns an iterator over the live pairs in bucket order
    #[must_use]
    #[allow(clippy::iter_without_into_iter)]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { buckets: self.buckets.iter() }
    }
}

impl<V, H> OpenAddressingMap<V, H>
where
    V: Clone,
    H: KeyHasher,
{
    /// Snapshot of every live pair in bucket order
    #[must_use]
    pub fn keys_and_values(&self) -> GrowableArray<(String, V)> {
        self.iter().map(|(key, value)| (key.to_string(), value.clone())).collect()
    }
}

/// Builds `capacity` empty buckets
fn vacant_buckets<V>(capacity: usize) -> GrowableArray<Option<ProbedEntry<V>>> {
    let mut buckets = GrowableArray::with_capacity(capacity);
    for _ in 0..capacity {
        buckets.append(None);
    }
    buckets
}

impl<K, V, H> Extend<(K, V)> for OpenAddressingMap<V, H>
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

impl<V: fmt::Debug, H> fmt::Debug for OpenAddressingMap<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAddressingMap")
            .field("size", &self.size)
            .field("capacity", &self.buckets.length())
            .field("buckets", &self.buckets)
            .finish_non_exhaustive()
    }
}

impl<V: fmt::Display, H> fmt::Display for OpenAddressingMap<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, slot) in self.buckets.iter().enumerate() {
            match slot {
                Some(entry) => writeln!(f, "{index}: {entry}")?,
                None => writeln!(f, "{index}: None")?,
            }
        }
        Ok(())
    }
}

/// Iterator over the live pairs of an [`OpenAddressingMap`]
#[derive(Debug, Clone)]
pub struct Iter<'a, V> {
    /// Remaining buckets
    buckets: growable_array::Iter<'a, Option<ProbedEntry<V>>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.buckets.by_ref().flatten().find_map(|entry| Some((entry.key.as_str(), entry.value.as_ref()?)))
    }
}
