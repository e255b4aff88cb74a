//! # Prime Map
//!
//! Hash maps with prime bucket counts, built from first principles on top of a
//! small growable array.
//!
//! This crate provides two hash map implementations:
//!
//! - `OpenAddressingMap`: quadratic probing, tombstone deletion, and automatic
//!   growth whenever the load factor reaches 0.5
//! - `ChainingMap`: separate chaining with singly linked lists, resized only on request
//!
//! Both take the key hasher as an injected capability: any `Fn(&str) -> usize`
//! works, so deterministic test doubles are plain closures.
//!
//! ## Basic Usage
//!
//! ```rust
//! use primemap::{OpenAddressingMap, hash_function_1};
//!
//! // Create a new hash map; the capacity is rounded up to a prime
//! let mut map = OpenAddressingMap::new(10, hash_function_1);
//! assert_eq!(map.capacity(), 11);
//!
//! // Insert values
//! map.put("apple", 1);
//! map.put("banana", 2);
//!
//! // Retrieve values
//! assert_eq!(map.get("apple"), Some(&1));
//!
//! // Update values
//! map.put("apple", 10);
//! assert_eq!(map.get("apple"), Some(&10));
//!
//! // Remove values
//! map.remove("apple");
//! assert_eq!(map.get("apple"), None);
//! assert_eq!(map.size(), 1);
//! ```
//!
//! ## Chaining and Mode Finding
//!
//! ```rust
//! use primemap::{ChainingMap, find_mode, hash_function_2};
//!
//! let mut map = ChainingMap::new(3, hash_function_2);
//! for i in 0..30 {
//!     map.put(format!("key{i}"), i);
//! }
//!
//! // chains absorb the load until the caller resizes
//! assert_eq!(map.capacity(), 3);
//! map.resize_table(60).unwrap();
//! assert_eq!(map.capacity(), 61);
//! assert_eq!(map.get("key7"), Some(&7));
//!
//! let (modes, frequency) = find_mode(&["one", "two", "two"]);
//! assert_eq!(modes[0], "two");
//! assert_eq!(frequency, 2);
//! ```

/// Singly linked chains used as chaining buckets
pub mod chain_list;
/// Module implementing the separate-chaining hash map
mod chaining;
/// Error types
mod error;
/// Growable array backing every bucket table
pub mod growable_array;
/// Key hashing capability and prime helpers
mod hashing;
/// Mode finding on top of the chaining map
mod mode;
/// Module implementing the quadratic-probing hash map
mod open_addressing;
/// Utility functions and traits for the hash maps
mod utils;

pub use chain_list::ChainList;
pub use chaining::{ChainingMap, DEFAULT_CAPACITY};
pub use error::{ArrayError, ResizeError};
pub use growable_array::GrowableArray;
pub use hashing::{
    HashFn, KeyHasher, LARGEST_PRIME, StdKeyHasher, hash_function_1, hash_function_2, is_prime, next_prime,
};
pub use mode::find_mode;
pub use open_addressing::OpenAddressingMap;
pub use utils::{HashMapExtensions, chained_from_pairs, from_pairs};
