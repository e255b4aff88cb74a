//! Key hashing capability and prime-capacity helpers

use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

/// Plain function pointer hasher, the default hasher type of both maps
pub type HashFn = fn(&str) -> usize;

/// Maps a key to a non-negative bucket hash.
///
/// The only requirement is determinism: the same key must hash to the same value
/// for the lifetime of a map. Any `Fn(&str) -> usize` is a `KeyHasher`, so test
/// doubles can be plain closures.
pub trait KeyHasher {
    /// Hashes `key`
    fn hash_key(&self, key: &str) -> usize;
}

impl<F> KeyHasher for F
where
    F: Fn(&str) -> usize,
{
    fn hash_key(&self, key: &str) -> usize {
        self(key)
    }
}

/// A [`KeyHasher`] backed by the standard library's SipHash implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct StdKeyHasher;

impl KeyHasher for StdKeyHasher {
    #[allow(clippy::cast_possible_truncation)]
    fn hash_key(&self, key: &str) -> usize {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        hasher.finish() as usize
    }
}

/// Sums the code points of every character in `key`
#[must_use]
pub fn hash_function_1(key: &str) -> usize {
    key.chars().fold(0_usize, |hash, letter| hash.wrapping_add(code_point(letter)))
}

/// Sums each character's code point weighted by its 1-based position in `key`
#[must_use]
pub fn hash_function_2(key: &str) -> usize {
    key.chars().zip(1_usize..).fold(0_usize, |hash, (letter, position)| {
        hash.wrapping_add(position.wrapping_mul(code_point(letter)))
    })
}

/// Widens a character's code point to `usize`
fn code_point(letter: char) -> usize {
    usize::try_from(u32::from(letter)).unwrap_or(usize::MAX)
}

/// Returns true if `candidate` is prime
#[must_use]
#[allow(clippy::arithmetic_side_effects)]
pub fn is_prime(candidate: usize) -> bool {
    if candidate == 2 || candidate == 3 {
        return true;
    }
    if candidate < 2 || candidate % 2 == 0 {
        return false;
    }
    let mut factor = 3_usize;
    while factor.checked_mul(factor).is_some_and(|square| square <= candidate) {
        if candidate % factor == 0 {
            return false;
        }
        factor += 2;
    }
    true
}

/// Largest prime representable in `usize`
#[cfg(target_pointer_width = "64")]
pub const LARGEST_PRIME: usize = 18_446_744_073_709_551_557;
/// Largest prime representable in `usize`
#[cfg(target_pointer_width = "32")]
pub const LARGEST_PRIME: usize = 4_294_967_291;
/// Largest prime representable in `usize`
#[cfg(target_pointer_width = "16")]
pub const LARGEST_PRIME: usize = 65_521;

/// Returns the smallest prime at or above `capacity`, searching odd numbers only.
///
/// Even inputs are bumped to the next odd number first, so `next_prime(2) == 3`.
/// Inputs above [`LARGEST_PRIME`] have no prime to round up to and return
/// [`LARGEST_PRIME`].
#[must_use]
#[allow(clippy::arithmetic_side_effects)]
pub fn next_prime(capacity: usize) -> usize {
    if capacity > LARGEST_PRIME {
        return LARGEST_PRIME;
    }
    let mut candidate = if capacity % 2 == 0 { capacity + 1 } else { capacity };
    while !is_prime(candidate) {
        match candidate.checked_add(2) {
            Some(next) => candidate = next,
            None => return LARGEST_PRIME,
        }
    }
    candidate
}

/// Capacity used when a resize targets `requested` buckets: prime targets are
/// kept as they are, anything else rounds up to [`next_prime`]
#[must_use]
pub(crate) fn prime_capacity(requested: usize) -> usize {
    if is_prime(requested) { requested } else { next_prime(requested) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_prime() {
        let primes: Vec<usize> = (0..40).filter(|&n| is_prime(n)).collect();
        assert_eq!(primes, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37]);
        assert!(is_prime(7919));
        assert!(!is_prime(7917));
    }

    #[test]
    fn test_next_prime() {
        assert_eq!(next_prime(0), 3);
        assert_eq!(next_prime(1), 3);
        assert_eq!(next_prime(2), 3);
        assert_eq!(next_prime(11), 11);
        assert_eq!(next_prime(24), 29);
        assert_eq!(next_prime(30), 31);
        assert_eq!(next_prime(100), 101);
    }

    #[test]
    fn test_next_prime_saturates_at_largest_prime() {
        assert_eq!(next_prime(usize::MAX), LARGEST_PRIME);
        assert_eq!(next_prime(usize::MAX - 1), LARGEST_PRIME);
        assert_eq!(next_prime(LARGEST_PRIME + 1), LARGEST_PRIME);
        assert_eq!(prime_capacity(usize::MAX), LARGEST_PRIME);
    }

    #[test]
    fn test_prime_capacity_keeps_primes() {
        assert_eq!(prime_capacity(2), 2);
        assert_eq!(prime_capacity(23), 23);
        assert_eq!(prime_capacity(46), 47);
    }

    #[test]
    fn test_hash_function_1() {
        assert_eq!(hash_function_1(""), 0);
        assert_eq!(hash_function_1("ab"), 97 + 98);
        // anagrams collide
        assert_eq!(hash_function_1("key1"), hash_function_1("1yek"));
    }

    #[test]
    fn test_hash_function_2() {
        assert_eq!(hash_function_2("ab"), 97 + 2 * 98);
        assert_ne!(hash_function_2("key1"), hash_function_2("1yek"));
    }

    #[test]
    fn test_closures_and_std_hasher() {
        let constant = |_: &str| 7_usize;
        assert_eq!(constant.hash_key("anything"), 7);

        let hasher = StdKeyHasher;
        assert_eq!(hasher.hash_key("apple"), hasher.hash_key("apple"));
    }
}
