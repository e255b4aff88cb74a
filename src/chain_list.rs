//! Singly linked chain of key-value nodes used as a chaining bucket

use std::{fmt, mem};

/// A node in a chain; each node exclusively owns its successor
#[derive(Debug)]
struct ChainNode<V> {
    /// The key in the key-value pair
    key: String,
    /// The value associated with the key
    value: V,
    /// The next node in the chain
    next: Option<Box<ChainNode<V>>>,
}

/// A singly linked list of key-value pairs with unique keys.
///
/// New keys are appended at the tail, so iteration yields pairs in the order
/// they were first inserted into this chain.
pub struct ChainList<V> {
    /// First node of the chain
    head: Option<Box<ChainNode<V>>>,
    /// Number of nodes in the chain
    length: usize,
}

impl<V> Default for ChainList<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> ChainList<V> {
    /// Creates an empty chain
    #[must_use]
    pub fn new() -> Self {
        Self { head: None, length: 0 }
    }

    /// Number of nodes in the chain
    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }

    /// Returns true if the chain has no nodes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Overwrites the value stored under `key`, or appends a new node at the tail.
    ///
    /// Returns the previous value if the key was already present.
    pub fn insert(&mut self, key: String, value: V) -> Option<V> {
        if let Some(existing) = self.get_mut(&key) {
            return Some(mem::replace(existing, value));
        }

        let mut cursor = &mut self.head;
        while let Some(node) = cursor {
            cursor = &mut node.next;
        }
        *cursor = Some(Box::new(ChainNode { key, value, next: None }));
        self.length = self.length.saturating_add(1);
        None
    }

    /// Returns the value stored under `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.iter().find(|&(candidate, _)| candidate == key).map(|(_, value)| value)
    }

    /// Returns a mutable reference to the value stored under `key`
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let mut current = self.head.as_deref_mut();
        while let Some(node) = current {
            if node.key == key {
                return Some(&mut node.value);
            }
            current = node.next.as_deref_mut();
        }
        None
    }

    /// Returns true if a node holds `key`
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Unlinks the node holding `key` and returns its value
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let mut cursor = &mut self.head;
        while cursor.as_ref().is_some_and(|node| node.key != key) {
            cursor = &mut cursor.as_mut()?.next;
        }

        let removed = cursor.take()?;
        let ChainNode { value, next, .. } = *removed;
        *cursor = next;
        self.length = self.length.saturating_sub(1);
        Some(value)
    }

    /// Returns an iterator over the pairs in chain order
    #[must_use]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { current: self.head.as_deref() }
    }
}

impl<V: Clone> Clone for ChainList<V> {
    /// Copies the chain node by node through a tail cursor so long chains do not recurse
    fn clone(&self) -> Self {
        let mut copy = Self::new();
        let mut tail = &mut copy.head;
        for (key, value) in self {
            let node = tail.insert(Box::new(ChainNode { key: key.to_string(), value: value.clone(), next: None }));
            tail = &mut node.next;
        }
        copy.length = self.length;
        copy
    }
}

impl<V> Drop for ChainList<V> {
    fn drop(&mut self) {
        // unlink node by node so long chains do not recurse
        let mut current = self.head.take();
        while let Some(mut node) = current {
            current = node.next.take();
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for ChainList<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<V: fmt::Display> fmt::Display for ChainList<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SLL [")?;
        for (position, (key, value)) in self.iter().enumerate() {
            if position > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "({key}: {value})")?;
        }
        f.write_str("]")
    }
}

/// Iterator over the pairs of a [`ChainList`]
#[derive(Debug, Clone)]
pub struct Iter<'a, V> {
    /// The next node to yield
    current: Option<&'a ChainNode<V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.current?;
        self.current = node.next.as_deref();
        Some((node.key.as_str(), &node.value))
    }
}

impl<'a, V> IntoIterator for &'a ChainList<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Owning iterator that unlinks the pairs of a [`ChainList`] from the head
#[derive(Debug)]
pub struct IntoIter<V> {
    /// The remaining chain
    chain: ChainList<V>,
}

impl<V> Iterator for IntoIter<V> {
    type Item = (String, V);

    fn next(&mut self) -> Option<Self::Item> {
        let head = self.chain.head.take()?;
        let ChainNode { key, value, next } = *head;
        self.chain.head = next;
        self.chain.length = self.chain.length.saturating_sub(1);
        Some((key, value))
    }
}

impl<V> IntoIterator for ChainList<V> {
    type Item = (String, V);
    type IntoIter = IntoIter<V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { chain: self }
    }
}
