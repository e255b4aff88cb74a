//! A resizable, randomly indexable sequence that backs every bucket table

use std::{
    fmt,
    mem,
    ops::{Index, IndexMut},
};

use crate::error::ArrayError;

/// Smallest allocation made when an empty array first grows
const MIN_CAPACITY: usize = 4;

/// An ordered, 0-indexed sequence with separate `length` and `capacity`.
///
/// The backing storage is a boxed slice of slots; the first `length` slots are
/// always `Some`, the rest are `None`. Appending past capacity doubles the
/// allocation.
#[derive(Clone)]
pub struct GrowableArray<T> {
    /// Allocated slots, `capacity == slots.len()`
    slots: Box<[Option<T>]>,
    /// Number of slots in use
    length: usize,
}

impl<T> Default for GrowableArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> GrowableArray<T> {
    /// Creates an empty array without allocating
    #[must_use]
    pub fn new() -> Self {
        Self { slots: Box::new([]), length: 0 }
    }

    /// Creates an empty array with room for `capacity` elements
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { slots: empty_slots(capacity), length: 0 }
    }

    /// Number of elements in use
    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }

    /// Number of allocated slots
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if no element is in use
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Appends an element at the end, doubling the allocation when full
    pub fn append(&mut self, value: T) {
        if self.length == self.slots.len() {
            self.reallocate(self.slots.len().saturating_mul(2).max(MIN_CAPACITY));
        }
        if let Some(slot) = self.slots.get_mut(self.length) {
            *slot = Some(value);
            self.length = self.length.saturating_add(1);
        }
    }

    /// Removes and returns the last element.
    ///
    /// The allocation is kept; call [`shrink_to_fit`](Self::shrink_to_fit) to release it.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::Underflow`] if the array is empty.
    pub fn pop(&mut self) -> Result<T, ArrayError> {
        let last = self.length.checked_sub(1).ok_or(ArrayError::Underflow)?;
        let value = self.slots.get_mut(last).and_then(Option::take).ok_or(ArrayError::Underflow)?;
        self.length = last;
        Ok(value)
    }

    /// Returns a reference to the element at `index`
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::IndexOutOfBounds`] if `index >= length`.
    pub fn get(&self, index: usize) -> Result<&T, ArrayError> {
        let out_of_bounds = ArrayError::IndexOutOfBounds { index, length: self.length };
        if index >= self.length {
            return Err(out_of_bounds);
        }
        self.slots.get(index).and_then(Option::as_ref).ok_or(out_of_bounds)
    }

    /// Returns a mutable reference to the element at `index`
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::IndexOutOfBounds`] if `index >= length`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, ArrayError> {
        let out_of_bounds = ArrayError::IndexOutOfBounds { index, length: self.length };
        if index >= self.length {
            return Err(out_of_bounds);
        }
        self.slots.get_mut(index).and_then(Option::as_mut).ok_or(out_of_bounds)
    }

    /// Replaces the element at `index`, returning the previous one
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::IndexOutOfBounds`] if `index >= length`.
    pub fn set(&mut self, index: usize, value: T) -> Result<T, ArrayError> {
        self.get_mut(index).map(|slot| mem::replace(slot, value))
    }

    /// Reallocates the backing storage so that `capacity == length`
    pub fn shrink_to_fit(&mut self) {
        if self.slots.len() > self.length {
            self.reallocate(self.length);
        }
    }

    /// Returns an iterator over the elements in index order
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { slots: self.slots.get(..self.length).unwrap_or_default().iter() }
    }

    /// Returns an iterator that allows modifying each element in index order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.slots.get_mut(..self.length).unwrap_or_default().iter_mut().flatten()
    }

    /// Moves the live elements into fresh storage of `new_capacity` slots
    fn reallocate(&mut self, new_capacity: usize) {
        let mut slots = empty_slots(new_capacity);
        for (target, source) in slots.iter_mut().zip(self.slots.iter_mut()) {
            *target = source.take();
        }
        self.slots = slots;
    }
}

/// Allocates `capacity` vacant slots
fn empty_slots<T>(capacity: usize) -> Box<[Option<T>]> {
    let mut slots = Vec::with_capacity(capacity);
    slots.resize_with(capacity, || None);
    slots.into_boxed_slice()
}

impl<T> Index<usize> for GrowableArray<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `index >= length`; out-of-bounds access is a caller bug.
    #[allow(clippy::panic)]
    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T> IndexMut<usize> for GrowableArray<T> {
    /// # Panics
    ///
    /// Panics if `index >= length`; out-of-bounds access is a caller bug.
    #[allow(clippy::panic)]
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.get_mut(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T> FromIterator<T> for GrowableArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut array = Self::new();
        array.extend(iter);
        array
    }
}

impl<T> Extend<T> for GrowableArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.append(value);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for GrowableArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for GrowableArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DYN_ARR Size/Cap: {}/{} [", self.length, self.slots.len())?;
        for (position, value) in self.iter().enumerate() {
            if position > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{value}")?;
        }
        f.write_str("]")
    }
}

/// Borrowing iterator over a [`GrowableArray`]
#[derive(Debug, Clone)]
pub struct Iter<'a, T> {
    /// The slots in use
    slots: std::slice::Iter<'a, Option<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.slots.by_ref().flatten().next()
    }
}

impl<'a, T> IntoIterator for &'a GrowableArray<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Owning iterator over a [`GrowableArray`]
#[derive(Debug)]
pub struct IntoIter<T> {
    /// The slots in use, consumed front to back
    slots: std::vec::IntoIter<Option<T>>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.slots.by_ref().flatten().next()
    }
}

impl<T> IntoIterator for GrowableArray<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        let mut slots = self.slots.into_vec();
        slots.truncate(self.length);
        IntoIter { slots: slots.into_iter() }
    }
}
