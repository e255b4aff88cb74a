//! Most-frequent-element query built on [`ChainingMap`]

use std::cmp::Ordering;

use crate::{ChainingMap, GrowableArray};

/// Finds the mode(s) of `items` and their frequency in a single pass.
///
/// Elements tied for the highest frequency are returned in the order they reached
/// it. If no element repeats, every element is a mode and the input is returned
/// as is with frequency 1. An empty input yields no modes and frequency 0.
///
/// ```rust
/// use primemap::find_mode;
///
/// let (modes, frequency) = find_mode(&["apple", "apple", "grape", "melon", "melon", "peach"]);
/// assert_eq!(modes.iter().map(String::as_str).collect::<Vec<_>>(), vec!["apple", "melon"]);
/// assert_eq!(frequency, 2);
/// ```
#[must_use]
pub fn find_mode<S: AsRef<str>>(items: &[S]) -> (GrowableArray<String>, usize) {
    if items.is_empty() {
        return (GrowableArray::new(), 0);
    }

    let mut counts: ChainingMap<usize> = ChainingMap::default();
    let mut modes = GrowableArray::new();
    let mut frequency = 1;

    for item in items {
        let item = item.as_ref();
        let count = counts.get(item).map_or(1, |seen| seen.saturating_add(1));
        if count > 1 {
            match count.cmp(&frequency) {
                Ordering::Equal => modes.append(item.to_string()),
                Ordering::Greater => {
                    modes = GrowableArray::new();
                    modes.append(item.to_string());
                    frequency = count;
                }
                Ordering::Less => {}
            }
        }
        counts.put(item, count);
    }

    if frequency == 1 {
        modes = items.iter().map(|item| item.as_ref().to_string()).collect();
    }
    (modes, frequency)
}
