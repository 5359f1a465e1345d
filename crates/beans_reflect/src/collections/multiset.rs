use alloc::collections::BTreeMap;
use alloc::collections::btree_map::Entry;

// -----------------------------------------------------------------------------
// Multiset

/// A sorted collection that counts occurrences of equal values.
///
/// # Examples
///
/// ```
/// use beans_reflect::collections::Multiset;
///
/// let mut letters = Multiset::new();
/// letters.add("A");
/// letters.add("A");
/// letters.add_count("B", 3);
///
/// assert_eq!(letters.count(&"A"), 2);
/// assert_eq!(letters.len(), 5);
/// assert_eq!(letters.distinct_len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Multiset<T> {
    counts: BTreeMap<T, usize>,
    len: usize,
}

impl<T: Ord> Multiset<T> {
    #[inline]
    pub const fn new() -> Self {
        Self {
            counts: BTreeMap::new(),
            len: 0,
        }
    }

    /// Adds one occurrence of `value`.
    #[inline]
    pub fn add(&mut self, value: T) {
        self.add_count(value, 1);
    }

    /// Adds `count` occurrences of `value`, ignoring a count of zero.
    pub fn add_count(&mut self, value: T, count: usize) {
        if count == 0 {
            return;
        }
        *self.counts.entry(value).or_insert(0) += count;
        self.len += count;
    }

    /// Removes one occurrence, returning `true` if the value was present.
    pub fn remove(&mut self, value: T) -> bool {
        match self.counts.entry(value) {
            Entry::Vacant(_) => false,
            Entry::Occupied(mut entry) => {
                if *entry.get() == 1 {
                    entry.remove();
                } else {
                    *entry.get_mut() -= 1;
                }
                self.len -= 1;
                true
            }
        }
    }

    /// Number of occurrences of `value`.
    #[inline]
    pub fn count(&self, value: &T) -> usize {
        self.counts.get(value).copied().unwrap_or(0)
    }

    /// Total number of occurrences.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of distinct values.
    #[inline]
    pub fn distinct_len(&self) -> usize {
        self.counts.len()
    }

    /// Distinct values with their counts, in sorted order.
    pub fn entries(&self) -> impl Iterator<Item = (&T, usize)> {
        self.counts.iter().map(|(value, count)| (value, *count))
    }
}

impl<T: Ord> Default for Multiset<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> FromIterator<T> for Multiset<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut multiset = Self::new();
        iter.into_iter().for_each(|value| multiset.add(value));
        multiset
    }
}

impl<T: Ord> Extend<T> for Multiset<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|value| self.add(value));
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::Multiset;

    #[test]
    fn remove_decrements() {
        let mut set: Multiset<u8> = [1, 1, 2].into_iter().collect();
        assert!(set.remove(1));
        assert_eq!(set.count(&1), 1);
        assert!(set.remove(1));
        assert_eq!(set.count(&1), 0);
        assert!(!set.remove(1));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn zero_count_is_ignored() {
        let mut set = Multiset::new();
        set.add_count('x', 0);
        assert!(set.is_empty());
        assert_eq!(set.distinct_len(), 0);
    }
}
