use alloc::collections::BTreeMap;

// -----------------------------------------------------------------------------
// Table

/// A sparse two-key map, sorted by row then column.
///
/// # Examples
///
/// ```
/// use beans_reflect::collections::Table;
///
/// let mut scores = Table::new();
/// scores.put("alice", 1, 7.5);
/// scores.put("bob", 2, 6.0);
///
/// assert_eq!(scores.get(&"alice", &1), Some(&7.5));
/// assert_eq!(scores.get(&"alice", &2), None);
/// assert_eq!(scores.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Table<R, C, V> {
    cells: BTreeMap<(R, C), V>,
}

impl<R: Ord, C: Ord, V> Table<R, C, V> {
    #[inline]
    pub const fn new() -> Self {
        Self {
            cells: BTreeMap::new(),
        }
    }

    /// Stores a value, returning the one previously at that position.
    #[inline]
    pub fn put(&mut self, row: R, column: C, value: V) -> Option<V> {
        self.cells.insert((row, column), value)
    }

    /// Returns the value at a position.
    pub fn get(&self, row: &R, column: &C) -> Option<&V>
    where
        R: Clone,
        C: Clone,
    {
        self.cells.get(&(row.clone(), column.clone()))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterates `(row, column, value)` triples.
    pub fn iter(&self) -> impl Iterator<Item = (&R, &C, &V)> {
        self.cells.iter().map(|((row, column), value)| (row, column, value))
    }
}

impl<R: Ord, C: Ord, V> Default for Table<R, C, V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Ord, C: Ord, V> FromIterator<(R, C, V)> for Table<R, C, V> {
    fn from_iter<I: IntoIterator<Item = (R, C, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (row, column, value) in iter {
            table.put(row, column, value);
        }
        table
    }
}
