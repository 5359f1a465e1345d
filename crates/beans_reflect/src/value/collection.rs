use alloc::vec::Vec;

use crate::info::CollectionKind;
use crate::value::Value;

// -----------------------------------------------------------------------------
// Cells

/// One entry of a [`Collection::Table`].
#[derive(Debug, Clone, PartialEq)]
pub struct TableCell {
    pub row: Option<Value>,
    pub column: Option<Value>,
    pub value: Option<Value>,
}

/// One occupied cell of a [`GridValue`].
#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    pub row: usize,
    pub column: usize,
    pub value: Option<Value>,
}

/// Sparse contents of a fixed size grid.
#[derive(Debug, Clone, Default)]
pub struct GridValue {
    pub rows: usize,
    pub columns: usize,
    pub cells: Vec<GridCell>,
}

// -----------------------------------------------------------------------------
// Collection

/// A collection value.
///
/// Every slot is optional: sequences and maps may hold null values, and a
/// null key is representable so that writers can reject it rather than lose
/// it silently.
///
/// Equality ignores iteration order for every kind except [`List`], since
/// sets and maps converted from hash containers have no stable order.
///
/// [`List`]: Collection::List
#[derive(Debug, Clone)]
pub enum Collection {
    List(Vec<Option<Value>>),
    Set(Vec<Option<Value>>),
    Multiset(Vec<(Option<Value>, usize)>),
    Map(Vec<(Option<Value>, Option<Value>)>),
    Table(Vec<TableCell>),
    Grid(GridValue),
}

impl Collection {
    /// Returns the container kind.
    pub const fn kind(&self) -> CollectionKind {
        match self {
            Self::List(_) => CollectionKind::List,
            Self::Set(_) => CollectionKind::Set,
            Self::Multiset(_) => CollectionKind::Multiset,
            Self::Map(_) => CollectionKind::Map,
            Self::Table(_) => CollectionKind::Table,
            Self::Grid(_) => CollectionKind::Grid,
        }
    }

    /// Number of stored entries.
    ///
    /// A multiset reports distinct entries, a grid its occupied cells.
    pub fn len(&self) -> usize {
        match self {
            Self::List(items) | Self::Set(items) => items.len(),
            Self::Multiset(entries) => entries.len(),
            Self::Map(entries) => entries.len(),
            Self::Table(cells) => cells.len(),
            Self::Grid(grid) => grid.cells.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Order-insensitive comparison of two entry lists.
fn same_entries<T: PartialEq>(a: &[T], b: &[T]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut used = alloc::vec![false; b.len()];
    a.iter().all(|left| {
        let found = b
            .iter()
            .enumerate()
            .find(|(index, right)| !used[*index] && *right == left);
        match found {
            Some((index, _)) => {
                used[index] = true;
                true
            }
            None => false,
        }
    })
}

impl PartialEq for GridValue {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows
            && self.columns == other.columns
            && same_entries(&self.cells, &other.cells)
    }
}

impl PartialEq for Collection {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Set(a), Self::Set(b)) => same_entries(a, b),
            (Self::Multiset(a), Self::Multiset(b)) => same_entries(a, b),
            (Self::Map(a), Self::Map(b)) => same_entries(a, b),
            (Self::Table(a), Self::Table(b)) => same_entries(a, b),
            (Self::Grid(a), Self::Grid(b)) => a == b,
            _ => false,
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec;

    use super::Collection;
    use crate::value::Value;

    fn text(s: &str) -> Option<Value> {
        Some(Value::String(String::from(s)))
    }

    #[test]
    fn list_equality_is_ordered() {
        let a = Collection::List(vec![text("x"), text("y")]);
        let b = Collection::List(vec![text("y"), text("x")]);
        assert_ne!(a, b);
    }

    #[test]
    fn set_equality_ignores_order() {
        let a = Collection::Set(vec![text("x"), text("y")]);
        let b = Collection::Set(vec![text("y"), text("x")]);
        assert_eq!(a, b);
        assert_ne!(a, Collection::Set(vec![text("x"), text("x")]));
    }

    #[test]
    fn kinds_never_compare_equal() {
        assert_ne!(Collection::List(vec![]), Collection::Set(vec![]));
    }
}
