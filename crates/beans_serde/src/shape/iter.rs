use alloc::borrow::Cow;

use beans_reflect::info::{CollectionKind, CollectionType, TypeToken};
use beans_reflect::value::{Collection, Value};

use crate::shape::ShapeCategory;

// -----------------------------------------------------------------------------
// classify

/// Classifies a value as one of the collection shapes.
///
/// Returns `None` if the value is not a collection. Key, column and value
/// types come from `declared` when it is a collection of the same kind; in
/// any other case the runtime kind is used with unknown generics and
/// [`ShapeIter::meta_type_required`] reports that the kind must be written
/// out.
pub fn classify<'a>(declared: &TypeToken, value: &'a Value) -> Option<ShapeIter<'a>> {
    let collection = value.as_collection()?;
    let kind = collection.kind();
    let (ty, meta_type_required) = match declared.as_collection() {
        Some(ty) if ty.kind() == kind => (ty.clone(), false),
        _ => (CollectionType::erased(kind), true),
    };
    Some(ShapeIter {
        collection,
        ty,
        meta_type_required,
        position: None,
    })
}

// -----------------------------------------------------------------------------
// ShapeIter

/// A single-use cursor over the entries of one collection value.
///
/// The cursor starts before the first entry; call [`advance`](Self::advance)
/// to move onto it.
///
/// ```
/// use beans_reflect::info::TypeToken;
/// use beans_reflect::value::{Collection, Value};
/// use beans_serde::shape::{ShapeCategory, classify};
///
/// let value = Value::Collection(Collection::Multiset(vec![(Some(Value::from("A")), 3)]));
/// let declared = TypeToken::multiset(TypeToken::named("alloc::string::String"));
///
/// let mut iter = classify(&declared, &value).unwrap();
/// assert_eq!(iter.category(), ShapeCategory::Counted);
/// assert!(!iter.meta_type_required());
/// while iter.advance() {
///     assert_eq!(iter.value(), Some(&Value::from("A")));
///     assert_eq!(iter.count(), 3);
/// }
/// ```
#[derive(Debug)]
pub struct ShapeIter<'a> {
    collection: &'a Collection,
    ty: CollectionType,
    meta_type_required: bool,
    position: Option<usize>,
}

impl<'a> ShapeIter<'a> {
    #[inline]
    pub fn category(&self) -> ShapeCategory {
        ShapeCategory::of(self.kind())
    }

    #[inline]
    pub fn kind(&self) -> CollectionKind {
        self.collection.kind()
    }

    /// The collection type entries are written against.
    #[inline]
    pub fn collection_type(&self) -> &CollectionType {
        &self.ty
    }

    #[inline]
    pub fn key_type(&self) -> &TypeToken {
        self.ty.key_type()
    }

    #[inline]
    pub fn column_type(&self) -> &TypeToken {
        self.ty.column_type()
    }

    #[inline]
    pub fn value_type(&self) -> &TypeToken {
        self.ty.value_type()
    }

    /// Name of the collection kind, written when it cannot be inferred.
    #[inline]
    pub fn meta_type_name(&self) -> &'static str {
        self.kind().name()
    }

    /// Returns `true` if the declared type does not tell the kind.
    #[inline]
    pub fn meta_type_required(&self) -> bool {
        self.meta_type_required
    }

    /// Number of entries. Counted entries are counted once.
    #[inline]
    pub fn size(&self) -> usize {
        self.collection.len()
    }

    /// Rows and columns of a grid.
    pub fn dimensions(&self) -> Option<(usize, usize)> {
        match self.collection {
            Collection::Grid(grid) => Some((grid.rows, grid.columns)),
            _ => None,
        }
    }

    #[inline]
    fn next_index(&self) -> usize {
        self.position.map_or(0, |index| index + 1)
    }

    #[inline]
    pub fn has_next(&self) -> bool {
        self.next_index() < self.size()
    }

    /// Moves onto the next entry, returning `false` at the end.
    pub fn advance(&mut self) -> bool {
        if self.has_next() {
            self.position = Some(self.next_index());
            true
        } else {
            false
        }
    }

    /// Key of the current entry: map key, table row or grid row.
    pub fn key(&self) -> Option<Cow<'a, Value>> {
        let index = self.position?;
        match self.collection {
            Collection::Map(entries) => entries[index].0.as_ref().map(Cow::Borrowed),
            Collection::Table(cells) => cells[index].row.as_ref().map(Cow::Borrowed),
            Collection::Grid(grid) => Some(Cow::Owned(Value::U64(grid.cells[index].row as u64))),
            _ => None,
        }
    }

    /// Column of the current entry, for tables and grids.
    pub fn column(&self) -> Option<Cow<'a, Value>> {
        let index = self.position?;
        match self.collection {
            Collection::Table(cells) => cells[index].column.as_ref().map(Cow::Borrowed),
            Collection::Grid(grid) => {
                Some(Cow::Owned(Value::U64(grid.cells[index].column as u64)))
            }
            _ => None,
        }
    }

    /// Value of the current entry, `None` for a null entry.
    pub fn value(&self) -> Option<&'a Value> {
        let index = self.position?;
        match self.collection {
            Collection::List(items) | Collection::Set(items) => items[index].as_ref(),
            Collection::Multiset(entries) => entries[index].0.as_ref(),
            Collection::Map(entries) => entries[index].1.as_ref(),
            Collection::Table(cells) => cells[index].value.as_ref(),
            Collection::Grid(grid) => grid.cells[index].value.as_ref(),
        }
    }

    /// Multiplicity of the current entry, `1` outside counted collections.
    pub fn count(&self) -> usize {
        match (self.collection, self.position) {
            (Collection::Multiset(entries), Some(index)) => entries[index].1,
            _ => 1,
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use beans_reflect::info::TypeToken;
    use beans_reflect::value::{Collection, GridCell, GridValue, TableCell, Value};

    use super::classify;
    use crate::shape::ShapeCategory;

    fn text(s: &str) -> Option<Value> {
        Some(Value::from(s))
    }

    #[test]
    fn scalars_are_not_shapes() {
        assert!(classify(&TypeToken::Any, &Value::I32(1)).is_none());
        assert!(classify(&TypeToken::list(TypeToken::Any), &Value::from("x")).is_none());
    }

    #[test]
    fn declared_generics_are_used() {
        let declared = TypeToken::map(TypeToken::named("i32"), TypeToken::list(TypeToken::Any));
        let value = Value::Collection(Collection::Map(vec![(Some(Value::I32(1)), None)]));

        let iter = classify(&declared, &value).unwrap();
        assert_eq!(iter.category(), ShapeCategory::Map);
        assert!(!iter.meta_type_required());
        assert_eq!(iter.key_type(), &TypeToken::named("i32"));
        assert_eq!(iter.value_type(), &TypeToken::list(TypeToken::Any));
    }

    #[test]
    fn undeclared_kind_requires_meta_type() {
        let value = Value::Collection(Collection::Set(vec![text("a")]));
        let iter = classify(&TypeToken::Any, &value).unwrap();
        assert!(iter.meta_type_required());
        assert_eq!(iter.meta_type_name(), "Set");
        assert_eq!(iter.value_type(), &TypeToken::Any);

        let iter = classify(&TypeToken::list(TypeToken::Any), &value).unwrap();
        assert!(iter.meta_type_required());
    }

    #[test]
    fn cursor_walks_table_entries() {
        let value = Value::Collection(Collection::Table(vec![
            TableCell {
                row: text("r1"),
                column: text("c1"),
                value: Some(Value::I32(1)),
            },
            TableCell {
                row: text("r2"),
                column: text("c1"),
                value: None,
            },
        ]));
        let mut iter = classify(&TypeToken::Any, &value).unwrap();
        assert_eq!(iter.size(), 2);
        assert!(iter.value().is_none());

        let mut seen = Vec::new();
        while iter.advance() {
            seen.push((
                iter.key().map(|k| k.into_owned()),
                iter.column().map(|c| c.into_owned()),
                iter.value().cloned(),
            ));
        }
        assert!(!iter.has_next());
        assert!(!iter.advance());
        assert_eq!(seen[0], (text("r1"), text("c1"), Some(Value::I32(1))));
        assert_eq!(seen[1], (text("r2"), text("c1"), None));
    }

    #[test]
    fn grid_positions_are_integers() {
        let value = Value::Collection(Collection::Grid(GridValue {
            rows: 3,
            columns: 4,
            cells: vec![GridCell {
                row: 2,
                column: 1,
                value: text("x"),
            }],
        }));
        let mut iter = classify(&TypeToken::grid(TypeToken::Any), &value).unwrap();
        assert_eq!(iter.dimensions(), Some((3, 4)));
        assert!(iter.advance());
        assert_eq!(iter.key().unwrap().into_owned(), Value::U64(2));
        assert_eq!(iter.column().unwrap().into_owned(), Value::U64(1));
        assert_eq!(iter.key_type(), &TypeToken::named("u64"));
    }
}
