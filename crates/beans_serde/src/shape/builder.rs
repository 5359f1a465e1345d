use alloc::format;
use alloc::vec::Vec;

use beans_reflect::collections::grid_cells;
use beans_reflect::info::{CollectionKind, CollectionType, TypeToken};
use beans_reflect::value::{Collection, FromValue, GridCell, GridValue, TableCell, Value};

use crate::SerError;
use crate::shape::ShapeCategory;

// -----------------------------------------------------------------------------
// ShapeBuilder

/// Collects parsed entries into a collection value of one shape.
///
/// Entries may arrive in any order; only sequences keep it. [`build`]
/// consumes the builder, so nothing can be added afterwards.
///
/// [`build`]: Self::build
#[derive(Debug)]
pub struct ShapeBuilder {
    ty: CollectionType,
    dimensions: Option<(usize, usize)>,
    collection: Collection,
}

impl ShapeBuilder {
    /// Creates a builder for the collection type.
    pub fn new(ty: CollectionType) -> Self {
        let collection = match ty.kind() {
            CollectionKind::List => Collection::List(Vec::new()),
            CollectionKind::Set => Collection::Set(Vec::new()),
            CollectionKind::Multiset => Collection::Multiset(Vec::new()),
            CollectionKind::Map => Collection::Map(Vec::new()),
            CollectionKind::Table => Collection::Table(Vec::new()),
            CollectionKind::Grid => Collection::Grid(GridValue::default()),
        };
        Self {
            ty,
            dimensions: None,
            collection,
        }
    }

    /// Resolves the builder for a node declared as `declared`, honoring an
    /// explicit meta-type written on the node.
    ///
    /// Returns `Ok(None)` if the node is not a collection.
    pub fn for_node(declared: &TypeToken, meta_type: Option<&str>) -> Result<Option<Self>, SerError> {
        let hinted = match meta_type {
            Some(name) => Some(CollectionKind::from_name(name).ok_or_else(|| {
                SerError::malformed(format!("unknown collection meta-type `{name}`"))
            })?),
            None => None,
        };
        let ty = match (declared.as_collection(), hinted) {
            (Some(ty), None) => ty.clone(),
            (Some(ty), Some(kind)) if ty.kind() == kind => ty.clone(),
            (_, Some(kind)) => CollectionType::erased(kind),
            (None, None) => return Ok(None),
        };
        Ok(Some(Self::new(ty)))
    }

    #[inline]
    pub fn category(&self) -> ShapeCategory {
        ShapeCategory::of(self.ty.kind())
    }

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

    /// Fixes the dimensions of a grid.
    ///
    /// May be called once, before the first entry is added. Without it, a
    /// grid is sized to fit its entries.
    pub fn dimensions(&mut self, rows: usize, columns: usize) -> Result<(), SerError> {
        let Collection::Grid(grid) = &mut self.collection else {
            return Err(SerError::malformed(format!(
                "a {} has no dimensions",
                self.ty.kind()
            )));
        };
        if self.dimensions.is_some() {
            return Err(SerError::malformed("grid dimensions given twice"));
        }
        if !grid.cells.is_empty() {
            return Err(SerError::malformed("grid dimensions given after its entries"));
        }
        check_grid_size(rows, columns)?;
        self.dimensions = Some((rows, columns));
        grid.rows = rows;
        grid.columns = columns;
        Ok(())
    }

    /// Adds one entry.
    ///
    /// `key` and `column` are ignored by shapes that do not use them; `count`
    /// must be at least one and repeats the value of a sequence.
    pub fn add(
        &mut self,
        key: Option<Value>,
        column: Option<Value>,
        value: Option<Value>,
        count: usize,
    ) -> Result<(), SerError> {
        if count == 0 {
            return Err(SerError::malformed("entry count must be at least one"));
        }
        match &mut self.collection {
            Collection::List(items) | Collection::Set(items) => {
                items.extend(core::iter::repeat_n(value, count));
            }
            Collection::Multiset(entries) => entries.push((value, count)),
            Collection::Map(entries) => {
                let key = key.ok_or_else(|| SerError::malformed("map entry without a key"))?;
                entries.push((Some(key), value));
            }
            Collection::Table(cells) => {
                let row = key.ok_or_else(|| SerError::malformed("table entry without a row"))?;
                let column =
                    column.ok_or_else(|| SerError::malformed("table entry without a column"))?;
                cells.push(TableCell {
                    row: Some(row),
                    column: Some(column),
                    value,
                });
            }
            Collection::Grid(grid) => {
                let row = grid_index(key, "row")?;
                let column = grid_index(column, "column")?;
                match self.dimensions {
                    Some((rows, columns)) if row >= rows || column >= columns => {
                        return Err(SerError::malformed(format!(
                            "grid entry ({row}, {column}) is outside {rows}x{columns}"
                        )));
                    }
                    Some(_) => {}
                    None => {
                        let rows = grid.rows.max(grid_extent(row)?);
                        let columns = grid.columns.max(grid_extent(column)?);
                        check_grid_size(rows, columns)?;
                        grid.rows = rows;
                        grid.columns = columns;
                    }
                }
                grid.cells.push(GridCell { row, column, value });
            }
        }
        Ok(())
    }

    /// Finishes the collection.
    #[inline]
    pub fn build(self) -> Collection {
        self.collection
    }
}

fn check_grid_size(rows: usize, columns: usize) -> Result<(), SerError> {
    match grid_cells(rows, columns) {
        Some(_) => Ok(()),
        None => Err(SerError::malformed(format!("a {rows}x{columns} grid is too large"))),
    }
}

/// The extent a grid needs to hold `index`.
fn grid_extent(index: usize) -> Result<usize, SerError> {
    index
        .checked_add(1)
        .ok_or_else(|| SerError::malformed(format!("grid position {index} out of range")))
}

fn grid_index(position: Option<Value>, role: &str) -> Result<usize, SerError> {
    let position =
        position.ok_or_else(|| SerError::malformed(format!("grid entry without a {role}")))?;
    usize::try_from(u64::from_value(Some(position))?)
        .map_err(|_| SerError::malformed(format!("grid {role} out of range")))
}

// -----------------------------------------------------------------------------
// Tests
