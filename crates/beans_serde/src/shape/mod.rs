//! The five collection shapes and the cursor and builder over them.
//!
//! [`classify`] turns a collection value into a [`ShapeIter`], which writers
//! walk entry by entry. Readers collect entries into a [`ShapeBuilder`].
//! Both resolve key, column and value types from the declared
//! [`CollectionType`], so nested values are written and read against the
//! same declarations.
//!
//! [`CollectionType`]: beans_reflect::info::CollectionType

// -----------------------------------------------------------------------------
// Modules

mod builder;
mod iter;

// -----------------------------------------------------------------------------
// Exports

pub use builder::ShapeBuilder;
pub use iter::{ShapeIter, classify};

use beans_reflect::info::CollectionKind;

// -----------------------------------------------------------------------------
// ShapeCategory

/// The structural category of a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeCategory {
    /// Values without keys. Lists and sets.
    Sequence,
    /// Values with a multiplicity.
    Counted,
    /// Key and value pairs; keys are never null.
    Map,
    /// Row, column and value triples.
    Table,
    /// Row, column and value triples within fixed dimensions.
    Grid,
}

impl ShapeCategory {
    #[inline]
    pub const fn of(kind: CollectionKind) -> Self {
        match kind {
            CollectionKind::List | CollectionKind::Set => Self::Sequence,
            CollectionKind::Multiset => Self::Counted,
            CollectionKind::Map => Self::Map,
            CollectionKind::Table => Self::Table,
            CollectionKind::Grid => Self::Grid,
        }
    }

    /// Returns `true` if entries carry a key (a row for tables and grids).
    #[inline]
    pub const fn has_key(self) -> bool {
        matches!(self, Self::Map | Self::Table | Self::Grid)
    }

    #[inline]
    pub const fn has_column(self) -> bool {
        matches!(self, Self::Table | Self::Grid)
    }

    #[inline]
    pub const fn has_count(self) -> bool {
        matches!(self, Self::Counted)
    }
}
