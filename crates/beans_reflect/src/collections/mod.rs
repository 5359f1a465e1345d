//! Collection types for the shapes std does not provide.
//!
//! - [`Multiset`]: values with a multiplicity.
//! - [`Table`]: values addressed by a row key and a column key.
//! - [`Grid`]: a fixed size two dimensional array of optional values.

// -----------------------------------------------------------------------------
// Modules

mod grid;
mod multiset;
mod table;

// -----------------------------------------------------------------------------
// Exports

pub use grid::{Grid, MAX_GRID_CELLS, grid_cells};
pub use multiset::Multiset;
pub use table::Table;
