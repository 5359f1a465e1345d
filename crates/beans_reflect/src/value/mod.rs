//! The dynamic value model.
//!
//! Property values cross the bean view as [`Value`]s. Scalars have one
//! variant each, custom leaf types travel as [`Opaque`] trait objects, nested
//! beans as [`Bean`](crate::bean::Bean) trait objects and collections as
//! [`Collection`]s.
//!
//! [`ToValue`] and [`FromValue`] convert between Rust types and values.

// -----------------------------------------------------------------------------
// Modules

mod collection;
mod error;
mod from_value;
mod opaque;
mod to_value;
mod value;

// -----------------------------------------------------------------------------
// Exports

pub use collection::{Collection, GridCell, GridValue, TableCell};
pub use error::ValueError;
pub use from_value::FromValue;
pub use opaque::Opaque;
pub use to_value::ToValue;
pub use value::Value;
