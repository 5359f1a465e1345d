//! Declared type information.
//!
//! - [`TypeToken`]: a possibly generic declared type, as found in a property
//!   signature.
//! - [`CollectionKind`] / [`CollectionType`]: the collection containers a
//!   token can describe.
//! - [`Typed`]: static access to the token of a Rust type.

// -----------------------------------------------------------------------------
// Modules

mod type_token;
mod typed;

// -----------------------------------------------------------------------------
// Exports

pub use type_token::{CollectionKind, CollectionType, TypeToken};
pub use type_token::{module_path, type_ident};
pub use typed::{Typed, type_paths};
