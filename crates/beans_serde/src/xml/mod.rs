//! The XML flavor.
//!
//! A document is a single `bean` root element carrying the full type of the
//! root bean:
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <bean type="contacts::Person">
//!   <name>Ann</name>
//!   <address>
//!     <street>1 High St</street>
//!   </address>
//!   <nicknames>
//!     <item>x</item>
//!     <item null="true"/>
//!   </nicknames>
//!   <extra type="i64">-7</extra>
//! </bean>
//! ```
//!
//! Properties are child elements named after the property; absent values
//! are left out. Elements carry a `type` attribute only when the runtime type
//! differs from the declared type. Collections use `item` children
//! (`count`, `row` and `col` attributes as the shape requires) or `entry`
//! children for maps, and a `metatype` attribute names the shape when the
//! declared type does not.

// -----------------------------------------------------------------------------
// Modules

mod reader;
mod writer;

// -----------------------------------------------------------------------------
// Exports

pub use reader::XmlReader;
pub use writer::XmlWriter;

pub(crate) const ROOT: &str = "bean";
pub(crate) const ITEM: &str = "item";
pub(crate) const ENTRY: &str = "entry";

pub(crate) const ATTR_TYPE: &str = "type";
pub(crate) const ATTR_META_TYPE: &str = "metatype";
pub(crate) const ATTR_NULL: &str = "null";
pub(crate) const ATTR_COUNT: &str = "count";
pub(crate) const ATTR_KEY: &str = "key";
pub(crate) const ATTR_ROW: &str = "row";
pub(crate) const ATTR_COL: &str = "col";
pub(crate) const ATTR_ROWS: &str = "rows";
pub(crate) const ATTR_COLS: &str = "cols";

use beans_reflect::info::{TypeToken, type_paths};

/// Returns `true` if a value of type `runtime` needs a `type` marker where
/// `declared` is declared.
///
/// Under `Any`, strings are the default and need none.
pub(crate) fn needs_type_marker(declared: &TypeToken, runtime: &str) -> bool {
    match declared {
        TypeToken::Named(path) => *path != runtime,
        TypeToken::Any => runtime != type_paths::STRING,
        TypeToken::Collection(_) => true,
    }
}
