//! The simple-map flavor.
//!
//! Beans become ordered JSON objects keyed by property name and no type
//! markers are written, so the declared types at read time decide how every
//! node is interpreted:
//!
//! | shape | form |
//! |-------|------|
//! | list, set | array of values |
//! | multiset | array of `[value, count]` |
//! | map with text keys | object keyed by the key text |
//! | other maps | array of `[key, value]` |
//! | table | array of `[row, column, value]` |
//! | grid | `rows`, `cols`, then `[row, column, value]` entries |
//!
//! Numbers read into a numeric property must fit it exactly; `300` into a
//! `u8` is a [`SerError::NumericRange`]. Under `Any` an integer becomes the
//! smallest of `i32`, `i64` and `u64` holding it, an array becomes a list and
//! an object a map with string keys.

// -----------------------------------------------------------------------------
// Modules

mod reader;
mod writer;

// -----------------------------------------------------------------------------
// Exports

pub use reader::MapReader;
pub use writer::MapWriter;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use beans_reflect::bean::{Bean, TypedBean};
use serde::Serialize;
use serde_json::Serializer;
use serde_json::ser::PrettyFormatter;

use crate::{SerError, SerSettings};

/// Writes a bean as JSON text, indented by the settings' indent size.
pub fn to_json_string(bean: &dyn Bean, settings: &SerSettings) -> Result<String, SerError> {
    let value = settings.map_writer().write(bean)?;
    match settings.indent_size() {
        0 => Ok(serde_json::to_string(&value)?),
        size => {
            let indent = " ".repeat(size);
            let mut out = Vec::new();
            let mut serializer =
                Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(indent.as_bytes()));
            value.serialize(&mut serializer)?;
            String::from_utf8(out).map_err(|err| SerError::malformed(err.to_string()))
        }
    }
}

/// Reads a `T` from JSON text.
pub fn from_json_str<T: TypedBean>(json: &str, settings: &SerSettings) -> Result<T, SerError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    settings.map_reader().read(&value)
}
