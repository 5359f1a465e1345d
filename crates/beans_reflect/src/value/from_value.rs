use alloc::boxed::Box;
use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::hash::{BuildHasher, Hash};
use core::time::Duration;
use std::collections::{HashMap, HashSet};

use crate::bean::Bean;
use crate::collections::{Grid, Multiset, Table};
use crate::value::{Collection, Value, ValueError};

// -----------------------------------------------------------------------------
// FromValue

/// Conversion of a [`Value`] into a Rust value.
///
/// `None` is the null marker; only `Option<T>` accepts it.
///
/// Integer targets accept any integer variant that fits exactly, and float
/// targets accept any number that converts without loss. Anything else is a
/// [`ValueError`].
pub trait FromValue: Sized {
    fn from_value(value: Option<Value>) -> Result<Self, ValueError>;
}

/// Unwraps a required value.
#[inline]
fn required(value: Option<Value>, expected: &'static str) -> Result<Value, ValueError> {
    value.ok_or(ValueError::Null { expected })
}

#[inline]
fn mismatch(expected: &'static str, found: &Value) -> ValueError {
    ValueError::Mismatch {
        expected,
        found: found.kind_name(),
    }
}

fn out_of_range(value: impl ToString, target: &'static str) -> ValueError {
    ValueError::NumericRange {
        value: value.to_string(),
        target,
    }
}

impl FromValue for bool {
    fn from_value(value: Option<Value>) -> Result<Self, ValueError> {
        match required(value, "bool")? {
            Value::Bool(b) => Ok(b),
            other => Err(mismatch("bool", &other)),
        }
    }
}

impl FromValue for char {
    fn from_value(value: Option<Value>) -> Result<Self, ValueError> {
        match required(value, "char")? {
            Value::Char(c) => Ok(c),
            other => Err(mismatch("char", &other)),
        }
    }
}

impl FromValue for String {
    fn from_value(value: Option<Value>) -> Result<Self, ValueError> {
        match required(value, "string")? {
            Value::String(s) => Ok(s),
            other => Err(mismatch("string", &other)),
        }
    }
}

macro_rules! impl_from_value_int {
    ($($ty:ident),* $(,)?) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: Option<Value>) -> Result<Self, ValueError> {
                    let target = stringify!($ty);
                    let value = required(value, target)?;
                    let converted = match &value {
                        Value::I8(n) => $ty::try_from(*n).ok(),
                        Value::I16(n) => $ty::try_from(*n).ok(),
                        Value::I32(n) => $ty::try_from(*n).ok(),
                        Value::I64(n) => $ty::try_from(*n).ok(),
                        Value::U8(n) => $ty::try_from(*n).ok(),
                        Value::U16(n) => $ty::try_from(*n).ok(),
                        Value::U32(n) => $ty::try_from(*n).ok(),
                        Value::U64(n) => $ty::try_from(*n).ok(),
                        other => return Err(mismatch(target, other)),
                    };
                    converted.ok_or_else(|| out_of_range(display_number(&value), target))
                }
            }
        )*
    };
}

impl_from_value_int!(i8, i16, i32, i64, u8, u16, u32, u64);

fn display_number(value: &Value) -> String {
    match value {
        Value::I8(n) => n.to_string(),
        Value::I16(n) => n.to_string(),
        Value::I32(n) => n.to_string(),
        Value::I64(n) => n.to_string(),
        Value::U8(n) => n.to_string(),
        Value::U16(n) => n.to_string(),
        Value::U32(n) => n.to_string(),
        Value::U64(n) => n.to_string(),
        Value::F32(n) => n.to_string(),
        Value::F64(n) => n.to_string(),
        other => String::from(other.kind_name()),
    }
}

impl FromValue for f64 {
    fn from_value(value: Option<Value>) -> Result<Self, ValueError> {
        let value = required(value, "f64")?;
        let exact = |wide: i128, narrow: f64| {
            if narrow as i128 == wide && narrow.is_finite() {
                Ok(narrow)
            } else {
                Err(out_of_range(wide, "f64"))
            }
        };
        match value {
            Value::F64(n) => Ok(n),
            Value::F32(n) => Ok(f64::from(n)),
            Value::I8(n) => Ok(f64::from(n)),
            Value::I16(n) => Ok(f64::from(n)),
            Value::I32(n) => Ok(f64::from(n)),
            Value::U8(n) => Ok(f64::from(n)),
            Value::U16(n) => Ok(f64::from(n)),
            Value::U32(n) => Ok(f64::from(n)),
            Value::I64(n) => exact(i128::from(n), n as f64),
            Value::U64(n) => exact(i128::from(n), n as f64),
            other => Err(mismatch("f64", &other)),
        }
    }
}

impl FromValue for f32 {
    fn from_value(value: Option<Value>) -> Result<Self, ValueError> {
        let value = required(value, "f32")?;
        if let Value::F32(n) = value {
            return Ok(n);
        }
        if !value.is_number() {
            return Err(mismatch("f32", &value));
        }
        let label = display_number(&value);
        let wide = f64::from_value(Some(value)).map_err(|_| out_of_range(&label, "f32"))?;
        let narrow = wide as f32;
        if f64::from(narrow) == wide || wide.is_nan() {
            Ok(narrow)
        } else {
            Err(out_of_range(label, "f32"))
        }
    }
}

impl FromValue for Duration {
    fn from_value(value: Option<Value>) -> Result<Self, ValueError> {
        match required(value, "duration")? {
            Value::Opaque(opaque) => opaque
                .into_any()
                .downcast::<Duration>()
                .map(|d| *d)
                .map_err(|_| ValueError::Mismatch {
                    expected: "duration",
                    found: "opaque value",
                }),
            other => Err(mismatch("duration", &other)),
        }
    }
}

impl FromValue for Value {
    #[inline]
    fn from_value(value: Option<Value>) -> Result<Self, ValueError> {
        required(value, "value")
    }
}

impl FromValue for Box<dyn Bean> {
    fn from_value(value: Option<Value>) -> Result<Self, ValueError> {
        match required(value, "bean")? {
            Value::Bean(bean) => Ok(bean),
            other => Err(mismatch("bean", &other)),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    #[inline]
    fn from_value(value: Option<Value>) -> Result<Self, ValueError> {
        match value {
            None => Ok(None),
            value => T::from_value(value).map(Some),
        }
    }
}

// -----------------------------------------------------------------------------
// Collections

fn sequence_items(value: Option<Value>, expected: &'static str) -> Result<Vec<Option<Value>>, ValueError> {
    match required(value, expected)? {
        Value::Collection(Collection::List(items) | Collection::Set(items)) => Ok(items),
        Value::Collection(Collection::Multiset(entries)) => Ok(entries
            .into_iter()
            .flat_map(|(value, count)| core::iter::repeat_n(value, count))
            .collect()),
        other => Err(mismatch(expected, &other)),
    }
}

fn map_entries(value: Option<Value>) -> Result<Vec<(Option<Value>, Option<Value>)>, ValueError> {
    match required(value, "map")? {
        Value::Collection(Collection::Map(entries)) => Ok(entries),
        other => Err(mismatch("map", &other)),
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: Option<Value>) -> Result<Self, ValueError> {
        sequence_items(value, "list")?
            .into_iter()
            .map(T::from_value)
            .collect()
    }
}

impl<T: FromValue + Ord> FromValue for BTreeSet<T> {
    fn from_value(value: Option<Value>) -> Result<Self, ValueError> {
        sequence_items(value, "set")?
            .into_iter()
            .map(T::from_value)
            .collect()
    }
}

impl<T: FromValue + Eq + Hash, S: BuildHasher + Default> FromValue for HashSet<T, S> {
    fn from_value(value: Option<Value>) -> Result<Self, ValueError> {
        sequence_items(value, "set")?
            .into_iter()
            .map(T::from_value)
            .collect()
    }
}

impl<K: FromValue + Ord, V: FromValue> FromValue for BTreeMap<K, V> {
    fn from_value(value: Option<Value>) -> Result<Self, ValueError> {
        map_entries(value)?
            .into_iter()
            .map(|(key, value)| Ok((K::from_value(key)?, V::from_value(value)?)))
            .collect()
    }
}

impl<K: FromValue + Eq + Hash, V: FromValue, S: BuildHasher + Default> FromValue
    for HashMap<K, V, S>
{
    fn from_value(value: Option<Value>) -> Result<Self, ValueError> {
        map_entries(value)?
            .into_iter()
            .map(|(key, value)| Ok((K::from_value(key)?, V::from_value(value)?)))
            .collect()
    }
}

impl<T: FromValue + Ord> FromValue for Multiset<T> {
    fn from_value(value: Option<Value>) -> Result<Self, ValueError> {
        let mut multiset = Multiset::new();
        match required(value, "multiset")? {
            Value::Collection(Collection::Multiset(entries)) => {
                for (value, count) in entries {
                    multiset.add_count(T::from_value(value)?, count);
                }
            }
            Value::Collection(Collection::List(items) | Collection::Set(items)) => {
                for value in items {
                    multiset.add(T::from_value(value)?);
                }
            }
            other => return Err(mismatch("multiset", &other)),
        }
        Ok(multiset)
    }
}

impl<R: FromValue + Ord, C: FromValue + Ord, V: FromValue> FromValue for Table<R, C, V> {
    fn from_value(value: Option<Value>) -> Result<Self, ValueError> {
        match required(value, "table")? {
            Value::Collection(Collection::Table(cells)) => {
                let mut table = Table::new();
                for cell in cells {
                    table.put(
                        R::from_value(cell.row)?,
                        C::from_value(cell.column)?,
                        V::from_value(cell.value)?,
                    );
                }
                Ok(table)
            }
            other => Err(mismatch("table", &other)),
        }
    }
}

impl<V: FromValue> FromValue for Grid<V> {
    fn from_value(value: Option<Value>) -> Result<Self, ValueError> {
        match required(value, "grid")? {
            Value::Collection(Collection::Grid(grid)) => {
                let mut result = Grid::new(grid.rows, grid.columns)?;
                for cell in grid.cells {
                    if cell.value.is_some() {
                        result.put(cell.row, cell.column, V::from_value(cell.value)?)?;
                    }
                }
                Ok(result)
            }
            other => Err(mismatch("grid", &other)),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
