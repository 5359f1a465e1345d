use alloc::boxed::Box;
use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::String;
use alloc::vec::Vec;
use core::time::Duration;
use std::collections::{HashMap, HashSet};

use crate::bean::Bean;
use crate::collections::{Grid, Multiset, Table};
use crate::value::{Collection, GridCell, GridValue, TableCell, Value};

// -----------------------------------------------------------------------------
// ToValue

/// Conversion of a Rust value into a [`Value`].
///
/// Conversion borrows and clones, since it is used by property getters which
/// only see `&self` of the bean. `None` means the property is absent.
pub trait ToValue {
    fn to_value(&self) -> Option<Value>;
}

macro_rules! impl_to_value_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl ToValue for $ty {
                #[inline]
                fn to_value(&self) -> Option<Value> {
                    Some(Value::$variant(self.clone()))
                }
            }
        )*
    };
}

impl_to_value_scalar! {
    bool => Bool,
    char => Char,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    String => String,
}

impl ToValue for Duration {
    #[inline]
    fn to_value(&self) -> Option<Value> {
        Some(Value::Opaque(Box::new(*self)))
    }
}

impl ToValue for Value {
    #[inline]
    fn to_value(&self) -> Option<Value> {
        Some(self.clone())
    }
}

impl ToValue for Box<dyn Bean> {
    #[inline]
    fn to_value(&self) -> Option<Value> {
        Some(Value::Bean(self.clone()))
    }
}

impl<T: ToValue> ToValue for Option<T> {
    #[inline]
    fn to_value(&self) -> Option<Value> {
        self.as_ref().and_then(ToValue::to_value)
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Option<Value> {
        let items = self.iter().map(ToValue::to_value).collect();
        Some(Value::Collection(Collection::List(items)))
    }
}

impl<T: ToValue> ToValue for BTreeSet<T> {
    fn to_value(&self) -> Option<Value> {
        let items = self.iter().map(ToValue::to_value).collect();
        Some(Value::Collection(Collection::Set(items)))
    }
}

impl<T: ToValue, S> ToValue for HashSet<T, S> {
    fn to_value(&self) -> Option<Value> {
        let items = self.iter().map(ToValue::to_value).collect();
        Some(Value::Collection(Collection::Set(items)))
    }
}

impl<K: ToValue, V: ToValue> ToValue for BTreeMap<K, V> {
    fn to_value(&self) -> Option<Value> {
        let entries = self
            .iter()
            .map(|(key, value)| (key.to_value(), value.to_value()))
            .collect();
        Some(Value::Collection(Collection::Map(entries)))
    }
}

impl<K: ToValue, V: ToValue, S> ToValue for HashMap<K, V, S> {
    fn to_value(&self) -> Option<Value> {
        let entries = self
            .iter()
            .map(|(key, value)| (key.to_value(), value.to_value()))
            .collect();
        Some(Value::Collection(Collection::Map(entries)))
    }
}

impl<T: ToValue + Ord> ToValue for Multiset<T> {
    fn to_value(&self) -> Option<Value> {
        let entries = self
            .entries()
            .map(|(value, count)| (value.to_value(), count))
            .collect();
        Some(Value::Collection(Collection::Multiset(entries)))
    }
}

impl<R: ToValue + Ord, C: ToValue + Ord, V: ToValue> ToValue for Table<R, C, V> {
    fn to_value(&self) -> Option<Value> {
        let cells = self
            .iter()
            .map(|(row, column, value)| TableCell {
                row: row.to_value(),
                column: column.to_value(),
                value: value.to_value(),
            })
            .collect();
        Some(Value::Collection(Collection::Table(cells)))
    }
}

impl<V: ToValue> ToValue for Grid<V> {
    fn to_value(&self) -> Option<Value> {
        let cells = self
            .iter()
            .map(|(row, column, value)| GridCell {
                row,
                column,
                value: value.to_value(),
            })
            .collect();
        Some(Value::Collection(Collection::Grid(GridValue {
            rows: self.rows(),
            columns: self.columns(),
            cells,
        })))
    }
}
