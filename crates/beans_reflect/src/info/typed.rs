use alloc::boxed::Box;
use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::String;
use alloc::vec::Vec;
use core::time::Duration;
use std::collections::{HashMap, HashSet};

use crate::bean::Bean;
use crate::collections::{Grid, Multiset, Table};
use crate::info::TypeToken;
use crate::registry::TypeRegistry;
use crate::value::Value;

/// Type paths of the built-in scalar types.
pub mod type_paths {
    pub const BOOL: &str = "bool";
    pub const CHAR: &str = "char";
    pub const I8: &str = "i8";
    pub const I16: &str = "i16";
    pub const I32: &str = "i32";
    pub const I64: &str = "i64";
    pub const U8: &str = "u8";
    pub const U16: &str = "u16";
    pub const U32: &str = "u32";
    pub const U64: &str = "u64";
    pub const F32: &str = "f32";
    pub const F64: &str = "f64";
    pub const STRING: &str = "alloc::string::String";
    pub const DURATION: &str = "core::time::Duration";
}

// -----------------------------------------------------------------------------
// Typed

/// Static access to the declared [`TypeToken`] of a Rust type.
///
/// This is what turns a Rust field type into the declared type of a
/// property. Generic containers forward to their parameters, so a
/// `Vec<BTreeMap<String, i32>>` field is declared as
/// `List<Map<alloc::string::String, i32>>`.
///
/// `Option<T>` is transparent: absence is expressed by the property value
/// itself, not by the declared type.
///
/// # Examples
///
/// ```
/// use beans_reflect::info::{TypeToken, Typed};
///
/// assert_eq!(<Vec<i32>>::type_token(), TypeToken::list(TypeToken::named("i32")));
/// assert_eq!(<Option<bool>>::type_token(), TypeToken::named("bool"));
/// ```
pub trait Typed {
    /// Returns the declared type.
    fn type_token() -> TypeToken;

    /// Registers bean types this type refers to.
    ///
    /// Containers forward to their parameters; beans register themselves.
    #[inline]
    fn register_dependencies(_registry: &mut TypeRegistry) {}
}

macro_rules! impl_typed_scalar {
    ($($ty:ty => $path:expr),* $(,)?) => {
        $(
            impl Typed for $ty {
                #[inline]
                fn type_token() -> TypeToken {
                    TypeToken::Named($path)
                }
            }
        )*
    };
}

impl_typed_scalar! {
    bool => type_paths::BOOL,
    char => type_paths::CHAR,
    i8 => type_paths::I8,
    i16 => type_paths::I16,
    i32 => type_paths::I32,
    i64 => type_paths::I64,
    u8 => type_paths::U8,
    u16 => type_paths::U16,
    u32 => type_paths::U32,
    u64 => type_paths::U64,
    f32 => type_paths::F32,
    f64 => type_paths::F64,
    String => type_paths::STRING,
    Duration => type_paths::DURATION,
}

impl Typed for Value {
    #[inline]
    fn type_token() -> TypeToken {
        TypeToken::Any
    }
}

impl Typed for Box<dyn Bean> {
    #[inline]
    fn type_token() -> TypeToken {
        TypeToken::Any
    }
}

impl<T: Typed> Typed for Option<T> {
    #[inline]
    fn type_token() -> TypeToken {
        T::type_token()
    }

    fn register_dependencies(registry: &mut TypeRegistry) {
        T::register_dependencies(registry);
    }
}

macro_rules! impl_typed_sequence {
    ($($ty:ident => $ctor:ident),* $(,)?) => {
        $(
            impl<T: Typed> Typed for $ty<T> {
                fn type_token() -> TypeToken {
                    TypeToken::$ctor(T::type_token())
                }

                fn register_dependencies(registry: &mut TypeRegistry) {
                    T::register_dependencies(registry);
                }
            }
        )*
    };
}

impl_typed_sequence! {
    Vec => list,
    BTreeSet => set,
    HashSet => set,
    Multiset => multiset,
    Grid => grid,
}

impl<K: Typed, V: Typed> Typed for BTreeMap<K, V> {
    fn type_token() -> TypeToken {
        TypeToken::map(K::type_token(), V::type_token())
    }

    fn register_dependencies(registry: &mut TypeRegistry) {
        K::register_dependencies(registry);
        V::register_dependencies(registry);
    }
}

impl<K: Typed, V: Typed> Typed for HashMap<K, V> {
    fn type_token() -> TypeToken {
        TypeToken::map(K::type_token(), V::type_token())
    }

    fn register_dependencies(registry: &mut TypeRegistry) {
        K::register_dependencies(registry);
        V::register_dependencies(registry);
    }
}

impl<R: Typed, C: Typed, V: Typed> Typed for Table<R, C, V> {
    fn type_token() -> TypeToken {
        TypeToken::table(R::type_token(), C::type_token(), V::type_token())
    }

    fn register_dependencies(registry: &mut TypeRegistry) {
        R::register_dependencies(registry);
        C::register_dependencies(registry);
        V::register_dependencies(registry);
    }
}
