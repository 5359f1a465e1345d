use alloc::boxed::Box;
use alloc::string::String;

use crate::bean::{Bean, bean_eq};
use crate::info::{TypeToken, type_paths};
use crate::value::{Collection, Opaque};

// -----------------------------------------------------------------------------
// Value

/// A dynamically typed property value.
///
/// Absence is not a variant: property getters and collection slots use
/// `Option<Value>`, and `None` is the null marker.
///
/// Equality is deep and structural. Beans compare equal when they have the
/// same type and every readable property compares equal, recursively; this
/// is the oracle used to check serialization round trips.
#[derive(Debug, Clone)]
pub enum Value {
    Bool(bool),
    Char(char),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    String(String),
    Opaque(Box<dyn Opaque>),
    Bean(Box<dyn Bean>),
    Collection(Collection),
}

impl Value {
    /// Type path of the runtime type, `None` for collections.
    pub fn type_path(&self) -> Option<&'static str> {
        Some(match self {
            Self::Bool(_) => type_paths::BOOL,
            Self::Char(_) => type_paths::CHAR,
            Self::I8(_) => type_paths::I8,
            Self::I16(_) => type_paths::I16,
            Self::I32(_) => type_paths::I32,
            Self::I64(_) => type_paths::I64,
            Self::U8(_) => type_paths::U8,
            Self::U16(_) => type_paths::U16,
            Self::U32(_) => type_paths::U32,
            Self::U64(_) => type_paths::U64,
            Self::F32(_) => type_paths::F32,
            Self::F64(_) => type_paths::F64,
            Self::String(_) => type_paths::STRING,
            Self::Opaque(opaque) => opaque.type_path(),
            Self::Bean(bean) => bean.meta_bean().type_path(),
            Self::Collection(_) => return None,
        })
    }

    /// The runtime type.
    ///
    /// Collections report their kind with erased generics.
    pub fn runtime_type(&self) -> TypeToken {
        match self {
            Self::Collection(collection) => TypeToken::Collection(
                crate::info::CollectionType::erased(collection.kind()),
            ),
            _ => match self.type_path() {
                Some(path) => TypeToken::Named(path),
                None => TypeToken::Any,
            },
        }
    }

    /// Short description of the variant, used in error messages.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Char(_) => "char",
            Self::I8(_) => "i8",
            Self::I16(_) => "i16",
            Self::I32(_) => "i32",
            Self::I64(_) => "i64",
            Self::U8(_) => "u8",
            Self::U16(_) => "u16",
            Self::U32(_) => "u32",
            Self::U64(_) => "u64",
            Self::F32(_) => "f32",
            Self::F64(_) => "f64",
            Self::String(_) => "string",
            Self::Opaque(_) => "opaque value",
            Self::Bean(_) => "bean",
            Self::Collection(_) => "collection",
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(text) => Some(text),
            _ => None,
        }
    }

    #[inline]
    pub fn as_bean(&self) -> Option<&dyn Bean> {
        match self {
            Self::Bean(bean) => Some(&**bean),
            _ => None,
        }
    }

    #[inline]
    pub fn as_collection(&self) -> Option<&Collection> {
        match self {
            Self::Collection(collection) => Some(collection),
            _ => None,
        }
    }

    /// Returns `true` for the numeric variants.
    pub const fn is_number(&self) -> bool {
        matches!(
            self,
            Self::I8(_)
                | Self::I16(_)
                | Self::I32(_)
                | Self::I64(_)
                | Self::U8(_)
                | Self::U16(_)
                | Self::U32(_)
                | Self::U64(_)
                | Self::F32(_)
                | Self::F64(_)
        )
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Char(a), Self::Char(b)) => a == b,
            (Self::I8(a), Self::I8(b)) => a == b,
            (Self::I16(a), Self::I16(b)) => a == b,
            (Self::I32(a), Self::I32(b)) => a == b,
            (Self::I64(a), Self::I64(b)) => a == b,
            (Self::U8(a), Self::U8(b)) => a == b,
            (Self::U16(a), Self::U16(b)) => a == b,
            (Self::U32(a), Self::U32(b)) => a == b,
            (Self::U64(a), Self::U64(b)) => a == b,
            (Self::F32(a), Self::F32(b)) => a == b,
            (Self::F64(a), Self::F64(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Opaque(a), Self::Opaque(b)) => a.opaque_eq(&**b),
            (Self::Bean(a), Self::Bean(b)) => bean_eq(&**a, &**b),
            (Self::Collection(a), Self::Collection(b)) => a == b,
            _ => false,
        }
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Self::String(value.into())
    }
}

impl From<String> for Value {
    #[inline]
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Collection> for Value {
    #[inline]
    fn from(value: Collection) -> Self {
        Self::Collection(value)
    }
}
