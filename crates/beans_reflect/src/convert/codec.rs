use alloc::string::{String, ToString};
use core::fmt;
use core::time::Duration;

use beans_utils::hash::HashMap;

use crate::convert::TextConvert;
use crate::info::TypeToken;
use crate::value::{Value, ValueError};

// -----------------------------------------------------------------------------
// Converter

#[derive(Clone, Copy)]
struct Converter {
    to_text: fn(&Value) -> Result<String, ValueError>,
    from_text: fn(&str) -> Result<Value, ValueError>,
}

fn to_text_of<T: TextConvert>(value: &Value) -> Result<String, ValueError> {
    T::from_value(Some(value.clone())).map(|value| value.to_text())
}

fn from_text_of<T: TextConvert>(text: &str) -> Result<Value, ValueError> {
    T::from_text(text)?
        .to_value()
        .ok_or_else(|| ValueError::parse(text, "value", "conversion produced no value"))
}

// -----------------------------------------------------------------------------
// TextCodec

/// Converts leaf values to and from single text tokens.
///
/// The codec is keyed by type path. [`new`](Self::new) registers every
/// scalar type and [`Duration`]; user types are added with
/// [`register`](Self::register).
///
/// # Examples
///
/// ```
/// use beans_reflect::convert::TextCodec;
/// use beans_reflect::info::TypeToken;
/// use beans_reflect::Value;
///
/// let codec = TextCodec::new();
/// assert_eq!(codec.to_text(&Value::I32(-7)).unwrap(), "-7");
/// assert_eq!(
///     codec.from_text(&TypeToken::named("u16"), "80").unwrap(),
///     Value::U16(80),
/// );
/// assert_eq!(
///     codec.from_text(&TypeToken::Any, "80").unwrap(),
///     Value::from("80"),
/// );
/// ```
pub struct TextCodec {
    converters: HashMap<&'static str, Converter>,
}

impl TextCodec {
    /// Creates a codec that knows no types at all.
    #[inline]
    pub fn empty() -> Self {
        Self {
            converters: HashMap::default(),
        }
    }

    /// Creates a codec with the built-in scalar conversions.
    pub fn new() -> Self {
        let mut codec = Self::empty();
        codec.register::<bool>();
        codec.register::<char>();
        codec.register::<i8>();
        codec.register::<i16>();
        codec.register::<i32>();
        codec.register::<i64>();
        codec.register::<u8>();
        codec.register::<u16>();
        codec.register::<u32>();
        codec.register::<u64>();
        codec.register::<f32>();
        codec.register::<f64>();
        codec.register::<String>();
        codec.register::<Duration>();
        codec
    }

    /// Registers the conversion of `T`, replacing any previous one.
    ///
    /// Returns `false` and does nothing if `T` is declared as a collection
    /// or as `Any`, since only named types are leaves.
    pub fn register<T: TextConvert>(&mut self) -> bool {
        let Some(path) = T::type_token().as_named() else {
            log::warn!("cannot register a text conversion for `{}`", T::type_token());
            return false;
        };
        self.converters.insert(
            path,
            Converter {
                to_text: to_text_of::<T>,
                from_text: from_text_of::<T>,
            },
        );
        true
    }

    /// Returns `true` if values of the type are written as text.
    #[inline]
    pub fn is_convertible(&self, ty: &TypeToken) -> bool {
        ty.as_named().is_some_and(|path| self.is_convertible_path(path))
    }

    #[inline]
    pub fn is_convertible_path(&self, type_path: &str) -> bool {
        self.converters.contains_key(type_path)
    }

    /// Returns the interned type path equal to `type_path`, if registered.
    pub fn known_path(&self, type_path: &str) -> Option<&'static str> {
        self.converters
            .get_key_value(type_path)
            .map(|(path, _)| *path)
    }

    /// Converts a value to text using the conversion of its runtime type.
    pub fn to_text(&self, value: &Value) -> Result<String, ValueError> {
        let path = value
            .type_path()
            .ok_or_else(|| ValueError::NotConvertible(value.kind_name().to_string()))?;
        let converter = self
            .converters
            .get(path)
            .ok_or_else(|| ValueError::NotConvertible(path.to_string()))?;
        (converter.to_text)(value)
    }

    /// Parses text as a value of the given type.
    ///
    /// Text read under an `Any` declaration stays a string.
    pub fn from_text(&self, ty: &TypeToken, text: &str) -> Result<Value, ValueError> {
        match ty {
            TypeToken::Any => Ok(Value::from(text)),
            TypeToken::Named(path) => {
                let converter = self
                    .converters
                    .get(path)
                    .ok_or_else(|| ValueError::NotConvertible(path.to_string()))?;
                (converter.from_text)(text)
            }
            TypeToken::Collection(_) => Err(ValueError::NotConvertible(ty.to_string())),
        }
    }
}

impl Default for TextCodec {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TextCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.converters.keys()).finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use core::time::Duration;

    use super::TextCodec;
    use crate::info::{TypeToken, type_paths};
    use crate::value::{Collection, Value, ValueError};

    #[test]
    fn scalars_round_trip() {
        let codec = TextCodec::new();
        let values = [
            Value::Bool(false),
            Value::Char('λ'),
            Value::I64(i64::MIN),
            Value::U64(u64::MAX),
            Value::F32(1.25),
            Value::from("a < b"),
            Value::Opaque(alloc::boxed::Box::new(Duration::from_millis(250))),
        ];
        for value in values {
            let text = codec.to_text(&value).unwrap();
            let back = codec.from_text(&value.runtime_type(), &text).unwrap();
            assert_eq!(back, value);
        }
    }

    #[test]
    fn unknown_types_are_not_convertible() {
        let codec = TextCodec::new();
        assert!(codec.is_convertible(&TypeToken::named(type_paths::STRING)));
        assert!(!codec.is_convertible(&TypeToken::named("app::Person")));
        assert!(!codec.is_convertible(&TypeToken::Any));

        let list = Value::Collection(Collection::List(alloc::vec::Vec::new()));
        assert!(matches!(codec.to_text(&list), Err(ValueError::NotConvertible(_))));
        assert!(matches!(
            codec.from_text(&TypeToken::named("app::Person"), "x"),
            Err(ValueError::NotConvertible(_))
        ));
    }
}
