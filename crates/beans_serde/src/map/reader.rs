use alloc::boxed::Box;
use alloc::format;
use alloc::string::{String, ToString};

use beans_reflect::bean::{Bean, MetaBean, TypedBean};
use beans_reflect::info::{CollectionKind, CollectionType, TypeToken, type_paths};
use beans_reflect::value::{Collection, Value};
use serde_json::{Map, Number};

use crate::shape::{ShapeBuilder, ShapeCategory};
use crate::{SerError, SerSettings};

type Json = serde_json::Value;

/// Describes a JSON node for error messages.
fn json_kind(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "a boolean",
        Json::Number(_) => "a number",
        Json::String(_) => "a string",
        Json::Array(_) => "an array",
        Json::Object(_) => "an object",
    }
}

fn unexpected(expected: &str, found: &Json) -> SerError {
    SerError::malformed(format!("expected {expected} but found {}", json_kind(found)))
}

// -----------------------------------------------------------------------------
// Numbers

/// Converts a whole float to an integer, `None` if it has a fraction.
fn whole(n: f64) -> Option<i128> {
    let in_range = n >= i128::MIN as f64 && n < i128::MAX as f64;
    (n.fract() == 0.0 && in_range).then_some(n as i128)
}

fn exact_integer(number: &Number) -> Option<i128> {
    if let Some(n) = number.as_i64() {
        Some(i128::from(n))
    } else if let Some(n) = number.as_u64() {
        Some(i128::from(n))
    } else {
        number.as_f64().and_then(whole)
    }
}

fn exact_f64(number: &Number) -> Option<f64> {
    if let Some(n) = number.as_i64() {
        let f = n as f64;
        (f as i128 == i128::from(n)).then_some(f)
    } else if let Some(n) = number.as_u64() {
        let f = n as f64;
        (f as i128 == i128::from(n)).then_some(f)
    } else {
        number.as_f64()
    }
}

/// Coerces a number into the numeric type `target`, which must hold it
/// exactly.
fn number_value(number: &Number, target: &'static str) -> Result<Value, SerError> {
    macro_rules! integer {
        ($ty:ty, $variant:ident) => {
            exact_integer(number)
                .and_then(|n| <$ty>::try_from(n).ok())
                .map(Value::$variant)
        };
    }
    let value = match target {
        type_paths::I8 => integer!(i8, I8),
        type_paths::I16 => integer!(i16, I16),
        type_paths::I32 => integer!(i32, I32),
        type_paths::I64 => integer!(i64, I64),
        type_paths::U8 => integer!(u8, U8),
        type_paths::U16 => integer!(u16, U16),
        type_paths::U32 => integer!(u32, U32),
        type_paths::U64 => integer!(u64, U64),
        type_paths::F64 => exact_f64(number).map(Value::F64),
        type_paths::F32 => exact_f64(number)
            .filter(|f| f64::from(*f as f32) == *f)
            .map(|f| Value::F32(f as f32)),
        _ => return Err(SerError::malformed(format!("`{target}` cannot be read from a number"))),
    };
    value.ok_or_else(|| SerError::NumericRange {
        value: number.to_string(),
        target: target.into(),
    })
}

/// The value of a number read under `Any`.
fn any_number(number: &Number) -> Value {
    if let Some(n) = number.as_i64() {
        match i32::try_from(n) {
            Ok(n) => Value::I32(n),
            Err(_) => Value::I64(n),
        }
    } else if let Some(n) = number.as_u64() {
        Value::U64(n)
    } else {
        Value::F64(number.as_f64().unwrap_or(f64::NAN))
    }
}

fn is_numeric(type_path: &str) -> bool {
    matches!(
        type_path,
        type_paths::I8
            | type_paths::I16
            | type_paths::I32
            | type_paths::I64
            | type_paths::U8
            | type_paths::U16
            | type_paths::U32
            | type_paths::U64
            | type_paths::F32
            | type_paths::F64
    )
}

fn parse_usize(json: &Json, what: &str) -> Result<usize, SerError> {
    json.as_u64()
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| SerError::malformed(format!("{what} must be a non-negative integer")))
}

/// Splits an array entry into exactly `N` parts.
fn tuple<'j, const N: usize>(json: &'j Json, what: &str) -> Result<&'j [Json; N], SerError> {
    json.as_array()
        .and_then(|items| <&[Json; N]>::try_from(items.as_slice()).ok())
        .ok_or_else(|| SerError::malformed(format!("{what} must be an array of {N} elements")))
}

// -----------------------------------------------------------------------------
// MapReader

/// Reads one bean graph from a JSON value.
///
/// The map flavor carries no type names, so the root type must be given.
/// Create one per document with [`SerSettings::map_reader`].
pub struct MapReader<'s> {
    settings: &'s SerSettings,
}

impl<'s> MapReader<'s> {
    #[inline]
    pub fn new(settings: &'s SerSettings) -> Self {
        Self { settings }
    }

    /// Reads a `T` from a JSON object.
    pub fn read<T: TypedBean>(self, json: &Json) -> Result<T, SerError> {
        let bean = self.read_meta(T::meta(), json)?;
        let found = bean.meta_bean().type_path();
        bean.into_any().downcast::<T>().map(|bean| *bean).map_err(|_| {
            SerError::malformed(format!("expected a `{}` but read a `{found}`", T::TYPE_PATH))
        })
    }

    /// Reads a bean of the given type from a JSON object.
    pub fn read_meta(self, meta: &'static MetaBean, json: &Json) -> Result<Box<dyn Bean>, SerError> {
        let object = json.as_object().ok_or_else(|| unexpected("an object", json))?;
        self.parse_bean(meta, object)
    }

    fn parse_bean(&self, meta: &'static MetaBean, object: &Map<String, Json>) -> Result<Box<dyn Bean>, SerError> {
        let type_path = meta.type_path();
        let deserializer = self.settings.deserializers().get(type_path);
        let mut builder = deserializer
            .create_builder(meta)
            .map_err(|err| err.in_bean_itself(type_path))?;
        for (name, json) in object {
            let Some(property) = deserializer.find_property(meta, name) else {
                log::debug!("skipping unknown property `{name}` of `{type_path}`");
                continue;
            };
            if !property.style().is_writable() {
                log::debug!("ignoring read-only property `{name}` of `{type_path}`");
                continue;
            }
            self.parse_value(json, property.declared_type())
                .and_then(|value| deserializer.set_value(&mut *builder, property, value))
                .map_err(|err| err.in_bean(type_path, name))?;
        }
        deserializer
            .build(builder)
            .map_err(|err| err.in_bean_itself(type_path))
    }

    fn parse_value(&self, json: &Json, declared: &TypeToken) -> Result<Option<Value>, SerError> {
        if json.is_null() {
            return Ok(None);
        }
        let value = match declared {
            TypeToken::Any => self.parse_any(json)?,
            TypeToken::Named(type_path) => self.parse_named(json, *type_path)?,
            TypeToken::Collection(ty) => {
                Value::Collection(self.parse_collection(json, ShapeBuilder::new(ty.clone()))?)
            }
        };
        Ok(Some(value))
    }

    fn parse_named(&self, json: &Json, type_path: &'static str) -> Result<Value, SerError> {
        let registry = self.settings.registry();
        let codec = registry.codec();
        match json {
            Json::Bool(b) if type_path == type_paths::BOOL => Ok(Value::Bool(*b)),
            Json::Number(number) if is_numeric(type_path) => number_value(number, type_path),
            Json::String(text) if codec.is_convertible_path(type_path) => {
                Ok(codec.from_text(&TypeToken::Named(type_path), text)?)
            }
            Json::Object(object) => match registry.get_bean(type_path) {
                Some(meta) => Ok(Value::Bean(self.parse_bean(meta, object)?)),
                None if codec.is_convertible_path(type_path) => Err(unexpected(type_path, json)),
                None => Err(SerError::UnknownType(type_path.into())),
            },
            _ if registry.known_type(type_path).is_none() => Err(SerError::UnknownType(type_path.into())),
            _ => Err(unexpected(type_path, json)),
        }
    }

    /// Reads a node whose declared type is `Any`.
    fn parse_any(&self, json: &Json) -> Result<Value, SerError> {
        let value = match json {
            Json::Bool(b) => Value::Bool(*b),
            Json::Number(number) => any_number(number),
            Json::String(text) => Value::String(text.clone()),
            Json::Array(_) => {
                let builder = ShapeBuilder::new(CollectionType::erased(CollectionKind::List));
                Value::Collection(self.parse_collection(json, builder)?)
            }
            Json::Object(_) => {
                let builder = ShapeBuilder::new(CollectionType::erased(CollectionKind::Map));
                Value::Collection(self.parse_collection(json, builder)?)
            }
            Json::Null => return Err(unexpected("a value", json)),
        };
        Ok(value)
    }

    fn parse_collection(&self, json: &Json, mut builder: ShapeBuilder) -> Result<Collection, SerError> {
        let category = builder.category();
        if category == ShapeCategory::Map {
            self.parse_map(json, &mut builder)?;
            return Ok(builder.build());
        }
        let items = json.as_array().ok_or_else(|| unexpected("an array", json))?;
        let mut entries = items.iter();
        if category == ShapeCategory::Grid {
            let (Some(rows), Some(columns)) = (entries.next(), entries.next()) else {
                return Err(SerError::malformed("grid must start with its rows and cols"));
            };
            builder.dimensions(parse_usize(rows, "grid rows")?, parse_usize(columns, "grid cols")?)?;
        }
        for entry in entries {
            match category {
                ShapeCategory::Sequence => {
                    let value = self.parse_value(entry, builder.value_type())?;
                    builder.add(None, None, value, 1)?;
                }
                ShapeCategory::Counted => {
                    let [value, count] = tuple::<2>(entry, "counted entry")?;
                    let value = self.parse_value(value, builder.value_type())?;
                    builder.add(None, None, value, parse_usize(count, "count")?)?;
                }
                ShapeCategory::Table | ShapeCategory::Grid => {
                    let [row, column, value] = tuple::<3>(entry, "table entry")?;
                    let row = self.parse_value(row, builder.key_type())?;
                    let column = self.parse_value(column, builder.column_type())?;
                    let value = self.parse_value(value, builder.value_type())?;
                    builder.add(row, column, value, 1)?;
                }
                ShapeCategory::Map => {}
            }
        }
        Ok(builder.build())
    }

    fn parse_map(&self, json: &Json, builder: &mut ShapeBuilder) -> Result<(), SerError> {
        match json {
            Json::Object(object) => {
                for (text, value) in object {
                    let key = self.parse_key(text, builder.key_type())?;
                    let value = self.parse_value(value, builder.value_type())?;
                    builder.add(Some(key), None, value, 1)?;
                }
                Ok(())
            }
            Json::Array(pairs) => {
                for pair in pairs {
                    let [key, value] = tuple::<2>(pair, "map entry")?;
                    let key = self.parse_value(key, builder.key_type())?;
                    let value = self.parse_value(value, builder.value_type())?;
                    builder.add(key, None, value, 1)?;
                }
                Ok(())
            }
            other => Err(unexpected("an object or an array", other)),
        }
    }

    /// Parses an object key as a value of the declared key type.
    fn parse_key(&self, text: &str, declared: &TypeToken) -> Result<Value, SerError> {
        let codec = self.settings.registry().codec();
        if declared.is_any() || codec.is_convertible(declared) {
            Ok(codec.from_text(declared, text)?)
        } else {
            Err(SerError::malformed(format!(
                "keys of `{declared}` cannot be read from object keys"
            )))
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;
    use alloc::sync::Arc;
    use alloc::vec::Vec;

    use beans_reflect::bean::{Bean, BeanBuilder, TypedBean, bean_eq};
    use beans_reflect::value::{Collection, Value};
    use serde_json::json;

    use crate::fixtures::{self, Address, AddressBook, Contact, Element, Empty, Person, Shapes};
    use crate::{BeanDeserializer, Deserializers, SerError, SerSettings, from_json_str, to_json_string};

    fn settings() -> SerSettings {
        SerSettings::compact(Arc::new(fixtures::registry()))
    }

    #[test]
    fn element_with_empty_child() {
        let json = json!({ "element": "Test", "child": {} });
        let element: Element = settings().map_reader().read(&json).unwrap();
        let expected = Element {
            element: fixtures::text("Test"),
            child: Some(Empty),
        };
        assert!(bean_eq(&element, &expected));
    }

    #[test]
    fn address_book_round_trip() {
        let mut book = fixtures::sample_book();
        // Numbers under `Any` read back as the smallest fitting integer.
        book.people[0].extra = Some(Value::I32(-7));
        // Subtypes are read as the declared type.
        book.primary = Some(Box::new(Contact {
            name: fixtures::text("Bob"),
        }));

        let settings = settings();
        let json = settings.map_writer().write(&book).unwrap();
        let read: AddressBook = settings.map_reader().read(&json).unwrap();
        assert!(bean_eq(&book, &read), "{json}");
    }

    #[test]
    fn every_shape_round_trips() {
        let settings = settings();
        for shapes in fixtures::shape_cases() {
            let json = settings.map_writer().write(&shapes).unwrap();
            let read: Shapes = settings.map_reader().read(&json).unwrap();
            assert_eq!(read, shapes, "{json}");
        }

        let [_, one, _] = fixtures::shape_cases();
        let json = settings.map_writer().write(&one).unwrap();
        assert_eq!(json["list"], json!([null]));
        assert_eq!(json["map"], json!({ "a": null }));
        assert_eq!(json["grid"], json!([2, 3, [1, 2, "Ann"]]));
    }

    #[test]
    fn oversized_grids_are_malformed() {
        let cases = [
            json!({ "seating": [4_294_967_296u64, 4_294_967_296u64] }),
            json!({ "seating": [1_048_577, 1] }),
            json!({ "seating": [u64::MAX, u64::MAX] }),
            json!({ "seating": [1, 1, [u64::MAX, 0, "A"]] }),
        ];
        for json in cases {
            let err = settings().map_reader().read::<AddressBook>(&json).unwrap_err();
            assert!(matches!(err.root_cause(), SerError::MalformedStructure(_)), "{json}");
        }
    }

    #[test]
    fn json_text_round_trip() {
        let book = fixtures::sample_book();
        let settings = settings().with_indent_size(2);
        let text = to_json_string(&book, &settings).unwrap();
        let read: AddressBook = from_json_str(&text, &settings).unwrap();
        assert_eq!(read.people[0].nicknames, ["x", "y"]);
        assert_eq!(read.labels.count(&fixtures::text("A")), 3);
        assert_eq!(read.seating.get(1, 2).map(String::as_str), Some("Ann"));

        let err = from_json_str::<AddressBook>("{", &settings).unwrap_err();
        assert!(matches!(err, SerError::Json(_)));
    }

    #[test]
    fn numbers_must_fit_exactly() {
        let json = json!({ "name": "Ann", "age": 300 });
        let err = settings().map_reader().read::<Person>(&json).unwrap_err();
        assert!(matches!(
            err.root_cause(),
            SerError::NumericRange { value, target } if value == "300" && target == "u8"
        ));

        for age in [json!(-1), json!(2.5)] {
            let json = json!({ "age": age });
            let err = settings().map_reader().read::<Person>(&json).unwrap_err();
            assert!(matches!(err.root_cause(), SerError::NumericRange { .. }));
        }

        let json = json!({ "age": 30.0 });
        let ann: Person = settings().map_reader().read(&json).unwrap();
        assert_eq!(ann.age, 30);
    }

    #[test]
    fn any_numbers() {
        let cases = [
            (json!(-7), Value::I32(-7)),
            (json!(5_000_000_000i64), Value::I64(5_000_000_000)),
            (json!(u64::MAX), Value::U64(u64::MAX)),
            (json!(1.5), Value::F64(1.5)),
        ];
        for (extra, expected) in cases {
            let json = json!({ "extra": extra });
            let ann: Person = settings().map_reader().read(&json).unwrap();
            assert_eq!(ann.extra, Some(expected));
        }
    }

    #[test]
    fn any_structures() {
        let json = json!({ "extra": { "list": [1, "two", null], "flag": true } });
        let ann: Person = settings().map_reader().read(&json).unwrap();
        let expected = Collection::Map(Vec::from([
            (
                Some(Value::from("list")),
                Some(Value::Collection(Collection::List(Vec::from([
                    Some(Value::I32(1)),
                    Some(Value::from("two")),
                    None,
                ])))),
            ),
            (Some(Value::from("flag")), Some(Value::Bool(true))),
        ]));
        assert_eq!(ann.extra, Some(Value::Collection(expected)));
    }

    #[test]
    fn non_finite_floats_are_text() {
        let mut ann = fixtures::person("Ann", 1);
        ann.extra = Some(Value::F64(f64::INFINITY));
        let json = settings().map_writer().write(&ann).unwrap();
        assert_eq!(json["extra"], json!("inf"));
    }

    #[test]
    fn unknown_and_derived_keys_are_skipped() {
        let json = json!({ "name": "Ann", "shoeSize": [1, 2], "initial": "Z" });
        let ann: Person = settings().map_reader().read(&json).unwrap();
        assert_eq!(ann.name, "Ann");
    }

    #[test]
    fn malformed_documents() {
        let cases = [
            json!({ "nicknames": "x" }),
            json!({ "address": [1] }),
            json!({ "name": 5 }),
        ];
        for json in cases {
            let err = settings().map_reader().read::<Person>(&json).unwrap_err();
            assert!(matches!(err.root_cause(), SerError::MalformedStructure(_)), "{json}");
        }

        let cases = [
            json!({ "labels": [["A"]] }),
            json!({ "labels": [["A", -1]] }),
            json!({ "seating": [[0, 0, "A"]] }),
            json!({ "seating": [1, 1, [1, 0, "A"]] }),
            json!({ "distances": [["a", "b"]] }),
            json!({ "locations": { "Leeds": "home" } }),
        ];
        for json in cases {
            let err = settings().map_reader().read::<AddressBook>(&json).unwrap_err();
            assert!(matches!(err.root_cause(), SerError::MalformedStructure(_)), "{json}");
        }
    }

    struct Refusing;

    impl BeanDeserializer for Refusing {
        fn build(&self, _builder: Box<dyn BeanBuilder>) -> Result<Box<dyn Bean>, SerError> {
            Err(SerError::malformed("addresses are closed"))
        }
    }

    #[test]
    fn bean_level_failures_carry_context() {
        let mut deserializers = Deserializers::new();
        deserializers.register(Address::TYPE_PATH, Refusing);
        let refusing = settings().with_deserializers(Arc::new(deserializers));

        let json = json!({ "name": "Ann", "address": { "city": "York" } });
        let err = refusing.map_reader().read::<Person>(&json).unwrap_err();
        let SerError::InBean { bean, property, source } = &err else {
            panic!("no context: {err}");
        };
        assert_eq!((*bean, property.as_deref()), (Person::TYPE_PATH, Some("address")));
        assert!(matches!(
            &**source,
            SerError::InBean { bean: "contacts::Address", property: None, .. }
        ));

        let err = refusing.map_reader().read::<Address>(&json!({})).unwrap_err();
        assert!(matches!(err, SerError::InBean { property: None, .. }));
    }

    #[test]
    fn root_must_be_an_object() {
        let meta = Person::meta();
        let err = settings().map_reader().read_meta(meta, &json!([1])).unwrap_err();
        assert!(matches!(err, SerError::MalformedStructure(_)));

        let bean = settings().map_reader().read_meta(meta, &json!({})).unwrap();
        assert_eq!(bean.meta_bean().type_path(), Person::TYPE_PATH);
    }
}
