use alloc::string::String;
use alloc::vec::Vec;

use beans_reflect::bean::Bean;
use beans_reflect::info::TypeToken;
use beans_reflect::value::Value;
use serde_json::{Map, Number};

use crate::shape::{ShapeCategory, ShapeIter, classify};
use crate::{SerError, SerSettings};

type Json = serde_json::Value;

// -----------------------------------------------------------------------------
// MapWriter

/// Writes one bean graph as a JSON value.
///
/// Create one per document with [`SerSettings::map_writer`].
pub struct MapWriter<'s> {
    settings: &'s SerSettings,
}

impl<'s> MapWriter<'s> {
    #[inline]
    pub fn new(settings: &'s SerSettings) -> Self {
        Self { settings }
    }

    /// Writes the bean as a JSON object.
    pub fn write(self, bean: &dyn Bean) -> Result<Json, SerError> {
        self.write_bean(bean)
    }

    fn write_bean(&self, bean: &dyn Bean) -> Result<Json, SerError> {
        let mut object = Map::new();
        for property in bean.meta_bean().properties() {
            let style = property.style();
            let included = style.is_serializable()
                || (style.is_derived() && self.settings.include_derived());
            if !included {
                continue;
            }
            if let Some(value) = property.get(bean) {
                let json = self.write_value(property.declared_type(), &value)?;
                object.insert(String::from(property.name()), json);
            }
        }
        Ok(Json::Object(object))
    }

    fn write_value(&self, declared: &TypeToken, value: &Value) -> Result<Json, SerError> {
        if let Some(iter) = classify(declared, value) {
            return self.write_collection(iter);
        }
        let codec = self.settings.registry().codec();
        let json = match value {
            Value::Bool(b) => Json::Bool(*b),
            Value::I8(n) => Json::from(*n),
            Value::I16(n) => Json::from(*n),
            Value::I32(n) => Json::from(*n),
            Value::I64(n) => Json::from(*n),
            Value::U8(n) => Json::from(*n),
            Value::U16(n) => Json::from(*n),
            Value::U32(n) => Json::from(*n),
            Value::U64(n) => Json::from(*n),
            Value::F32(n) => self.write_float(f64::from(*n), value)?,
            Value::F64(n) => self.write_float(*n, value)?,
            Value::String(s) => Json::String(s.clone()),
            Value::Bean(bean) if !codec.is_convertible_path(bean.meta_bean().type_path()) => {
                self.write_bean(&**bean)?
            }
            other => Json::String(self.write_text(other)?),
        };
        Ok(json)
    }

    /// Non-finite floats have no JSON number and are written as text.
    fn write_float(&self, n: f64, value: &Value) -> Result<Json, SerError> {
        match Number::from_f64(n) {
            Some(number) => Ok(Json::Number(number)),
            None => Ok(Json::String(self.write_text(value)?)),
        }
    }

    fn write_text(&self, value: &Value) -> Result<String, SerError> {
        self.settings
            .registry()
            .codec()
            .to_text(value)
            .map_err(|_| SerError::NotSerializable(String::from(value.type_path().unwrap_or(value.kind_name()))))
    }

    fn write_entry(&self, declared: &TypeToken, value: Option<&Value>) -> Result<Json, SerError> {
        match value {
            Some(value) => self.write_value(declared, value),
            None => Ok(Json::Null),
        }
    }

    fn write_collection(&self, mut iter: ShapeIter<'_>) -> Result<Json, SerError> {
        if iter.category() == ShapeCategory::Map {
            return self.write_map(iter);
        }
        let mut items = Vec::with_capacity(iter.size() + 2);
        if let Some((rows, columns)) = iter.dimensions() {
            items.push(Json::from(rows));
            items.push(Json::from(columns));
        }
        while iter.advance() {
            let value = self.write_entry(iter.value_type(), iter.value())?;
            let item = match iter.category() {
                ShapeCategory::Sequence => value,
                ShapeCategory::Counted => Json::Array(Vec::from([value, Json::from(iter.count())])),
                ShapeCategory::Table | ShapeCategory::Grid => {
                    let row = self.write_position(iter.key().as_deref(), iter.key_type(), "row")?;
                    let column =
                        self.write_position(iter.column().as_deref(), iter.column_type(), "column")?;
                    Json::Array(Vec::from([row, column, value]))
                }
                ShapeCategory::Map => unreachable!("maps are written by write_map"),
            };
            items.push(item);
        }
        Ok(Json::Array(items))
    }

    fn write_position(&self, position: Option<&Value>, declared: &TypeToken, role: &str) -> Result<Json, SerError> {
        let position = position
            .ok_or_else(|| SerError::malformed(alloc::format!("table {role} must not be null")))?;
        self.write_value(declared, position)
    }

    /// Writes an object when every key has a distinct text form, otherwise
    /// an array of `[key, value]` pairs.
    fn write_map(&self, mut iter: ShapeIter<'_>) -> Result<Json, SerError> {
        let codec = self.settings.registry().codec();
        let text_keys = iter.key_type().is_any() || codec.is_convertible(iter.key_type());
        let mut object = Map::new();
        let mut pairs = Vec::with_capacity(iter.size());
        let mut as_object = text_keys;
        while iter.advance() {
            let key = iter
                .key()
                .ok_or_else(|| SerError::malformed("map keys must not be null"))?;
            let value = self.write_entry(iter.value_type(), iter.value())?;
            if as_object {
                match self.key_text(&key) {
                    Some(text) if !object.contains_key(&text) => {
                        object.insert(text, value.clone());
                    }
                    _ => as_object = false,
                }
            }
            pairs.push(Json::Array(Vec::from([self.write_value(iter.key_type(), &key)?, value])));
        }
        Ok(if as_object {
            Json::Object(object)
        } else {
            Json::Array(pairs)
        })
    }

    fn key_text(&self, key: &Value) -> Option<String> {
        match key {
            Value::String(s) => Some(s.clone()),
            Value::Collection(_) => None,
            other => self.settings.registry().codec().to_text(other).ok(),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::sync::Arc;
    use alloc::vec::Vec;

    use beans_reflect::value::{Collection, Value};
    use serde_json::json;

    use crate::fixtures::{self, Element, Empty, Person};
    use crate::{SerError, SerSettings, to_json_string};

    fn settings() -> SerSettings {
        SerSettings::compact(Arc::new(fixtures::registry()))
    }

    #[test]
    fn element_with_empty_child() {
        let element = Element {
            element: fixtures::text("Test"),
            child: Some(Empty),
        };
        let json = settings().map_writer().write(&element).unwrap();
        assert_eq!(json, json!({ "element": "Test", "child": {} }));
    }

    #[test]
    fn scalars_and_sequences() {
        let mut ann = fixtures::person("Ann", 34);
        ann.nicknames = Vec::from([fixtures::text("x"), fixtures::text("y")]);
        ann.reminder = Some(core::time::Duration::from_millis(1500));
        ann.extra = Some(Value::Collection(Collection::List(Vec::from([
            Some(Value::F64(f64::NAN)),
            None,
            Some(Value::Char('c')),
        ]))));
        let json = settings().map_writer().write(&ann).unwrap();
        assert_eq!(
            json,
            json!({
                "name": "Ann",
                "age": 34,
                "nicknames": ["x", "y"],
                "reminder": "PT1.5S",
                "extra": ["NaN", null, "c"],
            })
        );
    }

    #[test]
    fn collection_shapes() {
        let book = fixtures::sample_book();
        let json = settings().map_writer().write(&book).unwrap();
        assert_eq!(json["labels"], json!([["A", 3], ["B", 1]]));
        assert_eq!(json["byName"]["bob"]["age"], json!(51));
        assert_eq!(
            json["locations"][0],
            json!([{ "street": "1 High St", "city": "Leeds" }, "home"])
        );
        assert_eq!(json["distances"], json!([["Leeds", "York", 40], ["York", "Hull", 60]]));
        assert_eq!(json["seating"], json!([2, 3, [0, 0, "Bob"], [1, 2, "Ann"]]));
    }

    #[test]
    fn colliding_key_text_falls_back_to_pairs() {
        let mut ann = fixtures::person("Ann", 34);
        ann.extra = Some(Value::Collection(Collection::Map(Vec::from([
            (Some(Value::I32(1)), Some(Value::from("int"))),
            (Some(Value::from("1")), Some(Value::from("text"))),
        ]))));
        let json = settings().map_writer().write(&ann).unwrap();
        assert_eq!(json["extra"], json!([[1, "int"], ["1", "text"]]));
    }

    #[test]
    fn null_keys_are_rejected() {
        let mut ann = fixtures::person("Ann", 34);
        ann.extra = Some(Value::Collection(Collection::Map(Vec::from([(
            None,
            Some(Value::from("lost")),
        )]))));
        let err = settings().map_writer().write(&ann).unwrap_err();
        assert!(matches!(err, SerError::MalformedStructure(_)));
    }

    #[test]
    fn json_text_uses_indent_size() {
        let contact = fixtures::Contact {
            name: fixtures::text("Ann"),
        };
        assert_eq!(to_json_string(&contact, &settings()).unwrap(), r#"{"name":"Ann"}"#);

        let pretty = settings().with_indent_size(4);
        assert_eq!(
            to_json_string(&contact, &pretty).unwrap(),
            "{\n    \"name\": \"Ann\"\n}"
        );
    }

    #[test]
    fn property_order_is_kept() {
        let person: Person = fixtures::person("Ann", 3);
        let json = settings().map_writer().write(&person).unwrap();
        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["name", "age", "nicknames"]);
    }
}
