use alloc::borrow::Cow;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use beans_reflect::bean::Bean;
use beans_reflect::info::TypeToken;
use beans_reflect::value::Value;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::shape::{ShapeCategory, ShapeIter, classify};
use crate::type_name::WriteContext;
use crate::xml::{
    ATTR_COL, ATTR_COLS, ATTR_COUNT, ATTR_KEY, ATTR_META_TYPE, ATTR_NULL, ATTR_ROW, ATTR_ROWS,
    ATTR_TYPE, ENTRY, ITEM, ROOT, needs_type_marker,
};
use crate::{SerError, SerSettings};

// -----------------------------------------------------------------------------
// Tag

/// An element about to be written.
struct Tag<'n> {
    name: &'n str,
    attributes: Vec<(&'static str, String)>,
}

impl<'n> Tag<'n> {
    #[inline]
    fn new(name: &'n str) -> Self {
        Self {
            name,
            attributes: Vec::new(),
        }
    }

    #[inline]
    fn with(mut self, key: &'static str, value: impl ToString) -> Self {
        self.attributes.push((key, value.to_string()));
        self
    }

    #[inline]
    fn push(&mut self, key: &'static str, value: impl ToString) {
        self.attributes.push((key, value.to_string()));
    }

    fn start(&self) -> BytesStart<'n> {
        let mut start = BytesStart::new(self.name);
        for (key, value) in &self.attributes {
            start.push_attribute((*key, value.as_str()));
        }
        start
    }
}

// -----------------------------------------------------------------------------
// XmlWriter

/// Writes one bean graph as an XML document.
///
/// A writer keeps the type names it has written, so it is consumed by
/// [`write`](Self::write); create one per document with
/// [`SerSettings::xml_writer`].
pub struct XmlWriter<'s> {
    settings: &'s SerSettings,
    context: WriteContext,
    writer: Writer<Vec<u8>>,
}

impl<'s> XmlWriter<'s> {
    pub fn new(settings: &'s SerSettings) -> Self {
        let writer = match settings.indent_size() {
            0 => Writer::new(Vec::new()),
            size => Writer::new_with_indent(Vec::new(), b' ', size),
        };
        Self {
            settings,
            context: WriteContext::new(settings.short_types()),
            writer,
        }
    }

    /// Writes the document.
    ///
    /// Nothing is returned on error, so a failed write never produces a
    /// partial document.
    pub fn write(mut self, bean: &dyn Bean) -> Result<String, SerError> {
        self.emit(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        let type_name = self.context.encode_root(bean.meta_bean().type_path());
        let root = Tag::new(ROOT).with(ATTR_TYPE, type_name);
        self.open(&root)?;
        self.write_properties(bean)?;
        self.close(ROOT)?;
        String::from_utf8(self.writer.into_inner()).map_err(SerError::xml)
    }

    #[inline]
    fn emit(&mut self, event: Event<'_>) -> Result<(), SerError> {
        self.writer.write_event(event).map_err(SerError::xml)
    }

    #[inline]
    fn open(&mut self, tag: &Tag<'_>) -> Result<(), SerError> {
        self.emit(Event::Start(tag.start()))
    }

    #[inline]
    fn close(&mut self, name: &str) -> Result<(), SerError> {
        self.emit(Event::End(BytesEnd::new(name)))
    }

    fn write_empty(&mut self, tag: &Tag<'_>) -> Result<(), SerError> {
        self.emit(Event::Empty(tag.start()))
    }

    fn write_text(&mut self, tag: &Tag<'_>, text: &str) -> Result<(), SerError> {
        self.open(tag)?;
        self.emit(Event::Text(BytesText::new(text)))?;
        self.close(tag.name)
    }

    fn write_properties(&mut self, bean: &dyn Bean) -> Result<(), SerError> {
        let meta = bean.meta_bean();
        for property in meta.properties() {
            let style = property.style();
            let included = style.is_serializable()
                || (style.is_derived() && self.settings.include_derived());
            if !included {
                continue;
            }
            if let Some(value) = property.get(bean) {
                self.write_value(Tag::new(property.name()), property.declared_type(), &value)?;
            }
        }
        Ok(())
    }

    fn write_value(&mut self, mut tag: Tag<'_>, declared: &TypeToken, value: &Value) -> Result<(), SerError> {
        if let Some(iter) = classify(declared, value) {
            return self.write_collection(tag, iter);
        }
        let settings = self.settings;
        let registry = settings.registry();
        if let Value::Bean(bean) = value {
            let type_path = bean.meta_bean().type_path();
            if !registry.codec().is_convertible_path(type_path) {
                if needs_type_marker(declared, type_path) {
                    tag.push(ATTR_TYPE, self.context.encode(type_path));
                }
                self.open(&tag)?;
                self.write_properties(&**bean)?;
                return self.close(tag.name);
            }
        }
        let runtime = value.type_path().unwrap_or_default();
        let text = registry
            .codec()
            .to_text(value)
            .map_err(|_| SerError::NotSerializable(runtime.into()))?;
        if needs_type_marker(declared, runtime) {
            tag.push(ATTR_TYPE, self.context.encode(runtime));
        }
        self.write_text(&tag, &text)
    }

    /// Writes a collection entry value, or a null marker.
    fn write_entry(&mut self, mut tag: Tag<'_>, declared: &TypeToken, value: Option<&Value>) -> Result<(), SerError> {
        match value {
            Some(value) => self.write_value(tag, declared, value),
            None => {
                tag.push(ATTR_NULL, "true");
                self.write_empty(&tag)
            }
        }
    }

    fn write_collection(&mut self, mut tag: Tag<'_>, mut iter: ShapeIter<'_>) -> Result<(), SerError> {
        if iter.meta_type_required() {
            tag.push(ATTR_META_TYPE, iter.meta_type_name());
        }
        if let Some((rows, columns)) = iter.dimensions() {
            tag.push(ATTR_ROWS, rows);
            tag.push(ATTR_COLS, columns);
        }
        self.open(&tag)?;
        while iter.advance() {
            match iter.category() {
                ShapeCategory::Sequence => {
                    self.write_entry(Tag::new(ITEM), iter.value_type(), iter.value())?;
                }
                ShapeCategory::Counted => {
                    let mut item = Tag::new(ITEM);
                    if iter.count() != 1 {
                        item.push(ATTR_COUNT, iter.count());
                    }
                    self.write_entry(item, iter.value_type(), iter.value())?;
                }
                ShapeCategory::Map => self.write_map_entry(&iter)?,
                ShapeCategory::Table | ShapeCategory::Grid => {
                    let row = self.position_text(iter.key(), iter.key_type(), ATTR_ROW)?;
                    let column = self.position_text(iter.column(), iter.column_type(), ATTR_COL)?;
                    let item = Tag::new(ITEM).with(ATTR_ROW, row).with(ATTR_COL, column);
                    self.write_entry(item, iter.value_type(), iter.value())?;
                }
            }
        }
        self.close(tag.name)
    }

    fn write_map_entry(&mut self, iter: &ShapeIter<'_>) -> Result<(), SerError> {
        let key = iter
            .key()
            .ok_or_else(|| SerError::malformed("map keys must not be null"))?;
        match self.simple_text(&key, iter.key_type()) {
            Some(text) => {
                let entry = Tag::new(ENTRY).with(ATTR_KEY, text);
                self.write_entry(entry, iter.value_type(), iter.value())
            }
            None => {
                self.open(&Tag::new(ENTRY))?;
                self.write_value(Tag::new(ITEM), iter.key_type(), &key)?;
                self.write_entry(Tag::new(ITEM), iter.value_type(), iter.value())?;
                self.close(ENTRY)
            }
        }
    }

    /// Text of a value that can be written as an attribute without a type
    /// marker.
    fn simple_text(&self, value: &Value, declared: &TypeToken) -> Option<String> {
        let runtime = value.type_path()?;
        if needs_type_marker(declared, runtime) {
            return None;
        }
        self.settings.registry().codec().to_text(value).ok()
    }

    fn position_text(
        &self,
        position: Option<Cow<'_, Value>>,
        declared: &TypeToken,
        role: &str,
    ) -> Result<String, SerError> {
        let position = position
            .ok_or_else(|| SerError::malformed(alloc::format!("table {role} must not be null")))?;
        if let Some(text) = self.simple_text(&position, declared) {
            return Ok(text);
        }
        // Attributes carry no type marker, so the position would read back
        // as the declared type.
        let runtime = position.type_path().unwrap_or("<collection>");
        log::debug!("table {role} of type `{runtime}` cannot be written under `{declared}`");
        Err(SerError::NotSerializable(runtime.into()))
    }
}

// -----------------------------------------------------------------------------
// Tests
