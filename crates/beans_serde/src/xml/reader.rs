use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use beans_reflect::bean::{Bean, BeanBuilder, MetaBean, TypedBean};
use beans_reflect::info::TypeToken;
use beans_reflect::value::{Collection, Value};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::deserializer::BeanDeserializer;
use crate::shape::{ShapeBuilder, ShapeCategory};
use crate::type_name::ParseContext;
use crate::xml::{
    ATTR_COL, ATTR_COLS, ATTR_COUNT, ATTR_KEY, ATTR_META_TYPE, ATTR_NULL, ATTR_ROW, ATTR_ROWS,
    ATTR_TYPE, ENTRY, ITEM, ROOT,
};
use crate::{SerError, SerSettings};

// -----------------------------------------------------------------------------
// Node

/// A start tag with its attributes decoded.
#[derive(Debug)]
struct Node {
    name: String,
    attributes: Vec<(String, String)>,
}

impl Node {
    fn from_start(start: &BytesStart<'_>) -> Result<Self, SerError> {
        let name = core::str::from_utf8(start.name().as_ref())
            .map_err(SerError::xml)?
            .into();
        let mut attributes = Vec::new();
        for attribute in start.attributes() {
            let attribute = attribute.map_err(SerError::xml)?;
            let key = core::str::from_utf8(attribute.key.as_ref())
                .map_err(SerError::xml)?
                .into();
            let value = attribute.unescape_value().map_err(SerError::xml)?.into_owned();
            attributes.push((key, value));
        }
        Ok(Self { name, attributes })
    }

    fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    fn require(&self, name: &str) -> Result<(), SerError> {
        if self.name == name {
            Ok(())
        } else {
            Err(SerError::malformed(format!(
                "expected <{name}> but found <{}>",
                self.name
            )))
        }
    }
}

fn parse_count(text: &str, what: &str) -> Result<usize, SerError> {
    text.parse::<usize>()
        .map_err(|_| SerError::malformed(format!("{what} must be a non-negative integer, found `{text}`")))
}

// -----------------------------------------------------------------------------
// XmlReader

/// Reads one XML document into a bean graph.
///
/// Create one per document with [`SerSettings::xml_reader`].
pub struct XmlReader<'s> {
    settings: &'s SerSettings,
    context: ParseContext,
}

impl<'s> XmlReader<'s> {
    #[inline]
    pub fn new(settings: &'s SerSettings) -> Self {
        Self {
            settings,
            context: ParseContext::new(),
        }
    }

    /// Reads a document whose root is a `T`.
    pub fn read<T: TypedBean>(self, xml: &str) -> Result<T, SerError> {
        let bean = self.read_as(xml, &TypeToken::named(T::TYPE_PATH))?;
        let found = bean.meta_bean().type_path();
        bean.into_any().downcast::<T>().map(|bean| *bean).map_err(|_| {
            SerError::malformed(format!("expected a `{}` but read a `{found}`", T::TYPE_PATH))
        })
    }

    /// Reads a document whose root may be any registered bean.
    #[inline]
    pub fn read_bean(self, xml: &str) -> Result<Box<dyn Bean>, SerError> {
        self.read_as(xml, &TypeToken::Any)
    }

    /// Reads a document whose root must be assignable to `declared`.
    pub fn read_as(self, xml: &str, declared: &TypeToken) -> Result<Box<dyn Bean>, SerError> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().expand_empty_elements = true;
        let mut parser = Parser {
            settings: self.settings,
            context: self.context,
            reader,
        };
        parser.parse_document(declared)
    }
}

// -----------------------------------------------------------------------------
// Parser

struct Parser<'s, 'x> {
    settings: &'s SerSettings,
    context: ParseContext,
    reader: Reader<&'x [u8]>,
}

impl<'s, 'x> Parser<'s, 'x> {
    #[inline]
    fn next_event(&mut self) -> Result<Event<'x>, SerError> {
        self.reader.read_event().map_err(SerError::xml)
    }

    /// Moves to the next child element of the current element.
    ///
    /// Returns `None` once the end tag of the current element is consumed.
    fn next_child(&mut self) -> Result<Option<Node>, SerError> {
        loop {
            match self.next_event()? {
                Event::Start(start) => return Node::from_start(&start).map(Some),
                Event::End(_) => return Ok(None),
                Event::Eof => return Err(SerError::malformed("unexpected end of input")),
                _ => {}
            }
        }
    }

    /// Reads the text content of the current element, up to its end tag.
    fn read_text(&mut self) -> Result<String, SerError> {
        let mut text = String::new();
        loop {
            match self.next_event()? {
                Event::Text(content) => {
                    text.push_str(&content.unescape().map_err(SerError::xml)?);
                }
                Event::CData(content) => {
                    text.push_str(core::str::from_utf8(&content).map_err(SerError::xml)?);
                }
                Event::End(_) => return Ok(text),
                Event::Start(start) => {
                    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
                    return Err(SerError::malformed(format!(
                        "unexpected element <{name}> in a text value"
                    )));
                }
                Event::Eof => return Err(SerError::malformed("unexpected end of input")),
                _ => {}
            }
        }
    }

    /// Skips the rest of the current element, whatever it contains.
    fn skip(&mut self) -> Result<(), SerError> {
        let mut depth = 0usize;
        loop {
            match self.next_event()? {
                Event::Start(_) => depth += 1,
                Event::End(_) if depth == 0 => return Ok(()),
                Event::End(_) => depth -= 1,
                Event::Eof => return Err(SerError::malformed("unexpected end of input")),
                _ => {}
            }
        }
    }

    fn parse_document(&mut self, declared: &TypeToken) -> Result<Box<dyn Bean>, SerError> {
        let settings = self.settings;
        let registry = settings.registry();
        let root = loop {
            match self.next_event()? {
                Event::Start(start) => break Node::from_start(&start)?,
                Event::Eof | Event::End(_) => {
                    return Err(SerError::malformed("document has no root element"));
                }
                _ => {}
            }
        };
        root.require(ROOT)?;
        let name = root
            .attr(ATTR_TYPE)
            .ok_or_else(|| SerError::malformed("root element has no type"))?;
        let type_path = self.context.decode_root(name, registry)?;
        if !registry.is_assignable(declared, type_path) {
            return Err(SerError::malformed(format!(
                "root `{type_path}` is not a `{declared}`"
            )));
        }
        let meta = registry
            .get_bean(type_path)
            .ok_or_else(|| SerError::UnknownType(type_path.into()))?;
        let bean = self.parse_bean(meta)?;
        loop {
            match self.next_event()? {
                Event::Eof => return Ok(bean),
                Event::Start(_) | Event::End(_) | Event::Empty(_) => {
                    return Err(SerError::malformed("content after the root element"));
                }
                _ => {}
            }
        }
    }

    fn parse_bean(&mut self, meta: &'static MetaBean) -> Result<Box<dyn Bean>, SerError> {
        let settings = self.settings;
        let type_path = meta.type_path();
        let deserializer = settings.deserializers().get(type_path);
        let mut builder = deserializer
            .create_builder(meta)
            .map_err(|err| err.in_bean_itself(type_path))?;
        while let Some(node) = self.next_child().map_err(|err| err.in_bean_itself(type_path))? {
            self.parse_property(meta, deserializer, &mut *builder, &node)
                .map_err(|err| err.in_bean(type_path, &node.name))?;
        }
        deserializer
            .build(builder)
            .map_err(|err| err.in_bean_itself(type_path))
    }

    fn parse_property(
        &mut self,
        meta: &'static MetaBean,
        deserializer: &dyn BeanDeserializer,
        builder: &mut dyn BeanBuilder,
        node: &Node,
    ) -> Result<(), SerError> {
        let Some(property) = deserializer.find_property(meta, &node.name) else {
            log::debug!("skipping unknown property `{}` of `{}`", node.name, meta.type_path());
            return self.skip();
        };
        if !property.style().is_writable() {
            log::debug!("ignoring read-only property `{}` of `{}`", node.name, meta.type_path());
            return self.skip();
        }
        let value = self.parse_value(node, property.declared_type())?;
        deserializer.set_value(builder, property, value)
    }

    fn parse_value(&mut self, node: &Node, declared: &TypeToken) -> Result<Option<Value>, SerError> {
        if node.attr(ATTR_NULL) == Some("true") {
            self.skip()?;
            return Ok(None);
        }
        let settings = self.settings;
        let registry = settings.registry();
        let effective = match node.attr(ATTR_TYPE) {
            Some(name) => TypeToken::Named(self.context.decode(name, registry)?),
            None => declared.clone(),
        };
        let meta_type = node.attr(ATTR_META_TYPE);

        if let TypeToken::Named(type_path) = effective {
            if registry.codec().is_convertible_path(type_path) {
                let text = self.read_text()?;
                return Ok(Some(registry.codec().from_text(&effective, &text)?));
            }
            if let Some(meta) = registry.get_bean(type_path) {
                if !registry.is_assignable(declared, type_path) {
                    return Err(SerError::malformed(format!(
                        "`{type_path}` is not a `{declared}`"
                    )));
                }
                return Ok(Some(Value::Bean(self.parse_bean(meta)?)));
            }
            if meta_type.is_none() {
                return Err(SerError::UnknownType(type_path.into()));
            }
        }
        if let Some(builder) = ShapeBuilder::for_node(&effective, meta_type)? {
            let collection = self.parse_collection(node, builder)?;
            return Ok(Some(Value::Collection(collection)));
        }
        Ok(Some(Value::String(self.read_text()?)))
    }

    /// Parses the text of an attribute as a value of the declared type.
    fn parse_attribute(&self, text: &str, declared: &TypeToken) -> Result<Value, SerError> {
        let codec = self.settings.registry().codec();
        if declared.is_any() || codec.is_convertible(declared) {
            Ok(codec.from_text(declared, text)?)
        } else {
            Err(SerError::malformed(format!(
                "values of `{declared}` cannot be read from an attribute"
            )))
        }
    }

    fn parse_collection(&mut self, node: &Node, mut builder: ShapeBuilder) -> Result<Collection, SerError> {
        let category = builder.category();
        match (node.attr(ATTR_ROWS), node.attr(ATTR_COLS)) {
            (Some(rows), Some(columns)) => {
                builder.dimensions(parse_count(rows, ATTR_ROWS)?, parse_count(columns, ATTR_COLS)?)?;
            }
            (None, None) => {}
            _ => return Err(SerError::malformed("grid needs both rows and cols")),
        }
        while let Some(child) = self.next_child()? {
            match category {
                ShapeCategory::Sequence | ShapeCategory::Counted => {
                    child.require(ITEM)?;
                    let count = self.entry_count(&child, category)?;
                    let value = self.parse_value(&child, builder.value_type())?;
                    builder.add(None, None, value, count)?;
                }
                ShapeCategory::Map => {
                    child.require(ENTRY)?;
                    self.entry_count(&child, category)?;
                    let (key, value) = match child.attr(ATTR_KEY) {
                        Some(text) => {
                            let key = self.parse_attribute(text, builder.key_type())?;
                            (Some(key), self.parse_value(&child, builder.value_type())?)
                        }
                        None => self.parse_complex_entry(&builder)?,
                    };
                    builder.add(key, None, value, 1)?;
                }
                ShapeCategory::Table | ShapeCategory::Grid => {
                    child.require(ITEM)?;
                    self.entry_count(&child, category)?;
                    let row = child
                        .attr(ATTR_ROW)
                        .ok_or_else(|| SerError::malformed("entry without a row"))?;
                    let column = child
                        .attr(ATTR_COL)
                        .ok_or_else(|| SerError::malformed("entry without a column"))?;
                    let row = self.parse_attribute(row, builder.key_type())?;
                    let column = self.parse_attribute(column, builder.column_type())?;
                    let value = self.parse_value(&child, builder.value_type())?;
                    builder.add(Some(row), Some(column), value, 1)?;
                }
            }
        }
        Ok(builder.build())
    }

    /// Reads a map entry written as a key item followed by a value item.
    fn parse_complex_entry(&mut self, builder: &ShapeBuilder) -> Result<(Option<Value>, Option<Value>), SerError> {
        let key_node = self
            .next_child()?
            .ok_or_else(|| SerError::malformed("map entry without a key"))?;
        key_node.require(ITEM)?;
        let key = self.parse_value(&key_node, builder.key_type())?;
        let value_node = self
            .next_child()?
            .ok_or_else(|| SerError::malformed("map entry without a value"))?;
        value_node.require(ITEM)?;
        let value = self.parse_value(&value_node, builder.value_type())?;
        if self.next_child()?.is_some() {
            return Err(SerError::malformed("map entry with more than two items"));
        }
        Ok((key, value))
    }

    /// Reads the `count` attribute of an entry, `1` when absent.
    ///
    /// Sequence items repeat their value `count` times.
    fn entry_count(&self, node: &Node, category: ShapeCategory) -> Result<usize, SerError> {
        let Some(text) = node.attr(ATTR_COUNT) else {
            return Ok(1);
        };
        let count = parse_count(text, ATTR_COUNT)?;
        if category.has_count() || category == ShapeCategory::Sequence {
            Ok(count)
        } else {
            log::warn!("ignoring count `{text}` on a {category:?} entry");
            Ok(1)
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::sync::Arc;

    use beans_reflect::bean::{Bean, BeanBuilder, MetaBean, MetaProperty, TypedBean, bean_eq};
    use beans_reflect::collections::Grid;
    use beans_reflect::value::{Collection, Value};

    use crate::deserializer::{BeanDeserializer, Deserializers};
    use crate::fixtures::{self, Address, AddressBook, Contact, Element, Person, Shapes};
    use crate::{SerError, SerSettings};

    fn settings() -> SerSettings {
        SerSettings::compact(Arc::new(fixtures::registry()))
    }

    #[test]
    fn unknown_and_derived_properties_are_skipped() {
        let xml = r#"<?xml version="1.0"?>
            <bean type="contacts::Person">
              <name>Ann</name>
              <shoeSize type="contacts::Nowhere"><deep><deeper>9</deeper></deep></shoeSize>
              <initial>Z</initial>
              <age>30</age>
            </bean>"#;
        let ann: Person = settings().xml_reader().read(xml).unwrap();
        assert_eq!(ann.name, "Ann");
        assert_eq!(ann.age, 30);
    }

    #[test]
    fn empty_elements_and_whitespace() {
        let xml = r#"<bean type="contacts::Person"><name>  spaced  </name><nicknames/></bean>"#;
        let ann: Person = settings().xml_reader().read(xml).unwrap();
        assert_eq!(ann.name, "  spaced  ");
        assert!(ann.nicknames.is_empty());
    }

    #[test]
    fn errors_name_the_bean_and_property() {
        let xml = r#"<bean type="contacts::Person"><age>300</age></bean>"#;
        let err = settings().xml_reader().read::<Person>(xml).unwrap_err();
        assert!(matches!(
            &err,
            SerError::InBean { bean: "contacts::Person", property: Some(property), .. } if property == "age"
        ));
        assert!(matches!(err.root_cause(), SerError::NumericRange { .. }));
    }

    #[test]
    fn unknown_types_are_fatal() {
        let xml = r#"<bean type="contacts::Person"><extra type="contacts::Nowhere">1</extra></bean>"#;
        let err = settings().xml_reader().read::<Person>(xml).unwrap_err();
        assert!(matches!(err.root_cause(), SerError::UnknownType(name) if name == "contacts::Nowhere"));

        let xml = r#"<bean type="contacts::Nowhere"></bean>"#;
        let err = settings().xml_reader().read_bean(xml).unwrap_err();
        assert!(matches!(err, SerError::UnknownType(_)));
    }

    #[test]
    fn markers_must_be_assignable() {
        let xml = r#"<bean type="contacts::AddressBook"><primary type="Address"><city>York</city></primary></bean>"#;
        let err = settings().xml_reader().read_bean(xml).unwrap_err();
        assert!(matches!(err.root_cause(), SerError::MalformedStructure(_)));

        let xml = r#"<bean type="contacts::AddressBook"><primary type="Person"><name>Bob</name></primary></bean>"#;
        let bean = settings().xml_reader().read_bean(xml).unwrap();
        let primary = bean.meta_bean().property("primary").unwrap().get(&*bean).unwrap();
        assert_eq!(primary.as_bean().unwrap().meta_bean().type_path(), Person::TYPE_PATH);
    }

    #[test]
    fn malformed_collections() {
        let cases = [
            r#"<bean type="contacts::Person"><nicknames><entry>x</entry></nicknames></bean>"#,
            r#"<bean type="contacts::AddressBook"><labels><item count="x">A</item></labels></bean>"#,
            r#"<bean type="contacts::AddressBook"><distances><item row="a">1</item></distances></bean>"#,
            r#"<bean type="contacts::AddressBook"><seating rows="1" cols="1"><item row="1" col="0">A</item></seating></bean>"#,
            r#"<bean type="contacts::AddressBook"><byName><entry><item>k</item></entry></byName></bean>"#,
            r#"<bean type="contacts::Person"><name>Ann<b/></name></bean>"#,
            r#"<bean type="contacts::Person"><extra metatype="Tree"></extra></bean>"#,
        ];
        for xml in cases {
            let err = settings().xml_reader().read_bean(xml).unwrap_err();
            assert!(
                matches!(err.root_cause(), SerError::MalformedStructure(_)),
                "{xml}: {err}"
            );
        }
    }

    #[test]
    fn truncated_documents_fail() {
        let xml = r#"<bean type="contacts::Person"><name>Ann</name>"#;
        assert!(settings().xml_reader().read_bean(xml).is_err());
        assert!(settings().xml_reader().read_bean("").is_err());
    }

    struct RenamedName;

    impl BeanDeserializer for RenamedName {
        fn find_property(&self, meta: &'static MetaBean, name: &str) -> Option<&'static MetaProperty> {
            match name {
                "fullName" => meta.property("name"),
                _ => meta.property(name),
            }
        }
    }

    #[test]
    fn deserializer_hooks_resolve_old_names() {
        let mut deserializers = Deserializers::new();
        deserializers.register(Contact::TYPE_PATH, RenamedName);
        let settings = settings().with_deserializers(Arc::new(deserializers));

        let xml = r#"<bean type="contacts::Contact"><fullName>Old</fullName></bean>"#;
        let contact: Contact = settings.xml_reader().read(xml).unwrap();
        assert_eq!(contact.name, "Old");
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

        let xml = r#"<bean type="contacts::Person"><address><city>York</city></address></bean>"#;
        let err = refusing.xml_reader().read::<Person>(xml).unwrap_err();
        let SerError::InBean { bean, property, source } = &err else {
            panic!("no context: {err}");
        };
        assert_eq!((*bean, property.as_deref()), (Person::TYPE_PATH, Some("address")));
        assert!(matches!(
            &**source,
            SerError::InBean { bean: "contacts::Address", property: None, .. }
        ));
        assert!(matches!(err.root_cause(), SerError::MalformedStructure(_)));

        let xml = r#"<bean type="contacts::AddressBook"><primary type="Person"><name>Bob</name>"#;
        let err = settings().xml_reader().read_bean(xml).unwrap_err();
        assert!(matches!(
            &err,
            SerError::InBean { bean: "contacts::AddressBook", property: Some(name), .. } if name == "primary"
        ));
    }

    #[test]
    fn any_properties_default_to_text() {
        let xml = r#"<bean type="contacts::Person"><extra>42</extra></bean>"#;
        let ann: Person = settings().xml_reader().read(xml).unwrap();
        assert_eq!(ann.extra, Some(Value::from("42")));
    }

    #[test]
    fn address_book_round_trip() {
        let book = fixtures::sample_book();
        for settings in [settings(), SerSettings::pretty(Arc::new(fixtures::registry()))] {
            let xml = settings.xml_writer().write(&book).unwrap();
            let read = settings.xml_reader().read_bean(&xml).unwrap();
            assert!(bean_eq(&book, &*read), "{xml}");

            let typed: AddressBook = settings.xml_reader().read(&xml).unwrap();
            assert_eq!(typed.labels.count(&fixtures::text("A")), 3);
            assert_eq!(typed.people[0].nicknames, ["x", "y"]);
            assert_eq!(typed.seating.get(1, 2).map(String::as_str), Some("Ann"));
        }
    }

    #[test]
    fn long_type_names_round_trip() {
        let settings = settings().with_short_types(false);
        let book = fixtures::sample_book();
        let xml = settings.xml_writer().write(&book).unwrap();
        assert!(xml.contains(r#"type="contacts::Person""#));
        let read = settings.xml_reader().read_bean(&xml).unwrap();
        assert!(bean_eq(&book, &*read));
    }

    #[test]
    fn renamed_types_resolve() {
        let mut registry = fixtures::registry();
        registry.rename_type("people::Human", Person::TYPE_PATH);
        let settings = SerSettings::compact(Arc::new(registry));

        let xml = r#"<bean type="people::Human"><name>Ann</name></bean>"#;
        let ann: Person = settings.xml_reader().read(xml).unwrap();
        assert_eq!(ann.name, "Ann");

        let xml = r#"<bean type="contacts::AddressBook"><primary type="people::Human"><name>Bob</name></primary></bean>"#;
        let book: AddressBook = settings.xml_reader().read(xml).unwrap();
        let primary = book.primary.unwrap();
        assert_eq!(primary.meta_bean().type_path(), Person::TYPE_PATH);
    }

    #[test]
    fn grid_sizes_from_entries() {
        let xml = r#"<bean type="contacts::AddressBook"><seating><item row="2" col="1">Ann</item></seating></bean>"#;
        let book: AddressBook = settings().xml_reader().read(xml).unwrap();
        let mut expected = Grid::new(3, 2).unwrap();
        expected.put(2, 1, fixtures::text("Ann")).unwrap();
        assert_eq!(book.seating, expected);
    }

    #[test]
    fn every_shape_round_trips() {
        for settings in [settings(), SerSettings::pretty(Arc::new(fixtures::registry()))] {
            for shapes in fixtures::shape_cases() {
                let xml = settings.xml_writer().write(&shapes).unwrap();
                let read: Shapes = settings.xml_reader().read(&xml).unwrap();
                assert_eq!(read, shapes, "{xml}");
            }
        }
    }

    #[test]
    fn oversized_grids_are_malformed() {
        let cases = [
            r#"<bean type="contacts::AddressBook"><seating rows="4294967296" cols="4294967296"/></bean>"#,
            r#"<bean type="contacts::AddressBook"><seating rows="1048577" cols="1"/></bean>"#,
            r#"<bean type="contacts::AddressBook"><seating><item row="18446744073709551615" col="0">A</item></seating></bean>"#,
            r#"<bean type="contacts::AddressBook"><seating><item row="4096" col="4096">A</item></seating></bean>"#,
        ];
        for xml in cases {
            let err = settings().xml_reader().read_bean(xml).unwrap_err();
            assert!(
                matches!(err.root_cause(), SerError::MalformedStructure(_)),
                "{xml}: {err}"
            );
        }
    }

    #[test]
    fn empty_and_single_entry_shapes() {
        let xml = r#"<bean type="contacts::AddressBook">
              <people/>
              <labels><item>A</item></labels>
              <byName/>
              <distances><item row="Leeds" col="York">40</item></distances>
              <seating rows="0" cols="0"/>
            </bean>"#;
        let book: AddressBook = settings().xml_reader().read(xml).unwrap();
        assert!(book.people.is_empty());
        assert_eq!(book.labels.len(), 1);
        assert!(book.by_name.is_empty());
        assert_eq!(
            book.distances.get(&fixtures::text("Leeds"), &fixtures::text("York")),
            Some(&40)
        );
        assert_eq!(book.seating, Grid::new(0, 0).unwrap());
    }

    #[test]
    fn counts_repeat_list_items() {
        let xml = r#"<bean type="contacts::Person"><nicknames><item count="3">x</item><item>y</item></nicknames></bean>"#;
        let ann: Person = settings().xml_reader().read(xml).unwrap();
        assert_eq!(ann.nicknames, ["x", "x", "x", "y"]);

        let xml = r#"<bean type="contacts::Person"><nicknames><item count="0">x</item></nicknames></bean>"#;
        let err = settings().xml_reader().read::<Person>(xml).unwrap_err();
        assert!(matches!(err.root_cause(), SerError::MalformedStructure(_)));

        let xml = r#"<bean type="contacts::AddressBook"><byName><entry key="ann" count="2"><name>Ann</name></entry></byName></bean>"#;
        let book: AddressBook = settings().xml_reader().read(xml).unwrap();
        assert_eq!(book.by_name.len(), 1);
        assert_eq!(book.by_name["ann"].name, "Ann");
    }

    #[test]
    fn meta_types_under_any() {
        let xml = r#"<bean type="contacts::Person"><extra metatype="Map"><entry key="a" type="i32">1</entry></extra></bean>"#;
        let ann: Person = settings().xml_reader().read(xml).unwrap();
        let Some(Value::Collection(Collection::Map(entries))) = ann.extra else {
            panic!("expected a map");
        };
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0], (Some(Value::from("a")), Some(Value::I32(1))));
    }

    #[test]
    fn empty_beans_and_text() {
        let element = Element {
            element: fixtures::text("Test"),
            child: Some(fixtures::Empty),
        };
        let xml = settings().xml_writer().write(&element).unwrap();
        let read: Element = settings().xml_reader().read(&xml).unwrap();
        assert!(bean_eq(&element, &read));
    }
}
