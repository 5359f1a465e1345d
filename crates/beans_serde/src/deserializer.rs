use alloc::boxed::Box;
use core::fmt;

use beans_reflect::bean::{Bean, BeanBuilder, MetaBean, MetaProperty};
use beans_reflect::value::Value;
use beans_utils::hash::HashMap;

use crate::SerError;

// -----------------------------------------------------------------------------
// BeanDeserializer

/// Hooks used by readers to assemble one bean type.
///
/// Every method has a default that follows the bean metadata as is.
/// Override [`find_property`](Self::find_property) to accept a property
/// under an old name, or [`set_value`](Self::set_value) to translate a value
/// whose meaning changed between versions.
pub trait BeanDeserializer: Send + Sync {
    /// Creates the builder for a bean of type `meta`.
    fn create_builder(&self, meta: &'static MetaBean) -> Result<Box<dyn BeanBuilder>, SerError> {
        Ok(meta.new_builder())
    }

    /// Finds the property written under `name`.
    ///
    /// Returning `None` makes the reader skip the node.
    fn find_property(&self, meta: &'static MetaBean, name: &str) -> Option<&'static MetaProperty> {
        meta.property(name)
    }

    /// Sets a parsed value on the builder.
    fn set_value(
        &self,
        builder: &mut dyn BeanBuilder,
        property: &'static MetaProperty,
        value: Option<Value>,
    ) -> Result<(), SerError> {
        builder.set(property, value).map_err(SerError::from)
    }

    /// Builds the bean once every property has been read.
    fn build(&self, builder: Box<dyn BeanBuilder>) -> Result<Box<dyn Bean>, SerError> {
        builder.build().map_err(SerError::from)
    }
}

/// The deserializer used for types without a registered one.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultDeserializer;

impl BeanDeserializer for DefaultDeserializer {}

// -----------------------------------------------------------------------------
// Deserializers

/// Bean deserializers by type path.
#[derive(Default)]
pub struct Deserializers {
    by_type: HashMap<&'static str, Box<dyn BeanDeserializer>>,
}

static DEFAULT: DefaultDeserializer = DefaultDeserializer;

impl Deserializers {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the deserializer of a bean type, replacing any previous one.
    pub fn register(&mut self, type_path: &'static str, deserializer: impl BeanDeserializer + 'static) {
        self.by_type.insert(type_path, Box::new(deserializer));
    }

    /// Returns the deserializer of a bean type.
    pub fn get(&self, type_path: &str) -> &dyn BeanDeserializer {
        match self.by_type.get(type_path) {
            Some(deserializer) => deserializer.as_ref(),
            None => &DEFAULT,
        }
    }
}

impl fmt::Debug for Deserializers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.by_type.keys()).finish()
    }
}
