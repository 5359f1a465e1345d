use alloc::sync::Arc;

use beans_reflect::registry::TypeRegistry;

use crate::deserializer::Deserializers;
use crate::map::{MapReader, MapWriter};
use crate::xml::{XmlReader, XmlWriter};

// -----------------------------------------------------------------------------
// SerSettings

/// Settings shared by the writers and readers.
///
/// Settings are cheap to clone and safe to share between threads. The
/// writers and readers created from them hold per-document state and are
/// used for one document only.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use beans_reflect::registry::TypeRegistry;
/// use beans_serde::SerSettings;
///
/// let registry = Arc::new(TypeRegistry::new());
/// let settings = SerSettings::pretty(registry).with_include_derived(true);
///
/// assert_eq!(settings.indent_size(), 2);
/// assert!(settings.short_types());
/// assert!(settings.include_derived());
/// ```
#[derive(Debug, Clone)]
pub struct SerSettings {
    indent_size: usize,
    short_types: bool,
    include_derived: bool,
    registry: Arc<TypeRegistry>,
    deserializers: Arc<Deserializers>,
}

impl SerSettings {
    /// Single-line output with short type names.
    pub fn compact(registry: Arc<TypeRegistry>) -> Self {
        Self {
            indent_size: 0,
            short_types: true,
            include_derived: false,
            registry,
            deserializers: Arc::new(Deserializers::new()),
        }
    }

    /// Output indented by two spaces per level, with short type names.
    pub fn pretty(registry: Arc<TypeRegistry>) -> Self {
        Self {
            indent_size: 2,
            ..Self::compact(registry)
        }
    }

    /// Spaces per nesting level; `0` writes everything on one line.
    #[inline]
    pub fn with_indent_size(mut self, indent_size: usize) -> Self {
        self.indent_size = indent_size;
        self
    }

    /// Whether type markers may use package-relative and cached names.
    #[inline]
    pub fn with_short_types(mut self, short_types: bool) -> Self {
        self.short_types = short_types;
        self
    }

    /// Whether derived properties are written. They are never read.
    #[inline]
    pub fn with_include_derived(mut self, include_derived: bool) -> Self {
        self.include_derived = include_derived;
        self
    }

    #[inline]
    pub fn with_deserializers(mut self, deserializers: Arc<Deserializers>) -> Self {
        self.deserializers = deserializers;
        self
    }

    #[inline]
    pub fn indent_size(&self) -> usize {
        self.indent_size
    }

    #[inline]
    pub fn short_types(&self) -> bool {
        self.short_types
    }

    #[inline]
    pub fn include_derived(&self) -> bool {
        self.include_derived
    }

    #[inline]
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    #[inline]
    pub fn deserializers(&self) -> &Deserializers {
        &self.deserializers
    }

    /// Creates a writer for one XML document.
    #[inline]
    pub fn xml_writer(&self) -> XmlWriter<'_> {
        XmlWriter::new(self)
    }

    /// Creates a reader for one XML document.
    #[inline]
    pub fn xml_reader(&self) -> XmlReader<'_> {
        XmlReader::new(self)
    }

    /// Creates a writer for one simple-map document.
    #[inline]
    pub fn map_writer(&self) -> MapWriter<'_> {
        MapWriter::new(self)
    }

    /// Creates a reader for one simple-map document.
    #[inline]
    pub fn map_reader(&self) -> MapReader<'_> {
        MapReader::new(self)
    }
}
