//! Short type names for one document.
//!
//! A type name on the wire is resolved in this order:
//!
//! 1. a registry rename of the name as written;
//! 2. a built-in alias (`String`, `Duration`);
//! 3. a simple name already seen in this document;
//! 4. a name relative to the base package, the module of the root bean;
//! 5. the full name.
//!
//! A type in the base package whose simple name is an alias is always
//! written in full.
//!
//! After the first time a type is written by its full or package-relative
//! name, its simple name (the last path segment) stands for it for the rest
//! of the document, as long as that simple name starts with an uppercase
//! letter, is not an alias and is not taken by another type. The writer and
//! the reader apply the same rule in the same order, so the two caches stay
//! in step.

use alloc::format;
use alloc::string::String;

use beans_reflect::info::{module_path, type_ident, type_paths};
use beans_reflect::registry::TypeRegistry;
use beans_utils::hash::HashMap;

use crate::SerError;

const ALIASES: &[(&str, &str)] = &[
    ("String", type_paths::STRING),
    ("Duration", type_paths::DURATION),
];

fn alias_of(type_path: &str) -> Option<&'static str> {
    ALIASES
        .iter()
        .find(|(_, path)| *path == type_path)
        .map(|(alias, _)| *alias)
}

fn resolve_alias(name: &str) -> Option<&'static str> {
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|(_, path)| *path)
}

/// Returns `true` if `name` can stand alone as a cached simple name.
fn is_cacheable(name: &str) -> bool {
    name.starts_with(|c: char| c.is_ascii_uppercase()) && resolve_alias(name).is_none()
}

/// Returns `true` if `name` is written relative to the base package.
fn is_relative(name: &str) -> bool {
    name.starts_with(|c: char| c.is_ascii_uppercase()) && !name.contains("::")
}

fn base_package(type_path: &str) -> Option<String> {
    module_path(type_path).map(|module| format!("{module}::"))
}

// -----------------------------------------------------------------------------
// WriteContext

/// Per-document state of a writer: the base package and the cache of types
/// already written.
#[derive(Debug)]
pub struct WriteContext {
    short_types: bool,
    base: Option<String>,
    known: HashMap<&'static str, &'static str>,
    taken: HashMap<&'static str, &'static str>,
}

impl WriteContext {
    /// Creates a context; with `short_types` off every name is written in
    /// full.
    pub fn new(short_types: bool) -> Self {
        Self {
            short_types,
            base: None,
            known: HashMap::default(),
            taken: HashMap::default(),
        }
    }

    /// Encodes the root type, which is always written in full and sets the
    /// base package.
    pub fn encode_root(&mut self, type_path: &'static str) -> String {
        self.base = base_package(type_path);
        if self.short_types {
            self.remember(type_path);
        }
        type_path.into()
    }

    /// Encodes a type name for a `type` marker.
    pub fn encode(&mut self, type_path: &'static str) -> String {
        if !self.short_types {
            return type_path.into();
        }
        if let Some(alias) = alias_of(type_path) {
            return alias.into();
        }
        if let Some(short) = self.known.get(type_path) {
            return (*short).into();
        }
        let relative = self
            .base
            .as_deref()
            .and_then(|base| type_path.strip_prefix(base))
            .filter(|rest| {
                is_relative(rest) && resolve_alias(rest).is_none() && !self.taken.contains_key(*rest)
            });
        let encoded = relative.unwrap_or(type_path);
        self.remember(type_path);
        encoded.into()
    }

    fn remember(&mut self, type_path: &'static str) {
        let ident = type_ident(type_path);
        if is_cacheable(ident) && !self.taken.contains_key(ident) {
            log::trace!("short type name `{ident}` stands for `{type_path}`");
            self.known.insert(type_path, ident);
            self.taken.insert(ident, type_path);
        }
    }
}

// -----------------------------------------------------------------------------
// ParseContext

/// Per-document state of a reader, the mirror of [`WriteContext`].
///
/// Failed lookups are never cached.
#[derive(Debug, Default)]
pub struct ParseContext {
    base: Option<String>,
    known: HashMap<String, &'static str>,
}

impl ParseContext {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes the root type name and takes its module as the base package.
    pub fn decode_root(&mut self, name: &str, registry: &TypeRegistry) -> Result<&'static str, SerError> {
        let resolved = registry
            .resolve_type(name)
            .or_else(|| resolve_alias(name))
            .ok_or_else(|| SerError::UnknownType(name.into()))?;
        self.base = base_package(name);
        self.remember(name, resolved);
        Ok(resolved)
    }

    /// Decodes the name of a `type` marker.
    pub fn decode(&mut self, name: &str, registry: &TypeRegistry) -> Result<&'static str, SerError> {
        if registry.renamed(name).is_some() {
            let path = registry
                .resolve_type(name)
                .ok_or_else(|| SerError::UnknownType(name.into()))?;
            self.remember(name, path);
            return Ok(path);
        }
        if let Some(path) = resolve_alias(name) {
            return Ok(path);
        }
        if let Some(path) = self.known.get(name) {
            return Ok(*path);
        }
        if is_relative(name)
            && let Some(base) = &self.base
        {
            let full = format!("{base}{name}");
            if let Some(path) = registry.resolve_type(&full) {
                self.remember(&full, path);
                return Ok(path);
            }
        }
        match registry.resolve_type(name) {
            Some(path) => {
                self.remember(name, path);
                Ok(path)
            }
            None => Err(SerError::UnknownType(name.into())),
        }
    }

    fn remember(&mut self, written: &str, path: &'static str) {
        let ident = type_ident(written);
        if is_cacheable(ident) && !self.known.contains_key(ident) {
            log::trace!("short type name `{ident}` stands for `{path}`");
            self.known.insert(ident.into(), path);
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
