use alloc::string::String;
use alloc::vec::Vec;
use core::any::TypeId;
use core::fmt;

use beans_utils::hash::{HashMap, HashSet, NoOpHashState};

use crate::bean::{MetaBean, TypedBean};
use crate::convert::{TextCodec, TextConvert};
use crate::info::TypeToken;

// -----------------------------------------------------------------------------
// TypeRegistry

/// A registry of bean types and leaf conversions.
///
/// Serializers resolve type names through it: a name is either the path of a
/// registered bean, the path of a type known to the [`TextCodec`], or an old
/// name registered with [`rename_type`](Self::rename_type).
///
/// Registration happens up front; once shared (usually behind an `Arc`) the
/// registry is only read.
///
/// # Example
///
/// ```
/// use beans_reflect::registry::TypeRegistry;
///
/// let mut registry = TypeRegistry::new();
/// registry.rename_type("text", "alloc::string::String");
///
/// assert_eq!(registry.resolve_type("text"), Some("alloc::string::String"));
/// assert_eq!(registry.resolve_type("i32"), Some("i32"));
/// assert_eq!(registry.resolve_type("app::Missing"), None);
/// ```
pub struct TypeRegistry {
    registered: HashMap<TypeId, &'static MetaBean, NoOpHashState>,
    beans: HashMap<&'static str, &'static MetaBean>,
    codec: TextCodec,
    renames: HashMap<String, &'static str>,
}

impl Default for TypeRegistry {
    /// See [`TypeRegistry::new`].
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Creates a registry without any bean type, knowing the built-in leaf
    /// conversions of [`TextCodec::new`].
    pub fn new() -> Self {
        Self {
            registered: HashMap::with_hasher(NoOpHashState),
            beans: HashMap::default(),
            codec: TextCodec::new(),
            renames: HashMap::default(),
        }
    }

    /// Registers the bean type `T` and, recursively, every bean type its
    /// properties refer to.
    ///
    /// Returns `false` if `T` was already registered, in which case its
    /// dependencies are not visited again.
    pub fn register<T: TypedBean>(&mut self) -> bool {
        if self.registered.contains_key(&TypeId::of::<T>()) {
            return false;
        }
        self.register_meta(T::meta())
    }

    /// Registers hand-built metadata and its dependencies.
    pub fn register_meta(&mut self, meta: &'static MetaBean) -> bool {
        if self.registered.contains_key(&meta.type_id()) {
            return false;
        }
        self.registered.insert(meta.type_id(), meta);
        if let Some(previous) = self.beans.insert(meta.type_path(), meta) {
            log::warn!(
                "bean type path `{}` is registered by two types",
                previous.type_path()
            );
        }
        for property in meta.properties() {
            property.register_dependencies(self);
        }
        true
    }

    /// Registers a leaf conversion, see [`TextCodec::register`].
    #[inline]
    pub fn register_convert<T: TextConvert>(&mut self) -> bool {
        self.codec.register::<T>()
    }

    /// Maps an old type name onto a registered type path.
    ///
    /// Renames are consulted before any other resolution, so documents
    /// written before a type moved still read.
    pub fn rename_type(&mut self, old: impl Into<String>, new: &'static str) {
        self.renames.insert(old.into(), new);
    }

    /// Returns the target of a rename of `name`.
    #[inline]
    pub fn renamed(&self, name: &str) -> Option<&'static str> {
        self.renames.get(name).copied()
    }

    /// Resolves a full type name, applying renames first.
    pub fn resolve_type(&self, name: &str) -> Option<&'static str> {
        match self.renamed(name) {
            Some(target) => {
                log::debug!("type `{name}` renamed to `{target}`");
                self.known_type(target)
            }
            None => self.known_type(name),
        }
    }

    /// Returns the interned path if `type_path` is a registered bean or leaf.
    pub fn known_type(&self, type_path: &str) -> Option<&'static str> {
        match self.beans.get_key_value(type_path) {
            Some((path, _)) => Some(*path),
            None => self.codec.known_path(type_path),
        }
    }

    #[inline]
    pub fn get_bean(&self, type_path: &str) -> Option<&'static MetaBean> {
        self.beans.get(type_path).copied()
    }

    #[inline]
    pub fn is_bean(&self, type_path: &str) -> bool {
        self.beans.contains_key(type_path)
    }

    /// Returns `true` if values of the type are written as a single token.
    #[inline]
    pub fn is_convertible(&self, ty: &TypeToken) -> bool {
        self.codec.is_convertible(ty)
    }

    #[inline]
    pub fn codec(&self) -> &TextCodec {
        &self.codec
    }

    #[inline]
    pub fn codec_mut(&mut self) -> &mut TextCodec {
        &mut self.codec
    }

    /// Returns all registered bean types in arbitrary order.
    pub fn beans(&self) -> impl Iterator<Item = &'static MetaBean> + '_ {
        self.registered.values().copied()
    }

    /// Returns `true` if a value of type `actual` may stand where `declared`
    /// is declared.
    ///
    /// `Any` accepts everything; a named type accepts itself and every bean
    /// type that declares it as a direct or indirect supertype.
    pub fn is_assignable(&self, declared: &TypeToken, actual: &str) -> bool {
        match declared {
            TypeToken::Any => true,
            TypeToken::Named(path) => self.is_subtype(actual, path),
            TypeToken::Collection(_) => false,
        }
    }

    /// Returns `true` if `sub` is `base` or inherits from it.
    pub fn is_subtype(&self, sub: &str, base: &str) -> bool {
        if sub == base {
            return true;
        }
        let mut visited: HashSet<&str> = HashSet::default();
        let mut pending: Vec<&str> = Vec::from([sub]);
        while let Some(path) = pending.pop() {
            let Some(meta) = self.get_bean(path) else {
                continue;
            };
            for &parent in meta.supertypes() {
                if parent == base {
                    return true;
                }
                if visited.insert(parent) {
                    pending.push(parent);
                }
            }
        }
        false
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("beans", &self.beans.keys().collect::<Vec<_>>())
            .field("codec", &self.codec)
            .field("renames", &self.renames)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;

    use super::TypeRegistry;
    use crate::bean::{MetaBean, MetaBeanCell, TypedBean};
    use crate::impl_bean_value;
    use crate::info::TypeToken;

    #[derive(Debug, Clone, Default)]
    struct Shape {
        name: String,
    }

    #[derive(Debug, Clone, Default)]
    struct Square {
        name: String,
        side: f64,
    }

    #[derive(Debug, Clone, Default)]
    struct Drawing {
        shapes: Vec<Square>,
        parent: Option<Vec<Drawing>>,
    }

    impl TypedBean for Shape {
        const TYPE_PATH: &'static str = "draw::Shape";

        fn meta() -> &'static MetaBean {
            static META: MetaBeanCell = MetaBeanCell::new();
            META.get_or_init(|| {
                MetaBean::builder::<Self>()
                    .property("name", |s| &s.name, |s, v| s.name = v)
                    .build()
            })
        }
    }

    impl TypedBean for Square {
        const TYPE_PATH: &'static str = "draw::Square";

        fn meta() -> &'static MetaBean {
            static META: MetaBeanCell = MetaBeanCell::new();
            META.get_or_init(|| {
                MetaBean::builder::<Self>()
                    .property("name", |s| &s.name, |s, v| s.name = v)
                    .property("side", |s| &s.side, |s, v| s.side = v)
                    .supertype(Shape::TYPE_PATH)
                    .build()
            })
        }
    }

    impl TypedBean for Drawing {
        const TYPE_PATH: &'static str = "draw::Drawing";

        fn meta() -> &'static MetaBean {
            static META: MetaBeanCell = MetaBeanCell::new();
            META.get_or_init(|| {
                MetaBean::builder::<Self>()
                    .property("shapes", |d| &d.shapes, |d, v| d.shapes = v)
                    .optional("parent", |d| &d.parent, |d, v| d.parent = v)
                    .build()
            })
        }
    }

    impl_bean_value!(Shape);
    impl_bean_value!(Square);
    impl_bean_value!(Drawing);

    #[test]
    fn registers_dependencies_once() {
        let mut registry = TypeRegistry::new();
        assert!(registry.register::<Drawing>());
        assert!(!registry.register::<Drawing>());

        assert!(registry.is_bean("draw::Drawing"));
        assert!(registry.is_bean("draw::Square"));
        assert!(!registry.is_bean("draw::Shape"));
        assert_eq!(registry.beans().count(), 2);
    }

    #[test]
    fn assignability_follows_supertypes() {
        let mut registry = TypeRegistry::new();
        registry.register::<Shape>();
        registry.register::<Square>();

        let shape = TypeToken::named(Shape::TYPE_PATH);
        assert!(registry.is_assignable(&shape, "draw::Square"));
        assert!(registry.is_assignable(&shape, "draw::Shape"));
        assert!(registry.is_assignable(&TypeToken::Any, "draw::Square"));
        assert!(!registry.is_assignable(&TypeToken::named("draw::Square"), "draw::Shape"));
    }

    #[test]
    fn renames_resolve_before_lookup() {
        let mut registry = TypeRegistry::new();
        registry.register::<Square>();
        registry.rename_type("legacy::Box", "draw::Square");
        registry.rename_type("legacy::Gone", "draw::Missing");

        assert_eq!(registry.resolve_type("legacy::Box"), Some("draw::Square"));
        assert_eq!(registry.resolve_type("legacy::Gone"), None);
        assert_eq!(registry.resolve_type("draw::Square"), Some("draw::Square"));
        assert_eq!(registry.get_bean("draw::Square").unwrap().type_ident(), "Square");
    }
}
