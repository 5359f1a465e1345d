use alloc::vec::Vec;
use core::fmt;

// -----------------------------------------------------------------------------
// Path helpers

/// Returns the module part of a type path.
///
/// ```
/// use beans_reflect::info::module_path;
///
/// assert_eq!(module_path("app::model::Person"), Some("app::model"));
/// assert_eq!(module_path("i32"), None);
/// ```
pub fn module_path(type_path: &str) -> Option<&str> {
    type_path.rsplit_once("::").map(|(module, _)| module)
}

/// Returns the last segment of a type path.
///
/// ```
/// use beans_reflect::info::type_ident;
///
/// assert_eq!(type_ident("app::model::Person"), "Person");
/// assert_eq!(type_ident("bool"), "bool");
/// ```
pub fn type_ident(type_path: &str) -> &str {
    match type_path.rsplit_once("::") {
        Some((_, ident)) => ident,
        None => type_path,
    }
}

// -----------------------------------------------------------------------------
// CollectionKind

/// The collection containers understood by the bean system.
///
/// The name of each kind is the meta-type written on the wire when the
/// shape of a collection cannot be inferred from its declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    /// Ordered values, duplicates allowed.
    List,
    /// Unordered distinct values.
    Set,
    /// Values with a multiplicity.
    Multiset,
    /// Key to value.
    Map,
    /// Row key and column key to value.
    Table,
    /// Fixed size two dimensional array of optional values.
    Grid,
}

impl CollectionKind {
    /// All kinds, in declaration order.
    pub const ALL: [CollectionKind; 6] = [
        Self::List,
        Self::Set,
        Self::Multiset,
        Self::Map,
        Self::Table,
        Self::Grid,
    ];

    /// Returns the meta-type name of the kind.
    pub const fn name(self) -> &'static str {
        match self {
            Self::List => "List",
            Self::Set => "Set",
            Self::Multiset => "Multiset",
            Self::Map => "Map",
            Self::Table => "Table",
            Self::Grid => "Grid",
        }
    }

    /// Parses a meta-type name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Number of generic parameters a fully declared token of this kind has.
    ///
    /// Grids are indexed by integer positions, so only the value is generic.
    pub const fn param_count(self) -> usize {
        match self {
            Self::List | Self::Set | Self::Multiset | Self::Grid => 1,
            Self::Map => 2,
            Self::Table => 3,
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

// -----------------------------------------------------------------------------
// CollectionType

static ANY: TypeToken = TypeToken::Any;
static GRID_INDEX: TypeToken = TypeToken::Named("u64");

/// A collection container together with its generic parameters.
///
/// An empty parameter list means the generics are unknown (erased), and every
/// role then resolves to [`TypeToken::Any`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectionType {
    kind: CollectionKind,
    params: Vec<TypeToken>,
}

impl CollectionType {
    /// Creates a collection type.
    ///
    /// A parameter list whose length does not match the kind is treated as
    /// erased.
    pub fn new(kind: CollectionKind, params: Vec<TypeToken>) -> Self {
        let params = if params.len() == kind.param_count() {
            params
        } else {
            Vec::new()
        };
        Self { kind, params }
    }

    /// Creates a collection type with unknown generics.
    #[inline]
    pub const fn erased(kind: CollectionKind) -> Self {
        Self {
            kind,
            params: Vec::new(),
        }
    }

    #[inline]
    pub const fn kind(&self) -> CollectionKind {
        self.kind
    }

    #[inline]
    pub fn params(&self) -> &[TypeToken] {
        &self.params
    }

    /// Returns `true` if the generic parameters are unknown.
    #[inline]
    pub fn is_erased(&self) -> bool {
        self.params.is_empty()
    }

    /// Type of map keys and table rows.
    ///
    /// Grids report `u64` positions; sequences have no key and report `Any`.
    pub fn key_type(&self) -> &TypeToken {
        match self.kind {
            CollectionKind::Map | CollectionKind::Table => self.params.first().unwrap_or(&ANY),
            CollectionKind::Grid => &GRID_INDEX,
            _ => &ANY,
        }
    }

    /// Type of table and grid columns.
    pub fn column_type(&self) -> &TypeToken {
        match self.kind {
            CollectionKind::Table => self.params.get(1).unwrap_or(&ANY),
            CollectionKind::Grid => &GRID_INDEX,
            _ => &ANY,
        }
    }

    /// Type of the values, always the last parameter.
    pub fn value_type(&self) -> &TypeToken {
        self.params.last().unwrap_or(&ANY)
    }
}

impl fmt::Display for CollectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind.name())?;
        if let Some((first, rest)) = self.params.split_first() {
            write!(f, "<{first}")?;
            for param in rest {
                write!(f, ", {param}")?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// TypeToken

/// A declared type.
///
/// Tokens describe what a property signature promises, which may be less
/// precise than the runtime type of the value it holds:
///
/// - [`Any`](Self::Any) is the top-level supertype; values declared this way
///   must describe their own type when serialized.
/// - [`Named`](Self::Named) is a scalar or bean type identified by its full
///   type path, such as `"i32"` or `"app::model::Person"`.
/// - [`Collection`](Self::Collection) is a collection container with its
///   generic parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum TypeToken {
    #[default]
    Any,
    Named(&'static str),
    Collection(CollectionType),
}

impl TypeToken {
    /// Token of a scalar or bean type path.
    #[inline]
    pub const fn named(type_path: &'static str) -> Self {
        Self::Named(type_path)
    }

    /// Token of a collection with the given parameters.
    #[inline]
    pub fn collection(kind: CollectionKind, params: Vec<TypeToken>) -> Self {
        Self::Collection(CollectionType::new(kind, params))
    }

    pub fn list(value: TypeToken) -> Self {
        Self::collection(CollectionKind::List, alloc::vec![value])
    }

    pub fn set(value: TypeToken) -> Self {
        Self::collection(CollectionKind::Set, alloc::vec![value])
    }

    pub fn multiset(value: TypeToken) -> Self {
        Self::collection(CollectionKind::Multiset, alloc::vec![value])
    }

    pub fn map(key: TypeToken, value: TypeToken) -> Self {
        Self::collection(CollectionKind::Map, alloc::vec![key, value])
    }

    pub fn table(row: TypeToken, column: TypeToken, value: TypeToken) -> Self {
        Self::collection(CollectionKind::Table, alloc::vec![row, column, value])
    }

    pub fn grid(value: TypeToken) -> Self {
        Self::collection(CollectionKind::Grid, alloc::vec![value])
    }

    #[inline]
    pub const fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }

    /// Returns the type path of a named token.
    #[inline]
    pub const fn as_named(&self) -> Option<&'static str> {
        match self {
            Self::Named(path) => Some(*path),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_collection(&self) -> Option<&CollectionType> {
        match self {
            Self::Collection(collection) => Some(collection),
            _ => None,
        }
    }

    /// Returns `true` if this is a collection token of the given kind.
    #[inline]
    pub fn is_collection_of(&self, kind: CollectionKind) -> bool {
        matches!(self, Self::Collection(c) if c.kind() == kind)
    }
}

impl fmt::Display for TypeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.pad("Any"),
            Self::Named(path) => f.pad(path),
            Self::Collection(collection) => fmt::Display::fmt(collection, f),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
