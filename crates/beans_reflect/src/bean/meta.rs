use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::{Any, TypeId};
use core::fmt;
use core::marker::PhantomData;
use std::sync::OnceLock;

use crate::bean::{Bean, BeanBuilder, PropertySetBuilder, TypedBean};
use crate::info::{TypeToken, Typed, module_path, type_ident};
use crate::registry::TypeRegistry;
use crate::value::{FromValue, ToValue, Value, ValueError};

type Getter = Box<dyn Fn(&dyn Any) -> Option<Value> + Send + Sync>;
type Setter = Box<dyn Fn(&mut dyn Any, Option<Value>) -> Result<(), ValueError> + Send + Sync>;

// -----------------------------------------------------------------------------
// PropertyStyle

/// How a property can be accessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyStyle {
    /// Readable and writable, part of the serialized form.
    ReadWrite,
    /// Readable only.
    ReadOnly,
    /// Writable only.
    WriteOnly,
    /// Computed from other properties, readable only.
    Derived,
}

impl PropertyStyle {
    #[inline]
    pub const fn is_readable(self) -> bool {
        !matches!(self, Self::WriteOnly)
    }

    #[inline]
    pub const fn is_writable(self) -> bool {
        matches!(self, Self::ReadWrite | Self::WriteOnly)
    }

    #[inline]
    pub const fn is_derived(self) -> bool {
        matches!(self, Self::Derived)
    }

    /// Returns `true` if the property is written and read back by serializers.
    #[inline]
    pub const fn is_serializable(self) -> bool {
        matches!(self, Self::ReadWrite)
    }
}

// -----------------------------------------------------------------------------
// MetaProperty

/// A handle to one named property of one bean type.
///
/// Handles are owned by their [`MetaBean`] and never change after the
/// metadata is built.
pub struct MetaProperty {
    name: &'static str,
    declared: TypeToken,
    style: PropertyStyle,
    optional: bool,
    getter: Option<Getter>,
    setter: Option<Setter>,
    dependencies: fn(&mut TypeRegistry),
}

impl MetaProperty {
    /// Name of the property, unique within its bean type.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The declared type of the property value.
    #[inline]
    pub const fn declared_type(&self) -> &TypeToken {
        &self.declared
    }

    #[inline]
    pub const fn style(&self) -> PropertyStyle {
        self.style
    }

    /// Returns `true` if the Rust field wraps the value in an `Option`.
    ///
    /// The declared type is always the inner type.
    #[inline]
    pub const fn is_optional(&self) -> bool {
        self.optional
    }

    /// Reads the property from a bean.
    ///
    /// Returns `None` for an absent value, for a write-only property and for a
    /// bean of another type.
    pub fn get(&self, bean: &dyn Bean) -> Option<Value> {
        let getter = self.getter.as_ref()?;
        getter(bean.as_any())
    }

    /// Writes the property into a bean under construction.
    pub fn set(&self, target: &mut dyn Any, value: Option<Value>) -> Result<(), ValueError> {
        match &self.setter {
            Some(setter) => setter(target, value),
            None => Err(ValueError::Invalid(alloc::format!(
                "property `{}` has no setter",
                self.name
            ))),
        }
    }

    /// Registers the bean types the declared type refers to.
    #[inline]
    pub fn register_dependencies(&self, registry: &mut TypeRegistry) {
        (self.dependencies)(registry);
    }
}

impl fmt::Debug for MetaProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetaProperty")
            .field("name", &self.name)
            .field("declared", &self.declared)
            .field("style", &self.style)
            .field("optional", &self.optional)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// MetaBean

/// Metadata of a bean type: its type path, ordered properties, declared
/// supertypes and a builder factory.
pub struct MetaBean {
    type_path: &'static str,
    type_id: TypeId,
    properties: Vec<MetaProperty>,
    supertypes: Vec<&'static str>,
    builder: fn() -> Box<dyn BeanBuilder>,
}

impl MetaBean {
    /// Starts describing the bean type `T`.
    ///
    /// Beans are built by starting from `T::default()` and applying property
    /// setters, see [`PropertySetBuilder`].
    #[inline]
    pub fn builder<T: TypedBean + Default>() -> MetaBeanBuilder<T> {
        MetaBeanBuilder {
            properties: Vec::new(),
            supertypes: Vec::new(),
            _marker: PhantomData,
        }
    }

    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.type_path
    }

    /// Last segment of the type path.
    #[inline]
    pub fn type_ident(&self) -> &'static str {
        type_ident(self.type_path)
    }

    #[inline]
    pub fn module_path(&self) -> Option<&'static str> {
        module_path(self.type_path)
    }

    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Properties in declaration order.
    #[inline]
    pub fn properties(&self) -> &[MetaProperty] {
        &self.properties
    }

    /// Looks a property up by name.
    pub fn property(&self, name: &str) -> Option<&MetaProperty> {
        self.properties.iter().find(|property| property.name == name)
    }

    /// Declared direct supertypes.
    #[inline]
    pub fn supertypes(&self) -> &[&'static str] {
        &self.supertypes
    }

    /// Creates a fresh builder for this type.
    #[inline]
    pub fn new_builder(&self) -> Box<dyn BeanBuilder> {
        (self.builder)()
    }
}

impl fmt::Debug for MetaBean {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetaBean")
            .field("type_path", &self.type_path)
            .field("properties", &self.properties)
            .field("supertypes", &self.supertypes)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// MetaBeanBuilder

/// Describes the properties of a bean type `T`.
///
/// Accessors are plain function pointers, so closures passed here must not
/// capture anything.
pub struct MetaBeanBuilder<T> {
    properties: Vec<MetaProperty>,
    supertypes: Vec<&'static str>,
    _marker: PhantomData<fn() -> T>,
}

fn getter<T: 'static, F: ToValue + 'static>(get: fn(&T) -> &F) -> Getter {
    Box::new(move |bean: &dyn Any| bean.downcast_ref::<T>().and_then(|bean| get(bean).to_value()))
}

fn setter<T: 'static, F: FromValue + 'static>(set: fn(&mut T, F)) -> Setter {
    Box::new(move |bean: &mut dyn Any, value: Option<Value>| {
        let bean = bean.downcast_mut::<T>().ok_or_else(|| {
            ValueError::Invalid(alloc::format!(
                "property applied to a bean that is not `{}`",
                core::any::type_name::<T>()
            ))
        })?;
        set(bean, F::from_value(value)?);
        Ok(())
    })
}

impl<T: TypedBean + Default> MetaBeanBuilder<T> {
    fn push(
        mut self,
        name: &'static str,
        declared: TypeToken,
        style: PropertyStyle,
        getter: Option<Getter>,
        setter: Option<Setter>,
        dependencies: fn(&mut TypeRegistry),
    ) -> Self {
        debug_assert!(
            self.properties.iter().all(|p| p.name != name),
            "duplicate property `{name}` on `{}`",
            T::TYPE_PATH
        );
        self.properties.push(MetaProperty {
            name,
            declared,
            style,
            optional: false,
            getter,
            setter,
            dependencies,
        });
        self
    }

    /// Adds a read-write property declared as the field type.
    pub fn property<F>(self, name: &'static str, get: fn(&T) -> &F, set: fn(&mut T, F)) -> Self
    where
        F: Typed + ToValue + FromValue + 'static,
    {
        self.property_as(name, F::type_token(), get, set)
    }

    /// Adds a read-write property with an explicit declared type.
    ///
    /// This is how a field holding `Box<dyn Bean>` or `Value` narrows its
    /// declaration to a specific base type.
    pub fn property_as<F>(
        self,
        name: &'static str,
        declared: TypeToken,
        get: fn(&T) -> &F,
        set: fn(&mut T, F),
    ) -> Self
    where
        F: Typed + ToValue + FromValue + 'static,
    {
        self.push(
            name,
            declared,
            PropertyStyle::ReadWrite,
            Some(getter(get)),
            Some(setter(set)),
            F::register_dependencies,
        )
    }

    /// Adds a read-write property held in an `Option` field.
    pub fn optional<F>(
        self,
        name: &'static str,
        get: fn(&T) -> &Option<F>,
        set: fn(&mut T, Option<F>),
    ) -> Self
    where
        F: Typed + ToValue + FromValue + 'static,
    {
        let mut this = self.property(name, get, set);
        if let Some(last) = this.properties.last_mut() {
            last.optional = true;
        }
        this
    }

    /// Adds a property that can be read but not written.
    pub fn read_only<F>(self, name: &'static str, get: fn(&T) -> &F) -> Self
    where
        F: Typed + ToValue + 'static,
    {
        self.push(
            name,
            F::type_token(),
            PropertyStyle::ReadOnly,
            Some(getter(get)),
            None,
            F::register_dependencies,
        )
    }

    /// Adds a property that can be written but not read.
    pub fn write_only<F>(self, name: &'static str, set: fn(&mut T, F)) -> Self
    where
        F: Typed + FromValue + 'static,
    {
        self.push(
            name,
            F::type_token(),
            PropertyStyle::WriteOnly,
            None,
            Some(setter(set)),
            F::register_dependencies,
        )
    }

    /// Adds a property computed from the bean.
    pub fn derived<F>(self, name: &'static str, compute: fn(&T) -> F) -> Self
    where
        F: Typed + ToValue + 'static,
    {
        let getter: Getter = Box::new(move |bean: &dyn Any| {
            bean.downcast_ref::<T>()
                .and_then(|bean| compute(bean).to_value())
        });
        self.push(
            name,
            F::type_token(),
            PropertyStyle::Derived,
            Some(getter),
            None,
            F::register_dependencies,
        )
    }

    /// Declares a supertype, by type path.
    pub fn supertype(mut self, type_path: &'static str) -> Self {
        self.supertypes.push(type_path);
        self
    }

    pub fn build(self) -> MetaBean {
        MetaBean {
            type_path: T::TYPE_PATH,
            type_id: TypeId::of::<T>(),
            properties: self.properties,
            supertypes: self.supertypes,
            builder: PropertySetBuilder::<T>::new_boxed,
        }
    }
}

// -----------------------------------------------------------------------------
// MetaBeanCell

/// Static storage for the [`MetaBean`] of a non-generic bean type.
///
/// Internally an [`OnceLock`], so the metadata is built once per process.
///
/// ```
/// use beans_reflect::bean::{MetaBean, MetaBeanCell, TypedBean};
///
/// #[derive(Debug, Clone, Default)]
/// struct Tag {
///     label: String,
/// }
///
/// impl TypedBean for Tag {
///     const TYPE_PATH: &'static str = "app::Tag";
///
///     fn meta() -> &'static MetaBean {
///         static META: MetaBeanCell = MetaBeanCell::new();
///         META.get_or_init(|| {
///             MetaBean::builder::<Self>()
///                 .property("label", |t| &t.label, |t, v| t.label = v)
///                 .build()
///         })
///     }
/// }
///
/// assert_eq!(Tag::meta().type_ident(), "Tag");
/// assert!(core::ptr::eq(Tag::meta(), Tag::meta()));
/// ```
pub struct MetaBeanCell(OnceLock<MetaBean>);

impl MetaBeanCell {
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored metadata, building it with `f` on first access.
    #[inline]
    pub fn get_or_init(&self, f: impl FnOnce() -> MetaBean) -> &MetaBean {
        self.0.get_or_init(f)
    }
}

impl Default for MetaBeanCell {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
