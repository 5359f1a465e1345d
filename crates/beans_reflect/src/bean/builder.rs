use alloc::boxed::Box;
use alloc::string::String;

use thiserror::Error;

use crate::bean::{Bean, MetaBean, MetaProperty, TypedBean};
use crate::value::{Value, ValueError};

// -----------------------------------------------------------------------------
// BuildError

/// An error raised while assembling a bean from property values.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum BuildError {
    /// The value could not be converted to the property type.
    #[error("invalid value for property `{property}`: {source}")]
    InvalidValue {
        property: &'static str,
        #[source]
        source: ValueError,
    },
    /// The property cannot be written.
    #[error("property `{property}` of `{bean}` is not writable")]
    NotWritable {
        bean: &'static str,
        property: &'static str,
    },
    /// The assembled state was rejected.
    #[error("cannot build `{bean}`: {message}")]
    Rejected { bean: &'static str, message: String },
}

// -----------------------------------------------------------------------------
// BeanBuilder

/// Collects property values for one bean and produces it.
///
/// `build` consumes the builder, so a builder yields at most one bean.
pub trait BeanBuilder: Send {
    /// Metadata of the bean being built.
    fn meta_bean(&self) -> &'static MetaBean;

    /// Sets one property. A later call for the same property wins.
    fn set(&mut self, property: &MetaProperty, value: Option<Value>) -> Result<(), BuildError>;

    fn build(self: Box<Self>) -> Result<Box<dyn Bean>, BuildError>;
}

// -----------------------------------------------------------------------------
// PropertySetBuilder

/// The default [`BeanBuilder`]: starts from `T::default()` and applies
/// property setters in arrival order.
#[derive(Debug)]
pub struct PropertySetBuilder<T> {
    bean: T,
}

impl<T: TypedBean + Default> PropertySetBuilder<T> {
    #[inline]
    pub fn new() -> Self {
        Self { bean: T::default() }
    }

    /// Factory stored in the [`MetaBean`] of `T`.
    #[inline]
    pub fn new_boxed() -> Box<dyn BeanBuilder> {
        Box::new(Self::new())
    }
}

impl<T: TypedBean + Default> Default for PropertySetBuilder<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TypedBean> BeanBuilder for PropertySetBuilder<T> {
    #[inline]
    fn meta_bean(&self) -> &'static MetaBean {
        T::meta()
    }

    fn set(&mut self, property: &MetaProperty, value: Option<Value>) -> Result<(), BuildError> {
        if !property.style().is_writable() {
            return Err(BuildError::NotWritable {
                bean: T::TYPE_PATH,
                property: property.name(),
            });
        }
        property
            .set(&mut self.bean, value)
            .map_err(|source| BuildError::InvalidValue {
                property: property.name(),
                source,
            })
    }

    #[inline]
    fn build(self: Box<Self>) -> Result<Box<dyn Bean>, BuildError> {
        Ok(Box::new(self.bean))
    }
}

// -----------------------------------------------------------------------------
// Tests
