//! Beans and their metadata.
//!
//! - [`Bean`]: the object-safe runtime view of a bean.
//! - [`TypedBean`]: static access to the [`MetaBean`] of a concrete type.
//! - [`MetaBean`] / [`MetaProperty`]: process-wide, immutable descriptions of
//!   a bean type and its properties, built once through [`MetaBeanBuilder`]
//!   and stored in a [`MetaBeanCell`].
//! - [`BeanBuilder`]: collects property values and produces a bean.

// -----------------------------------------------------------------------------
// Modules

mod bean;
mod builder;
mod meta;

// -----------------------------------------------------------------------------
// Exports

pub use bean::{Bean, TypedBean, bean_eq};
pub use builder::{BeanBuilder, BuildError, PropertySetBuilder};
pub use meta::{MetaBean, MetaBeanBuilder, MetaBeanCell, MetaProperty, PropertyStyle};
