//! A uniform "named property" view over beans.
//!
//! Every bean type publishes a [`MetaBean`]: an ordered list of
//! [`MetaProperty`] handles, each with a name, a declared [`TypeToken`] and a
//! [`PropertyStyle`]. Values travel through the view as the dynamic
//! [`Value`] enum, so code walking a bean graph never needs to know the
//! concrete Rust types involved.
//!
//! # Overview
//!
//! - [`info`]: declared types ([`TypeToken`], [`CollectionKind`]) and the
//!   [`Typed`] trait that maps Rust types onto them.
//! - [`value`]: the runtime [`Value`] model, [`Collection`] values and the
//!   [`ToValue`]/[`FromValue`] conversions.
//! - [`bean`]: [`Bean`], [`TypedBean`], [`MetaBean`], [`MetaProperty`] and
//!   [`BeanBuilder`].
//! - [`collections`]: concrete [`Multiset`], [`Table`] and [`Grid`] types.
//! - [`convert`]: the [`TextCodec`] turning leaf values into single tokens.
//! - [`registry`]: the [`TypeRegistry`] resolving type paths and renames.
//!
//! # Example
//!
//! ```
//! use beans_reflect::bean::{MetaBean, MetaBeanCell, TypedBean};
//! use beans_reflect::registry::TypeRegistry;
//! use beans_reflect::impl_bean_value;
//!
//! #[derive(Debug, Clone, Default, PartialEq)]
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! impl TypedBean for Point {
//!     const TYPE_PATH: &'static str = "geo::Point";
//!
//!     fn meta() -> &'static MetaBean {
//!         static META: MetaBeanCell = MetaBeanCell::new();
//!         META.get_or_init(|| {
//!             MetaBean::builder::<Self>()
//!                 .property("x", |p| &p.x, |p, v| p.x = v)
//!                 .property("y", |p| &p.y, |p, v| p.y = v)
//!                 .build()
//!         })
//!     }
//! }
//!
//! impl_bean_value!(Point);
//!
//! let mut registry = TypeRegistry::new();
//! registry.register::<Point>();
//!
//! let meta = registry.get_bean("geo::Point").unwrap();
//! assert_eq!(meta.properties().len(), 2);
//! ```
//!
//! [`TypeToken`]: info::TypeToken
//! [`CollectionKind`]: info::CollectionKind
//! [`Typed`]: info::Typed
//! [`Value`]: value::Value
//! [`Collection`]: value::Collection
//! [`ToValue`]: value::ToValue
//! [`FromValue`]: value::FromValue
//! [`Bean`]: bean::Bean
//! [`TypedBean`]: bean::TypedBean
//! [`MetaBean`]: bean::MetaBean
//! [`MetaProperty`]: bean::MetaProperty
//! [`PropertyStyle`]: bean::PropertyStyle
//! [`BeanBuilder`]: bean::BeanBuilder
//! [`Multiset`]: collections::Multiset
//! [`Table`]: collections::Table
//! [`Grid`]: collections::Grid
//! [`TextCodec`]: convert::TextCodec
//! [`TypeRegistry`]: registry::TypeRegistry

// Macros refer to `::beans_reflect`, which must also resolve inside this crate.
extern crate self as beans_reflect;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod macros;

pub mod bean;
pub mod collections;
pub mod convert;
pub mod info;
pub mod registry;
pub mod value;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use bean::{Bean, MetaBean, MetaProperty, TypedBean};
pub use value::{FromValue, ToValue, Value, ValueError};

#[doc(hidden)]
pub mod __macro_exports {
    pub use alloc::boxed::Box;
    pub use alloc::format;
    pub use core::any::Any;
}
