//! XML and simple-map serialization of bean graphs.
//!
//! Both flavors walk beans through the property view of [`beans_reflect`]:
//! writers read every serializable property and readers assemble beans
//! through builders, so no bean type needs serialization code of its own.
//!
//! - [`xml`]: a self-describing XML document. Type names are written only
//!   where the runtime type differs from the declared type, shortened
//!   against the root bean's module and against names already written.
//! - [`map`]: a JSON value with no type names; the declared types at read
//!   time decide how every node is interpreted.
//!
//! Writers and readers are created per document from [`SerSettings`] and
//! are consumed by the call that writes or reads it.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use beans_reflect::bean::{MetaBean, MetaBeanCell, TypedBean, bean_eq};
//! use beans_reflect::impl_bean_value;
//! use beans_reflect::registry::TypeRegistry;
//! use beans_serde::SerSettings;
//!
//! #[derive(Debug, Clone, Default, PartialEq)]
//! struct Point {
//!     x: i32,
//!     labels: Vec<String>,
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
//!                 .property("labels", |p| &p.labels, |p, v| p.labels = v)
//!                 .build()
//!         })
//!     }
//! }
//!
//! impl_bean_value!(Point);
//!
//! let mut registry = TypeRegistry::new();
//! registry.register::<Point>();
//! let settings = SerSettings::compact(Arc::new(registry));
//!
//! let point = Point { x: 3, labels: vec!["a".into()] };
//!
//! let xml = settings.xml_writer().write(&point).unwrap();
//! assert!(xml.ends_with(r#"<bean type="geo::Point"><x>3</x><labels><item>a</item></labels></bean>"#));
//! let read: Point = settings.xml_reader().read(&xml).unwrap();
//! assert!(bean_eq(&point, &read));
//!
//! let json = settings.map_writer().write(&point).unwrap();
//! assert_eq!(json, serde_json::json!({ "x": 3, "labels": ["a"] }));
//! let read: Point = settings.map_reader().read(&json).unwrap();
//! assert_eq!(read, point);
//! ```

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod deserializer;
mod error;
mod settings;
mod type_name;

pub mod map;
pub mod shape;
pub mod xml;

#[cfg(test)]
mod fixtures;

// -----------------------------------------------------------------------------
// Top-level exports

pub use deserializer::{BeanDeserializer, DefaultDeserializer, Deserializers};
pub use error::SerError;
pub use map::{from_json_str, to_json_string};
pub use settings::SerSettings;
pub use type_name::{ParseContext, WriteContext};
