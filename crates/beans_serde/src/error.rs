use alloc::boxed::Box;
use alloc::string::{String, ToString};

use beans_reflect::ValueError;
use beans_reflect::bean::BuildError;
use thiserror::Error;

// -----------------------------------------------------------------------------
// SerError

/// An error raised while writing or reading a bean graph.
///
/// Reading wraps every error in [`SerError::InBean`] at each bean boundary it
/// crosses, so the outermost error names the root bean and the innermost one
/// the actual failure. Use [`root_cause`](Self::root_cause) to get the latter.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SerError {
    /// A type name could not be resolved.
    #[error("unknown type `{0}`")]
    UnknownType(String),

    /// The input does not have the expected shape.
    #[error("malformed input: {0}")]
    MalformedStructure(String),

    /// A leaf value has no text conversion.
    #[error("values of type `{0}` cannot be serialized")]
    NotSerializable(String),

    /// A number does not fit the declared numeric type exactly.
    #[error("value {value} cannot be represented exactly as {target}")]
    NumericRange { value: String, target: String },

    /// The bean builder rejected a property value.
    #[error(transparent)]
    Build(#[from] BuildError),

    /// The XML tokenizer or emitter failed.
    #[error("xml error: {0}")]
    Xml(String),

    /// The JSON text could not be parsed or printed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// An error raised while reading a bean, or one of its properties when
    /// `property` is set.
    #[error("in `{bean}`{}: {source}", property_suffix(.property))]
    InBean {
        bean: &'static str,
        property: Option<String>,
        #[source]
        source: Box<SerError>,
    },
}

fn property_suffix(property: &Option<String>) -> String {
    match property {
        Some(name) => alloc::format!(" property `{name}`"),
        None => String::new(),
    }
}

impl SerError {
    #[inline]
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedStructure(message.into())
    }

    #[inline]
    pub(crate) fn xml(err: impl core::fmt::Display) -> Self {
        Self::Xml(err.to_string())
    }

    /// Adds the bean and property being read to an error.
    #[inline]
    pub(crate) fn in_bean(self, bean: &'static str, property: &str) -> Self {
        Self::InBean {
            bean,
            property: Some(property.into()),
            source: Box::new(self),
        }
    }

    /// Adds the bean being read to an error raised outside any property.
    #[inline]
    pub(crate) fn in_bean_itself(self, bean: &'static str) -> Self {
        Self::InBean {
            bean,
            property: None,
            source: Box::new(self),
        }
    }

    /// Returns the innermost error, skipping [`SerError::InBean`] wrappers.
    pub fn root_cause(&self) -> &SerError {
        let mut current = self;
        while let Self::InBean { source, .. } = current {
            current = source;
        }
        current
    }
}

impl From<ValueError> for SerError {
    fn from(err: ValueError) -> Self {
        match err {
            ValueError::NumericRange { value, target } => Self::NumericRange {
                value,
                target: target.into(),
            },
            ValueError::NotConvertible(ty) => Self::NotSerializable(ty),
            other => Self::MalformedStructure(other.to_string()),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
