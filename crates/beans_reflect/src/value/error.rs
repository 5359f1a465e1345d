use alloc::string::String;

use thiserror::Error;

// -----------------------------------------------------------------------------
// ValueError

/// A [`Value`](crate::value::Value) could not be converted.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum ValueError {
    #[error("expected {expected} but found {found}")]
    Mismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("null is not allowed for {expected}")]
    Null { expected: &'static str },

    #[error("value {value} cannot be represented exactly as {target}")]
    NumericRange { value: String, target: &'static str },

    #[error("cannot parse `{text}` as {target}: {reason}")]
    Parse {
        text: String,
        target: &'static str,
        reason: String,
    },

    #[error("no text conversion is registered for `{0}`")]
    NotConvertible(String),

    #[error("{0}")]
    Invalid(String),
}

impl ValueError {
    #[inline]
    pub(crate) fn parse(text: &str, target: &'static str, reason: impl core::fmt::Display) -> Self {
        use alloc::string::ToString;
        Self::Parse {
            text: text.into(),
            target,
            reason: reason.to_string(),
        }
    }
}
