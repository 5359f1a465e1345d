use alloc::format;
use alloc::string::{String, ToString};
use core::num::IntErrorKind;
use core::time::Duration;

use crate::info::Typed;
use crate::value::{FromValue, ToValue, ValueError};

// -----------------------------------------------------------------------------
// TextConvert

/// A type whose values are written as a single text token.
///
/// `from_text(&value.to_text())` must yield an equal value.
pub trait TextConvert: Typed + ToValue + FromValue + 'static {
    fn to_text(&self) -> String;

    fn from_text(text: &str) -> Result<Self, ValueError>;
}

impl TextConvert for bool {
    #[inline]
    fn to_text(&self) -> String {
        self.to_string()
    }

    fn from_text(text: &str) -> Result<Self, ValueError> {
        match text {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(ValueError::parse(text, "bool", "expected `true` or `false`")),
        }
    }
}

impl TextConvert for char {
    #[inline]
    fn to_text(&self) -> String {
        self.to_string()
    }

    fn from_text(text: &str) -> Result<Self, ValueError> {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(ValueError::parse(text, "char", "expected exactly one character")),
        }
    }
}

impl TextConvert for String {
    #[inline]
    fn to_text(&self) -> String {
        self.clone()
    }

    #[inline]
    fn from_text(text: &str) -> Result<Self, ValueError> {
        Ok(text.into())
    }
}

macro_rules! impl_text_convert_int {
    ($($ty:ident),*) => {
        $(
            impl TextConvert for $ty {
                #[inline]
                fn to_text(&self) -> String {
                    self.to_string()
                }

                fn from_text(text: &str) -> Result<Self, ValueError> {
                    text.parse::<$ty>().map_err(|err| match err.kind() {
                        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                            ValueError::NumericRange {
                                value: text.into(),
                                target: stringify!($ty),
                            }
                        }
                        _ => ValueError::parse(text, stringify!($ty), err),
                    })
                }
            }
        )*
    };
}

impl_text_convert_int!(i8, i16, i32, i64, u8, u16, u32, u64);

macro_rules! impl_text_convert_float {
    ($($ty:ident),*) => {
        $(
            impl TextConvert for $ty {
                #[inline]
                fn to_text(&self) -> String {
                    self.to_string()
                }

                fn from_text(text: &str) -> Result<Self, ValueError> {
                    text.parse::<$ty>()
                        .map_err(|err| ValueError::parse(text, stringify!($ty), err))
                }
            }
        )*
    };
}

impl_text_convert_float!(f32, f64);

/// ISO-8601 durations restricted to seconds, e.g. `PT90S` or `PT1.5S`.
impl TextConvert for Duration {
    fn to_text(&self) -> String {
        let nanos = self.subsec_nanos();
        if nanos == 0 {
            return format!("PT{}S", self.as_secs());
        }
        let fraction = format!("{nanos:09}");
        format!("PT{}.{}S", self.as_secs(), fraction.trim_end_matches('0'))
    }

    fn from_text(text: &str) -> Result<Self, ValueError> {
        let body = text
            .strip_prefix("PT")
            .and_then(|rest| rest.strip_suffix('S'))
            .ok_or_else(|| ValueError::parse(text, "duration", "expected `PT<seconds>S`"))?;
        let (secs, fraction) = body.split_once('.').unwrap_or((body, ""));
        let digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if secs.is_empty()
            || fraction.len() > 9
            || body.ends_with('.')
            || !digits(secs)
            || !digits(fraction)
        {
            return Err(ValueError::parse(text, "duration", "invalid seconds"));
        }
        let secs = secs
            .parse::<u64>()
            .map_err(|err| ValueError::parse(text, "duration", err))?;
        let nanos = if fraction.is_empty() {
            0
        } else {
            let digits = fraction
                .parse::<u32>()
                .map_err(|err| ValueError::parse(text, "duration", err))?;
            digits * 10u32.pow(9 - fraction.len() as u32)
        };
        Ok(Duration::new(secs, nanos))
    }
}

// -----------------------------------------------------------------------------
// Tests
