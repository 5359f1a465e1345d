//! Text conversion of leaf values.
//!
//! A leaf is anything written as a single token: scalars, [`Duration`],
//! opaque values and beans that choose to be written as text. Each leaf type
//! implements [`TextConvert`] and is registered in a [`TextCodec`], keyed by
//! its type path.
//!
//! [`Duration`]: core::time::Duration

// -----------------------------------------------------------------------------
// Modules

mod codec;
mod text_convert;

// -----------------------------------------------------------------------------
// Exports

pub use codec::TextCodec;
pub use text_convert::TextConvert;
