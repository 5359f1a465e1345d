#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use beans_reflect as reflect;
pub use beans_serde as serde;
pub use beans_utils as utils;
