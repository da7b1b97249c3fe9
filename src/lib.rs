#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use vt_convert as convert;
pub use vt_reflect as reflect;

pub use vt_convert::{ConvertError, ConvertOptions, Converter};
pub use vt_convert::{convert, convert_into, must_convert};
