#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Logging

/// `log::trace!`, compiled in only with the `debug` feature in debug builds.
macro_rules! trace {
    ($($arg:tt)*) => {
        #[cfg(all(debug_assertions, feature = "debug"))]
        ::log::trace!($($arg)*);
    };
}

pub(crate) use trace;

// -----------------------------------------------------------------------------
// Modules

mod converter;
mod error;
mod sequence;

pub mod fields;
pub mod hook;
pub mod resolve;

// -----------------------------------------------------------------------------
// Exports

pub use converter::{ConvertOptions, Converter};
pub use converter::{convert, convert_into, must_convert};
pub use error::ConvertError;
pub use fields::FieldDescriptor;

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests;
