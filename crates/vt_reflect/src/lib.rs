#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// Extern Self

// Usually, we need to use `crate` in the crate itself and use `vt_reflect` in doc testing.
// But `macro_utils::Manifest` can only choose one, so we must have an
// `extern self` to ensure `vt_reflect` can be used as an alias for `crate`.
extern crate self as vt_reflect;

// -----------------------------------------------------------------------------
// no_std support

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod reflection;

pub mod hash;
pub mod hook;
pub mod impls;
pub mod info;
pub mod ops;

// -----------------------------------------------------------------------------
// Top-Level exports

pub mod __macro_exports;

pub use reflection::Reflect;
pub use vt_reflect_derive as derive;

// -----------------------------------------------------------------------------
// Tests
