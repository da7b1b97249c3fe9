//! Provide the compile-time facts a reflected value carries at runtime.
//!
//! - [`ReflectKind`]: the shape of a value, one of `Opaque`, `Struct`, `List`
//!   and `Indirection`.
//! - [`ReflectKindError`]: returned when a value does not have the expected kind.
//! - [`Type`]: a [`TypeId`](core::any::TypeId) paired with the type path, used
//!   to compare concrete types, such as list items and indirection targets.

// -----------------------------------------------------------------------------
// Modules

mod kind;
mod ty;

// -----------------------------------------------------------------------------
// Exports

pub use kind::{ReflectKind, ReflectKindError};
pub use ty::Type;
