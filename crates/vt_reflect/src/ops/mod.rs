//! Provide interfaces and dynamic types for data operation.
//!
//! ## Menu
//!
//! ### Interface
//!
//! The following are the subtraits of [`Reflect`], which provide data access methods for each kind.
//!
//! - [`Struct`]: For struct with named fields (e.g. `A{ .. }`) .
//! - [`List`]: For list-like (e.g. `Vec<i32>`) .
//! - [`Indirection`]: For pointer-like wrappers that may be absent (e.g. `Option<T>`, `Box<T>`, `Arc<T>`) .
//!
//! ### Dynamic Type
//!
//! - [`DynamicStruct`]: representing struct data built at runtime, similar to `Map<String, Box<dyn Reflect>>`.
//!
//! [`Reflect`]: crate::Reflect

// -----------------------------------------------------------------------------
// Modules

mod clone_error;
mod indirection_ops;
mod kind;
mod list_ops;
mod struct_ops;

// -----------------------------------------------------------------------------
// Exports

pub use clone_error::ReflectCloneError;

pub use kind::{ReflectMut, ReflectRef};

pub use indirection_ops::Indirection;
pub use list_ops::{List, ListItemIter};
pub use struct_ops::{DynamicStruct, Struct, StructFieldIter};
