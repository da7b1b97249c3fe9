//! Items used by the code that `#[derive(Reflect)]` and
//! [`impl_reflect_opaque!`](crate::impl_reflect_opaque) expand to.
//!
//! Not public API.

pub mod macro_utils {
    pub use alloc::borrow::Cow;
    pub use alloc::boxed::Box;

    pub use crate::impls::reflect_clone_as as __reflect_clone_field;
}
