//! Provide reflection impls for foreign types and the helpers used to
//! implement [`Reflect`](crate::Reflect).
//!
//! - `xxx_debug`: Used to implement [`Reflect::reflect_debug`] (e.g. [`struct_debug`]).
//! - [`reflect_clone_as`]: A typed [`Reflect::reflect_clone`].
//! - [`impl_reflect_opaque!`](crate::impl_reflect_opaque): Implement `Reflect` for a
//!   `Clone + Debug` type as an opaque value.
//!
//! ## Implemented Menu
//!
//! - Opaque:
//!     - `bool`, `char`, `()`
//!     - `i8`-`i128`, `u8`-`u128`, `isize`, `usize`, `f32`, `f64`
//!     - `&'static str`, `String`, `Cow<'static, str>`
//!     - `core::time::Duration`
//!     - `BTreeMap<K, V>`, `BTreeSet<T>`, `hashbrown::HashMap<K, V, S>`
//!     - std: `HashMap<K, V, S>`, `HashSet<T, S>`, `PathBuf`, `OsString` ("std" feature)
//! - List: `Vec<T>`, `VecDeque<T>`
//! - Indirection: `Option<T>`, `Box<T>`, `Arc<T>`
//!
//! [`Reflect::reflect_debug`]: crate::Reflect::reflect_debug
//! [`Reflect::reflect_clone`]: crate::Reflect::reflect_clone

// -----------------------------------------------------------------------------
// Modules

mod indirection;
mod list;
mod map;
mod opaque;
mod utils;

// -----------------------------------------------------------------------------
// Exports

pub use utils::{indirection_debug, list_debug, reflect_clone_as, struct_debug};
