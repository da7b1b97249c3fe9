// -----------------------------------------------------------------------------
// Modules

mod match_reflect;

mod opaque_kind;
mod struct_kind;

mod struct_clone;
mod trait_hooks;
mod trait_reflect;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use match_reflect::match_reflect_impls;

use opaque_kind::impl_opaque;
use struct_clone::get_struct_clone_impl;
use struct_kind::impl_struct;
use trait_hooks::get_hook_accessors;
use trait_reflect::impl_trait_reflect;
