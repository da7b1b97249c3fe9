//! This independent module is used to provide the required path.
//! So as to minimize changes when the `vt_reflect` structure is modified.
//!
//! The only special feature is the path of vt_reflect itself,
//! See [`vt_reflect`] function doc.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Get the correct access path to the `vt_reflect` crate.
///
/// Not all crates can access the reflection crate through `vt_reflect`,
/// we have to scan the builder's `Cargo.toml`.
///
/// 1. For crates that depend on `vt_reflect`, `::vt_reflect` is returned here.
/// 2. For crates that depend on `vertible`, `::vertible::reflect` is returned here.
/// 3. For other situations, `::vt_reflect` is returned here, but this may be incorrect.
///
/// The cost of this function is relatively high (accessing files, obtaining read-write lock permissions, querying content...),
/// so the crate path is mainly obtained through parameter passing rather than reacquiring.
pub(crate) fn vt_reflect() -> syn::Path {
    vt_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("vt_reflect"))
}

// -----------------------------------------------------------------------------
// Modules

pub(crate) mod fp;

// -----------------------------------------------------------------------------
// Internal API

#[inline(always)]
pub(crate) fn macro_utils_(vt_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #vt_reflect_path::__macro_exports::macro_utils
    }
}

#[inline(always)]
pub(crate) fn reflect_(vt_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #vt_reflect_path::Reflect
    }
}

#[inline(always)]
pub(crate) fn reflect_kind_(vt_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #vt_reflect_path::info::ReflectKind
    }
}

#[inline(always)]
pub(crate) fn reflect_ref_(vt_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #vt_reflect_path::ops::ReflectRef
    }
}

#[inline(always)]
pub(crate) fn reflect_mut_(vt_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #vt_reflect_path::ops::ReflectMut
    }
}

#[inline(always)]
pub(crate) fn reflect_clone_error_(vt_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #vt_reflect_path::ops::ReflectCloneError
    }
}

#[inline(always)]
pub(crate) fn struct_(vt_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #vt_reflect_path::ops::Struct
    }
}

#[inline(always)]
pub(crate) fn struct_field_iter_(vt_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #vt_reflect_path::ops::StructFieldIter
    }
}

#[inline(always)]
pub(crate) fn struct_debug_(vt_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #vt_reflect_path::impls::struct_debug
    }
}

#[inline(always)]
pub(crate) fn convert_to_(vt_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #vt_reflect_path::hook::ConvertTo
    }
}

#[inline(always)]
pub(crate) fn convert_from_(vt_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #vt_reflect_path::hook::ConvertFrom
    }
}
