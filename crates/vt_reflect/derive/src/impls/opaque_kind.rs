use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};

use super::impl_trait_reflect;

use crate::derive_data::ReflectMeta;

/// Implement full reflect for opaque type.
pub(crate) fn impl_opaque(meta: &ReflectMeta) -> TokenStream {
    let reflect_clone_tokens = get_opaque_clone_impl(meta);

    // Hooks are rejected while parsing. `reflect_debug` keeps the default.
    impl_trait_reflect(
        meta,
        quote!(Opaque),
        reflect_clone_tokens,
        TokenStream::new(),
        TokenStream::new(),
    )
}

/// Generate `Reflect::reflect_clone` implementation tokens.
fn get_opaque_clone_impl(meta: &ReflectMeta) -> TokenStream {
    use crate::path::fp::{CloneFP, ResultFP};

    let vt_reflect_path = meta.vt_reflect_path();
    let macro_utils_ = crate::path::macro_utils_(vt_reflect_path);
    let reflect_ = crate::path::reflect_(vt_reflect_path);
    let reflect_clone_error_ = crate::path::reflect_clone_error_(vt_reflect_path);

    match meta.attrs().clone {
        Some(span) => quote_spanned! { span =>
            #[inline]
            fn reflect_clone(&self) -> #ResultFP<#macro_utils_::Box<dyn #reflect_>, #reflect_clone_error_> {
                #ResultFP::Ok(#macro_utils_::Box::new(<Self as #CloneFP>::clone(self)))
            }
        },
        None => unreachable!(
            "#[reflect(clone)] must be specified when deriving `Reflect` for an opaque type."
        ),
    }
}
