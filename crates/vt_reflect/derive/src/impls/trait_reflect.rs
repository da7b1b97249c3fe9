use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ReflectMeta;

/// Generate implementation code for `Reflect` trait.
pub(crate) fn impl_trait_reflect(
    meta: &ReflectMeta,
    reflect_kind_token: TokenStream,
    reflect_clone_tokens: TokenStream,
    reflect_hook_tokens: TokenStream,
    reflect_debug_tokens: TokenStream,
) -> TokenStream {
    use crate::path::fp::ResultFP;

    let vt_reflect_path = meta.vt_reflect_path();

    let reflect_ = crate::path::reflect_(vt_reflect_path);
    let macro_utils_ = crate::path::macro_utils_(vt_reflect_path);
    let reflect_kind_ = crate::path::reflect_kind_(vt_reflect_path);
    let reflect_ref_ = crate::path::reflect_ref_(vt_reflect_path);
    let reflect_mut_ = crate::path::reflect_mut_(vt_reflect_path);

    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics();

    quote! {
        impl #impl_generics #reflect_ for #ident #ty_generics #where_clause {
            fn set(&mut self, value: #macro_utils_::Box<dyn #reflect_>) -> #ResultFP<(), #macro_utils_::Box<dyn #reflect_>> {
                *self = value.take::<Self>()?;
                #ResultFP::Ok(())
            }

            #[inline]
            fn reflect_kind(&self) -> #reflect_kind_ {
                #reflect_kind_::#reflect_kind_token
            }

            #[inline]
            fn reflect_ref(&self) -> #reflect_ref_<'_> {
                #reflect_ref_::#reflect_kind_token(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> #reflect_mut_<'_> {
                #reflect_mut_::#reflect_kind_token(self)
            }

            #reflect_clone_tokens

            #reflect_hook_tokens

            #reflect_debug_tokens
        }
    }
}
