use proc_macro2::TokenStream;
use quote::{ToTokens, quote};

use super::{get_hook_accessors, get_struct_clone_impl, impl_trait_reflect};

use crate::derive_data::{FieldAccessors, ReflectStruct};

/// Implement full reflect for struct type.
pub(crate) fn impl_struct(info: &ReflectStruct) -> TokenStream {
    let meta = info.meta();

    // trait: Struct
    let struct_trait_tokens = impl_trait_struct(info);

    // trait: Reflect
    let reflect_clone_tokens = get_struct_clone_impl(info);
    let reflect_hook_tokens = get_hook_accessors(meta);
    let reflect_debug_tokens = get_struct_debug_impl(info);

    let reflect_trait_tokens = impl_trait_reflect(
        meta,
        quote!(Struct),
        reflect_clone_tokens,
        reflect_hook_tokens,
        reflect_debug_tokens,
    );

    quote! {
        #struct_trait_tokens

        #reflect_trait_tokens
    }
}

/// Generate `Struct` trait implementation tokens.
fn impl_trait_struct(info: &ReflectStruct) -> TokenStream {
    use crate::path::fp::OptionFP;
    let meta = info.meta();
    // `quote` binds idents inside repetitions, which a unit struct cannot be.
    let option_ = OptionFP.to_token_stream();

    let vt_reflect_path = meta.vt_reflect_path();
    let struct_ = crate::path::struct_(vt_reflect_path);
    let reflect_ = crate::path::reflect_(vt_reflect_path);
    let struct_field_iter_ = crate::path::struct_field_iter_(vt_reflect_path);

    let FieldAccessors {
        fields_ref,
        fields_mut,
        field_names,
        field_indices,
        embedded_indices,
        field_count,
    } = info.accessors();

    let is_embedded_tokens = if embedded_indices.is_empty() {
        TokenStream::new()
    } else {
        quote! {
            #[inline]
            fn is_embedded_at(&self, index: usize) -> bool {
                ::core::matches!(index, #(#embedded_indices)|*)
            }
        }
    };

    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics();

    quote! {
        impl #impl_generics #struct_ for #ident #ty_generics #where_clause {
            fn field(&self, name: &str) -> #OptionFP<&dyn #reflect_> {
                match name {
                    #(#field_names => #option_::Some(#fields_ref),)*
                    _ => #OptionFP::None,
                }
            }

            fn field_mut(&mut self, name: &str) -> #OptionFP<&mut dyn #reflect_> {
                match name {
                    #(#field_names => #option_::Some(#fields_mut),)*
                    _ => #OptionFP::None,
                }
            }

            fn field_at(&self, index: usize) -> #OptionFP<&dyn #reflect_> {
                match index {
                    #(#field_indices => #option_::Some(#fields_ref),)*
                    _ => #OptionFP::None,
                }
            }

            fn field_at_mut(&mut self, index: usize) -> #OptionFP<&mut dyn #reflect_> {
                match index {
                    #(#field_indices => #option_::Some(#fields_mut),)*
                    _ => #OptionFP::None,
                }
            }

            fn name_at(&self, index: usize) -> #OptionFP<&str> {
                match index {
                    #(#field_indices => #option_::Some(#field_names),)*
                    _ => #OptionFP::None,
                }
            }

            #[inline]
            fn field_len(&self) -> usize {
                #field_count
            }

            #is_embedded_tokens

            // Do not use default implementation to avoid the linear scan.
            fn index_of(&self, name: &str) -> #OptionFP<usize> {
                match name {
                    #(#field_names => #option_::Some(#field_indices),)*
                    _ => #OptionFP::None,
                }
            }

            #[inline]
            fn iter_fields(&self) -> #struct_field_iter_<'_> {
                #struct_field_iter_::new(self)
            }
        }
    }
}

/// Generate `Reflect::reflect_debug` implementation tokens.
fn get_struct_debug_impl(info: &ReflectStruct) -> TokenStream {
    let struct_debug_ = crate::path::struct_debug_(info.meta().vt_reflect_path());
    quote! {
        #[inline]
        fn reflect_debug(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
            #struct_debug_(self, f)
        }
    }
}
