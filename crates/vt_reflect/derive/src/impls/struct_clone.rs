use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};

use crate::derive_data::ReflectStruct;

// Generate `Reflect::reflect_clone` tokens for struct.
pub(crate) fn get_struct_clone_impl(info: &ReflectStruct) -> TokenStream {
    use crate::path::fp::{CloneFP, ResultFP};

    let meta = info.meta();
    let vt_reflect_path = meta.vt_reflect_path();
    let macro_utils_ = crate::path::macro_utils_(vt_reflect_path);
    let reflect_ = crate::path::reflect_(vt_reflect_path);
    let reflect_clone_error_ = crate::path::reflect_clone_error_(vt_reflect_path);

    if let Some(span) = meta.attrs().clone {
        return quote_spanned! { span =>
            #[inline]
            fn reflect_clone(&self) -> #ResultFP<#macro_utils_::Box<dyn #reflect_>, #reflect_clone_error_> {
                #ResultFP::Ok(#macro_utils_::Box::new(<Self as #CloneFP>::clone(self)))
            }
        };
    }

    // An ignored field has no reflected value to rebuild it from.
    for field in info.fields() {
        if let Some(span) = field.attrs.ignore {
            let field_name = field.name_lit();
            return quote_spanned! { span =>
                #[inline]
                fn reflect_clone(&self) -> #ResultFP<#macro_utils_::Box<dyn #reflect_>, #reflect_clone_error_> {
                    #ResultFP::Err(#reflect_clone_error_::FieldNotCloneable {
                        type_path: #macro_utils_::Cow::Borrowed(#reflect_::reflect_type_path(self)),
                        field: #macro_utils_::Cow::Borrowed(#field_name),
                    })
                }
            };
        }
    }

    let mut tokens = TokenStream::new();

    for field in info.fields() {
        let field_ty = field.ty();
        let ident = field.ident();

        tokens.extend(quote! {
            #ident: #macro_utils_::__reflect_clone_field::<#field_ty>(&self.#ident)?,
        });
    }

    quote! {
        fn reflect_clone(&self) -> #ResultFP<#macro_utils_::Box<dyn #reflect_>, #reflect_clone_error_> {
            #ResultFP::Ok(#macro_utils_::Box::new(
                Self {
                    #tokens
                }
            ) as #macro_utils_::Box<dyn #reflect_>)
        }
    }
}
