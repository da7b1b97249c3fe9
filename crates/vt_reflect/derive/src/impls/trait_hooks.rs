use proc_macro2::TokenStream;
use quote::quote_spanned;

use crate::derive_data::ReflectMeta;

/// Generate `Reflect::reflect_convert_to` and `Reflect::reflect_convert_from`
/// overrides for the flagged hooks.
///
/// The tokens carry the span of the flag, so a missing `ConvertTo` or
/// `ConvertFrom` impl is reported at the attribute.
pub(crate) fn get_hook_accessors(meta: &ReflectMeta) -> TokenStream {
    use crate::path::fp::OptionFP;

    let vt_reflect_path = meta.vt_reflect_path();
    let mut tokens = TokenStream::new();

    if let Some(span) = meta.attrs().convert_to {
        let convert_to_ = crate::path::convert_to_(vt_reflect_path);
        tokens.extend(quote_spanned! { span =>
            #[inline]
            fn reflect_convert_to(&self) -> #OptionFP<&dyn #convert_to_> {
                #OptionFP::Some(self)
            }
        });
    }

    if let Some(span) = meta.attrs().convert_from {
        let convert_from_ = crate::path::convert_from_(vt_reflect_path);
        tokens.extend(quote_spanned! { span =>
            #[inline]
            fn reflect_convert_from(&mut self) -> #OptionFP<&mut dyn #convert_from_> {
                #OptionFP::Some(self)
            }
        });
    }

    tokens
}
