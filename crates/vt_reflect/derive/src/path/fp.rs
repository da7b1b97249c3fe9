//! Fully qualified paths of `core` items, safe to emit into any crate.

use proc_macro2::TokenStream;
use quote::{ToTokens, quote};

macro_rules! define_fully_qualified_path {
    ($($name:ident => $($seg:ident)::+,)*) => {
        $(
            pub(crate) struct $name;

            impl ToTokens for $name {
                #[inline]
                fn to_tokens(&self, tokens: &mut TokenStream) {
                    quote!($(::$seg)+).to_tokens(tokens);
                }
            }
        )*
    };
}

define_fully_qualified_path! {
    AnyFP => core::any::Any,
    CloneFP => core::clone::Clone,
    OptionFP => core::option::Option,
    ResultFP => core::result::Result,
    SendFP => core::marker::Send,
    SyncFP => core::marker::Sync,
}
