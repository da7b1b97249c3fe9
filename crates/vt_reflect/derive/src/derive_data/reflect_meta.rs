use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{Generics, Ident, ImplGenerics, Path, Type, TypeGenerics};

use super::TypeAttributes;

/// Everything about the deriving type except its fields.
pub(crate) struct ReflectMeta<'a> {
    vt_reflect_path: Path,
    attrs: TypeAttributes,
    ident: &'a Ident,
    generics: &'a Generics,
    active_types: Vec<Type>,
}

impl core::fmt::Debug for ReflectMeta<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ReflectMeta")
            .field("vt_reflect_path", &self.vt_reflect_path.to_token_stream())
            .field("ident", &self.ident)
            .field("attrs", &self.attrs)
            .finish()
    }
}

impl<'a> ReflectMeta<'a> {
    #[inline]
    pub fn new(attrs: TypeAttributes, ident: &'a Ident, generics: &'a Generics) -> Self {
        Self {
            attrs,
            ident,
            generics,
            vt_reflect_path: crate::path::vt_reflect(),
            active_types: Vec::new(),
        }
    }

    /// Used for [`ReflectStruct`](crate::derive_data::ReflectStruct),
    /// set the active field types during initialization.
    #[inline]
    pub(super) fn set_active_types(&mut self, active_types: Vec<Type>) {
        self.active_types = active_types;
    }

    #[inline]
    pub fn vt_reflect_path(&self) -> &Path {
        &self.vt_reflect_path
    }

    #[inline]
    pub fn attrs(&self) -> &TypeAttributes {
        &self.attrs
    }

    #[inline]
    pub fn ident(&self) -> &'a Ident {
        self.ident
    }

    /// Return the required generic parameters.
    ///
    /// The three parameters returned are `impl_generics`, `ty_generics`, `where_clause`.
    ///
    /// ## Example
    ///
    /// ```ignore
    /// let ident = meta.ident();
    /// let (impl_generics, ty_generics, where_clause) = meta.split_generics();
    ///
    /// quote! {
    ///     impl #impl_generics TraitName for #ident #ty_generics #where_clause {
    ///         /* ... */
    ///     }
    /// }
    /// ```
    ///
    /// ## Bounds
    ///
    /// - Type Itself:
    ///     - `'static`: exists lifetimes.
    ///     - `Any + Send + Sync`: exists type params.
    /// - Field Type: `Reflect`, only when type params exist, so that
    ///   `Some(&self.field)` coerces to `&dyn Reflect`.
    pub fn split_generics(&self) -> (ImplGenerics<'a>, TypeGenerics<'a>, TokenStream) {
        use crate::path::fp::{AnyFP, SendFP, SyncFP};

        let generics = self.generics;

        let mut generic_where_clause = quote! { where };

        if generics.type_params().next().is_some() {
            generic_where_clause.extend(quote! { Self: #AnyFP + #SendFP + #SyncFP, });

            let reflect_ = crate::path::reflect_(&self.vt_reflect_path);
            for ty in &self.active_types {
                generic_where_clause.extend(quote! { #ty: #reflect_, });
            }
        } else if generics.lifetimes().next().is_some() {
            generic_where_clause.extend(quote! { Self: 'static, });
        }

        let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

        if let Some(where_clause) = where_clause {
            let predicates = where_clause.predicates.iter();
            generic_where_clause.extend(quote! { #(#predicates,)* });
        }

        (impl_generics, ty_generics, generic_where_clause)
    }
}
