use proc_macro2::TokenStream;
use quote::quote;
use syn::{Field, Ident, LitStr, Type};

use super::{FieldAttributes, ReflectMeta};

/// A field of a struct with named fields.
pub(crate) struct StructField<'a> {
    /// The raw field.
    pub data: &'a Field,
    /// The parsed `#[reflect(...)]` attributes.
    pub attrs: FieldAttributes,
}

impl StructField<'_> {
    #[inline]
    pub fn ident(&self) -> &Ident {
        // `ReflectStruct` is only built from named fields.
        self.data.ident.as_ref().unwrap_or_else(|| unreachable!())
    }

    /// The field name as a string literal token.
    #[inline]
    pub fn name_lit(&self) -> LitStr {
        let ident = self.ident();
        LitStr::new(&ident.to_string(), ident.span())
    }

    #[inline]
    pub fn ty(&self) -> &Type {
        &self.data.ty
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.attrs.ignore.is_none()
    }
}

/// A struct with named fields, parsed for code generation.
pub(crate) struct ReflectStruct<'a> {
    meta: ReflectMeta<'a>,
    fields: Vec<StructField<'a>>,
}

/// The per-field `match` arms shared by the `Struct` accessors.
pub(crate) struct FieldAccessors {
    /// `&self.field` of every active field.
    pub fields_ref: Vec<TokenStream>,
    /// `&mut self.field` of every active field.
    pub fields_mut: Vec<TokenStream>,
    /// The reflected names, in declaration order.
    pub field_names: Vec<LitStr>,
    /// The reflected indices, `0..field_count`.
    pub field_indices: Vec<usize>,
    /// The reflected indices of the embedded fields.
    pub embedded_indices: Vec<usize>,
    pub field_count: usize,
}

impl<'a> ReflectStruct<'a> {
    pub fn new(mut meta: ReflectMeta<'a>, fields: Vec<StructField<'a>>) -> Self {
        let active_types = fields
            .iter()
            .filter(|field| field.is_active())
            .map(|field| field.ty().clone())
            .collect();
        meta.set_active_types(active_types);
        Self { meta, fields }
    }

    #[inline]
    pub fn meta(&self) -> &ReflectMeta<'a> {
        &self.meta
    }

    /// All fields, including ignored ones.
    #[inline]
    pub fn fields(&self) -> &[StructField<'a>] {
        &self.fields
    }

    /// The fields visible to reflection, in declaration order.
    #[inline]
    pub fn active_fields(&self) -> impl Iterator<Item = &StructField<'a>> {
        self.fields.iter().filter(|field| field.is_active())
    }

    pub fn accessors(&self) -> FieldAccessors {
        let mut accessors = FieldAccessors {
            fields_ref: Vec::new(),
            fields_mut: Vec::new(),
            field_names: Vec::new(),
            field_indices: Vec::new(),
            embedded_indices: Vec::new(),
            field_count: 0,
        };

        for (index, field) in self.active_fields().enumerate() {
            let ident = field.ident();
            accessors.fields_ref.push(quote!(&self.#ident));
            accessors.fields_mut.push(quote!(&mut self.#ident));
            accessors.field_names.push(field.name_lit());
            accessors.field_indices.push(index);
            if field.attrs.embed.is_some() {
                accessors.embedded_indices.push(index);
            }
            accessors.field_count += 1;
        }

        accessors
    }
}
