use syn::{Data, DeriveInput, Fields, spanned::Spanned};

use super::{FieldAttributes, ReflectMeta, ReflectStruct, StructField, TypeAttributes};

/// The parsed input of `#[derive(Reflect)]`.
pub(crate) enum ReflectDerive<'a> {
    /// A struct with named fields, reflected as `Struct`.
    Struct(ReflectStruct<'a>),
    /// Everything else, reflected as `Opaque`.
    Opaque(ReflectMeta<'a>),
}

impl<'a> ReflectDerive<'a> {
    pub fn from_input(input: &'a DeriveInput) -> syn::Result<Self> {
        let attrs = TypeAttributes::parse_attrs(&input.attrs)?;

        let named = match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(fields) => Some(fields),
                Fields::Unnamed(_) | Fields::Unit => None,
            },
            Data::Enum(_) => None,
            Data::Union(_) => {
                return Err(syn::Error::new(
                    input.span(),
                    "reflection not support for unions",
                ));
            }
        };

        let is_opaque = attrs.opaque.is_some() || named.is_none();

        if is_opaque {
            if attrs.clone.is_none() {
                return Err(syn::Error::new(
                    attrs.opaque.unwrap_or_else(|| input.ident.span()),
                    "opaque types (unit structs, tuple structs, enums or `#[reflect(opaque)]`) \
                     require `#[reflect(clone)]` and a `Clone` impl",
                ));
            }
            if let Some(span) = attrs.convert_to.or(attrs.convert_from) {
                return Err(syn::Error::new(
                    span,
                    "conversion hooks are only supported on structs with named fields",
                ));
            }
            return Ok(Self::Opaque(ReflectMeta::new(
                attrs,
                &input.ident,
                &input.generics,
            )));
        }

        let mut fields = Vec::new();
        for data in named.into_iter().flat_map(|fields| fields.named.iter()) {
            fields.push(StructField {
                data,
                attrs: FieldAttributes::parse_attrs(&data.attrs)?,
            });
        }

        let meta = ReflectMeta::new(attrs, &input.ident, &input.generics);
        Ok(Self::Struct(ReflectStruct::new(meta, fields)))
    }
}
