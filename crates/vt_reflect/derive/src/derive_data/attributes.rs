//! Parse the `#[reflect(...)]` attributes.

use proc_macro2::Span;
use syn::{Attribute, meta::ParseNestedMeta, spanned::Spanned};

use crate::REFLECT_ATTRIBUTE_NAME;

/// Set `slot` to the span of `meta`, rejecting duplicated flags.
fn set_flag(slot: &mut Option<Span>, meta: &ParseNestedMeta) -> syn::Result<()> {
    if slot.is_some() {
        return Err(meta.error("duplicated reflect attribute"));
    }
    *slot = Some(meta.path.span());
    Ok(())
}

// -----------------------------------------------------------------------------
// Type Attributes

/// Type-level flags, e.g. `#[reflect(clone, convert_to)]`.
///
/// Each flag keeps the span it was written at, so the generated code
/// reports errors at the attribute.
#[derive(Default, Debug)]
pub(crate) struct TypeAttributes {
    /// `#[reflect(clone)]`: `reflect_clone` uses `Clone::clone`.
    pub clone: Option<Span>,
    /// `#[reflect(opaque)]`: do not expose the fields.
    pub opaque: Option<Span>,
    /// `#[reflect(convert_to)]`: the type implements `ConvertTo`.
    pub convert_to: Option<Span>,
    /// `#[reflect(convert_from)]`: the type implements `ConvertFrom`.
    pub convert_from: Option<Span>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("clone") {
                    set_flag(&mut this.clone, &meta)
                } else if meta.path.is_ident("opaque") {
                    set_flag(&mut this.opaque, &meta)
                } else if meta.path.is_ident("convert_to") {
                    set_flag(&mut this.convert_to, &meta)
                } else if meta.path.is_ident("convert_from") {
                    set_flag(&mut this.convert_from, &meta)
                } else {
                    Err(meta.error(
                        "unsupported type attribute, expected one of: \
                         `clone`, `opaque`, `convert_to`, `convert_from`",
                    ))
                }
            })?;
        }

        Ok(this)
    }
}

// -----------------------------------------------------------------------------
// Field Attributes

/// Field-level flags, e.g. `#[reflect(embed)]`.
#[derive(Default, Debug)]
pub(crate) struct FieldAttributes {
    /// `#[reflect(embed)]`: the fields of this struct field are promoted.
    pub embed: Option<Span>,
    /// `#[reflect(ignore)]`: the field is invisible to reflection.
    pub ignore: Option<Span>,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("embed") {
                    set_flag(&mut this.embed, &meta)
                } else if meta.path.is_ident("ignore") {
                    set_flag(&mut this.ignore, &meta)
                } else {
                    Err(meta.error("unsupported field attribute, expected `embed` or `ignore`"))
                }
            })?;
        }

        if let (Some(_), Some(span)) = (this.embed, this.ignore) {
            return Err(syn::Error::new(
                span,
                "`embed` and `ignore` cannot be used on the same field",
            ));
        }

        Ok(this)
    }
}
