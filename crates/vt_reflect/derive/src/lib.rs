//! See the [`Reflect`] derive macro.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static REFLECT_ATTRIBUTE_NAME: &str = "reflect";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// # Reflection Derivation
///
/// `#[derive(Reflect)]` implements `Reflect` for the type, and `Struct`
/// for structs with named fields.
///
/// Structs with named fields are reflected as `Struct`. Everything else
/// (unit structs, tuple structs and enums) is reflected as `Opaque` and
/// converted as a whole.
///
/// ```rust, ignore
/// #[derive(Reflect, Default)]
/// struct User {
///     id: u64,
///     name: String,
///     email: Option<String>,
/// }
/// ```
///
/// ## Type Attributes
///
/// ### `clone`
///
/// `reflect_clone` calls `Clone::clone` instead of cloning field by field.
///
/// ```rust, ignore
/// #[derive(Reflect, Clone)]
/// #[reflect(clone)]
/// struct Foo { /* ... */ }
/// ```
///
/// ### `opaque`
///
/// Forces a struct to be treated as `Opaque`: its fields are not visible and
/// it is only ever copied into a destination of the very same type.
///
/// Opaque types cannot be cloned field by field, so they must implement
/// `Clone` and carry the `clone` flag. This also applies to the implicitly
/// opaque shapes:
///
/// ```rust, ignore
/// #[derive(Reflect, Clone)]
/// #[reflect(clone)]
/// enum Level { Low, High }
///
/// #[derive(Reflect, Clone)]
/// #[reflect(opaque, clone)]
/// struct Secret { /* ... */ }
/// ```
///
/// ### `convert_to` and `convert_from`
///
/// Declare that the type implements the conversion hook `ConvertTo` or
/// `ConvertFrom`. The conversion engine calls it before the generic
/// field-by-field conversion.
///
/// ```rust, ignore
/// #[derive(Reflect, Default)]
/// #[reflect(convert_to)]
/// struct Celsius { degrees: f64 }
///
/// impl ConvertTo for Celsius { /* ... */ }
/// ```
///
/// Hooks are only supported on structs with named fields.
///
/// ## Field Attributes
///
/// ### `embed`
///
/// The fields of the embedded struct are promoted: the conversion engine
/// matches them by name as if they were declared on the outer struct.
///
/// ```rust, ignore
/// #[derive(Reflect, Default)]
/// struct Audited {
///     #[reflect(embed)]
///     base: Base,
///     updated_by: String,
/// }
/// ```
///
/// ### `ignore`
///
/// The field is invisible to reflection. A struct with ignored fields cannot
/// be cloned field by field, use the `clone` flag instead.
///
/// ## Generics
///
/// Generic types are supported. Every reflected field type gets a `Reflect`
/// bound, and the type itself `Any + Send + Sync`.
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);
    impls::match_reflect_impls(ast)
}
