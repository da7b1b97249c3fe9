//! Hook dispatch.
//!
//! Precedence is fixed: the source's [`ConvertTo`] runs first, then the
//! destination's [`ConvertFrom`], then the generic conversion. Hooks are
//! only consulted on struct values, after both sides are resolved.
//!
//! [`ConvertTo`]: vt_reflect::hook::ConvertTo
//! [`ConvertFrom`]: vt_reflect::hook::ConvertFrom

use vt_reflect::Reflect;
use vt_reflect::info::ReflectKind;

use crate::ConvertError;
use crate::resolve::{probe_mut, resolve_with};

/// Runs the `ConvertTo` hook of a resolved `source`, if it has one.
///
/// Absent destination links are handed to the hook detached and only
/// stored once it handles the value, so a declining hook leaves the
/// destination untouched. Returns `Ok(true)` if the hook handled the value.
///
/// # Errors
///
/// Returns [`ConvertError::Hook`] with the hook's error unchanged, or
/// [`ConvertError::InvalidTarget`] if the destination cannot be written.
pub fn dispatch_convert_to(
    source: &dyn Reflect,
    destination: &mut dyn Reflect,
) -> Result<bool, ConvertError> {
    if source.reflect_kind() != ReflectKind::Struct {
        return Ok(false);
    }
    let Some(hook) = source.reflect_convert_to() else {
        return Ok(false);
    };

    resolve_with(destination, |target| {
        crate::trace!(
            "ConvertTo: `{}` -> `{}`",
            source.reflect_type_path(),
            target.reflect_type_path()
        );
        hook.convert_to(target).map_err(ConvertError::Hook)
    })
}

/// Runs the `ConvertFrom` hook of the resolved `destination`, if it has one.
///
/// Whether the hook exists is checked without allocating, and absent links
/// are only stored once the hook handles the value. Returns `Ok(true)` if
/// the hook handled the value.
///
/// # Errors
///
/// Returns [`ConvertError::Hook`] with the hook's error unchanged, or
/// [`ConvertError::InvalidTarget`] if the destination cannot be written.
pub fn dispatch_convert_from(
    source: &dyn Reflect,
    destination: &mut dyn Reflect,
) -> Result<bool, ConvertError> {
    let has_hook = probe_mut(destination, |resolved| {
        resolved.reflect_kind() == ReflectKind::Struct && resolved.reflect_convert_from().is_some()
    });
    if !has_hook {
        return Ok(false);
    }

    resolve_with(destination, |target| {
        crate::trace!(
            "ConvertFrom: `{}` -> `{}`",
            source.reflect_type_path(),
            target.reflect_type_path()
        );
        match target.reflect_convert_from() {
            Some(hook) => hook.convert_from(source).map_err(ConvertError::Hook),
            None => Ok(false),
        }
    })
}
