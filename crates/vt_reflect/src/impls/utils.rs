use alloc::borrow::Cow;
use core::fmt;

use crate::Reflect;
use crate::ops::{Indirection, List, ReflectCloneError, Struct};

/// Clones `value` through [`Reflect::reflect_clone`] and takes the result
/// back as `T`.
///
/// # Examples
///
/// ```
/// use vt_reflect::impls::reflect_clone_as;
///
/// let value = vec![Some(1_u8), None];
/// let cloned: Vec<Option<u8>> = reflect_clone_as(&value).unwrap();
/// assert_eq!(cloned, value);
/// ```
pub fn reflect_clone_as<T: Reflect>(value: &T) -> Result<T, ReflectCloneError> {
    value
        .reflect_clone()?
        .take::<T>()
        .map_err(|cloned| ReflectCloneError::NotSupport {
            type_path: Cow::Borrowed(cloned.reflect_type_path()),
        })
}

/// A function used to implement [`Reflect::reflect_debug`] for structs.
///
/// Writes `TypePath { name: value, .. }`.
pub fn struct_debug(dyn_struct: &dyn Struct, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut debug = f.debug_struct(dyn_struct.reflect_type_path());

    for index in 0..dyn_struct.field_len() {
        if let (Some(name), Some(field)) = (dyn_struct.name_at(index), dyn_struct.field_at(index)) {
            debug.field(name, &field as &dyn fmt::Debug);
        }
    }
    debug.finish()
}

/// A function used to implement [`Reflect::reflect_debug`] for lists.
pub fn list_debug(dyn_list: &dyn List, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_list().entries(dyn_list.iter()).finish()
}

/// A function used to implement [`Reflect::reflect_debug`] for indirections.
///
/// Writes the target as-is, or `None` when absent.
pub fn indirection_debug(
    dyn_indirection: &dyn Indirection,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    match dyn_indirection.target() {
        Some(target) => target.reflect_debug(f),
        None => f.write_str("None"),
    }
}

// -----------------------------------------------------------------------------
// Tests
