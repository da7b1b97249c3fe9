//! Indirection resolution.
//!
//! Indirections (`Option<T>`, `Box<T>`, `Arc<T>`) are followed to the first
//! value that is not an indirection. Hooks and structural comparisons always
//! see resolved values.
//!
//! | function           | absent link                     | shared link       |
//! |--------------------|---------------------------------|-------------------|
//! | [`resolve`]        | `None`                          | followed          |
//! | [`resolve_mut`]    | allocated with a zero value     | `InvalidTarget`   |
//! | [`probe`]          | a detached zero value           | followed          |
//! | [`probe_mut`]      | a detached zero value           | a detached value  |
//! | [`resolve_with`]   | detached, kept if `f` wrote     | `InvalidTarget`   |
//! | [`ensure_writable`]| `Ok`                            | `InvalidTarget`   |

use vt_reflect::Reflect;
use vt_reflect::ops::{ReflectMut, ReflectRef};

use crate::ConvertError;

/// Follows indirections to the first non-indirection value.
///
/// Returns `None` if any link of the chain is absent.
///
/// # Examples
///
/// ```
/// use vt_convert::resolve::resolve;
///
/// let value = Some(Box::new(5_u8));
/// assert_eq!(resolve(&value).unwrap().downcast_ref::<u8>(), Some(&5));
///
/// let absent: Option<Box<u8>> = None;
/// assert!(resolve(&absent).is_none());
/// ```
pub fn resolve(value: &dyn Reflect) -> Option<&dyn Reflect> {
    let mut current = value;
    loop {
        match current.reflect_ref() {
            ReflectRef::Indirection(indirection) => current = indirection.target()?,
            other => return Some(other.into_reflect()),
        }
    }
}

/// Follows indirections to the first non-indirection value, allocating a
/// zero-valued target for every absent link.
///
/// # Errors
///
/// Returns [`ConvertError::InvalidTarget`] if a link is shared.
///
/// # Examples
///
/// ```
/// use vt_convert::resolve::resolve_mut;
///
/// let mut value: Option<Option<String>> = None;
/// let target = resolve_mut(&mut value).unwrap();
/// *target.downcast_mut::<String>().unwrap() = "x".into();
///
/// assert_eq!(value, Some(Some("x".into())));
/// ```
pub fn resolve_mut(value: &mut dyn Reflect) -> Result<&mut dyn Reflect, ConvertError> {
    match value.reflect_mut() {
        ReflectMut::Indirection(indirection) => {
            let type_path = indirection.reflect_type_path();
            match indirection.insert_default() {
                Some(target) => resolve_mut(target),
                None => Err(ConvertError::InvalidTarget { type_path }),
            }
        }
        other => Ok(other.into_reflect()),
    }
}

/// Calls `f` with the resolved value without allocating.
///
/// An absent link is replaced by a detached zero-valued target, so `f`
/// always sees the shape and type the chain would resolve to.
pub fn probe<R>(value: &dyn Reflect, f: impl FnOnce(&dyn Reflect) -> R) -> R {
    match value.reflect_ref() {
        ReflectRef::Indirection(indirection) => match indirection.target() {
            Some(target) => probe(target, f),
            None => probe(&*indirection.new_target(), f),
        },
        other => f(other.into_reflect()),
    }
}

/// Calls `f` with the resolved value mutably without allocating.
///
/// Absent and shared links are replaced by a detached zero-valued target.
/// Writes made by `f` through a detached target are discarded.
pub fn probe_mut<R>(value: &mut dyn Reflect, f: impl FnOnce(&mut dyn Reflect) -> R) -> R {
    match value.reflect_mut() {
        ReflectMut::Indirection(indirection) => match indirection.target_mut() {
            Some(target) => probe_mut(target, f),
            None => probe_mut(&mut *indirection.new_target(), f),
        },
        other => f(other.into_reflect()),
    }
}

/// Calls `f` with the resolved value, keeping allocations only if `f`
/// reports that it wrote.
///
/// An absent link is filled with a detached zero-valued target first. The
/// detached chain is moved into `value` when `f` returns `Ok(true)` and
/// dropped otherwise, so a declined write leaves `value` as it was.
///
/// # Errors
///
/// Returns [`ConvertError::InvalidTarget`] if a link is shared, or the error
/// of `f`.
///
/// # Examples
///
/// ```
/// use vt_convert::resolve::resolve_with;
///
/// let mut value: Option<Box<u8>> = None;
/// assert!(!resolve_with(&mut value, |_| Ok(false)).unwrap());
/// assert!(value.is_none());
///
/// resolve_with(&mut value, |target| Ok(target.set(Box::new(3_u8)).is_ok())).unwrap();
/// assert_eq!(value, Some(Box::new(3)));
/// ```
pub fn resolve_with(
    value: &mut dyn Reflect,
    f: impl FnOnce(&mut dyn Reflect) -> Result<bool, ConvertError>,
) -> Result<bool, ConvertError> {
    let indirection = match value.reflect_mut() {
        ReflectMut::Indirection(indirection) => indirection,
        other => return f(other.into_reflect()),
    };

    let type_path = indirection.reflect_type_path();
    if indirection.is_shared() {
        return Err(ConvertError::InvalidTarget { type_path });
    }
    if let Some(target) = indirection.target_mut() {
        return resolve_with(target, f);
    }

    let mut detached = indirection.new_target();
    if !resolve_with(&mut *detached, f)? {
        return Ok(false);
    }
    match indirection.insert_default() {
        Some(slot) => slot
            .set(detached)
            .map(|()| true)
            .map_err(|_| ConvertError::InvalidTarget { type_path }),
        None => Err(ConvertError::InvalidTarget { type_path }),
    }
}

/// Checks that `value` can be written through.
///
/// Absent links are fine, they are allocated when written.
///
/// # Errors
///
/// Returns [`ConvertError::InvalidTarget`] if a link is shared.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use vt_convert::resolve::ensure_writable;
///
/// let value = Arc::new(1_u8);
/// assert!(ensure_writable(&value).is_ok());
///
/// let other = Arc::clone(&value);
/// assert!(ensure_writable(&value).unwrap_err().is_invalid_target());
/// # drop(other);
/// ```
pub fn ensure_writable(value: &dyn Reflect) -> Result<(), ConvertError> {
    let mut current = value;
    loop {
        let ReflectRef::Indirection(indirection) = current.reflect_ref() else {
            return Ok(());
        };
        if indirection.is_shared() {
            return Err(ConvertError::InvalidTarget {
                type_path: indirection.reflect_type_path(),
            });
        }
        match indirection.target() {
            Some(target) => current = target,
            None => return Ok(()),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;
    use alloc::sync::Arc;

    use vt_reflect::Reflect;
    use vt_reflect::info::ReflectKind;

    use super::{ensure_writable, probe, probe_mut, resolve, resolve_mut, resolve_with};
    use crate::ConvertError;

    #[test]
    fn resolve_follows_chains() {
        let value: Option<Box<Option<u8>>> = Some(Box::new(Some(3)));
        assert_eq!(resolve(&value).unwrap().downcast_ref::<u8>(), Some(&3));

        let value: Option<Box<Option<u8>>> = Some(Box::new(None));
        assert!(resolve(&value).is_none());

        let value = 4_i64;
        assert!(resolve(&value).unwrap().is::<i64>());
    }

    #[test]
    fn resolve_mut_allocates() {
        let mut value: Option<Box<Option<u8>>> = None;
        resolve_mut(&mut value)
            .unwrap()
            .set(Box::new(9_u8))
            .unwrap();
        assert_eq!(value, Some(Box::new(Some(9))));
    }

    #[test]
    fn resolve_mut_rejects_shared() {
        let mut value = Some(Arc::new(String::new()));
        let other = value.clone();

        let err = resolve_mut(&mut value).unwrap_err();
        assert!(matches!(err, ConvertError::InvalidTarget { .. }));
        assert!(ensure_writable(&value).is_err());

        drop(other);
        assert!(ensure_writable(&value).is_ok());
        assert!(resolve_mut(&mut value).is_ok());
    }

    #[test]
    fn detached_lookups_leave_value_untouched() {
        let value: Option<Option<String>> = None;
        let kind = probe(&value, |resolved| {
            assert!(resolved.is::<String>());
            resolved.reflect_kind()
        });
        assert_eq!(kind, ReflectKind::Opaque);

        let mut value: Option<Box<u8>> = None;
        let ty = probe_mut(&mut value, |resolved| {
            resolved.set(Box::new(1_u8)).unwrap();
            resolved.reflect_type()
        });
        assert!(ty.is::<u8>());
        assert!(value.is_none());

        let mut value = Arc::new(2_u8);
        let other = Arc::clone(&value);
        assert!(probe_mut(&mut value, |resolved| resolved.is::<u8>()));
        assert_eq!(*other, 2);
    }

    #[test]
    fn resolve_with_commits_only_written_chains() {
        let mut value: Option<Box<Option<String>>> = None;
        let wrote = resolve_with(&mut value, |target| {
            target.set(Box::new(String::from("draft"))).unwrap();
            Ok(false)
        })
        .unwrap();
        assert!(!wrote);
        assert!(value.is_none());

        let err = resolve_with(&mut value, |_| Err(ConvertError::DepthLimit { limit: 1 }));
        assert!(err.is_err());
        assert!(value.is_none());

        let wrote = resolve_with(&mut value, |target| {
            target.set(Box::new(String::from("kept"))).unwrap();
            Ok(true)
        })
        .unwrap();
        assert!(wrote);
        assert_eq!(value, Some(Box::new(Some(String::from("kept")))));

        let mut present = Some(1_u8);
        resolve_with(&mut present, |target| {
            target.set(Box::new(2_u8)).unwrap();
            Ok(false)
        })
        .unwrap();
        assert_eq!(present, Some(2));
    }

    #[test]
    fn resolve_with_rejects_shared() {
        let mut value = Arc::new(0_u8);
        let other = Arc::clone(&value);
        let err = resolve_with(&mut value, |_| Ok(true)).unwrap_err();
        assert!(err.is_invalid_target());
        drop(other);
    }
}
