use alloc::boxed::Box;

use crate::Reflect;

/// A trait for pointer-like wrappers that may be absent.
///
/// An indirection either refers to a single target value or is absent.
///
/// | type        | absent       | shared (read-only)                        |
/// |-------------|--------------|-------------------------------------------|
/// | `Option<T>` | when `None`  | never                                     |
/// | `Box<T>`    | never        | never                                     |
/// | `Arc<T>`    | never        | when other strong or weak handles exist   |
///
/// A shared indirection can be read but never written through, so
/// [`target_mut`](Indirection::target_mut) and
/// [`insert_default`](Indirection::insert_default) return `None` for it.
///
/// # Examples
///
/// ```
/// use vt_reflect::ops::Indirection;
///
/// let mut value: Option<u32> = None;
/// assert!(value.target().is_none());
///
/// value.insert_default().unwrap().set(Box::new(7_u32)).unwrap();
/// assert_eq!(value, Some(7));
/// ```
pub trait Indirection: Reflect {
    /// Returns the target, or `None` when absent.
    fn target(&self) -> Option<&dyn Reflect>;

    /// Returns the target mutably, or `None` when absent or shared.
    fn target_mut(&mut self) -> Option<&mut dyn Reflect>;

    /// Returns `true` if the target cannot be written through this handle.
    #[inline]
    fn is_shared(&self) -> bool {
        false
    }

    /// Returns the target mutably, allocating a zero-valued one if absent.
    ///
    /// Returns `None` when the indirection is shared.
    fn insert_default(&mut self) -> Option<&mut dyn Reflect>;

    /// Creates a detached zero-valued target (its `Default`).
    fn new_target(&self) -> Box<dyn Reflect>;
}
