use core::any::{Any, TypeId};
use core::fmt;
use core::hash::{Hash, Hasher};

/// A concrete type: its [`TypeId`] and its type path.
///
/// Two `Type`s are equal when their ids are equal,
/// the path is only kept for diagnostics.
///
/// # Examples
///
/// ```
/// use vt_reflect::info::Type;
///
/// let ty = Type::of::<Vec<u8>>();
/// assert!(ty.is::<Vec<u8>>());
/// assert_eq!(ty, Type::of::<Vec<u8>>());
/// assert_ne!(ty, Type::of::<Vec<i8>>());
/// ```
#[derive(Clone, Copy)]
pub struct Type {
    id: TypeId,
    path: &'static str,
}

impl Type {
    /// Returns the `Type` of `T`.
    #[inline]
    pub fn of<T: Any + ?Sized>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            path: core::any::type_name::<T>(),
        }
    }

    /// Returns the [`TypeId`] of the type.
    #[inline(always)]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Returns the type path, e.g. `alloc::vec::Vec<u8>`.
    #[inline(always)]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    /// Returns `true` if this is the type `T`.
    #[inline]
    pub fn is<T: Any + ?Sized>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for Type {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Type {}

impl Hash for Type {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Type").field(&self.path).finish()
    }
}

impl fmt::Display for Type {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.path)
    }
}
