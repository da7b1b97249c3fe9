use crate::Reflect;
use crate::info::{ReflectKind, ReflectKindError};
use crate::ops::{Indirection, List, Struct};

macro_rules! impl_cast_method {
    ($name:ident : $kind:ident => $ret:ty) => {
        #[doc = concat!("Attempts a cast to [`", stringify!($kind), "`] trait object.")]
        #[doc = ""]
        #[doc = concat!("Returns an error if `self` is not the [`ReflectKind::", stringify!($kind), "`] variant.")]
        #[inline]
        pub fn $name(self) -> Result<$ret, ReflectKindError> {
            match self {
                Self::$kind(value) => Ok(value),
                _ => Err(ReflectKindError {
                    expected: ReflectKind::$kind,
                    received: self.kind(),
                }),
            }
        }
    };
}

// -----------------------------------------------------------------------------
// ReflectRef

/// An immutable enumeration of ["kinds"](ReflectKind) of a reflected type.
///
/// Each variant contains a trait object with methods specific to a kind of type.
///
/// A [`ReflectRef`] is obtained via [`Reflect::reflect_ref`].
pub enum ReflectRef<'a> {
    Struct(&'a dyn Struct),
    List(&'a dyn List),
    Indirection(&'a dyn Indirection),
    Opaque(&'a dyn Reflect),
}

impl<'a> ReflectRef<'a> {
    /// Returns the "kind" of this reflected type without any information.
    pub fn kind(&self) -> ReflectKind {
        match self {
            Self::Struct(_) => ReflectKind::Struct,
            Self::List(_) => ReflectKind::List,
            Self::Indirection(_) => ReflectKind::Indirection,
            Self::Opaque(_) => ReflectKind::Opaque,
        }
    }

    /// Returns the value as a plain `&dyn Reflect`.
    pub fn into_reflect(self) -> &'a dyn Reflect {
        match self {
            Self::Struct(value) => value,
            Self::List(value) => value,
            Self::Indirection(value) => value,
            Self::Opaque(value) => value,
        }
    }

    impl_cast_method!(as_struct: Struct => &'a dyn Struct);
    impl_cast_method!(as_list: List => &'a dyn List);
    impl_cast_method!(as_indirection: Indirection => &'a dyn Indirection);
    impl_cast_method!(as_opaque: Opaque => &'a dyn Reflect);
}

// -----------------------------------------------------------------------------
// ReflectMut

/// A mutable enumeration of ["kinds"](ReflectKind) of a reflected type.
///
/// Each variant contains a trait object with methods specific to a kind of type.
///
/// A [`ReflectMut`] is obtained via [`Reflect::reflect_mut`].
pub enum ReflectMut<'a> {
    Struct(&'a mut dyn Struct),
    List(&'a mut dyn List),
    Indirection(&'a mut dyn Indirection),
    Opaque(&'a mut dyn Reflect),
}

impl<'a> ReflectMut<'a> {
    /// Returns the "kind" of this reflected type without any information.
    pub fn kind(&self) -> ReflectKind {
        match self {
            Self::Struct(_) => ReflectKind::Struct,
            Self::List(_) => ReflectKind::List,
            Self::Indirection(_) => ReflectKind::Indirection,
            Self::Opaque(_) => ReflectKind::Opaque,
        }
    }

    /// Returns the value as a plain `&mut dyn Reflect`.
    pub fn into_reflect(self) -> &'a mut dyn Reflect {
        match self {
            Self::Struct(value) => value,
            Self::List(value) => value,
            Self::Indirection(value) => value,
            Self::Opaque(value) => value,
        }
    }

    impl_cast_method!(as_struct: Struct => &'a mut dyn Struct);
    impl_cast_method!(as_list: List => &'a mut dyn List);
    impl_cast_method!(as_indirection: Indirection => &'a mut dyn Indirection);
    impl_cast_method!(as_opaque: Opaque => &'a mut dyn Reflect);
}
