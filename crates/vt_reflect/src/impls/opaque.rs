use alloc::borrow::Cow;
use alloc::string::String;

/// Implement the methods of [`Reflect`](crate::Reflect) for an opaque,
/// `Clone + Debug` type.
///
/// Used inside an `impl Reflect for ...` block.
#[doc(hidden)]
#[macro_export]
macro_rules! __impl_opaque_methods {
    () => {
        fn set(
            &mut self,
            value: $crate::__macro_exports::macro_utils::Box<dyn $crate::Reflect>,
        ) -> ::core::result::Result<(), $crate::__macro_exports::macro_utils::Box<dyn $crate::Reflect>>
        {
            *self = value.take::<Self>()?;
            ::core::result::Result::Ok(())
        }

        #[inline]
        fn reflect_kind(&self) -> $crate::info::ReflectKind {
            $crate::info::ReflectKind::Opaque
        }

        #[inline]
        fn reflect_ref(&self) -> $crate::ops::ReflectRef<'_> {
            $crate::ops::ReflectRef::Opaque(self)
        }

        #[inline]
        fn reflect_mut(&mut self) -> $crate::ops::ReflectMut<'_> {
            $crate::ops::ReflectMut::Opaque(self)
        }

        #[inline]
        fn reflect_clone(
            &self,
        ) -> ::core::result::Result<
            $crate::__macro_exports::macro_utils::Box<dyn $crate::Reflect>,
            $crate::ops::ReflectCloneError,
        > {
            ::core::result::Result::Ok($crate::__macro_exports::macro_utils::Box::new(
                ::core::clone::Clone::clone(self),
            ))
        }

        #[inline]
        fn reflect_debug(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
            ::core::fmt::Debug::fmt(self, f)
        }
    };
}

/// Implement [`Reflect`](crate::Reflect) for foreign types as opaque values.
///
/// An opaque value is converted as a whole: it is only ever copied into a
/// destination of the very same type. The type must be
/// `Clone + Debug + Send + Sync + 'static`.
///
/// # Examples
///
/// ```
/// use vt_reflect::{Reflect, impl_reflect_opaque, info::ReflectKind};
///
/// #[derive(Clone, Debug, PartialEq)]
/// pub struct Rgb(u8, u8, u8);
///
/// impl_reflect_opaque!(Rgb);
///
/// let color = Rgb(1, 2, 3);
/// assert_eq!(color.reflect_kind(), ReflectKind::Opaque);
/// assert_eq!(color.reflect_clone().unwrap().take::<Rgb>().unwrap(), color);
/// ```
#[macro_export]
macro_rules! impl_reflect_opaque {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Reflect for $ty {
                $crate::__impl_opaque_methods!();
            }
        )+
    };
}

crate::impl_reflect_opaque!(
    (),
    bool,
    char,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    f32,
    f64,
    &'static str,
    String,
    Cow<'static, str>,
    core::time::Duration,
);

#[cfg(feature = "std")]
crate::impl_reflect_opaque!(std::path::PathBuf, std::ffi::OsString);

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;

    use crate::Reflect;
    use crate::info::ReflectKind;
    use crate::ops::ReflectRef;

    #[test]
    fn scalars_are_opaque() {
        let values: [Box<dyn Reflect>; 4] = [
            Box::new(1_u8),
            Box::new(String::from("s")),
            Box::new("static"),
            Box::new(core::time::Duration::from_secs(1)),
        ];
        for value in &values {
            assert_eq!(value.reflect_kind(), ReflectKind::Opaque);
            assert!(matches!(value.reflect_ref(), ReflectRef::Opaque(_)));
            assert_eq!(value.reflect_clone().unwrap().ty_id(), value.ty_id());
        }
    }

    #[test]
    fn set_is_type_checked() {
        let mut text = String::from("old");
        text.set(Box::new(String::from("new"))).unwrap();
        assert_eq!(text, "new");
        assert!(text.set(Box::new("str")).is_err());
    }
}
