use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

use crate::hook::{ConvertFrom, ConvertTo};
use crate::info::{ReflectKind, Type};
use crate::ops::{ReflectCloneError, ReflectMut, ReflectRef};

// -----------------------------------------------------------------------------
// Reflect

/// The foundational trait for runtime reflection in [`vt_reflect`].
///
/// This trait enables dynamic access and modification of data without compile-time
/// type information. The conversion engine only ever sees values through it.
///
/// # Recommendations
///
/// It's strongly recommended to use [the derive macro for `Reflect`] rather than
/// manually implementing this trait. The derive macro implements this trait along
/// with [`Struct`] for structs with named fields.
///
/// # Core Functionality
///
/// ## Type Identification
///
/// `Box<dyn Reflect>` is itself `Any`, so calling [`Any::type_id`] on the box
/// yields the id of the box. [`Reflect::ty_id`] always answers for the value
/// behind the trait object:
///
/// ```rust
/// # use vt_reflect::Reflect;
/// # use core::any::{Any, TypeId};
/// let boxed: Box<dyn Reflect> = Box::new(7_u64).into_reflect();
///
/// assert_ne!(boxed.type_id(), TypeId::of::<u64>());
/// assert_eq!(boxed.ty_id(), TypeId::of::<u64>());
/// ```
///
/// ## Type Casting
///
/// Use [`reflect_ref`] and [`reflect_mut`] to cast to the reflection subtraits
/// ([`Struct`], [`List`], [`Indirection`]):
///
/// ```rust
/// # use vt_reflect::{Reflect, ops::List};
/// let vec = vec![1, 2, 3];
/// let list: &dyn List = vec.reflect_ref().as_list().unwrap();
/// assert_eq!(list.len(), 3);
/// ```
///
/// Use `downcast_ref`, `downcast_mut`, `downcast` and `take` for concrete type conversion:
///
/// ```rust
/// # use vt_reflect::Reflect;
/// let x: Box<dyn Reflect> = 10.into_boxed_reflect();
/// let y = x.downcast_ref::<i32>().unwrap();
/// assert_eq!(*y, 10);
/// ```
///
/// ## Conversion Hooks
///
/// [`reflect_convert_to`] and [`reflect_convert_from`] expose the conversion
/// hooks of a type. Both return `None` by default, the derive macro overrides
/// them when the type is flagged with `#[reflect(convert_to)]` or
/// `#[reflect(convert_from)]`.
///
/// [`vt_reflect`]: crate
/// [the derive macro for `Reflect`]: crate::derive::Reflect
/// [`Struct`]: crate::ops::Struct
/// [`List`]: crate::ops::List
/// [`Indirection`]: crate::ops::Indirection
/// [`reflect_ref`]: Reflect::reflect_ref
/// [`reflect_mut`]: Reflect::reflect_mut
/// [`reflect_convert_to`]: Reflect::reflect_convert_to
/// [`reflect_convert_from`]: Reflect::reflect_convert_from
pub trait Reflect: Send + Sync + Any {
    /// Upcasts to `&dyn Reflect`.
    #[inline(always)]
    fn as_reflect(&self) -> &dyn Reflect
    where
        Self: Sized,
    {
        self
    }

    /// Upcasts to `&mut dyn Reflect`.
    #[inline(always)]
    fn as_reflect_mut(&mut self) -> &mut dyn Reflect
    where
        Self: Sized,
    {
        self
    }

    /// Upcasts a box of the concrete type.
    #[inline(always)]
    fn into_reflect(self: Box<Self>) -> Box<dyn Reflect>
    where
        Self: Sized,
    {
        self
    }

    /// Boxes the value as a `Box<dyn Reflect>`.
    #[inline(always)]
    fn into_boxed_reflect(self) -> Box<dyn Reflect>
    where
        Self: Sized,
    {
        Box::new(self)
    }

    /// The [`TypeId`] of the value behind the trait object.
    #[inline]
    fn ty_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    /// Returns the type path of the underlying type, e.g. `alloc::string::String`.
    #[inline]
    fn reflect_type_path(&self) -> &'static str {
        core::any::type_name::<Self>()
    }

    /// Returns the [`Type`] of the underlying type.
    #[inline]
    fn reflect_type(&self) -> Type {
        Type::of::<Self>()
    }

    /// Performs a type-checked assignment of a reflected value to this value.
    ///
    /// Returns the value back if its type is not `Self`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vt_reflect::Reflect;
    /// let data = vec![1_i32, 2_i32, 3_i32].into_boxed_reflect();
    /// let mut vec = Vec::<i32>::new();
    ///
    /// vec.set(data).unwrap();
    /// assert_eq!(vec, [1, 2, 3]);
    ///
    /// assert!(vec.set(Box::new(1_u8)).is_err());
    /// ```
    fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;

    /// Returns the [kind](ReflectKind) of the type.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vt_reflect::{Reflect, info::ReflectKind};
    /// assert_eq!(vec![1, 2, 3].reflect_kind(), ReflectKind::List);
    /// assert_eq!(Some(1).reflect_kind(), ReflectKind::Indirection);
    /// assert_eq!(1.reflect_kind(), ReflectKind::Opaque);
    /// ```
    fn reflect_kind(&self) -> ReflectKind;

    /// Returns an immutable enumeration of ["kinds"](ReflectRef) of type.
    fn reflect_ref(&self) -> ReflectRef<'_>;

    /// Returns a mutable enumeration of ["kinds"](ReflectMut) of type.
    fn reflect_mut(&mut self) -> ReflectMut<'_>;

    /// Attempts to clone `Self` using reflection.
    ///
    /// The returned value must have the same type as `Self`.
    ///
    /// # Rules
    ///
    /// 1. If the `reflect(clone)` flag is enabled, this function will call [`Clone::clone`] directly.
    /// 2. Otherwise, every field is cloned through `reflect_clone`; a struct with
    ///    ignored fields cannot be rebuilt this way and returns `Err`.
    ///
    /// ```
    /// # use vt_reflect::Reflect;
    /// let value = vec![String::from("a")];
    /// let cloned = value.reflect_clone().unwrap();
    /// assert!(cloned.is::<Vec<String>>());
    /// ```
    fn reflect_clone(&self) -> Result<Box<dyn Reflect>, ReflectCloneError>;

    /// Returns the [`ConvertTo`] hook of this value, if the type offers one.
    #[inline]
    fn reflect_convert_to(&self) -> Option<&dyn ConvertTo> {
        None
    }

    /// Returns the [`ConvertFrom`] hook of this value, if the type offers one.
    #[inline]
    fn reflect_convert_from(&mut self) -> Option<&mut dyn ConvertFrom> {
        None
    }

    /// Debug formatter for the value.
    ///
    /// For opaque type, this function will write `"Opaque(type_path)"` by default.
    ///
    /// For other type, see:
    /// - [`crate::impls::struct_debug`]
    /// - [`crate::impls::list_debug`]
    /// - [`crate::impls::indirection_debug`]
    fn reflect_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use crate::impls;
        match self.reflect_ref() {
            ReflectRef::Struct(data) => impls::struct_debug(data, f),
            ReflectRef::List(data) => impls::list_debug(data, f),
            ReflectRef::Indirection(data) => impls::indirection_debug(data, f),
            ReflectRef::Opaque(_) => write!(f, "Opaque({})", self.reflect_type_path()),
        }
    }
}

impl dyn Reflect {
    /// Returns `true` if the underlying value is of type `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vt_reflect::Reflect;
    /// let x: Box<dyn Reflect> = 10.into_boxed_reflect();
    ///
    /// assert!(x.is::<i32>());
    /// ```
    #[inline(always)]
    pub fn is<T: Any>(&self) -> bool {
        self.ty_id() == TypeId::of::<T>()
    }

    /// Downcasts the value to type `T` by reference.
    ///
    /// If the underlying value is not of type `T`, returns `None`.
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self)
    }

    /// Downcasts the value to type `T` by mutable reference.
    ///
    /// If the underlying value is not of type `T`, returns `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vt_reflect::Reflect;
    /// let mut x: Box<dyn Reflect> = 10.into_boxed_reflect();
    ///
    /// let y = x.downcast_mut::<i32>().unwrap();
    /// *y += 2;
    ///
    /// assert_eq!(*y, 12);
    /// ```
    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        <dyn Any>::downcast_mut(self)
    }

    /// Downcasts the value to type `T`, consuming the trait object.
    ///
    /// If the underlying value is not of type `T`, returns `Err(self)`.
    #[inline]
    pub fn downcast<T: Any>(self: Box<dyn Reflect>) -> Result<Box<T>, Box<dyn Reflect>> {
        if self.is::<T>() {
            #[expect(unsafe_code, reason = "type is already checked")]
            Ok(unsafe { <Box<dyn Any>>::downcast::<T>(self).unwrap_unchecked() })
        } else {
            Err(self)
        }
    }

    /// Downcasts the value to type `T`, unboxing and consuming the trait object.
    ///
    /// If the underlying value is not of type `T`, returns `Err(self)`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vt_reflect::Reflect;
    /// let x: Box<dyn Reflect> = 10.into_boxed_reflect();
    ///
    /// let x = x.take::<i32>().unwrap();
    /// assert_eq!(x, 10);
    /// ```
    #[inline]
    pub fn take<T: Any>(self: Box<dyn Reflect>) -> Result<T, Box<dyn Reflect>> {
        self.downcast::<T>().map(|value| *value)
    }
}

impl fmt::Debug for dyn Reflect {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.reflect_debug(f)
    }
}

// -----------------------------------------------------------------------------
// Auxiliary macro

/// Implement some common methods like `reflect_kind` and `reflect_ref`.
macro_rules! impl_reflect_cast_fn {
    ($kind:ident) => {
        fn set(
            &mut self,
            value: ::alloc::boxed::Box<dyn $crate::Reflect>,
        ) -> Result<(), ::alloc::boxed::Box<dyn $crate::Reflect>> {
            *self = value.take::<Self>()?;
            Ok(())
        }

        #[inline]
        fn reflect_kind(&self) -> $crate::info::ReflectKind {
            $crate::info::ReflectKind::$kind
        }

        #[inline]
        fn reflect_ref(&self) -> $crate::ops::ReflectRef<'_> {
            $crate::ops::ReflectRef::$kind(self)
        }

        #[inline]
        fn reflect_mut(&mut self) -> $crate::ops::ReflectMut<'_> {
            $crate::ops::ReflectMut::$kind(self)
        }
    };
}

pub(crate) use impl_reflect_cast_fn;

// -----------------------------------------------------------------------------
// Tests
