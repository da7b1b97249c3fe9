use alloc::boxed::Box;
use alloc::sync::Arc;

use crate::Reflect;
use crate::impls::reflect_clone_as;
use crate::ops::{Indirection, ReflectCloneError};
use crate::reflection::impl_reflect_cast_fn;

// -----------------------------------------------------------------------------
// Option

impl<T: Reflect + Default> Reflect for Option<T> {
    impl_reflect_cast_fn!(Indirection);

    fn reflect_clone(&self) -> Result<Box<dyn Reflect>, ReflectCloneError> {
        match self {
            Some(value) => Ok(Box::new(Some(reflect_clone_as(value)?))),
            None => Ok(Box::new(None::<T>)),
        }
    }
}

impl<T: Reflect + Default> Indirection for Option<T> {
    #[inline]
    fn target(&self) -> Option<&dyn Reflect> {
        self.as_ref().map(Reflect::as_reflect)
    }

    #[inline]
    fn target_mut(&mut self) -> Option<&mut dyn Reflect> {
        self.as_mut().map(Reflect::as_reflect_mut)
    }

    #[inline]
    fn insert_default(&mut self) -> Option<&mut dyn Reflect> {
        Some(self.get_or_insert_with(T::default))
    }

    #[inline]
    fn new_target(&self) -> Box<dyn Reflect> {
        Box::new(T::default())
    }
}

// -----------------------------------------------------------------------------
// Box

impl<T: Reflect + Default> Reflect for Box<T> {
    impl_reflect_cast_fn!(Indirection);

    fn reflect_clone(&self) -> Result<Box<dyn Reflect>, ReflectCloneError> {
        Ok(Box::new(Box::new(reflect_clone_as::<T>(self)?)))
    }
}

impl<T: Reflect + Default> Indirection for Box<T> {
    #[inline]
    fn target(&self) -> Option<&dyn Reflect> {
        Some(&**self)
    }

    #[inline]
    fn target_mut(&mut self) -> Option<&mut dyn Reflect> {
        Some(&mut **self)
    }

    #[inline]
    fn insert_default(&mut self) -> Option<&mut dyn Reflect> {
        Some(&mut **self)
    }

    #[inline]
    fn new_target(&self) -> Box<dyn Reflect> {
        Box::new(T::default())
    }
}

// -----------------------------------------------------------------------------
// Arc

/// An `Arc` can only be written through while it is the unique handle,
/// cloning one shares the target.
impl<T: Reflect + Default> Reflect for Arc<T> {
    impl_reflect_cast_fn!(Indirection);

    #[inline]
    fn reflect_clone(&self) -> Result<Box<dyn Reflect>, ReflectCloneError> {
        Ok(Box::new(Arc::clone(self)))
    }
}

impl<T: Reflect + Default> Indirection for Arc<T> {
    #[inline]
    fn target(&self) -> Option<&dyn Reflect> {
        Some(&**self)
    }

    #[inline]
    fn target_mut(&mut self) -> Option<&mut dyn Reflect> {
        Arc::get_mut(self).map(Reflect::as_reflect_mut)
    }

    #[inline]
    fn is_shared(&self) -> bool {
        Arc::strong_count(self) > 1 || Arc::weak_count(self) > 0
    }

    #[inline]
    fn insert_default(&mut self) -> Option<&mut dyn Reflect> {
        Arc::get_mut(self).map(Reflect::as_reflect_mut)
    }

    #[inline]
    fn new_target(&self) -> Box<dyn Reflect> {
        Box::new(T::default())
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;
    use alloc::sync::Arc;

    use crate::Reflect;
    use crate::info::ReflectKind;
    use crate::ops::Indirection;

    #[test]
    fn option_allocates_on_demand() {
        let mut value: Option<String> = None;
        assert_eq!(value.reflect_kind(), ReflectKind::Indirection);
        assert!(value.target().is_none());
        assert!(value.target_mut().is_none());
        assert!(value.new_target().is::<String>());

        let target = value.insert_default().unwrap();
        target.set(Box::new(String::from("x"))).unwrap();
        assert_eq!(value.as_deref(), Some("x"));
        assert!(!value.is_shared());
    }

    #[test]
    fn box_is_never_absent() {
        let mut value = Box::new(5_u16);
        assert!(Indirection::target(&value).is_some());
        Indirection::target_mut(&mut value)
            .unwrap()
            .set(Box::new(6_u16))
            .unwrap();
        assert_eq!(*value, 6);

        let cloned = Reflect::reflect_clone(&value).unwrap();
        assert!(cloned.is::<Box<u16>>());
    }

    #[test]
    fn arc_is_read_only_while_shared() {
        let mut value = Arc::new(1_i64);
        assert!(!Indirection::is_shared(&value));
        assert!(Indirection::target_mut(&mut value).is_some());

        let other = Arc::clone(&value);
        assert!(Indirection::is_shared(&value));
        assert!(Indirection::target_mut(&mut value).is_none());
        assert!(Indirection::insert_default(&mut value).is_none());
        assert!(Indirection::target(&value).is_some());
        drop(other);

        let weak = Arc::downgrade(&value);
        assert!(Indirection::is_shared(&value));
        drop(weak);
        assert!(!Indirection::is_shared(&value));
    }
}
