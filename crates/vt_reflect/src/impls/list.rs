use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::Reflect;
use crate::impls::reflect_clone_as;
use crate::info::Type;
use crate::ops::{List, ListItemIter, ReflectCloneError};
use crate::reflection::impl_reflect_cast_fn;

// -----------------------------------------------------------------------------
// Vec

impl<T: Reflect + Default> Reflect for Vec<T> {
    impl_reflect_cast_fn!(List);

    fn reflect_clone(&self) -> Result<Box<dyn Reflect>, ReflectCloneError> {
        let mut vec: Vec<T> = Vec::with_capacity(self.len());
        for item in self {
            vec.push(reflect_clone_as(item)?);
        }
        Ok(Box::new(vec))
    }
}

impl<T: Reflect + Default> List for Vec<T> {
    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        self.as_slice().get(index).map(Reflect::as_reflect)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        self.as_mut_slice().get_mut(index).map(Reflect::as_reflect_mut)
    }

    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    #[inline]
    fn iter(&self) -> ListItemIter<'_> {
        ListItemIter::new(self)
    }

    #[inline]
    fn clear(&mut self) {
        Vec::clear(self);
    }

    fn push(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        Vec::push(self, value.take::<T>()?);
        Ok(())
    }

    #[inline]
    fn item_ty(&self) -> Type {
        Type::of::<T>()
    }

    #[inline]
    fn new_item(&self) -> Box<dyn Reflect> {
        Box::new(T::default())
    }
}

// -----------------------------------------------------------------------------
// VecDeque

impl<T: Reflect + Default> Reflect for VecDeque<T> {
    impl_reflect_cast_fn!(List);

    fn reflect_clone(&self) -> Result<Box<dyn Reflect>, ReflectCloneError> {
        let mut deque: VecDeque<T> = VecDeque::with_capacity(self.len());
        for item in self {
            deque.push_back(reflect_clone_as(item)?);
        }
        Ok(Box::new(deque))
    }
}

impl<T: Reflect + Default> List for VecDeque<T> {
    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        VecDeque::get(self, index).map(Reflect::as_reflect)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        VecDeque::get_mut(self, index).map(Reflect::as_reflect_mut)
    }

    #[inline]
    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    #[inline]
    fn iter(&self) -> ListItemIter<'_> {
        ListItemIter::new(self)
    }

    #[inline]
    fn clear(&mut self) {
        VecDeque::clear(self);
    }

    fn push(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        VecDeque::push_back(self, value.take::<T>()?);
        Ok(())
    }

    #[inline]
    fn item_ty(&self) -> Type {
        Type::of::<T>()
    }

    #[inline]
    fn new_item(&self) -> Box<dyn Reflect> {
        Box::new(T::default())
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::collections::VecDeque;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use crate::Reflect;
    use crate::info::ReflectKind;
    use crate::ops::List;

    #[test]
    fn vec_list_ops() {
        let mut v: Vec<String> = vec![String::from("a")];
        assert_eq!(v.reflect_kind(), ReflectKind::List);

        let list = v.reflect_mut().as_list().unwrap();
        assert!(list.item_ty().is::<String>());
        list.push(Box::new(String::from("b"))).unwrap();
        let rejected = list.push(Box::new(1_u8)).unwrap_err();
        assert!(rejected.is::<u8>());
        assert_eq!(list.len(), 2);

        let item = list.new_item();
        assert_eq!(item.downcast_ref::<String>().unwrap(), "");

        list.get_mut(0)
            .unwrap()
            .set(Box::new(String::from("z")))
            .unwrap();
        list.clear();
        assert!(list.is_empty());
        assert!(v.is_empty());
    }

    #[test]
    fn deque_clone_keeps_order() {
        let deque: VecDeque<Option<u8>> = [Some(1), None, Some(3)].into_iter().collect();
        let cloned = deque.reflect_clone().unwrap().take::<VecDeque<Option<u8>>>().unwrap();
        assert_eq!(cloned, deque);

        let items = List::iter(&deque)
            .map(|item| item.reflect_kind())
            .collect::<Vec<_>>();
        assert_eq!(items, [ReflectKind::Indirection; 3]);
    }
}
