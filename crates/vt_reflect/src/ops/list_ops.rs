use alloc::boxed::Box;

use crate::Reflect;
use crate::info::Type;

// -----------------------------------------------------------------------------
// List trait

/// A trait for type-erased list-like operations via reflection.
///
/// This trait represents ordered, variable-length sequences with a single
/// item type, such as [`Vec`](alloc::vec::Vec) and
/// [`VecDeque`](alloc::collections::VecDeque).
///
/// Items are type-checked when pushed: a value whose type is not the
/// [`item_ty`](List::item_ty) is handed back.
///
/// # Examples
///
/// ```
/// use vt_reflect::{Reflect, ops::List};
///
/// let mut foo = vec![1_u32, 2];
/// let list: &mut dyn List = foo.reflect_mut().as_list().unwrap();
///
/// list.push(Box::new(3_u32)).unwrap();
/// assert!(list.push(Box::new(4_i64)).is_err());
/// assert_eq!(list.len(), 3);
/// assert!(list.item_ty().is::<u32>());
/// ```
pub trait List: Reflect {
    /// Returns a reference to the element at `index`, or `None` if out of bounds.
    fn get(&self, index: usize) -> Option<&dyn Reflect>;

    /// Returns a mutable reference to the element at `index`, or `None` if out of bounds.
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// Returns the number of elements in the list.
    fn len(&self) -> usize;

    /// Returns `true` if the collection contains no elements.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns an iterator over the list.
    fn iter(&self) -> ListItemIter<'_>;

    /// Removes all elements.
    fn clear(&mut self);

    /// Appends an element to the _back_ of the list.
    ///
    /// Returns the value back if its type is not the item type.
    fn push(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;

    /// Returns the item [`Type`] of the list.
    fn item_ty(&self) -> Type;

    /// Creates a zero-valued item (its `Default`).
    fn new_item(&self) -> Box<dyn Reflect>;
}

// -----------------------------------------------------------------------------
// List Item Iterator

/// An iterator over the items of a list.
pub struct ListItemIter<'a> {
    list: &'a dyn List,
    index: usize,
}

impl ListItemIter<'_> {
    /// Creates a new iterator for the given list.
    #[inline(always)]
    pub const fn new(list: &dyn List) -> ListItemIter<'_> {
        ListItemIter { list, index: 0 }
    }
}

impl<'a> Iterator for ListItemIter<'a> {
    type Item = &'a dyn Reflect;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let value = self.list.get(self.index);
        self.index += value.is_some() as usize;
        value
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.list.len() - self.index;
        (size, Some(size))
    }
}

impl ExactSizeIterator for ListItemIter<'_> {}
