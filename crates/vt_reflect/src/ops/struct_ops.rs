use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::Reflect;
use crate::hash::{FixedHashState, HashMap};
use crate::ops::ReflectCloneError;
use crate::reflection::impl_reflect_cast_fn;

// -----------------------------------------------------------------------------
// Dynamic Struct

/// A dynamic container representing a struct.
///
/// `DynamicStruct` is a type-erased struct that can hold any types
/// implementing [`Reflect`], it is the value handle for shapes that have no
/// Rust type (e.g. data assembled at runtime).
///
/// `DynamicStruct` can change its fields dynamically using [`insert`] or [`insert_boxed`].
///
/// # Examples
///
/// ```
/// use vt_reflect::ops::{DynamicStruct, Struct};
///
/// let mut dynamic = DynamicStruct::new();
/// dynamic.insert("field_1", 1_i32);
/// dynamic.insert("field_2", String::from("hello"));
/// dynamic.insert("field_3", true);
///
/// assert_eq!(dynamic.field_len(), 3);
/// assert_eq!(dynamic.name_at(1), Some("field_2"));
/// ```
///
/// [`insert`]: DynamicStruct::insert
/// [`insert_boxed`]: DynamicStruct::insert_boxed
pub struct DynamicStruct {
    fields: Vec<Box<dyn Reflect>>,
    field_names: Vec<Cow<'static, str>>,
    field_indices: HashMap<Cow<'static, str>, usize>,
}

impl Default for DynamicStruct {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl DynamicStruct {
    /// Creates an empty `DynamicStruct`.
    #[inline]
    pub const fn new() -> Self {
        Self {
            fields: Vec::new(),
            field_names: Vec::new(),
            field_indices: HashMap::with_hasher(FixedHashState),
        }
    }

    /// Creates a new empty `DynamicStruct` with at least the specified capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
            field_names: Vec::with_capacity(capacity),
            field_indices: HashMap::with_capacity_and_hasher(capacity, FixedHashState),
        }
    }

    /// Appends a boxed [`Reflect`] value to the end of the struct as a field.
    ///
    /// If the field name already exists, this will overwrite it in place.
    ///
    /// # Examples
    ///
    /// ```
    /// use vt_reflect::ops::{Struct, DynamicStruct};
    ///
    /// let mut dynamic = DynamicStruct::new();
    /// dynamic.insert_boxed("field_a", Box::new(1_i32));
    /// dynamic.insert_boxed("field_a", Box::new(2_i32));
    ///
    /// assert_eq!(dynamic.field_len(), 1);
    /// ```
    pub fn insert_boxed(&mut self, name: impl Into<Cow<'static, str>>, value: Box<dyn Reflect>) {
        let name: Cow<'static, str> = name.into();
        if let Some(index) = self.field_indices.get(&name) {
            self.fields[*index] = value;
        } else {
            self.fields.push(value);
            self.field_indices.insert(name.clone(), self.fields.len() - 1);
            self.field_names.push(name);
        }
    }

    /// Appends a value to the end of the struct as a field.
    ///
    /// This is a convenience method that boxes the value and calls [`insert_boxed`].
    ///
    /// [`insert_boxed`]: DynamicStruct::insert_boxed
    #[inline]
    pub fn insert<T: Reflect>(&mut self, name: impl Into<Cow<'static, str>>, value: T) {
        self.insert_boxed(name, Box::new(value));
    }

    /// Gets the index of the field with the given name.
    ///
    /// ```
    /// use vt_reflect::ops::DynamicStruct;
    ///
    /// let mut dynamic = DynamicStruct::new();
    /// dynamic.insert("field_a", 42_i32);
    /// dynamic.insert("field_b", 7_u8);
    ///
    /// assert_eq!(dynamic.index_of("field_b"), Some(1));
    /// assert_eq!(dynamic.index_of("field_c"), None);
    /// ```
    #[inline]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.field_indices.get(name).copied()
    }
}

impl Reflect for DynamicStruct {
    impl_reflect_cast_fn!(Struct);

    #[inline]
    fn reflect_type_path(&self) -> &'static str {
        "vt_reflect::ops::DynamicStruct"
    }

    fn reflect_clone(&self) -> Result<Box<dyn Reflect>, ReflectCloneError> {
        let mut dynamic = DynamicStruct::with_capacity(self.fields.len());
        for (name, field) in self.field_names.iter().zip(&self.fields) {
            dynamic.insert_boxed(name.clone(), field.reflect_clone()?);
        }
        Ok(Box::new(dynamic))
    }

    fn reflect_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DynamicStruct(")?;
        crate::impls::struct_debug(self, f)?;
        write!(f, ")")
    }
}

impl Struct for DynamicStruct {
    #[inline]
    fn field(&self, name: &str) -> Option<&dyn Reflect> {
        let index = self.index_of(name)?;
        Some(&**self.fields.get(index)?)
    }

    #[inline]
    fn field_mut(&mut self, name: &str) -> Option<&mut dyn Reflect> {
        let index = self.index_of(name)?;
        Some(&mut **self.fields.get_mut(index)?)
    }

    #[inline]
    fn field_at(&self, index: usize) -> Option<&dyn Reflect> {
        Some(&**self.fields.get(index)?)
    }

    #[inline]
    fn field_at_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        Some(&mut **self.fields.get_mut(index)?)
    }

    #[inline]
    fn name_at(&self, index: usize) -> Option<&str> {
        self.field_names.get(index).map(AsRef::as_ref)
    }

    #[inline]
    fn field_len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    fn index_of(&self, name: &str) -> Option<usize> {
        DynamicStruct::index_of(self, name)
    }

    #[inline]
    fn iter_fields(&self) -> StructFieldIter<'_> {
        StructFieldIter::new(self)
    }
}

impl fmt::Debug for DynamicStruct {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.reflect_debug(f)
    }
}

impl<N: Into<Cow<'static, str>>> FromIterator<(N, Box<dyn Reflect>)> for DynamicStruct {
    fn from_iter<T: IntoIterator<Item = (N, Box<dyn Reflect>)>>(fields: T) -> Self {
        let mut dynamic_struct = DynamicStruct::new();
        for (name, value) in fields {
            dynamic_struct.insert_boxed(name, value);
        }
        dynamic_struct
    }
}

// -----------------------------------------------------------------------------
// Struct trait

/// A trait for type-erased struct operations via reflection.
///
/// This trait represents structs with named fields. Field names are
/// case-sensitive and fields keep their declaration order.
///
/// When using [`#[derive(Reflect)]`](crate::derive::Reflect) on a standard struct,
/// this trait will be automatically implemented.
///
/// # Embedded fields
///
/// A field marked `#[reflect(embed)]` holds an embedded struct (possibly
/// behind an indirection) whose fields are promoted into the namespace of the
/// enclosing struct for name matching. [`is_embedded_at`] reports such fields.
///
/// # Examples
///
/// ```
/// use vt_reflect::{derive::Reflect, ops::Struct};
///
/// #[derive(Reflect)]
/// struct Foo {
///     a: i32,
///     b: bool,
/// }
///
/// let ts = Foo { a: 10_i32, b: true };
/// let ts_ref: &dyn Struct = &ts;
///
/// assert_eq!(ts_ref.field_len(), 2);
/// assert_eq!(ts_ref.field_as::<i32>("a"), Some(&10));
/// assert_eq!(ts_ref.field_at_as::<bool>(1), Some(&true));
/// ```
///
/// [`is_embedded_at`]: Struct::is_embedded_at
pub trait Struct: Reflect {
    /// Returns a reference to the value of the field named `name` as a
    /// `&dyn Reflect`.
    ///
    /// Returns `None` if the field does not exist.
    fn field(&self, name: &str) -> Option<&dyn Reflect>;

    /// Returns a mutable reference to the value of the field named `name`
    /// as a `&mut dyn Reflect`.
    ///
    /// Returns `None` if the field does not exist.
    fn field_mut(&mut self, name: &str) -> Option<&mut dyn Reflect>;

    /// Returns a reference to the value of the field with index `index` as a
    /// `&dyn Reflect`.
    fn field_at(&self, index: usize) -> Option<&dyn Reflect>;

    /// Returns a mutable reference to the value of the field with index `index`
    /// as a `&mut dyn Reflect`.
    fn field_at_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// Returns the name of the field with index `index`.
    fn name_at(&self, index: usize) -> Option<&str>;

    /// Returns the number of fields in the struct.
    fn field_len(&self) -> usize;

    /// Returns `true` if the field with index `index` is an embedded struct.
    #[inline]
    fn is_embedded_at(&self, _index: usize) -> bool {
        false
    }

    /// Returns the index of the field named `name`.
    fn index_of(&self, name: &str) -> Option<usize> {
        (0..self.field_len()).find(|&index| self.name_at(index) == Some(name))
    }

    /// Returns an iterator over the values of the reflectable fields for this struct.
    fn iter_fields(&self) -> StructFieldIter<'_>;
}

impl dyn Struct {
    /// Returns a typed reference to the field named `name`.
    ///
    /// Returns `None` if the field does not exist or the type mismatched.
    #[inline]
    pub fn field_as<T: Reflect>(&self, name: &str) -> Option<&T> {
        self.field(name)?.downcast_ref::<T>()
    }

    /// Returns a typed mutable reference to the field named `name`.
    #[inline]
    pub fn field_mut_as<T: Reflect>(&mut self, name: &str) -> Option<&mut T> {
        self.field_mut(name)?.downcast_mut::<T>()
    }

    /// Returns a typed reference to the field with index `index`.
    #[inline]
    pub fn field_at_as<T: Reflect>(&self, index: usize) -> Option<&T> {
        self.field_at(index)?.downcast_ref::<T>()
    }
}

// -----------------------------------------------------------------------------
// Struct Field Iterator

/// An iterator over the field values of a struct.
pub struct StructFieldIter<'a> {
    struct_val: &'a dyn Struct,
    index: usize,
}

impl<'a> StructFieldIter<'a> {
    /// Creates a new iterator for the given struct.
    #[inline(always)]
    pub const fn new(value: &'a dyn Struct) -> Self {
        StructFieldIter {
            struct_val: value,
            index: 0,
        }
    }
}

impl<'a> Iterator for StructFieldIter<'a> {
    type Item = &'a dyn Reflect;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let value = self.struct_val.field_at(self.index);
        self.index += value.is_some() as usize;
        value
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.struct_val.field_len();
        (size - self.index, Some(size - self.index))
    }
}

impl ExactSizeIterator for StructFieldIter<'_> {}

// -----------------------------------------------------------------------------
// Tests
