use crate::reflection::Reflect;

// -----------------------------------------------------------------------------
// Struct trait

/// A trait for type-erased access to named struct fields.
///
/// Implemented by `#[derive(Reflect)]` for structs with named fields. Field
/// metadata (names, flags, declared types) lives in the matching
/// [`StructInfo`](crate::info::StructInfo); this trait only moves values.
///
/// # Contract
///
/// Index-based access follows declaration order and agrees with the indices
/// reported by [`StructInfo`](crate::info::StructInfo).
///
/// # Examples
///
/// ```
/// use sg_reflect::derive::Reflect;
/// use sg_reflect::ops::Struct;
///
/// #[derive(Reflect, Clone, Default)]
/// struct Health {
///     current: i32,
///     max: i32,
/// }
///
/// let hp = Health { current: 7, max: 10 };
/// let s: &dyn Struct = &hp;
///
/// assert_eq!(s.field_len(), 2);
/// assert_eq!(s.field("max").unwrap().downcast_ref::<i32>(), Some(&10));
/// ```
pub trait Struct: Reflect {
    /// Returns a reference to the field named `name`, or `None` if absent.
    fn field(&self, name: &str) -> Option<&dyn Reflect>;

    /// Returns a mutable reference to the field named `name`, or `None` if absent.
    fn field_mut(&mut self, name: &str) -> Option<&mut dyn Reflect>;

    /// Returns a reference to the field at `index` (declaration order).
    fn field_at(&self, index: usize) -> Option<&dyn Reflect>;

    /// Returns a mutable reference to the field at `index` (declaration order).
    fn field_at_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// Returns the name of the field at `index`.
    fn name_at(&self, index: usize) -> Option<&'static str>;

    /// Returns the number of fields.
    fn field_len(&self) -> usize;

    /// Returns an iterator over the field values in declaration order.
    fn iter_fields(&self) -> StructFieldIter<'_>;
}

impl dyn Struct {
    /// Returns a typed reference to the field named `name`.
    ///
    /// Returns `None` if the field is absent or of a different type.
    #[inline]
    pub fn field_as<T: Reflect>(&self, name: &str) -> Option<&T> {
        self.field(name).and_then(<dyn Reflect>::downcast_ref)
    }

    /// Returns a typed mutable reference to the field named `name`.
    ///
    /// Returns `None` if the field is absent or of a different type.
    #[inline]
    pub fn field_mut_as<T: Reflect>(&mut self, name: &str) -> Option<&mut T> {
        self.field_mut(name).and_then(<dyn Reflect>::downcast_mut)
    }
}

// -----------------------------------------------------------------------------
// Field Iterator

/// An iterator over the field values of a [`Struct`], in declaration order.
pub struct StructFieldIter<'a> {
    value: &'a dyn Struct,
    index: usize,
}

impl StructFieldIter<'_> {
    /// Creates a new iterator for the given struct.
    #[inline(always)]
    pub const fn new(value: &dyn Struct) -> StructFieldIter<'_> {
        StructFieldIter { value, index: 0 }
    }
}

impl<'a> Iterator for StructFieldIter<'a> {
    type Item = &'a dyn Reflect;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let value = self.value.field_at(self.index);
        self.index += value.is_some() as usize;
        value
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.value.field_len();
        (size - self.index, Some(size))
    }
}

impl ExactSizeIterator for StructFieldIter<'_> {}
