use crate::reflection::Reflect;

// -----------------------------------------------------------------------------
// Array trait

/// A trait for type-erased access to fixed-capacity containers (`[T; N]`).
///
/// Unlike [`List`](crate::ops::List), arrays never grow or shrink; elements
/// can only be read or overwritten in place.
///
/// # Examples
///
/// ```
/// use sg_reflect::ops::Array;
///
/// let arr = [1.0_f32, 2.0, 3.0];
/// let array: &dyn Array = &arr;
///
/// assert_eq!(array.len(), 3);
/// assert_eq!(array.get(1).unwrap().downcast_ref::<f32>(), Some(&2.0));
/// ```
pub trait Array: Reflect {
    /// Returns a reference to the element at `index`, or `None` if out of bounds.
    fn get(&self, index: usize) -> Option<&dyn Reflect>;

    /// Returns a mutable reference to the element at `index`, or `None` if out of bounds.
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// Returns the fixed number of elements.
    fn len(&self) -> usize;

    /// Returns `true` if the array holds no elements (`N == 0`).
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns an iterator over the elements in index order.
    fn iter(&self) -> ArrayItemIter<'_>;
}

impl dyn Array {
    /// Returns a typed reference to the element at `index`.
    #[inline]
    pub fn get_as<T: Reflect>(&self, index: usize) -> Option<&T> {
        self.get(index).and_then(<dyn Reflect>::downcast_ref)
    }
}

// -----------------------------------------------------------------------------
// Array Iterator

/// An iterator over the elements of an [`Array`].
pub struct ArrayItemIter<'a> {
    array: &'a dyn Array,
    index: usize,
}

impl ArrayItemIter<'_> {
    /// Creates a new iterator for the given array.
    #[inline(always)]
    pub const fn new(array: &dyn Array) -> ArrayItemIter<'_> {
        ArrayItemIter { array, index: 0 }
    }
}

impl<'a> Iterator for ArrayItemIter<'a> {
    type Item = &'a dyn Reflect;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let value = self.array.get(self.index);
        self.index += value.is_some() as usize;
        value
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.array.len();
        (size - self.index, Some(size))
    }
}

impl ExactSizeIterator for ArrayItemIter<'_> {}
