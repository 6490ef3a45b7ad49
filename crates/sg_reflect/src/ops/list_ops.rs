use crate::reflection::Reflect;

// -----------------------------------------------------------------------------
// List trait

/// A trait for type-erased list-like operations.
///
/// Represents growable, ordered containers such as [`Vec`]. Elements are kept
/// in linear order, the front element at index 0.
///
/// # Examples
///
/// ```
/// use sg_reflect::ops::List;
///
/// let mut vec = vec![10_u32, 20_u32, 30_u32];
/// let list: &mut dyn List = &mut vec;
///
/// assert_eq!(list.len(), 3);
/// assert!(list.push(Box::new(40_u32)).is_ok());
/// assert!(list.push(Box::new("wrong type".to_string())).is_err());
/// assert_eq!(list.len(), 4);
/// ```
pub trait List: Reflect {
    /// Returns a reference to the element at `index`, or `None` if out of bounds.
    fn get(&self, index: usize) -> Option<&dyn Reflect>;

    /// Returns a mutable reference to the element at `index`, or `None` if out of bounds.
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// Attempts to append an element to the end of the list.
    ///
    /// Returns `Err(value)`, handing the element back unchanged, if its type
    /// is incompatible with the list.
    fn push(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;

    /// Removes and returns the last element, or `None` if the list is empty.
    fn pop(&mut self) -> Option<Box<dyn Reflect>>;

    /// Removes and returns the element at `index`, shifting later elements left.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    fn remove(&mut self, index: usize) -> Box<dyn Reflect>;

    /// Removes all elements.
    fn clear(&mut self);

    /// Returns the number of elements.
    fn len(&self) -> usize;

    /// Returns `true` if the list contains no elements.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns an iterator over the elements, from index 0 to `len() - 1`.
    fn iter(&self) -> ListItemIter<'_>;

    /// Creates a new, empty list of the same concrete type.
    fn clone_empty(&self) -> Box<dyn Reflect>;
}

impl dyn List {
    /// Returns a typed reference to the element at `index`.
    ///
    /// Returns `None` if the index is out of bounds or the element is of a
    /// different type.
    #[inline]
    pub fn get_as<T: Reflect>(&self, index: usize) -> Option<&T> {
        self.get(index).and_then(<dyn Reflect>::downcast_ref)
    }

    /// Returns a typed mutable reference to the element at `index`.
    #[inline]
    pub fn get_mut_as<T: Reflect>(&mut self, index: usize) -> Option<&mut T> {
        self.get_mut(index).and_then(<dyn Reflect>::downcast_mut)
    }
}

// -----------------------------------------------------------------------------
// List Iterator

/// An iterator over the elements of a [`List`].
///
/// # Examples
///
/// ```
/// use sg_reflect::ops::{List, ListItemIter};
///
/// let vec = vec![1, 2, 3, 4, 5];
/// let sum: i32 = ListItemIter::new(&vec)
///     .filter_map(|v| v.downcast_ref::<i32>())
///     .sum();
///
/// assert_eq!(sum, 15);
/// ```
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
        let size = self.list.len();
        (size - self.index, Some(size))
    }
}

impl ExactSizeIterator for ListItemIter<'_> {}
