//! A growable `f32` buffer with an explicit backing store.
//!
//! [`FloatBuffer`] is the engine's bulk-numeric container (vertex data,
//! keyframe tracks). Unlike `Vec<f32>`, its backing capacity is part of the
//! observable API: the serializer compacts a buffer to its logical length
//! before writing it, a deliberate space optimization for scene files.

use crate::impls::NonGenericTypeInfoCell;
use crate::info::{ListInfo, TypeInfo, TypePath, Typed};
use crate::ops::{List, ListItemIter, ReflectCloneError};
use crate::reflection::{Reflect, impl_reflect_cast_fn};

// -----------------------------------------------------------------------------
// FloatBuffer

const MIN_GROW: usize = 8;

/// A growable buffer of `f32` values.
///
/// # Examples
///
/// ```
/// use sg_reflect::buffer::FloatBuffer;
///
/// let mut buf = FloatBuffer::with_capacity(16);
/// buf.push_value(1.0);
/// buf.push_value(2.0);
///
/// assert_eq!(buf.as_slice(), &[1.0, 2.0]);
/// assert_eq!(buf.capacity(), 16);
///
/// buf.shrink_to_fit();
/// assert_eq!(buf.capacity(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct FloatBuffer {
    items: Box<[f32]>,
    len: usize,
}

impl FloatBuffer {
    /// Creates an empty buffer with no backing storage.
    pub fn new() -> Self {
        Self {
            items: Box::new([]),
            len: 0,
        }
    }

    /// Creates an empty buffer with the given backing capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: vec![0.0; capacity].into_boxed_slice(),
            len: 0,
        }
    }

    /// Returns the logical number of values.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the buffer holds no values.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the backing capacity, which may exceed [`len`](Self::len).
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.items.len()
    }

    /// Returns the logical contents as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.items[..self.len]
    }

    /// Returns the logical contents as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.items[..self.len]
    }

    /// Appends a value, growing the backing store if it is full.
    pub fn push_value(&mut self, value: f32) {
        if self.len == self.items.len() {
            self.grow((self.items.len() * 2).max(MIN_GROW));
        }
        self.items[self.len] = value;
        self.len += 1;
    }

    /// Removes and returns the last value, or `None` if the buffer is empty.
    pub fn pop_value(&mut self) -> Option<f32> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        Some(self.items[self.len])
    }

    /// Removes every value, keeping the backing storage.
    #[inline]
    pub fn clear_values(&mut self) {
        self.len = 0;
    }

    /// Reallocates the backing store to exactly the logical length.
    pub fn shrink_to_fit(&mut self) {
        if self.items.len() != self.len {
            self.grow(self.len);
        }
    }

    fn grow(&mut self, capacity: usize) {
        let mut items = vec![0.0; capacity].into_boxed_slice();
        let keep = self.len.min(capacity);
        items[..keep].copy_from_slice(&self.items[..keep]);
        self.items = items;
    }
}

impl Extend<f32> for FloatBuffer {
    fn extend<I: IntoIterator<Item = f32>>(&mut self, values: I) {
        for value in values {
            self.push_value(value);
        }
    }
}

impl FromIterator<f32> for FloatBuffer {
    fn from_iter<I: IntoIterator<Item = f32>>(values: I) -> Self {
        let items: Vec<f32> = values.into_iter().collect();
        Self {
            len: items.len(),
            items: items.into_boxed_slice(),
        }
    }
}

impl PartialEq for FloatBuffer {
    /// Compares logical contents; backing capacity is not part of equality.
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

// -----------------------------------------------------------------------------
// Reflection impls

impl TypePath for FloatBuffer {
    #[inline]
    fn type_path() -> &'static str {
        "sg_reflect::buffer::FloatBuffer"
    }

    #[inline]
    fn type_name() -> &'static str {
        "FloatBuffer"
    }

    #[inline]
    fn type_ident() -> &'static str {
        "FloatBuffer"
    }

    #[inline]
    fn module_path() -> Option<&'static str> {
        Some("sg_reflect::buffer")
    }
}

impl Typed for FloatBuffer {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| TypeInfo::List(ListInfo::new::<Self, f32>()))
    }
}

impl List for FloatBuffer {
    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        self.as_slice().get(index).map(|item| item as &dyn Reflect)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        self.as_mut_slice()
            .get_mut(index)
            .map(|item| item as &mut dyn Reflect)
    }

    fn push(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        self.push_value(value.take::<f32>()?);
        Ok(())
    }

    #[inline]
    fn pop(&mut self) -> Option<Box<dyn Reflect>> {
        self.pop_value().map(Reflect::into_boxed_reflect)
    }

    fn remove(&mut self, index: usize) -> Box<dyn Reflect> {
        let value = self.items[index];
        self.items.copy_within(index + 1..self.len, index);
        self.len -= 1;
        Box::new(value)
    }

    #[inline]
    fn clear(&mut self) {
        self.clear_values();
    }

    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn iter(&self) -> ListItemIter<'_> {
        ListItemIter::new(self)
    }

    #[inline]
    fn clone_empty(&self) -> Box<dyn Reflect> {
        Box::new(FloatBuffer::new())
    }
}

impl Reflect for FloatBuffer {
    impl_reflect_cast_fn!(List);

    #[inline]
    fn reflect_clone(&self) -> Result<Box<dyn Reflect>, ReflectCloneError> {
        Ok(Box::new(self.clone()))
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::FloatBuffer;
    use crate::ops::List;

    #[test]
    fn push_grows_and_shrink_compacts() {
        let mut buf = FloatBuffer::new();
        for i in 0..9 {
            buf.push_value(i as f32);
        }
        assert_eq!(buf.len(), 9);
        assert_eq!(buf.capacity(), 16);

        buf.shrink_to_fit();
        assert_eq!(buf.capacity(), 9);
        assert_eq!(buf.as_slice()[8], 8.0);
    }

    #[test]
    fn list_ops() {
        let mut buf: FloatBuffer = [1.0, 2.0, 3.0].into_iter().collect();
        {
            let list: &mut dyn List = &mut buf;
            let removed = list.remove(1);
            assert_eq!(removed.downcast_ref::<f32>(), Some(&2.0));
        }
        assert_eq!(buf.as_slice(), &[1.0, 3.0]);
    }
}
