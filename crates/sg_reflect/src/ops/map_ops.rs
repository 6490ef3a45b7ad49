use crate::reflection::Reflect;

// -----------------------------------------------------------------------------
// Map trait

/// A trait for type-erased map-like operations.
///
/// Represents keyed containers such as
/// [`HashMap`](crate::hash::HashMap). Iteration order is arbitrary but stable
/// while the map is not mutated; index-based access follows that same order.
///
/// # Examples
///
/// ```
/// use sg_reflect::hash::HashMap;
/// use sg_reflect::ops::Map;
///
/// let mut inner = HashMap::default();
/// inner.insert("hp".to_string(), 10_i32);
///
/// let map: &dyn Map = &inner;
/// let key: &dyn sg_reflect::Reflect = &"hp".to_string();
///
/// assert_eq!(map.len(), 1);
/// assert_eq!(map.get(key).unwrap().downcast_ref::<i32>(), Some(&10));
/// ```
pub trait Map: Reflect {
    /// Returns a reference to the value for the given key, or `None` if absent.
    ///
    /// A key of the wrong type is treated as absent.
    fn get(&self, key: &dyn Reflect) -> Option<&dyn Reflect>;

    /// Returns a mutable reference to the value for the given key, or `None` if absent.
    fn get_mut(&mut self, key: &dyn Reflect) -> Option<&mut dyn Reflect>;

    /// Returns the entry at `index` in iteration order, or `None` if out of bounds.
    fn get_at(&self, index: usize) -> Option<(&dyn Reflect, &dyn Reflect)>;

    /// Returns the entry at `index` with a mutable value reference.
    ///
    /// Keys are never handed out mutably; mutating a key would corrupt the
    /// container.
    fn get_at_mut(&mut self, index: usize) -> Option<(&dyn Reflect, &mut dyn Reflect)>;

    /// Attempts to insert a key/value pair, returning the previous value if
    /// the key was present.
    ///
    /// Returns `Err((key, value))`, handing both back unchanged, if either
    /// type is incompatible with the map.
    fn insert(
        &mut self,
        key: Box<dyn Reflect>,
        value: Box<dyn Reflect>,
    ) -> Result<Option<Box<dyn Reflect>>, (Box<dyn Reflect>, Box<dyn Reflect>)>;

    /// Removes the entry for the given key, returning its value if present.
    fn remove(&mut self, key: &dyn Reflect) -> Option<Box<dyn Reflect>>;

    /// Removes all entries.
    fn clear(&mut self);

    /// Returns the number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if the map contains no entries.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns an iterator over the entries in iteration order.
    fn iter(&self) -> MapEntryIter<'_>;

    /// Creates a new, empty map of the same concrete type.
    fn clone_empty(&self) -> Box<dyn Reflect>;
}

impl dyn Map {
    /// Returns a typed reference to the value for the given key.
    #[inline]
    pub fn get_as<K: Reflect, V: Reflect>(&self, key: &K) -> Option<&V> {
        self.get(key).and_then(<dyn Reflect>::downcast_ref)
    }
}

// -----------------------------------------------------------------------------
// Map Iterator

/// An iterator over the entries of a [`Map`].
///
/// Yields `(key, value)` pairs in the map's stable iteration order.
pub struct MapEntryIter<'a> {
    map: &'a dyn Map,
    index: usize,
}

impl MapEntryIter<'_> {
    /// Creates a new iterator for the given map.
    #[inline(always)]
    pub const fn new(map: &dyn Map) -> MapEntryIter<'_> {
        MapEntryIter { map, index: 0 }
    }
}

impl<'a> Iterator for MapEntryIter<'a> {
    type Item = (&'a dyn Reflect, &'a dyn Reflect);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.map.get_at(self.index);
        self.index += entry.is_some() as usize;
        entry
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.map.len();
        (size - self.index, Some(size))
    }
}

impl ExactSizeIterator for MapEntryIter<'_> {}
