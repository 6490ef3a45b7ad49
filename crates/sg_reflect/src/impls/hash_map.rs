use core::hash::{BuildHasher, Hash};

use hashbrown::HashMap;

use crate::impls::{GenericTypeInfoCell, GenericTypePathCell};
use crate::info::{MapInfo, TypeInfo, TypePath, Typed};
use crate::ops::{Map, MapEntryIter, ReflectCloneError};
use crate::reflection::{Reflect, impl_reflect_cast_fn};

// -----------------------------------------------------------------------------
// HashMap<K, V, S>

impl<K, V, S> TypePath for HashMap<K, V, S>
where
    K: Typed + TypePath,
    V: Typed + TypePath,
    S: 'static,
{
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| {
            format!(
                "hashbrown::hash_map::HashMap<{}, {}>",
                K::type_path(),
                V::type_path()
            )
        })
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| {
            format!("HashMap<{}, {}>", K::type_name(), V::type_name())
        })
    }

    #[inline]
    fn type_ident() -> &'static str {
        "HashMap"
    }

    #[inline]
    fn module_path() -> Option<&'static str> {
        Some("hashbrown::hash_map")
    }
}

impl<K, V, S> Typed for HashMap<K, V, S>
where
    K: Typed + TypePath + Eq + Hash,
    V: Typed + TypePath,
    S: BuildHasher + Default + 'static,
{
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Map(MapInfo::new::<Self, K, V>()))
    }
}

impl<K, V, S> Map for HashMap<K, V, S>
where
    K: Typed + TypePath + Eq + Hash,
    V: Typed + TypePath,
    S: BuildHasher + Default + 'static,
{
    fn get(&self, key: &dyn Reflect) -> Option<&dyn Reflect> {
        let key = key.downcast_ref::<K>()?;
        self.get(key).map(|value| value as &dyn Reflect)
    }

    fn get_mut(&mut self, key: &dyn Reflect) -> Option<&mut dyn Reflect> {
        let key = key.downcast_ref::<K>()?;
        self.get_mut(key).map(|value| value as &mut dyn Reflect)
    }

    fn get_at(&self, index: usize) -> Option<(&dyn Reflect, &dyn Reflect)> {
        self.iter()
            .nth(index)
            .map(|(key, value)| (key as &dyn Reflect, value as &dyn Reflect))
    }

    fn get_at_mut(&mut self, index: usize) -> Option<(&dyn Reflect, &mut dyn Reflect)> {
        self.iter_mut()
            .nth(index)
            .map(|(key, value)| (key as &dyn Reflect, value as &mut dyn Reflect))
    }

    fn insert(
        &mut self,
        key: Box<dyn Reflect>,
        value: Box<dyn Reflect>,
    ) -> Result<Option<Box<dyn Reflect>>, (Box<dyn Reflect>, Box<dyn Reflect>)> {
        let key = match key.take::<K>() {
            Ok(key) => key,
            Err(key) => return Err((key, value)),
        };
        let value = match value.take::<V>() {
            Ok(value) => value,
            Err(value) => return Err((key.into_boxed_reflect(), value)),
        };
        Ok(self
            .insert(key, value)
            .map(Reflect::into_boxed_reflect))
    }

    fn remove(&mut self, key: &dyn Reflect) -> Option<Box<dyn Reflect>> {
        let key = key.downcast_ref::<K>()?;
        self.remove(key).map(Reflect::into_boxed_reflect)
    }

    #[inline]
    fn clear(&mut self) {
        self.clear();
    }

    #[inline]
    fn len(&self) -> usize {
        self.iter().len()
    }

    #[inline]
    fn iter(&self) -> MapEntryIter<'_> {
        MapEntryIter::new(self)
    }

    #[inline]
    fn clone_empty(&self) -> Box<dyn Reflect> {
        Box::new(HashMap::<K, V, S>::default())
    }
}

impl<K, V, S> Reflect for HashMap<K, V, S>
where
    K: Typed + TypePath + Eq + Hash,
    V: Typed + TypePath,
    S: BuildHasher + Default + 'static,
{
    impl_reflect_cast_fn!(Map);

    fn reflect_clone(&self) -> Result<Box<dyn Reflect>, ReflectCloneError> {
        let mut out = HashMap::<K, V, S>::with_capacity_and_hasher(self.len(), S::default());
        for (key, value) in self.iter() {
            let key =
                key.reflect_clone()?
                    .take::<K>()
                    .map_err(|_| ReflectCloneError::NotCloneable {
                        type_path: K::type_path(),
                    })?;
            let value =
                value
                    .reflect_clone()?
                    .take::<V>()
                    .map_err(|_| ReflectCloneError::NotCloneable {
                        type_path: V::type_path(),
                    })?;
            out.insert(key, value);
        }
        Ok(Box::new(out))
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use crate::hash::HashMap;
    use crate::ops::Map;

    #[test]
    fn map_access() {
        let mut inner: HashMap<String, i32> = HashMap::default();
        inner.insert("hp".to_string(), 10);

        let map: &mut dyn Map = &mut inner;
        let key: &dyn Reflect = &"hp".to_string();

        assert_eq!(map.len(), 1);
        assert_eq!(map.get(key).unwrap().downcast_ref::<i32>(), Some(&10));

        *map.get_mut(key).unwrap().downcast_mut::<i32>().unwrap() = 12;
        assert_eq!(inner["hp"], 12);
    }

    #[test]
    fn map_insert_type_check() {
        let mut inner: HashMap<String, i32> = HashMap::default();
        let map: &mut dyn Map = &mut inner;

        assert!(
            map.insert("a".to_string().into_boxed_reflect(), 1_i32.into_boxed_reflect())
                .is_ok()
        );
        assert!(
            map.insert(1_u8.into_boxed_reflect(), 1_i32.into_boxed_reflect())
                .is_err()
        );
        assert_eq!(map.len(), 1);
    }
}
