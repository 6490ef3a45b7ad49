use crate::impls::{GenericTypeInfoCell, GenericTypePathCell};
use crate::info::{ArrayInfo, TypeInfo, TypePath, Typed};
use crate::ops::{Array, ArrayItemIter, ReflectCloneError};
use crate::reflection::{Reflect, impl_reflect_cast_fn};

// -----------------------------------------------------------------------------
// [T; N]

impl<T: Typed + TypePath, const N: usize> TypePath for [T; N] {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| format!("[{}; {N}]", T::type_path()))
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| format!("[{}; {N}]", T::type_name()))
    }

    fn type_ident() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| format!("[{}; {N}]", T::type_ident()))
    }
}

impl<T: Typed + TypePath, const N: usize> Typed for [T; N] {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Array(ArrayInfo::new::<Self, T>(N)))
    }
}

impl<T: Typed + TypePath, const N: usize> Array for [T; N] {
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

    #[inline]
    fn len(&self) -> usize {
        N
    }

    #[inline]
    fn iter(&self) -> ArrayItemIter<'_> {
        ArrayItemIter::new(self)
    }
}

impl<T: Typed + TypePath, const N: usize> Reflect for [T; N] {
    impl_reflect_cast_fn!(Array);

    fn reflect_clone(&self) -> Result<Box<dyn Reflect>, ReflectCloneError> {
        let mut items = Vec::with_capacity(N);
        for item in self.as_slice() {
            let cloned =
                item.reflect_clone()?
                    .take::<T>()
                    .map_err(|_| ReflectCloneError::NotCloneable {
                        type_path: T::type_path(),
                    })?;
            items.push(cloned);
        }
        // Lengths always agree, the error arm is unreachable in practice.
        let array: [T; N] = <[T; N]>::try_from(items).map_err(|_| {
            ReflectCloneError::NotCloneable {
                type_path: Self::type_path(),
            }
        })?;
        Ok(Box::new(array))
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use crate::info::Typed;
    use crate::ops::Array;

    #[test]
    fn array_access() {
        let mut arr = [1_i32, 2, 3];
        let array: &mut dyn Array = &mut arr;

        assert_eq!(array.len(), 3);
        *array.get_mut(0).unwrap().downcast_mut::<i32>().unwrap() = 9;
        assert_eq!(arr, [9, 2, 3]);
    }

    #[test]
    fn array_type_info() {
        let info = <[u8; 4] as Typed>::type_info().as_array().unwrap();
        assert_eq!(info.capacity(), 4);
        assert!(info.item_is::<u8>());
    }

    #[test]
    fn array_reflect_clone() {
        let arr = [1.0_f64, 2.0];
        let cloned = arr.reflect_clone().unwrap();
        assert_eq!(cloned.downcast_ref::<[f64; 2]>(), Some(&arr));
    }
}
