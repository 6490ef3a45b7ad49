use crate::impls::{GenericTypeInfoCell, GenericTypePathCell};
use crate::info::{ListInfo, TypeInfo, TypePath, Typed};
use crate::ops::{List, ListItemIter, ReflectCloneError};
use crate::reflection::{Reflect, impl_reflect_cast_fn};

// -----------------------------------------------------------------------------
// Vec<T>

impl<T: Typed + TypePath> TypePath for Vec<T> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| format!("alloc::vec::Vec<{}>", T::type_path()))
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| format!("Vec<{}>", T::type_name()))
    }

    #[inline]
    fn type_ident() -> &'static str {
        "Vec"
    }

    #[inline]
    fn module_path() -> Option<&'static str> {
        Some("alloc::vec")
    }
}

impl<T: Typed + TypePath> Typed for Vec<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::List(ListInfo::new::<Self, T>()))
    }
}

impl<T: Typed + TypePath> List for Vec<T> {
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
        self.push(value.take::<T>()?);
        Ok(())
    }

    #[inline]
    fn pop(&mut self) -> Option<Box<dyn Reflect>> {
        self.pop().map(Reflect::into_boxed_reflect)
    }

    #[inline]
    fn remove(&mut self, index: usize) -> Box<dyn Reflect> {
        Box::new(self.remove(index))
    }

    #[inline]
    fn clear(&mut self) {
        self.clear();
    }

    #[inline]
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    #[inline]
    fn iter(&self) -> ListItemIter<'_> {
        ListItemIter::new(self)
    }

    #[inline]
    fn clone_empty(&self) -> Box<dyn Reflect> {
        Box::new(Vec::<T>::new())
    }
}

impl<T: Typed + TypePath> Reflect for Vec<T> {
    impl_reflect_cast_fn!(List);

    fn reflect_clone(&self) -> Result<Box<dyn Reflect>, ReflectCloneError> {
        let mut out = Vec::with_capacity(self.as_slice().len());
        for item in self.as_slice() {
            let cloned =
                item.reflect_clone()?
                    .take::<T>()
                    .map_err(|_| ReflectCloneError::NotCloneable {
                        type_path: T::type_path(),
                    })?;
            out.push(cloned);
        }
        Ok(Box::new(out))
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use crate::info::Typed;
    use crate::ops::List;

    #[test]
    fn vec_as_list() {
        let mut vec = vec![1_i32, 2, 3];
        {
            let list: &mut dyn List = &mut vec;
            assert_eq!(list.len(), 3);
            assert!(list.push(4_i32.into_boxed_reflect()).is_ok());
            assert!(list.push("nope".to_string().into_boxed_reflect()).is_err());
        }
        assert_eq!(vec, [1, 2, 3, 4]);
    }

    #[test]
    fn vec_type_info() {
        let info = <Vec<f32> as Typed>::type_info().as_list().unwrap();
        assert!(info.item_is::<f32>());
        assert_eq!(<Vec<f32> as crate::info::TypePath>::type_path(), "alloc::vec::Vec<f32>");
    }

    #[test]
    fn vec_reflect_clone() {
        let vec = vec![1_u8, 2];
        let cloned = vec.reflect_clone().unwrap();
        assert_eq!(cloned.downcast_ref::<Vec<u8>>(), Some(&vec));
    }
}
