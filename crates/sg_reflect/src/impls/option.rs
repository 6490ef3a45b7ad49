use crate::impls::{GenericTypeInfoCell, GenericTypePathCell};
use crate::info::{NullableInfo, TypeInfo, TypePath, Typed};
use crate::ops::{Nullable, ReflectCloneError};
use crate::reflection::{Reflect, impl_reflect_cast_fn};

// -----------------------------------------------------------------------------
// Option<T>

impl<T: Typed + TypePath> TypePath for Option<T> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| format!("core::option::Option<{}>", T::type_path()))
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| format!("Option<{}>", T::type_name()))
    }

    #[inline]
    fn type_ident() -> &'static str {
        "Option"
    }

    #[inline]
    fn module_path() -> Option<&'static str> {
        Some("core::option")
    }
}

impl<T: Typed + TypePath> Typed for Option<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Nullable(NullableInfo::new::<Self, T>()))
    }
}

impl<T: Typed + TypePath> Nullable for Option<T> {
    #[inline]
    fn value(&self) -> Option<&dyn Reflect> {
        self.as_ref().map(|value| value as &dyn Reflect)
    }

    #[inline]
    fn value_mut(&mut self) -> Option<&mut dyn Reflect> {
        self.as_mut().map(|value| value as &mut dyn Reflect)
    }

    #[inline]
    fn is_null(&self) -> bool {
        self.is_none()
    }

    fn set_value(&mut self, value: Option<Box<dyn Reflect>>) -> Result<(), Box<dyn Reflect>> {
        match value {
            Some(value) => *self = Some(value.take::<T>()?),
            None => *self = None,
        }
        Ok(())
    }

    #[inline]
    fn take_value(&mut self) -> Option<Box<dyn Reflect>> {
        self.take().map(Reflect::into_boxed_reflect)
    }

    #[inline]
    fn clone_empty(&self) -> Box<dyn Reflect> {
        Box::new(None::<T>)
    }
}

impl<T: Typed + TypePath> Reflect for Option<T> {
    impl_reflect_cast_fn!(Nullable);

    fn reflect_clone(&self) -> Result<Box<dyn Reflect>, ReflectCloneError> {
        match self {
            Some(value) => {
                let cloned = value.reflect_clone()?.take::<T>().map_err(|_| {
                    ReflectCloneError::NotCloneable {
                        type_path: T::type_path(),
                    }
                })?;
                Ok(Box::new(Some(cloned)))
            }
            None => Ok(Box::new(None::<T>)),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use crate::info::Typed;
    use crate::ops::Nullable;

    #[test]
    fn option_as_nullable() {
        let mut slot = Some(5_i32);
        let nullable: &mut dyn Nullable = &mut slot;

        assert!(!nullable.is_null());
        assert_eq!(nullable.value().unwrap().downcast_ref::<i32>(), Some(&5));

        assert!(nullable.set_value(None).is_ok());
        assert!(nullable.is_null());

        assert!(nullable.set_value(Some(7_i32.into_boxed_reflect())).is_ok());
        assert!(
            nullable
                .set_value(Some("bad".to_string().into_boxed_reflect()))
                .is_err()
        );
        assert_eq!(slot, Some(7));
    }

    #[test]
    fn option_type_info() {
        let info = <Option<f32> as Typed>::type_info().as_nullable().unwrap();
        assert!(info.item_is::<f32>());
    }
}
