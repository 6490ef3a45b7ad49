use crate::impls::NonGenericTypeInfoCell;
use crate::info::{OpaqueInfo, ReflectKind, TypeInfo, TypePath, Typed};
use crate::ops::{ReflectCloneError, ReflectMut, ReflectRef};
use crate::reflection::{Reflect, Scalar};

// -----------------------------------------------------------------------------
// Scalar impls

macro_rules! impl_reflect_scalar {
    ($ty:ty, $variant:ident) => {
        impl TypePath for $ty {
            #[inline]
            fn type_path() -> &'static str {
                stringify!($ty)
            }

            #[inline]
            fn type_name() -> &'static str {
                stringify!($ty)
            }

            #[inline]
            fn type_ident() -> &'static str {
                stringify!($ty)
            }
        }

        impl Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| TypeInfo::Opaque(OpaqueInfo::new::<Self>()))
            }
        }

        impl Reflect for $ty {
            fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
                *self = value.take::<Self>()?;
                Ok(())
            }

            #[inline]
            fn reflect_kind(&self) -> ReflectKind {
                ReflectKind::Opaque
            }

            #[inline]
            fn reflect_ref(&self) -> ReflectRef<'_> {
                ReflectRef::Opaque(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> ReflectMut<'_> {
                ReflectMut::Opaque(self)
            }

            #[inline]
            fn reflect_clone(&self) -> Result<Box<dyn Reflect>, ReflectCloneError> {
                Ok(Box::new(*self))
            }

            #[inline]
            fn scalar(&self) -> Option<Scalar<'_>> {
                Some(Scalar::$variant(*self))
            }
        }
    };
}

impl_reflect_scalar!(bool, Bool);
impl_reflect_scalar!(i8, I8);
impl_reflect_scalar!(i16, I16);
impl_reflect_scalar!(i32, I32);
impl_reflect_scalar!(i64, I64);
impl_reflect_scalar!(u8, U8);
impl_reflect_scalar!(u16, U16);
impl_reflect_scalar!(u32, U32);
impl_reflect_scalar!(u64, U64);
impl_reflect_scalar!(f32, F32);
impl_reflect_scalar!(f64, F64);
impl_reflect_scalar!(char, Char);

// -----------------------------------------------------------------------------
// String

impl TypePath for String {
    #[inline]
    fn type_path() -> &'static str {
        "alloc::string::String"
    }

    #[inline]
    fn type_name() -> &'static str {
        "String"
    }

    #[inline]
    fn type_ident() -> &'static str {
        "String"
    }

    #[inline]
    fn module_path() -> Option<&'static str> {
        Some("alloc::string")
    }
}

impl Typed for String {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| TypeInfo::Opaque(OpaqueInfo::new::<Self>()))
    }
}

impl Reflect for String {
    fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        *self = value.take::<Self>()?;
        Ok(())
    }

    #[inline]
    fn reflect_kind(&self) -> ReflectKind {
        ReflectKind::Opaque
    }

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Opaque(self)
    }

    #[inline]
    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Opaque(self)
    }

    #[inline]
    fn reflect_clone(&self) -> Result<Box<dyn Reflect>, ReflectCloneError> {
        Ok(Box::new(self.clone()))
    }

    #[inline]
    fn scalar(&self) -> Option<Scalar<'_>> {
        Some(Scalar::Str(self))
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use crate::info::{ReflectKind, Typed};
    use crate::reflection::Scalar;

    #[test]
    fn scalar_forms() {
        assert!(matches!(true.scalar(), Some(Scalar::Bool(true))));
        assert!(matches!(2.5_f32.scalar(), Some(Scalar::F32(v)) if v == 2.5));
        assert!(matches!("hi".to_string().scalar(), Some(Scalar::Str("hi"))));
    }

    #[test]
    fn scalars_are_opaque() {
        assert_eq!(<u64 as Typed>::type_info().kind(), ReflectKind::Opaque);
        assert_eq!(String::type_info().kind(), ReflectKind::Opaque);
    }

    #[test]
    fn set_rejects_mismatched_type() {
        let mut x = 1_i32;
        assert!(x.set(2_i32.into_boxed_reflect()).is_ok());
        assert!(x.set(2_u32.into_boxed_reflect()).is_err());
        assert_eq!(x, 2);
    }
}
