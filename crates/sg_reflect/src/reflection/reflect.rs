use core::any::{Any, TypeId};
use core::fmt;

use crate::info::{DynamicTypePath, DynamicTyped, ReflectKind};
use crate::ops::{ReflectCloneError, ReflectMut, ReflectRef};
use crate::reflection::Scalar;

// -----------------------------------------------------------------------------
// Reflect

/// The core trait of the reflection system.
///
/// A `Reflect` value can report its own [`TypeInfo`], expose its structure
/// through a kind-dispatched view ([`reflect_ref`] / [`reflect_mut`]), be
/// cloned, overwritten and downcast without its concrete type in scope.
///
/// Implement it with [`#[derive(Reflect)]`](crate::derive::Reflect) for your
/// own structs; the crate provides impls for scalars, `String`, `Vec<T>`,
/// `[T; N]`, `HashMap<K, V>`, `Option<T>` and the component handle.
///
/// # Examples
///
/// ```
/// use sg_reflect::{Reflect, info::ReflectKind};
///
/// let value: Box<dyn Reflect> = 3_i32.into_boxed_reflect();
///
/// assert_eq!(value.reflect_kind(), ReflectKind::Opaque);
/// assert_eq!(value.downcast_ref::<i32>(), Some(&3));
/// ```
///
/// [`TypeInfo`]: crate::info::TypeInfo
/// [`reflect_ref`]: Reflect::reflect_ref
/// [`reflect_mut`]: Reflect::reflect_mut
pub trait Reflect: DynamicTypePath + DynamicTyped + Any {
    /// Casts this value to a fully-reflected reference.
    #[inline(always)]
    fn as_reflect(&self) -> &dyn Reflect
    where
        Self: Sized,
    {
        self
    }

    /// Casts this value to a fully-reflected mutable reference.
    #[inline(always)]
    fn as_reflect_mut(&mut self) -> &mut dyn Reflect
    where
        Self: Sized,
    {
        self
    }

    /// Casts this box to a boxed, fully-reflected value.
    #[inline(always)]
    fn into_reflect(self: Box<Self>) -> Box<dyn Reflect>
    where
        Self: Sized,
    {
        self
    }

    /// Boxes this value as a fully-reflected value.
    ///
    /// # Examples
    ///
    /// ```
    /// use sg_reflect::Reflect;
    ///
    /// let r = 32.into_boxed_reflect();
    /// // Equal to this:
    /// // let r = Box::new(32) as Box<dyn Reflect>;
    /// ```
    #[inline(always)]
    fn into_boxed_reflect(self) -> Box<dyn Reflect>
    where
        Self: Sized,
    {
        Box::new(self)
    }

    /// Returns the [`TypeId`] of the underlying type.
    ///
    /// `Box<dyn Reflect>::type_id` reports the id of the box itself, which is
    /// rarely what callers want; this method always reports the concrete type.
    #[inline]
    fn ty_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    /// Performs a type-checked assignment of a reflected value to this value.
    ///
    /// Returns `Err(value)`, handing the value back unchanged, if its type
    /// differs from `Self`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sg_reflect::Reflect;
    ///
    /// let mut x = 1_i32;
    /// x.set(5_i32.into_boxed_reflect()).unwrap();
    /// assert_eq!(x, 5);
    /// ```
    fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;

    /// Returns the [`ReflectKind`] of this value.
    fn reflect_kind(&self) -> ReflectKind;

    /// Returns an immutable, kind-dispatched view of this value.
    ///
    /// # Examples
    ///
    /// ```
    /// use sg_reflect::Reflect;
    ///
    /// let vec = vec![1, 2, 3];
    /// let list = vec.reflect_ref().as_list().unwrap();
    /// assert_eq!(list.len(), 3);
    /// ```
    fn reflect_ref(&self) -> ReflectRef<'_>;

    /// Returns a mutable, kind-dispatched view of this value.
    fn reflect_mut(&mut self) -> ReflectMut<'_>;

    /// Attempts to clone the underlying value.
    ///
    /// The returned box holds the same concrete type. Component handles clone
    /// as aliases of the same shared cell, never as new components.
    fn reflect_clone(&self) -> Result<Box<dyn Reflect>, ReflectCloneError>;

    /// Returns the scalar form of this value, if it has one.
    ///
    /// Only opaque leaf types (numbers, booleans, strings) yield a scalar;
    /// everything else returns `None`.
    #[inline]
    fn scalar(&self) -> Option<Scalar<'_>> {
        None
    }
}

impl dyn Reflect {
    /// Returns `true` if the underlying value is of type `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sg_reflect::Reflect;
    ///
    /// let x: Box<dyn Reflect> = 10.into_boxed_reflect();
    /// assert!(x.is::<i32>());
    /// ```
    #[inline(always)]
    pub fn is<T: Any>(&self) -> bool {
        self.ty_id() == TypeId::of::<T>()
    }

    /// Downcasts the value to type `T` by reference.
    ///
    /// Returns `None` if the underlying value is not of type `T`.
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self)
    }

    /// Downcasts the value to type `T` by mutable reference.
    ///
    /// Returns `None` if the underlying value is not of type `T`.
    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        <dyn Any>::downcast_mut(self)
    }

    /// Downcasts the value to type `T`, consuming the box.
    ///
    /// Returns `Err(self)` if the underlying value is not of type `T`.
    #[inline]
    pub fn downcast<T: Any>(self: Box<dyn Reflect>) -> Result<Box<T>, Box<dyn Reflect>> {
        if self.is::<T>() {
            #[expect(unsafe_code, reason = "type is already checked")]
            Ok(unsafe { <Box<dyn Any>>::downcast::<T>(self).unwrap_unchecked() })
        } else {
            Err(self)
        }
    }

    /// Downcasts the value to type `T`, unboxing and consuming the box.
    ///
    /// Returns `Err(self)` if the underlying value is not of type `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sg_reflect::Reflect;
    ///
    /// let x: Box<dyn Reflect> = 10.into_boxed_reflect();
    /// assert_eq!(x.take::<i32>().unwrap(), 10);
    /// ```
    #[inline]
    pub fn take<T: Any>(self: Box<dyn Reflect>) -> Result<T, Box<dyn Reflect>> {
        self.downcast::<T>().map(|boxed| *boxed)
    }
}

impl fmt::Debug for dyn Reflect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Reflect({})", self.reflect_type_path())
    }
}

// -----------------------------------------------------------------------------
// Auxiliary macro

/// Implements the kind-dispatch methods shared by every non-opaque impl.
macro_rules! impl_reflect_cast_fn {
    ($kind:ident) => {
        fn set(
            &mut self,
            value: ::std::boxed::Box<dyn $crate::Reflect>,
        ) -> Result<(), ::std::boxed::Box<dyn $crate::Reflect>> {
            *self = value.take::<Self>()?;
            Ok(())
        }

        #[inline]
        fn reflect_kind(&self) -> $crate::info::ReflectKind {
            $crate::info::ReflectKind::$kind
        }

        #[inline]
        fn reflect_ref(&self) -> $crate::ops::ReflectRef<'_> {
            $crate::ops::ReflectRef::$kind(self)
        }

        #[inline]
        fn reflect_mut(&mut self) -> $crate::ops::ReflectMut<'_> {
            $crate::ops::ReflectMut::$kind(self)
        }
    };
}

pub(crate) use impl_reflect_cast_fn;
