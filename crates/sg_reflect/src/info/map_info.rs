use core::any::{Any, TypeId};

use crate::Reflect;
use crate::info::{Type, TypeInfo, TypePath, Typed, impl_type_fn};
use crate::ops::Map;

// -----------------------------------------------------------------------------
// MapInfo

/// A container for compile-time map-like info.
///
/// Maps carry exactly two parameter descriptors, key and value; the arity
/// is enforced by this constructor's signature.
///
/// # Examples
///
/// ```rust
/// # use core::any::TypeId;
/// use sg_reflect::hash::HashMap;
/// use sg_reflect::info::Typed;
///
/// let info = <HashMap<String, i32> as Typed>::type_info().as_map().unwrap();
///
/// assert_eq!(info.key_id(), TypeId::of::<String>());
/// assert_eq!(info.value_id(), TypeId::of::<i32>());
/// ```
#[derive(Clone, Debug)]
pub struct MapInfo {
    ty: Type,
    key_id: TypeId,
    key_info: fn() -> &'static TypeInfo,
    value_id: TypeId,
    value_info: fn() -> &'static TypeInfo,
}

impl MapInfo {
    impl_type_fn!(ty);

    /// Creates a new [`MapInfo`].
    #[inline]
    pub const fn new<TMap, TKey, TValue>() -> Self
    where
        TMap: Map + TypePath,
        TKey: Reflect + Typed,
        TValue: Reflect + Typed,
    {
        Self {
            ty: Type::of::<TMap>(),
            key_id: TypeId::of::<TKey>(),
            key_info: TKey::type_info,
            value_id: TypeId::of::<TValue>(),
            value_info: TValue::type_info,
        }
    }

    /// Returns the [`TypeId`] of map keys.
    #[inline]
    pub const fn key_id(&self) -> TypeId {
        self.key_id
    }

    /// Returns whether the key type is `T`.
    #[inline]
    pub fn key_is<T: Any>(&self) -> bool {
        self.key_id == TypeId::of::<T>()
    }

    /// Returns the [`TypeInfo`] of map keys.
    #[inline]
    pub fn key_info(&self) -> &'static TypeInfo {
        (self.key_info)()
    }

    /// Returns the [`TypeId`] of map values.
    #[inline]
    pub const fn value_id(&self) -> TypeId {
        self.value_id
    }

    /// Returns whether the value type is `T`.
    #[inline]
    pub fn value_is<T: Any>(&self) -> bool {
        self.value_id == TypeId::of::<T>()
    }

    /// Returns the [`TypeInfo`] of map values.
    #[inline]
    pub fn value_info(&self) -> &'static TypeInfo {
        (self.value_info)()
    }
}
