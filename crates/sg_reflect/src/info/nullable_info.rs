use core::any::{Any, TypeId};

use crate::Reflect;
use crate::info::{Type, TypeInfo, TypePath, Typed, impl_type_fn};
use crate::ops::Nullable;

// -----------------------------------------------------------------------------
// NullableInfo

/// A container for compile-time nullable-slot info (`Option<T>`).
///
/// # Examples
///
/// ```rust
/// # use core::any::TypeId;
/// use sg_reflect::info::Typed;
///
/// let info = <Option<f32> as Typed>::type_info().as_nullable().unwrap();
///
/// assert_eq!(info.item_id(), TypeId::of::<f32>());
/// ```
#[derive(Clone, Debug)]
pub struct NullableInfo {
    ty: Type,
    item_id: TypeId,
    item_info: fn() -> &'static TypeInfo,
}

impl NullableInfo {
    impl_type_fn!(ty);

    /// Creates a new [`NullableInfo`].
    #[inline]
    pub const fn new<TNullable: Nullable + TypePath, TItem: Reflect + Typed>() -> Self {
        Self {
            ty: Type::of::<TNullable>(),
            item_id: TypeId::of::<TItem>(),
            item_info: TItem::type_info,
        }
    }

    /// Returns the [`TypeId`] of the contained value.
    #[inline]
    pub const fn item_id(&self) -> TypeId {
        self.item_id
    }

    /// Returns whether the item type is `T`.
    #[inline]
    pub fn item_is<T: Any>(&self) -> bool {
        self.item_id == TypeId::of::<T>()
    }

    /// Returns the [`TypeInfo`] of the contained value.
    #[inline]
    pub fn item_info(&self) -> &'static TypeInfo {
        (self.item_info)()
    }
}
