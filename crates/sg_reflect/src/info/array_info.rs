use core::any::{Any, TypeId};

use crate::Reflect;
use crate::info::{Type, TypeInfo, TypePath, Typed, impl_type_fn};
use crate::ops::Array;

// -----------------------------------------------------------------------------
// ArrayInfo

/// A container for compile-time fixed-size array info.
///
/// # Examples
///
/// ```rust
/// # use core::any::TypeId;
/// use sg_reflect::info::Typed;
///
/// let info = <[i32; 3] as Typed>::type_info().as_array().unwrap();
///
/// assert_eq!(info.item_id(), TypeId::of::<i32>());
/// assert_eq!(info.capacity(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct ArrayInfo {
    ty: Type,
    item_id: TypeId,
    // `TypeInfo` is created on the first visit, use function pointers to delay it.
    item_info: fn() -> &'static TypeInfo,
    capacity: usize,
}

impl ArrayInfo {
    impl_type_fn!(ty);

    /// Creates a new [`ArrayInfo`].
    #[inline]
    pub const fn new<TArray: Array + TypePath, TItem: Reflect + Typed>(capacity: usize) -> Self {
        Self {
            ty: Type::of::<TArray>(),
            item_id: TypeId::of::<TItem>(),
            item_info: TItem::type_info,
            capacity,
        }
    }

    /// Returns the [`TypeId`] of array items.
    #[inline]
    pub const fn item_id(&self) -> TypeId {
        self.item_id
    }

    /// Returns whether the item type is `T`.
    #[inline]
    pub fn item_is<T: Any>(&self) -> bool {
        self.item_id == TypeId::of::<T>()
    }

    /// Returns the [`TypeInfo`] of array items.
    #[inline]
    pub fn item_info(&self) -> &'static TypeInfo {
        (self.item_info)()
    }

    /// Returns the fixed item count.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}
