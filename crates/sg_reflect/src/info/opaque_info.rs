use crate::info::{Type, TypePath, impl_type_fn};

// -----------------------------------------------------------------------------
// OpaqueInfo

/// A container for compile-time info of types with no visible structure:
/// scalars, strings and other leaf values.
///
/// Also used for [`ComponentRef`](crate::component::ComponentRef), whose
/// inner structure is reached through the handle, not through type info.
#[derive(Clone, Debug)]
pub struct OpaqueInfo {
    ty: Type,
}

impl OpaqueInfo {
    impl_type_fn!(ty);

    /// Creates a new [`OpaqueInfo`].
    #[inline]
    pub const fn new<T: TypePath + ?Sized>() -> Self {
        Self {
            ty: Type::of::<T>(),
        }
    }
}
