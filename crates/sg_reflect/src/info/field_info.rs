use core::any::{Any, TypeId};

use crate::info::{FieldFlags, TypeInfo, Typed};

// -----------------------------------------------------------------------------
// FieldInfo

/// Information for a single named struct field.
///
/// Besides the declared type, every field carries its [`FieldFlags`], which
/// drive field inclusion during walks, serialization and copying.
///
/// # Examples
///
/// ```
/// use sg_reflect::derive::Reflect;
/// use sg_reflect::info::Typed;
///
/// #[derive(Reflect, Clone, Default)]
/// struct Foo {
///     #[field(persist = 1)]
///     field_a: f32,
/// }
///
/// let info = Foo::type_info().as_struct().unwrap();
/// let field = info.field_at(0).unwrap();
///
/// assert!(field.type_is::<f32>());
/// assert_eq!(field.name(), "field_a");
/// assert_eq!(field.persist_id(), Some(1));
/// ```
#[derive(Clone, Debug)]
pub struct FieldInfo {
    ty_id: TypeId,
    name: &'static str,
    // `TypeInfo` is created on first access; using a function pointer delays it.
    type_info: fn() -> &'static TypeInfo,
    flags: FieldFlags,
}

impl FieldInfo {
    /// Creates a new [`FieldInfo`] for the given field `name` and type `T`.
    #[inline]
    pub const fn new<T: Typed>(name: &'static str, flags: FieldFlags) -> Self {
        Self {
            name,
            type_info: T::type_info,
            ty_id: TypeId::of::<T>(),
            flags,
        }
    }

    /// Returns the declared `TypeId`.
    #[inline]
    pub const fn ty_id(&self) -> TypeId {
        self.ty_id
    }

    /// Check if the given type matches this one.
    #[inline]
    pub fn type_is<T: Any>(&self) -> bool {
        self.ty_id == TypeId::of::<T>()
    }

    /// Returns the field name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the field's declared [`TypeInfo`].
    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }

    /// Returns the field's [`FieldFlags`].
    #[inline]
    pub const fn flags(&self) -> &FieldFlags {
        &self.flags
    }

    /// Returns the persistence id, if the field carries one.
    #[inline]
    pub const fn persist_id(&self) -> Option<u16> {
        self.flags.persist
    }
}
