//! Containers for static storage of type information.
//!
//! Used by [`Typed`](crate::info::Typed) impls: non-generic types store their
//! [`TypeInfo`] in a [`NonGenericTypeInfoCell`] (a plain `OnceLock`), while
//! generic types share one `static CELL` across every instantiation and so
//! need a `TypeId`-keyed table behind a lock ([`GenericTypeInfoCell`], and
//! [`GenericTypePathCell`] for lazily-built path strings).

use core::any::{Any, TypeId};
use std::sync::OnceLock;

use parking_lot::RwLock;

use crate::hash::{TypeIdMap, type_id_map};
use crate::info::TypeInfo;

mod sealed {
    use super::TypeInfo;
    pub trait TypedProperty: 'static {}

    impl TypedProperty for String {}
    impl TypedProperty for TypeInfo {}
}

use sealed::TypedProperty;

// -----------------------------------------------------------------------------
// NonGenericTypeCell

/// Static storage of type information for a non-generic type.
///
/// There is no `NonGenericTypePathCell` because a non-generic path is a
/// string literal.
pub struct NonGenericTypeCell<T: TypedProperty>(OnceLock<T>);

/// Static [`TypeInfo`] storage for a non-generic type.
///
/// # Examples
///
/// ```ignore
/// impl Typed for Health {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
///         CELL.get_or_init(|| {
///             TypeInfo::Struct(StructInfo::new::<Self>(&[
///                 FieldInfo::new::<i32>("current", FieldFlags::new()),
///             ]))
///         })
///     }
/// }
/// ```
pub type NonGenericTypeInfoCell = NonGenericTypeCell<TypeInfo>;

impl<T: TypedProperty> NonGenericTypeCell<T> {
    /// Creates an empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored value, initializing it from `f` on first access.
    #[inline]
    pub fn get_or_init<F>(&self, f: F) -> &T
    where
        F: FnOnce() -> T,
    {
        self.0.get_or_init(f)
    }
}

// -----------------------------------------------------------------------------
// GenericTypeCell

/// Static storage of type information for a generic type.
///
/// A `static CELL` inside a generic function is shared by every
/// instantiation, so entries are keyed by [`TypeId`].
pub struct GenericTypeCell<T: TypedProperty>(RwLock<TypeIdMap<&'static T>>);

/// Static [`TypeInfo`] storage for a generic type.
///
/// # Examples
///
/// ```ignore
/// impl<T: Reflect + Typed> Typed for Vec<T> {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
///         CELL.get_or_insert::<Self>(|| TypeInfo::List(ListInfo::new::<Self, T>()))
///     }
/// }
/// ```
pub type GenericTypeInfoCell = GenericTypeCell<TypeInfo>;

/// Static path-string storage for a generic type.
///
/// # Examples
///
/// ```ignore
/// impl<T: TypePath> TypePath for Wrapper<T> {
///     fn type_path() -> &'static str {
///         static CELL: GenericTypePathCell = GenericTypePathCell::new();
///         CELL.get_or_insert::<Self>(|| format!("demo::Wrapper<{}>", T::type_path()))
///     }
///     // ...
/// }
/// ```
pub type GenericTypePathCell = GenericTypeCell<String>;

impl<T: TypedProperty> GenericTypeCell<T> {
    /// Creates an empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(type_id_map()))
    }

    /// Returns the value stored for type `G`, initializing it from `f` on
    /// first access.
    #[inline(always)]
    pub fn get_or_insert<G: Any + ?Sized>(&self, f: impl FnOnce() -> T) -> &T {
        // Separate to reduce monomorphized code size.
        self.get_or_insert_by_type_id(TypeId::of::<G>(), f)
    }

    #[inline(never)]
    fn get_or_insert_by_type_id(&self, type_id: TypeId, f: impl FnOnce() -> T) -> &T {
        match self.get_by_type_id(type_id) {
            Some(value) => value,
            None => self.insert_by_type_id(type_id, f()),
        }
    }

    #[inline(never)]
    fn get_by_type_id(&self, type_id: TypeId) -> Option<&'static T> {
        self.0.read().get(&type_id).copied()
    }

    #[inline(never)]
    fn insert_by_type_id(&self, type_id: TypeId, value: T) -> &'static T {
        *self
            .0
            .write()
            .entry(type_id)
            .or_insert_with(|| Box::leak(Box::new(value)))
    }
}
