use core::any::{Any, TypeId};
use core::fmt;
use core::hash::{Hash, Hasher};

// -----------------------------------------------------------------------------
// TypePath

/// A trait for obtaining stable type names.
///
/// Unlike [`core::any::type_name`], the returned strings are stable across
/// compiler versions and never carry a leading `::`, which makes them safe
/// to embed in serialized documents.
///
/// # Examples
///
/// ```
/// use sg_reflect::info::TypePath;
///
/// assert_eq!(<String as TypePath>::type_path(), "alloc::string::String");
/// assert_eq!(<String as TypePath>::type_ident(), "String");
/// ```
pub trait TypePath: 'static {
    /// The full, unique path of the type (e.g. `my_game::scene::Transform`).
    fn type_path() -> &'static str;

    /// The name without module path, including generics (may be ambiguous).
    fn type_name() -> &'static str;

    /// The bare identifier, without module path or generics.
    fn type_ident() -> &'static str;

    /// The module path of the type, if it has one.
    fn module_path() -> Option<&'static str> {
        None
    }
}

// -----------------------------------------------------------------------------
// DynamicTypePath

/// Dynamic dispatch for [`TypePath`].
///
/// Auto-implemented for every type that implements [`TypePath`].
pub trait DynamicTypePath {
    /// See [`TypePath::type_path`].
    fn reflect_type_path(&self) -> &'static str;

    /// See [`TypePath::type_name`].
    fn reflect_type_name(&self) -> &'static str;
}

impl<T: TypePath> DynamicTypePath for T {
    #[inline]
    fn reflect_type_path(&self) -> &'static str {
        Self::type_path()
    }

    #[inline]
    fn reflect_type_name(&self) -> &'static str {
        Self::type_name()
    }
}

// -----------------------------------------------------------------------------
// TypePathTable

/// Function pointers to a single type's [`TypePath`] implementation.
///
/// Path strings for generic types are built lazily on first access;
/// storing function pointers delays that work until someone asks.
#[derive(Clone, Copy)]
pub struct TypePathTable {
    path: fn() -> &'static str,
    name: fn() -> &'static str,
    ident: fn() -> &'static str,
}

impl TypePathTable {
    /// Creates a table for the given type.
    #[inline]
    pub const fn of<T: TypePath + ?Sized>() -> Self {
        Self {
            path: T::type_path,
            name: T::type_name,
            ident: T::type_ident,
        }
    }

    /// See [`TypePath::type_path`].
    #[inline]
    pub fn path(&self) -> &'static str {
        (self.path)()
    }

    /// See [`TypePath::type_name`].
    #[inline]
    pub fn name(&self) -> &'static str {
        (self.name)()
    }

    /// See [`TypePath::type_ident`].
    #[inline]
    pub fn ident(&self) -> &'static str {
        (self.ident)()
    }
}

impl fmt::Debug for TypePathTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypePathTable")
            .field("path", &self.path())
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Type

/// The identity of a type: its [`TypeId`] plus its [`TypePathTable`].
///
/// Equality and hashing go through the [`TypeId`] only.
#[derive(Clone, Copy, Debug)]
pub struct Type {
    id: TypeId,
    path_table: TypePathTable,
}

impl Type {
    /// Creates the [`Type`] of `T`.
    #[inline]
    pub const fn of<T: TypePath + ?Sized>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            path_table: TypePathTable::of::<T>(),
        }
    }

    /// Returns the [`TypeId`].
    #[inline]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Check if the given type matches this one.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }

    /// See [`TypePath::type_path`].
    #[inline]
    pub fn path(&self) -> &'static str {
        self.path_table.path()
    }

    /// See [`TypePath::type_name`].
    #[inline]
    pub fn name(&self) -> &'static str {
        self.path_table.name()
    }

    /// See [`TypePath::type_ident`].
    #[inline]
    pub fn ident(&self) -> &'static str {
        self.path_table.ident()
    }
}

impl PartialEq for Type {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Type {}

impl Hash for Type {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.path())
    }
}

// -----------------------------------------------------------------------------
// Auxiliary macro

/// Implements the `ty`-delegating accessors shared by every info kind.
macro_rules! impl_type_fn {
    ($field:ident) => {
        /// Returns the underlying [`Type`](crate::info::Type).
        #[inline]
        pub const fn ty(&self) -> &$crate::info::Type {
            &self.$field
        }

        /// Returns the [`TypeId`](core::any::TypeId) of this type.
        #[inline]
        pub const fn ty_id(&self) -> ::core::any::TypeId {
            self.$field.id()
        }

        /// Check if the given type matches this one.
        #[inline]
        pub fn type_is<T: ::core::any::Any>(&self) -> bool {
            self.$field.is::<T>()
        }

        /// Returns the full type path.
        #[inline]
        pub fn type_path(&self) -> &'static str {
            self.$field.path()
        }
    };
}

pub(crate) use impl_type_fn;

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::Type;

    #[test]
    fn type_identity() {
        let a = Type::of::<u32>();
        let b = Type::of::<u32>();
        let c = Type::of::<i32>();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.path(), "u32");
        assert!(a.is::<u32>());
    }
}
