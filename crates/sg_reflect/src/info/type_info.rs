use core::any::TypeId;
use core::fmt;

use thiserror::Error;

use crate::info::{ArrayInfo, ListInfo, MapInfo, NullableInfo, OpaqueInfo, StructInfo, Type};

// -----------------------------------------------------------------------------
// ReflectKind

/// An enumeration of the shapes a reflected type can take.
///
/// Every reflected type belongs to exactly one kind; the kind decides which
/// operation trait ([`Struct`](crate::ops::Struct), [`List`](crate::ops::List),
/// and so on) the value exposes during traversal.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ReflectKind {
    /// A named-field aggregate.
    Struct,
    /// A growable, ordered container.
    List,
    /// A fixed-capacity, ordered container.
    Array,
    /// A keyed container.
    Map,
    /// A slot holding either a value or nothing.
    Nullable,
    /// A shared handle to a polymorphic component.
    Component,
    /// A leaf value with no visible structure.
    Opaque,
}

impl fmt::Display for ReflectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Struct => "struct",
            Self::List => "list",
            Self::Array => "array",
            Self::Map => "map",
            Self::Nullable => "nullable",
            Self::Component => "component",
            Self::Opaque => "opaque",
        };
        f.write_str(name)
    }
}

// -----------------------------------------------------------------------------
// ReflectKindError

/// The error raised when casting [`TypeInfo`] (or a reflected reference) to a
/// kind it does not have.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("kind mismatch: expected {expected}, received {received}")]
pub struct ReflectKindError {
    /// The kind the cast asked for.
    pub expected: ReflectKind,
    /// The kind the value actually has.
    pub received: ReflectKind,
}

// -----------------------------------------------------------------------------
// TypeInfo

macro_rules! impl_cast_method {
    ($name:ident : $kind:ident => $info:ty) => {
        #[doc = concat!("Attempts a cast to [`", stringify!($info), "`].")]
        #[doc = ""]
        #[doc = concat!(
            "Errors with the actual kind if `self` is not [`TypeInfo::",
            stringify!($kind),
            "`]."
        )]
        pub fn $name(&self) -> Result<&$info, ReflectKindError> {
            match self {
                Self::$kind(info) => Ok(info),
                _ => Err(ReflectKindError {
                    expected: ReflectKind::$kind,
                    received: self.kind(),
                }),
            }
        }
    };
}

/// Compile-time type information for a reflected type.
///
/// Obtained through [`Typed::type_info`] for a concrete type, or through
/// [`DynamicTyped::reflect_type_info`] for a `dyn` value. Construction
/// happens once per type; subsequent calls return the same `&'static`
/// reference.
///
/// # Examples
///
/// ```rust
/// use sg_reflect::info::{ReflectKind, Typed};
///
/// assert_eq!(<Vec<u8> as Typed>::type_info().kind(), ReflectKind::List);
/// assert_eq!(<f32 as Typed>::type_info().kind(), ReflectKind::Opaque);
/// ```
#[derive(Clone, Debug)]
pub enum TypeInfo {
    /// Type info for a named-field aggregate.
    Struct(StructInfo),
    /// Type info for a growable, ordered container.
    List(ListInfo),
    /// Type info for a fixed-capacity container.
    Array(ArrayInfo),
    /// Type info for a keyed container.
    Map(MapInfo),
    /// Type info for an optional slot.
    Nullable(NullableInfo),
    /// Type info for a shared component handle.
    ///
    /// The handle itself has no static structure; the component behind it is
    /// described by its own [`StructInfo`], reachable only through the value.
    Component(OpaqueInfo),
    /// Type info for a structureless leaf.
    Opaque(OpaqueInfo),
}

impl TypeInfo {
    /// Returns the underlying [`Type`].
    pub fn ty(&self) -> &Type {
        match self {
            Self::Struct(info) => info.ty(),
            Self::List(info) => info.ty(),
            Self::Array(info) => info.ty(),
            Self::Map(info) => info.ty(),
            Self::Nullable(info) => info.ty(),
            Self::Component(info) => info.ty(),
            Self::Opaque(info) => info.ty(),
        }
    }

    /// Returns the [`TypeId`] of this type.
    pub fn ty_id(&self) -> TypeId {
        self.ty().id()
    }

    /// Returns the stable path of this type.
    pub fn type_path(&self) -> &'static str {
        self.ty().path()
    }

    /// Returns the [`ReflectKind`] of this type.
    pub fn kind(&self) -> ReflectKind {
        match self {
            Self::Struct(_) => ReflectKind::Struct,
            Self::List(_) => ReflectKind::List,
            Self::Array(_) => ReflectKind::Array,
            Self::Map(_) => ReflectKind::Map,
            Self::Nullable(_) => ReflectKind::Nullable,
            Self::Component(_) => ReflectKind::Component,
            Self::Opaque(_) => ReflectKind::Opaque,
        }
    }

    impl_cast_method!(as_struct: Struct => StructInfo);
    impl_cast_method!(as_list: List => ListInfo);
    impl_cast_method!(as_array: Array => ArrayInfo);
    impl_cast_method!(as_map: Map => MapInfo);
    impl_cast_method!(as_nullable: Nullable => NullableInfo);
    impl_cast_method!(as_component: Component => OpaqueInfo);
    impl_cast_method!(as_opaque: Opaque => OpaqueInfo);
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::*;
    use crate::info::Typed;

    #[test]
    fn cast_reports_both_kinds() {
        let info = <Vec<i32> as Typed>::type_info();
        let err = info.as_map().unwrap_err();
        assert_eq!(err.expected, ReflectKind::Map);
        assert_eq!(err.received, ReflectKind::List);
        assert!(info.as_list().is_ok());
    }
}
