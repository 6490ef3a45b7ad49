//! Compile-time type information.
//!
//! Every reflected type carries a `&'static` [`TypeInfo`] describing its
//! shape: the fields of a struct, the item type of a list, the key and value
//! types of a map, and so on. The info is reached statically through
//! [`Typed`] or dynamically through [`DynamicTyped`], and never requires a
//! value of the type in hand.
//!
//! Struct fields additionally carry [`FieldFlags`], which decide whether a
//! field participates in a given traversal via an [`InclusionMode`].

mod array_info;
mod field_info;
mod list_info;
mod map_info;
mod mode;
mod nullable_info;
mod opaque_info;
mod struct_info;
mod type_info;
mod type_path;
mod typed;

pub use array_info::ArrayInfo;
pub use field_info::FieldInfo;
pub use list_info::ListInfo;
pub use map_info::MapInfo;
pub use mode::{FieldFlags, InclusionMode};
pub use nullable_info::NullableInfo;
pub use opaque_info::OpaqueInfo;
pub use struct_info::StructInfo;
pub use type_info::{ReflectKind, ReflectKindError, TypeInfo};
pub use type_path::{DynamicTypePath, Type, TypePath, TypePathTable};
pub use typed::{DynamicTyped, Typed};

pub(crate) use type_path::impl_type_fn;
