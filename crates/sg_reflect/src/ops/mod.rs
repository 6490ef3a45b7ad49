//! Kind-specific operation traits for reflected values.
//!
//! Each [`ReflectKind`](crate::info::ReflectKind) with visible structure has a
//! matching subtrait of [`Reflect`](crate::Reflect) providing type-erased
//! access to that structure:
//!
//! - [`Struct`]: named-field aggregates.
//! - [`List`]: growable, ordered containers (e.g. `Vec<T>`).
//! - [`Array`]: fixed-capacity containers (e.g. `[T; N]`).
//! - [`Map`]: keyed containers (e.g. `HashMap<K, V>`).
//! - [`Nullable`]: optional slots (`Option<T>`).
//!
//! [`ReflectRef`] and [`ReflectMut`] dispatch a `dyn Reflect` value to the
//! matching trait; components are surfaced as their shared
//! [`ComponentRef`](crate::component::ComponentRef) handle instead of a trait.

mod array_ops;
mod clone_error;
mod kind;
mod list_ops;
mod map_ops;
mod nullable_ops;
mod struct_ops;

pub use clone_error::ReflectCloneError;
pub use kind::{ReflectMut, ReflectRef};

pub use array_ops::{Array, ArrayItemIter};
pub use list_ops::{List, ListItemIter};
pub use map_ops::{Map, MapEntryIter};
pub use nullable_ops::Nullable;
pub use struct_ops::{Struct, StructFieldIter};
