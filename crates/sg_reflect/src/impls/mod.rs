//! Reflection impls for standard types, plus the static info cells.
//!
//! Covered out of the box: the scalar primitives and `String` (opaque),
//! `Vec<T>` (list), `[T; N]` (array), `HashMap<K, V, S>` (map) and
//! `Option<T>` (nullable).

mod array;
mod cell;
mod hash_map;
mod option;
mod scalars;
mod vec;

pub use cell::{
    GenericTypeCell, GenericTypeInfoCell, GenericTypePathCell, NonGenericTypeCell,
    NonGenericTypeInfoCell,
};
