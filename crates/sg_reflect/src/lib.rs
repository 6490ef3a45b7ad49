#![doc = include_str!("../README.md")]

// -----------------------------------------------------------------------------
// Extern Self

// `#[derive(Reflect)]` emits absolute `::sg_reflect::..` paths; this alias
// lets the derive be used from inside this crate as well (mostly in tests).
extern crate self as sg_reflect;

// -----------------------------------------------------------------------------
// Modules

mod reflection;

pub mod buffer;
pub mod component;
pub mod hash;
pub mod impls;
pub mod info;
pub mod ops;
pub mod registry;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use reflection::{Reflect, Scalar};
pub use sg_reflect_derive as derive;
