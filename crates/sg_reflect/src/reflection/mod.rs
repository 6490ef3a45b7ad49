//! The [`Reflect`] trait and the scalar value form.

mod reflect;
mod scalar;

pub use reflect::Reflect;
pub use scalar::Scalar;

pub(crate) use reflect::impl_reflect_cast_fn;
