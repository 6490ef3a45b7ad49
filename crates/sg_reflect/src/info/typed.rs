use crate::Reflect;
use crate::info::TypeInfo;

// -----------------------------------------------------------------------------
// Typed

/// A static accessor to a type's [`TypeInfo`].
///
/// Implemented by the `#[derive(Reflect)]` macro and by the built-in
/// reflection impls. The first call builds the info and leaks it; every
/// later call returns the same `&'static` reference.
///
/// # Examples
///
/// ```rust
/// use sg_reflect::info::Typed;
///
/// let info = <String as Typed>::type_info();
/// assert!(info.ty().is::<String>());
/// ```
pub trait Typed: Reflect {
    /// Returns the compile-time info for this type.
    fn type_info() -> &'static TypeInfo;
}

// -----------------------------------------------------------------------------
// DynamicTyped

/// A dynamic, object-safe mirror of [`Typed`].
///
/// Automatically implemented for every `T: Typed`, so `dyn Reflect` values
/// can surface their own info without knowing the concrete type.
pub trait DynamicTyped {
    /// Returns the compile-time info for the underlying type.
    ///
    /// Unlike [`Typed::type_info`] this takes `self`, which makes it
    /// callable on trait objects.
    fn reflect_type_info(&self) -> &'static TypeInfo;
}

impl<T: Typed> DynamicTyped for T {
    #[inline]
    fn reflect_type_info(&self) -> &'static TypeInfo {
        Self::type_info()
    }
}
