use thiserror::Error;

use sg_reflect::info::{ReflectKind, ReflectKindError};
use sg_reflect::ops::ReflectCloneError;

// -----------------------------------------------------------------------------
// GraphError

/// The error type shared by every traversal entry point.
///
/// All variants are structural: they indicate a bug in the data model or in
/// registry population, and abort the whole call. Recoverable conditions
/// (missing field slots, null component references) are logged and skipped
/// instead.
#[derive(Debug, Error)]
pub enum GraphError {
    /// The serialization root is not an object.
    #[error("invalid serialization root: expected a struct or component, found {kind}")]
    InvalidRoot {
        /// The kind that was passed.
        kind: ReflectKind,
    },

    /// A value's runtime kind does not match its descriptor.
    #[error(transparent)]
    Kind(#[from] ReflectKindError),

    /// A polymorphic value's class is missing from the registry.
    #[error("class `{type_path}` is not registered")]
    UnregisteredClass {
        /// Path of the missing class.
        type_path: &'static str,
    },

    /// A component operation was attempted on a non-component registration.
    #[error("class `{type_path}` is not registered as a component")]
    NotAComponent {
        /// Path of the offending class.
        type_path: &'static str,
    },

    /// An opaque value has no scalar form.
    #[error("`{type_path}` has no scalar form and cannot be written as a value")]
    UnsupportedValue {
        /// Path of the offending type.
        type_path: &'static str,
    },

    /// A map key cannot be reduced to a scalar.
    #[error("map key of type `{type_path}` is not scalar-representable")]
    NonScalarKey {
        /// Path of the key type.
        type_path: &'static str,
    },

    /// A value could not be written into a destination slot.
    #[error("type mismatch writing a `{found}` into a `{expected}` slot")]
    TypeMismatch {
        /// Path of the slot type.
        expected: &'static str,
        /// Path of the value type.
        found: &'static str,
    },

    /// A value refused reflection-based cloning.
    #[error(transparent)]
    Clone(#[from] ReflectCloneError),
}
