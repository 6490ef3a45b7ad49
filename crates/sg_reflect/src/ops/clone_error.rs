use thiserror::Error;

// -----------------------------------------------------------------------------
// ReflectCloneError

/// The error raised when [`Reflect::reflect_clone`](crate::Reflect::reflect_clone)
/// cannot produce a copy.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ReflectCloneError {
    /// The type opted out of reflection-based cloning.
    #[error("`{type_path}` does not support cloning through reflection")]
    NotCloneable {
        /// Path of the offending type.
        type_path: &'static str,
    },

    /// A field of a composite value could not be cloned.
    #[error("field `{field}` of `{type_path}` cannot be cloned through reflection")]
    FieldNotCloneable {
        /// Name of the offending field.
        field: &'static str,
        /// Path of the declaring type.
        type_path: &'static str,
    },
}
