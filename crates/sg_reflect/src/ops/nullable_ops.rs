use crate::reflection::Reflect;

// -----------------------------------------------------------------------------
// Nullable trait

/// A trait for type-erased access to optional slots (`Option<T>`).
///
/// A nullable slot either holds one value or nothing; traversal treats the
/// slot as transparent and visits the inner value when present.
///
/// # Examples
///
/// ```
/// use sg_reflect::ops::Nullable;
///
/// let mut slot = Some(5_i32);
/// let nullable: &mut dyn Nullable = &mut slot;
///
/// assert!(!nullable.is_null());
/// assert!(nullable.set_value(None).is_ok());
/// assert!(nullable.is_null());
/// ```
pub trait Nullable: Reflect {
    /// Returns a reference to the contained value, or `None` if the slot is null.
    fn value(&self) -> Option<&dyn Reflect>;

    /// Returns a mutable reference to the contained value, or `None` if the slot is null.
    fn value_mut(&mut self) -> Option<&mut dyn Reflect>;

    /// Returns `true` if the slot holds nothing.
    fn is_null(&self) -> bool;

    /// Replaces the slot's content.
    ///
    /// `None` empties the slot. Returns `Err(value)`, handing the value back
    /// unchanged, if its type is incompatible with the slot.
    fn set_value(&mut self, value: Option<Box<dyn Reflect>>) -> Result<(), Box<dyn Reflect>>;

    /// Removes and returns the contained value, leaving the slot null.
    fn take_value(&mut self) -> Option<Box<dyn Reflect>>;

    /// Creates a new, null slot of the same concrete type.
    fn clone_empty(&self) -> Box<dyn Reflect>;
}

impl dyn Nullable {
    /// Returns a typed reference to the contained value.
    #[inline]
    pub fn value_as<T: Reflect>(&self) -> Option<&T> {
        self.value().and_then(<dyn Reflect>::downcast_ref)
    }
}
