//! The class registry: compact ids for polymorphic scene classes.
//!
//! Serialized documents record the runtime class of a polymorphic value as a
//! small integer id; framework-owned classes without an id are recorded under
//! their fully qualified type path instead. The registry is populated once at
//! startup and read-only afterwards. A polymorphic value whose class was
//! never registered is a hard serialization failure, not a silent skip.

use core::any::TypeId;
use core::fmt;

use thiserror::Error;

use crate::component::{Component, ComponentRef};
use crate::hash::{HashMap, TypeIdMap};
use crate::info::{Type, TypeInfo, TypePath, Typed};
use crate::reflection::Reflect;

// -----------------------------------------------------------------------------
// ClassTag

/// The on-wire tag identifying a concrete class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClassTag {
    /// A registered scene class, written as its compact id.
    Id(u16),
    /// An id-less framework class, written as its fully qualified path.
    Path(&'static str),
}

impl fmt::Display for ClassTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => fmt::Display::fmt(id, f),
            Self::Path(path) => f.write_str(path),
        }
    }
}

// -----------------------------------------------------------------------------
// RegistryError

/// The error raised when a registration conflicts with an existing entry.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// The id is already taken by another class.
    #[error("class id {id} is already registered to `{existing}`")]
    DuplicateId {
        /// The conflicting id.
        id: u16,
        /// Path of the class already holding the id.
        existing: &'static str,
    },

    /// The class is already registered.
    #[error("class `{type_path}` is already registered")]
    DuplicateClass {
        /// Path of the class.
        type_path: &'static str,
    },
}

// -----------------------------------------------------------------------------
// ClassMeta

/// Per-class registration record.
pub struct ClassMeta {
    ty: Type,
    id: Option<u16>,
    type_info: fn() -> &'static TypeInfo,
    default_fn: fn() -> Box<dyn Reflect>,
    component_fn: Option<fn() -> Box<dyn Component>>,
}

impl ClassMeta {
    /// Returns the registered [`Type`].
    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    /// Returns the compact id, or `None` for framework registrations.
    #[inline]
    pub const fn id(&self) -> Option<u16> {
        self.id
    }

    /// Returns the class's [`TypeInfo`].
    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }

    /// Returns the on-wire [`ClassTag`] for this class.
    #[inline]
    pub fn tag(&self) -> ClassTag {
        match self.id {
            Some(id) => ClassTag::Id(id),
            None => ClassTag::Path(self.ty.path()),
        }
    }

    /// Returns `true` if the class was registered as a component.
    #[inline]
    pub const fn is_component(&self) -> bool {
        self.component_fn.is_some()
    }

    /// Creates a default-initialized instance of the class.
    #[inline]
    pub fn default_value(&self) -> Box<dyn Reflect> {
        (self.default_fn)()
    }

    /// Creates a default-initialized component in a fresh cell, or `None` if
    /// the class was not registered as a component.
    pub fn new_component(&self) -> Option<ComponentRef> {
        let ctor = self.component_fn?;
        Some(ComponentRef::from_boxed(ctor()))
    }
}

// -----------------------------------------------------------------------------
// ClassRegistry

/// A bidirectional table between compact class ids and concrete classes.
///
/// # Examples
///
/// ```
/// use sg_reflect::derive::Reflect;
/// use sg_reflect::registry::{ClassRegistry, ClassTag};
///
/// #[derive(Reflect, Clone, Default)]
/// struct Door {
///     locked: bool,
/// }
///
/// let mut registry = ClassRegistry::new();
/// registry.register::<Door>(4).unwrap();
///
/// assert_eq!(registry.tag_of::<Door>(), Some(ClassTag::Id(4)));
/// assert!(registry.register::<Door>(9).is_err());
/// ```
#[derive(Default)]
pub struct ClassRegistry {
    by_id: HashMap<u16, TypeId>,
    by_type: TypeIdMap<ClassMeta>,
}

impl ClassRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a scene class under a compact id.
    pub fn register<T>(&mut self, id: u16) -> Result<(), RegistryError>
    where
        T: Typed + TypePath + Default,
    {
        self.insert(ClassMeta {
            ty: Type::of::<T>(),
            id: Some(id),
            type_info: T::type_info,
            default_fn: || Box::new(T::default()),
            component_fn: None,
        })
    }

    /// Registers a framework class without an id; it serializes under its
    /// fully qualified type path.
    pub fn register_framework<T>(&mut self) -> Result<(), RegistryError>
    where
        T: Typed + TypePath + Default,
    {
        self.insert(ClassMeta {
            ty: Type::of::<T>(),
            id: None,
            type_info: T::type_info,
            default_fn: || Box::new(T::default()),
            component_fn: None,
        })
    }

    /// Registers a component class under a compact id.
    pub fn register_component<T>(&mut self, id: u16) -> Result<(), RegistryError>
    where
        T: Component + Typed + TypePath + Default,
    {
        self.insert(ClassMeta {
            ty: Type::of::<T>(),
            id: Some(id),
            type_info: T::type_info,
            default_fn: || Box::new(T::default()),
            component_fn: Some(|| Box::new(T::default())),
        })
    }

    fn insert(&mut self, meta: ClassMeta) -> Result<(), RegistryError> {
        if let Some(existing) = self.by_type.get(&meta.ty.id()) {
            return Err(RegistryError::DuplicateClass {
                type_path: existing.ty.path(),
            });
        }
        if let Some(id) = meta.id {
            if let Some(existing) = self.by_id.get(&id) {
                let path = self
                    .by_type
                    .get(existing)
                    .map(|meta| meta.ty.path())
                    .unwrap_or("<unknown>");
                return Err(RegistryError::DuplicateId { id, existing: path });
            }
            self.by_id.insert(id, meta.ty.id());
        }
        self.by_type.insert(meta.ty.id(), meta);
        Ok(())
    }

    /// Returns the registration record for the given [`TypeId`].
    #[inline]
    pub fn get(&self, ty_id: TypeId) -> Option<&ClassMeta> {
        self.by_type.get(&ty_id)
    }

    /// Returns the registration record for `T`.
    #[inline]
    pub fn get_of<T: 'static>(&self) -> Option<&ClassMeta> {
        self.get(TypeId::of::<T>())
    }

    /// Returns `true` if the given class is registered.
    #[inline]
    pub fn contains(&self, ty_id: TypeId) -> bool {
        self.by_type.contains_key(&ty_id)
    }

    /// Returns the on-wire tag for the given class, if registered.
    #[inline]
    pub fn tag(&self, ty_id: TypeId) -> Option<ClassTag> {
        self.get(ty_id).map(ClassMeta::tag)
    }

    /// Returns the on-wire tag for `T`, if registered.
    #[inline]
    pub fn tag_of<T: 'static>(&self) -> Option<ClassTag> {
        self.tag(TypeId::of::<T>())
    }

    /// Resolves a compact id back to the registered [`TypeId`].
    #[inline]
    pub fn type_id(&self, id: u16) -> Option<TypeId> {
        self.by_id.get(&id).copied()
    }

    /// Returns the number of registered classes.
    #[inline]
    pub fn len(&self) -> usize {
        self.by_type.len()
    }

    /// Returns `true` if nothing is registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{ClassRegistry, ClassTag, RegistryError};
    use crate::buffer::FloatBuffer;

    #[test]
    fn duplicate_id_is_rejected() {
        let mut registry = ClassRegistry::new();
        registry.register::<FloatBuffer>(1).unwrap();

        let err = registry.register::<Vec<f32>>(1).unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicateId {
                id: 1,
                existing: "sg_reflect::buffer::FloatBuffer",
            }
        );
    }

    #[test]
    fn duplicate_class_is_rejected() {
        let mut registry = ClassRegistry::new();
        registry.register::<FloatBuffer>(1).unwrap();
        assert!(matches!(
            registry.register::<FloatBuffer>(2),
            Err(RegistryError::DuplicateClass { .. })
        ));
    }

    #[test]
    fn framework_classes_tag_by_path() {
        let mut registry = ClassRegistry::new();
        registry.register_framework::<FloatBuffer>().unwrap();
        assert_eq!(
            registry.tag_of::<FloatBuffer>(),
            Some(ClassTag::Path("sg_reflect::buffer::FloatBuffer"))
        );
    }
}
