//! The component model: identity-bearing scene entities behind shared handles.
//!
//! Components are long-lived graph nodes owned by a scene. They are never
//! duplicated implicitly: cloning a [`ComponentRef`] aliases the same cell,
//! and every traversal in the engine treats a component-typed value as a
//! reference, not a nested value. The component graph is cyclic by design,
//! which is why serialization depth-limits component chains instead of
//! following them.

use core::any::TypeId;
use core::fmt;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::impls::NonGenericTypeInfoCell;
use crate::info::{OpaqueInfo, ReflectKind, TypeInfo, TypePath, Typed};
use crate::ops::{ReflectCloneError, ReflectMut, ReflectRef, Struct};
use crate::reflection::Reflect;

// -----------------------------------------------------------------------------
// Component

/// A scene component: a named-field aggregate carrying a stable identity.
///
/// The identity is what survives serialization when a component is written
/// reference-only, and what a deserializer uses to re-link live instances.
///
/// # Examples
///
/// ```
/// use sg_reflect::component::Component;
/// use sg_reflect::derive::Reflect;
///
/// #[derive(Reflect, Clone, Default)]
/// struct Light {
///     #[field(persist = 0)]
///     id: u64,
///     #[field(persist = 1)]
///     intensity: f32,
/// }
///
/// impl Component for Light {
///     fn component_id(&self) -> u64 {
///         self.id
///     }
/// }
/// ```
pub trait Component: Struct {
    /// Returns this component's stable identity.
    fn component_id(&self) -> u64;
}

// -----------------------------------------------------------------------------
// ComponentRef

/// A shared handle to a [`Component`].
///
/// Cloning a `ComponentRef` aliases the same component; handle identity is
/// compared with [`ptr_eq`](ComponentRef::ptr_eq). The component itself is
/// reached through [`read`](ComponentRef::read) /
/// [`write`](ComponentRef::write); the engine locks one cell at a time for
/// the duration of a subtree visit.
///
/// # Examples
///
/// ```
/// # use sg_reflect::component::{Component, ComponentRef};
/// # use sg_reflect::derive::Reflect;
/// # #[derive(Reflect, Clone, Default)]
/// # struct Light { id: u64 }
/// # impl Component for Light {
/// #     fn component_id(&self) -> u64 { self.id }
/// # }
/// let a = ComponentRef::new(Light { id: 7 });
/// let b = a.clone();
///
/// assert!(a.ptr_eq(&b));
/// assert_eq!(b.component_id(), 7);
/// ```
pub struct ComponentRef {
    cell: Arc<RwLock<Box<dyn Component>>>,
}

impl ComponentRef {
    /// Wraps a component in a new shared cell.
    pub fn new<C: Component>(component: C) -> Self {
        Self::from_boxed(Box::new(component))
    }

    /// Wraps an already-boxed component in a new shared cell.
    pub fn from_boxed(component: Box<dyn Component>) -> Self {
        Self {
            cell: Arc::new(RwLock::new(component)),
        }
    }

    /// Locks the component for reading.
    #[inline]
    pub fn read(&self) -> RwLockReadGuard<'_, Box<dyn Component>> {
        self.cell.read()
    }

    /// Locks the component for writing.
    #[inline]
    pub fn write(&self) -> RwLockWriteGuard<'_, Box<dyn Component>> {
        self.cell.write()
    }

    /// Returns the identity of the component behind this handle.
    ///
    /// Takes the read lock for the duration of the call.
    #[inline]
    pub fn component_id(&self) -> u64 {
        self.read().component_id()
    }

    /// Returns the [`TypeId`] of the concrete component behind this handle.
    ///
    /// Takes the read lock for the duration of the call.
    #[inline]
    pub fn component_ty_id(&self) -> TypeId {
        self.read().ty_id()
    }

    /// Returns `true` if both handles alias the same component cell.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.cell, &other.cell)
    }
}

impl Clone for ComponentRef {
    /// Aliases the same component; never duplicates it.
    #[inline]
    fn clone(&self) -> Self {
        Self {
            cell: Arc::clone(&self.cell),
        }
    }
}

impl fmt::Debug for ComponentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ComponentRef")
            .field(&Arc::as_ptr(&self.cell))
            .finish()
    }
}

impl TypePath for ComponentRef {
    #[inline]
    fn type_path() -> &'static str {
        "sg_reflect::component::ComponentRef"
    }

    #[inline]
    fn type_name() -> &'static str {
        "ComponentRef"
    }

    #[inline]
    fn type_ident() -> &'static str {
        "ComponentRef"
    }

    #[inline]
    fn module_path() -> Option<&'static str> {
        Some("sg_reflect::component")
    }
}

impl Typed for ComponentRef {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| TypeInfo::Component(OpaqueInfo::new::<Self>()))
    }
}

impl Reflect for ComponentRef {
    fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        *self = value.take::<Self>()?;
        Ok(())
    }

    #[inline]
    fn reflect_kind(&self) -> ReflectKind {
        ReflectKind::Component
    }

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Component(self)
    }

    #[inline]
    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Component(self)
    }

    /// Clones the handle, aliasing the same component cell.
    #[inline]
    fn reflect_clone(&self) -> Result<Box<dyn Reflect>, ReflectCloneError> {
        Ok(Box::new(self.clone()))
    }
}
