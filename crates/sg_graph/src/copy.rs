//! Structural copying with component-aliasing reference semantics.
//!
//! A copy is a value-level operation everywhere except at component handles:
//! plain structs, containers and scalars are duplicated, component handles
//! are aliased. Copying a field that points at a component must yield a
//! second pointer to the *same* component, because component identity is
//! what the rest of the engine links against. The one sanctioned way to get
//! a genuinely new component is [`Copier::copy_component`].
//!
//! Freshly created structs come out of the [`ClassRegistry`] default
//! constructor, so fields the copy mode excludes hold their default values,
//! never stale or source data. An unregistered struct class is a hard error.

use sg_reflect::Reflect;
use sg_reflect::component::{Component, ComponentRef};
use sg_reflect::info::InclusionMode;
use sg_reflect::ops::ReflectRef;
use sg_reflect::registry::ClassRegistry;

use crate::error::GraphError;

// -----------------------------------------------------------------------------
// Copier

/// Copies reflected object trees.
///
/// # Examples
///
/// ```
/// use sg_graph::Copier;
/// use sg_reflect::Reflect;
/// use sg_reflect::derive::Reflect;
/// use sg_reflect::info::InclusionMode;
/// use sg_reflect::registry::ClassRegistry;
///
/// #[derive(Reflect, Clone, Default)]
/// struct Stats {
///     #[field(persist = 0, copy)]
///     hp: i32,
///     #[field(persist = 1)]
///     runtime_cache: i32,
/// }
///
/// let mut registry = ClassRegistry::new();
/// registry.register::<Stats>(1).unwrap();
///
/// let source = Stats { hp: 40, runtime_cache: 9 };
/// let copy = Copier::new(&registry, InclusionMode::CopyEligible)
///     .copy(&source)
///     .unwrap();
/// let copy = copy.downcast_ref::<Stats>().unwrap();
///
/// assert_eq!(copy.hp, 40);
/// // Not copy-eligible, so the fresh instance keeps its default.
/// assert_eq!(copy.runtime_cache, 0);
/// ```
pub struct Copier<'r> {
    registry: &'r ClassRegistry,
    mode: InclusionMode,
}

impl<'r> Copier<'r> {
    /// Creates a copier that copies the fields `mode` admits.
    pub fn new(registry: &'r ClassRegistry, mode: InclusionMode) -> Self {
        Self { registry, mode }
    }

    /// Copies `source` into a freshly allocated value.
    ///
    /// Component handles in the tree, including `source` itself if it is
    /// one, are aliased rather than duplicated.
    pub fn copy(&self, source: &dyn Reflect) -> Result<Box<dyn Reflect>, GraphError> {
        self.allocate(source)
    }

    /// Copies `source` into an existing destination.
    ///
    /// Matching containers in `dest` are reused in place: lists and maps are
    /// cleared and refilled, array slots and present optional values are
    /// overwritten, struct fields outside the copy mode keep their current
    /// destination values.
    pub fn copy_into(&self, source: &dyn Reflect, dest: &mut dyn Reflect) -> Result<(), GraphError> {
        self.copy_slot(source, dest)
    }

    /// Creates a genuinely new component from `source`.
    ///
    /// The result is a fresh cell with a fresh identity, default-constructed
    /// through the registry and then filled from `source`'s admitted fields.
    /// Components referenced *by* `source` are still aliased; only the root
    /// itself is duplicated.
    pub fn copy_component(&self, source: &ComponentRef) -> Result<ComponentRef, GraphError> {
        let guard = source.read();
        let inner: &dyn Component = &**guard;
        let meta =
            self.registry
                .get(inner.ty_id())
                .ok_or_else(|| GraphError::UnregisteredClass {
                    type_path: inner.reflect_type_path(),
                })?;
        let fresh = meta.new_component().ok_or_else(|| GraphError::NotAComponent {
            type_path: inner.reflect_type_path(),
        })?;
        {
            let mut fresh_guard = fresh.write();
            let source_value: &dyn Reflect = inner;
            let dest_value: &mut dyn Reflect = &mut **fresh_guard;
            self.copy_slot(source_value, dest_value)?;
        }
        drop(guard);
        Ok(fresh)
    }

    /// Allocates a fresh value equivalent to `source`.
    ///
    /// Structs come from the registry default constructor; containers start
    /// from their own empty form; components alias.
    fn allocate(&self, source: &dyn Reflect) -> Result<Box<dyn Reflect>, GraphError> {
        match source.reflect_ref() {
            ReflectRef::Opaque(_) => Ok(source.reflect_clone()?),
            ReflectRef::Component(handle) => Ok(Box::new(handle.clone())),
            ReflectRef::Struct(_) => {
                let meta =
                    self.registry
                        .get(source.ty_id())
                        .ok_or_else(|| GraphError::UnregisteredClass {
                            type_path: source.reflect_type_path(),
                        })?;
                let mut fresh = meta.default_value();
                self.copy_slot(source, &mut *fresh)?;
                Ok(fresh)
            }
            ReflectRef::List(list) => {
                let mut fresh = list.clone_empty();
                self.copy_slot(source, &mut *fresh)?;
                Ok(fresh)
            }
            ReflectRef::Map(map) => {
                let mut fresh = map.clone_empty();
                self.copy_slot(source, &mut *fresh)?;
                Ok(fresh)
            }
            ReflectRef::Nullable(nullable) => {
                let mut fresh = nullable.clone_empty();
                self.copy_slot(source, &mut *fresh)?;
                Ok(fresh)
            }
            // Arrays have no empty form; clone for shape, then overwrite
            // every slot so struct elements get the registry treatment.
            ReflectRef::Array(_) => {
                let mut fresh = source.reflect_clone()?;
                self.copy_slot(source, &mut *fresh)?;
                Ok(fresh)
            }
        }
    }

    /// Copies `source` into `dest`, reusing `dest`'s allocation where the
    /// concrete types line up.
    fn copy_slot(&self, source: &dyn Reflect, dest: &mut dyn Reflect) -> Result<(), GraphError> {
        if source.ty_id() != dest.ty_id() {
            let fresh = self.allocate(source)?;
            return set_into(dest, fresh);
        }

        match source.reflect_ref() {
            ReflectRef::Opaque(_) => set_into(dest, source.reflect_clone()?),
            ReflectRef::Component(handle) => set_into(dest, Box::new(handle.clone())),
            ReflectRef::Struct(source) => {
                let dest = dest.reflect_mut().as_struct()?;
                let info = source.reflect_type_info().as_struct()?;
                for (index, field) in info.iter().enumerate() {
                    if !self.mode.includes(field.flags()) {
                        continue;
                    }
                    let (Some(source_field), Some(dest_field)) =
                        (source.field_at(index), dest.field_at_mut(index))
                    else {
                        log::warn!(
                            "field `{}` missing on `{}`, skipped",
                            field.name(),
                            info.type_path(),
                        );
                        continue;
                    };
                    if field.flags().by_reference {
                        set_into(dest_field, source_field.reflect_clone()?)?;
                    } else {
                        self.copy_slot(source_field, dest_field)?;
                    }
                }
                Ok(())
            }
            ReflectRef::List(source) => {
                let dest = dest.reflect_mut().as_list()?;
                dest.clear();
                for item in source.iter() {
                    let fresh = self.allocate(item)?;
                    if let Err(value) = dest.push(fresh) {
                        return Err(GraphError::TypeMismatch {
                            expected: dest.reflect_type_path(),
                            found: value.reflect_type_path(),
                        });
                    }
                }
                Ok(())
            }
            ReflectRef::Array(source) => {
                let dest = dest.reflect_mut().as_array()?;
                for index in 0..source.len() {
                    let (Some(item), Some(slot)) = (source.get(index), dest.get_mut(index)) else {
                        continue;
                    };
                    let fresh = self.allocate(item)?;
                    set_into(slot, fresh)?;
                }
                Ok(())
            }
            ReflectRef::Map(source) => {
                let dest = dest.reflect_mut().as_map()?;
                dest.clear();
                for (key, value) in source.iter() {
                    let key = self.allocate(key)?;
                    let value = self.allocate(value)?;
                    if let Err((key, _)) = dest.insert(key, value) {
                        return Err(GraphError::TypeMismatch {
                            expected: dest.reflect_type_path(),
                            found: key.reflect_type_path(),
                        });
                    }
                }
                Ok(())
            }
            ReflectRef::Nullable(source) => {
                let dest = dest.reflect_mut().as_nullable()?;
                let Some(inner) = source.value() else {
                    return dest.set_value(None).map_err(|value| GraphError::TypeMismatch {
                        expected: dest.reflect_type_path(),
                        found: value.reflect_type_path(),
                    });
                };
                // Reuse the present value when the concrete types agree.
                if let Some(dest_inner) = dest.value_mut()
                    && dest_inner.ty_id() == inner.ty_id()
                {
                    return self.copy_slot(inner, dest_inner);
                }
                let fresh = self.allocate(inner)?;
                dest.set_value(Some(fresh)).map_err(|value| GraphError::TypeMismatch {
                    expected: dest.reflect_type_path(),
                    found: value.reflect_type_path(),
                })
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Helpers

fn set_into(dest: &mut dyn Reflect, value: Box<dyn Reflect>) -> Result<(), GraphError> {
    let expected = dest.reflect_type_path();
    dest.set(value).map_err(|value| GraphError::TypeMismatch {
        expected,
        found: value.reflect_type_path(),
    })
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use sg_reflect::Reflect;
    use sg_reflect::component::{Component, ComponentRef};
    use sg_reflect::derive::Reflect;
    use sg_reflect::hash::HashMap;
    use sg_reflect::info::InclusionMode;
    use sg_reflect::registry::ClassRegistry;

    use super::Copier;
    use crate::error::GraphError;

    #[derive(Reflect, Clone, Default)]
    struct Transform {
        #[field(persist = 0, copy)]
        x: f32,
        #[field(persist = 1, copy)]
        y: f32,
    }

    #[derive(Reflect, Clone, Default)]
    struct Node {
        #[field(persist = 0)]
        id: u64,
        #[field(persist = 1, copy)]
        name: String,
        #[field(persist = 2, copy)]
        transform: Transform,
        #[field(persist = 3, copy)]
        target: Option<ComponentRef>,
        #[field(persist = 4, copy)]
        children: Vec<ComponentRef>,
        #[field(persist = 5)]
        scratch: u32,
    }

    impl Component for Node {
        fn component_id(&self) -> u64 {
            self.id
        }
    }

    #[derive(Reflect, Clone, Default)]
    struct Palette {
        #[field(persist = 0, copy)]
        primary: u32,
        #[field(persist = 1)]
        hint: u32,
    }

    fn registry() -> ClassRegistry {
        let mut registry = ClassRegistry::new();
        registry.register::<Transform>(1).unwrap();
        registry.register_component::<Node>(2).unwrap();
        registry.register::<Palette>(3).unwrap();
        registry
    }

    fn copier(registry: &ClassRegistry) -> Copier<'_> {
        Copier::new(registry, InclusionMode::CopyEligible)
    }

    #[test]
    fn copy_allocates_fresh_and_respects_mode() {
        let registry = registry();
        let source = Node {
            id: 3,
            name: "a".to_string(),
            transform: Transform { x: 1.0, y: 2.0 },
            scratch: 9,
            ..Default::default()
        };

        let copy = copier(&registry).copy(&source).unwrap();
        let copy = copy.downcast_ref::<Node>().unwrap();

        assert_eq!(copy.name, "a");
        assert_eq!(copy.transform.x, 1.0);
        // Outside the copy mode: fresh instances keep their defaults.
        assert_eq!(copy.id, 0);
        assert_eq!(copy.scratch, 0);
    }

    #[test]
    fn components_are_aliased_not_duplicated() {
        let registry = registry();
        let target = ComponentRef::new(Node::default());
        let source = Node {
            target: Some(target.clone()),
            children: vec![target.clone()],
            ..Default::default()
        };

        let copy = copier(&registry).copy(&source).unwrap();
        let copy = copy.downcast_ref::<Node>().unwrap();

        assert!(copy.target.as_ref().unwrap().ptr_eq(&target));
        assert!(copy.children[0].ptr_eq(&target));
    }

    #[test]
    fn copy_component_duplicates_only_the_root() {
        let registry = registry();
        let referenced = ComponentRef::new(Node::default());
        let source = ComponentRef::new(Node {
            id: 4,
            name: "orig".to_string(),
            children: vec![referenced.clone()],
            ..Default::default()
        });

        let fresh = copier(&registry).copy_component(&source).unwrap();
        assert!(!fresh.ptr_eq(&source));

        let guard = fresh.read();
        let node: &dyn Reflect = &**guard;
        let node = node.downcast_ref::<Node>().unwrap();
        assert_eq!(node.name, "orig");
        // The identity field is not copy-eligible: the duplicate starts fresh.
        assert_eq!(node.id, 0);
        assert!(node.children[0].ptr_eq(&referenced));
    }

    #[test]
    fn copy_into_reuses_the_destination() {
        let registry = registry();
        let source = Node {
            name: "copied".to_string(),
            ..Default::default()
        };
        let mut dest = Node {
            scratch: 7,
            ..Default::default()
        };

        copier(&registry).copy_into(&source, &mut dest).unwrap();
        assert_eq!(dest.name, "copied");
        // Fields outside the mode keep their destination values.
        assert_eq!(dest.scratch, 7);
    }

    #[test]
    fn by_reference_fields_clone_wholesale() {
        #[derive(Reflect, Clone, Default)]
        struct Material {
            #[field(persist = 0, copy, reference)]
            palette: Palette,
            #[field(persist = 1, copy)]
            fallback: Palette,
        }

        let registry = registry();
        let source = Material {
            palette: Palette { primary: 1, hint: 2 },
            fallback: Palette { primary: 3, hint: 4 },
        };
        let mut dest = Material::default();

        copier(&registry).copy_into(&source, &mut dest).unwrap();
        // Reference copy takes everything, recursion honors the mode.
        assert_eq!(dest.palette.hint, 2);
        assert_eq!(dest.fallback.primary, 3);
        assert_eq!(dest.fallback.hint, 0);
    }

    #[test]
    fn unregistered_struct_cannot_be_allocated() {
        #[derive(Reflect, Clone, Default)]
        struct Unlisted {
            #[field(persist = 0, copy)]
            value: u32,
        }

        let registry = registry();
        let err = copier(&registry).copy(&Unlisted { value: 1 }).unwrap_err();
        assert!(matches!(err, GraphError::UnregisteredClass { .. }));
    }

    #[test]
    fn array_elements_are_freshly_allocated() {
        let registry = registry();
        let source = [
            Palette { primary: 1, hint: 5 },
            Palette { primary: 2, hint: 6 },
        ];

        let copy = copier(&registry).copy(&source).unwrap();
        let copy = copy.downcast_ref::<[Palette; 2]>().unwrap();

        assert_eq!(copy[0].primary, 1);
        assert_eq!(copy[1].primary, 2);
        assert_eq!(copy[0].hint, 0);
    }

    #[test]
    fn maps_copy_entry_wise() {
        let registry = registry();
        let mut source: HashMap<String, Transform> = HashMap::default();
        source.insert("a".to_string(), Transform { x: 1.0, y: 2.0 });

        let copy = copier(&registry).copy(&source).unwrap();
        let copy = copy.downcast_ref::<HashMap<String, Transform>>().unwrap();

        assert_eq!(copy.len(), 1);
        assert_eq!(copy["a"].x, 1.0);
    }
}
