//! The compact text serializer.
//!
//! Produces the engine's JSON-like scene format: single-line, no whitespace,
//! unquoted keys, struct fields written under their persistence ids. The
//! format is not JSON and is not meant to be; it is the engine's own wire
//! text, optimized for size and diff stability.
//!
//! Component handles get two-tier treatment. A component reached outside any
//! other component is written in full, prefixed with a `class` pseudo-field
//! carrying its registry tag. A component reached from inside another one is
//! reduced to its identity, `{class:<tag>,id:<component_id>}`, and anything
//! deeper is dropped entirely. This is what keeps cyclic scene graphs
//! serializable.

use core::fmt::Write;

use sg_reflect::component::ComponentRef;
use sg_reflect::info::{FieldInfo, InclusionMode, ReflectKind};
use sg_reflect::registry::{ClassRegistry, ClassTag};
use sg_reflect::{Reflect, Scalar, buffer::FloatBuffer};

use crate::error::GraphError;
use crate::walk::{GraphVisitor, walk};

// -----------------------------------------------------------------------------
// Serializer

/// Serializes a reflected object tree to the compact text format.
///
/// # Examples
///
/// ```
/// use sg_graph::Serializer;
/// use sg_reflect::derive::Reflect;
/// use sg_reflect::info::InclusionMode;
/// use sg_reflect::registry::ClassRegistry;
///
/// #[derive(Reflect, Clone, Default)]
/// struct Blob {
///     #[field(persist = 0)]
///     size: u32,
/// }
///
/// let registry = ClassRegistry::new();
/// let mut blob = Blob { size: 16 };
///
/// let text = Serializer::new(&registry)
///     .serialize(&mut blob, InclusionMode::Persisted)
///     .unwrap();
/// assert_eq!(text, "{0:16}");
/// ```
pub struct Serializer<'r> {
    registry: &'r ClassRegistry,
}

impl<'r> Serializer<'r> {
    /// Creates a serializer backed by the given registry.
    pub fn new(registry: &'r ClassRegistry) -> Self {
        Self { registry }
    }

    /// Serializes `root`, visiting the fields `mode` admits.
    ///
    /// The root must be a struct or a component handle; containers and
    /// scalars are rejected as roots. Takes the root mutably because
    /// serialization compacts [`FloatBuffer`] values it passes over.
    pub fn serialize(
        &self,
        root: &mut dyn Reflect,
        mode: InclusionMode,
    ) -> Result<String, GraphError> {
        let mut visitor = SerializeVisitor {
            registry: self.registry,
            out: String::new(),
            levels: Vec::new(),
            components: Vec::new(),
            pending_field: None,
            pending_class: None,
        };
        walk(root, mode, &mut visitor)?;
        Ok(visitor.out)
    }
}

// -----------------------------------------------------------------------------
// Serialization visitor

/// An output nesting level.
enum Level {
    /// Inside `{..}`; slots are keyed and comma-separated.
    Object { count: usize },
    /// Inside `[..]`; slots are comma-separated.
    Array { count: usize },
    /// The value slot of a `{key:..,value:..}` map entry.
    Entry,
}

/// A component the walker has entered, with its tag and identity cached so
/// nested references to it never have to lock its (already write-locked)
/// cell.
struct EnteredComponent {
    handle: ComponentRef,
    id: u64,
    tag: ClassTag,
}

struct SerializeVisitor<'r> {
    registry: &'r ClassRegistry,
    out: String,
    levels: Vec<Level>,
    components: Vec<EnteredComponent>,
    /// Key text of the field whose value has not been written yet. Held back
    /// so a field whose value ends up suppressed leaves no trace.
    pending_field: Option<String>,
    /// Registry tag to emit as the `class` pseudo-field of the next struct.
    pending_class: Option<ClassTag>,
}

impl SerializeVisitor<'_> {
    /// Opens the current slot: separator, then the held-back field key.
    ///
    /// Called exactly once per value actually written.
    fn open_slot(&mut self) {
        let key = self.pending_field.take();
        match self.levels.last_mut() {
            Some(Level::Object { count }) => {
                if *count > 0 {
                    self.out.push(',');
                }
                *count += 1;
                if let Some(key) = key {
                    self.out.push_str(&key);
                    self.out.push(':');
                }
            }
            Some(Level::Array { count }) => {
                if *count > 0 {
                    self.out.push(',');
                }
                *count += 1;
            }
            Some(Level::Entry) | None => {}
        }
    }

    fn write_scalar(&mut self, scalar: &Scalar<'_>) {
        match scalar {
            Scalar::Str(text) => write_quoted(&mut self.out, text),
            Scalar::Char(ch) => write_quoted(&mut self.out, ch.encode_utf8(&mut [0; 4])),
            other => {
                let _ = write!(self.out, "{other}");
            }
        }
    }

    /// Resolves the registry tag and identity of a component, reusing the
    /// cached pair for components the walk has already locked.
    fn identity_of(&self, handle: &ComponentRef) -> Result<(u64, ClassTag), GraphError> {
        if let Some(entered) = self
            .components
            .iter()
            .find(|entered| entered.handle.ptr_eq(handle))
        {
            return Ok((entered.id, entered.tag));
        }
        let guard = handle.read();
        let tag = self
            .registry
            .tag(guard.ty_id())
            .ok_or(GraphError::UnregisteredClass {
                type_path: guard.reflect_type_path(),
            })?;
        Ok((guard.component_id(), tag))
    }
}

impl GraphVisitor for SerializeVisitor<'_> {
    fn on_start(&mut self, root: &dyn Reflect) -> Result<(), GraphError> {
        match root.reflect_kind() {
            ReflectKind::Struct | ReflectKind::Component => Ok(()),
            kind => Err(GraphError::InvalidRoot { kind }),
        }
    }

    fn enter_value(&mut self, value: &mut dyn Reflect) -> Result<bool, GraphError> {
        // Serialization doubles as the compaction point for float buffers.
        if let Some(buffer) = value.downcast_mut::<FloatBuffer>() {
            buffer.shrink_to_fit();
        }

        match value.reflect_kind() {
            ReflectKind::Component => {
                let handle = value.reflect_ref().as_component()?;
                match self.components.len() {
                    // Outside any component: encode in full.
                    0 => {
                        let (id, tag) = self.identity_of(handle)?;
                        self.components.push(EnteredComponent {
                            handle: handle.clone(),
                            id,
                            tag,
                        });
                        self.pending_class = Some(tag);
                        Ok(true)
                    }
                    // One component deep: identity only.
                    1 => {
                        let (id, tag) = self.identity_of(handle)?;
                        self.open_slot();
                        let _ = write!(self.out, "{{class:{tag},id:{id}}}");
                        Ok(false)
                    }
                    // Deeper: suppressed entirely, key included.
                    _ => {
                        self.pending_field = None;
                        Ok(false)
                    }
                }
            }
            ReflectKind::Struct => {
                self.open_slot();
                self.out.push('{');
                self.levels.push(Level::Object { count: 0 });
                if let Some(tag) = self.pending_class.take() {
                    self.pending_field = Some("class".to_string());
                    self.open_slot();
                    let _ = write!(self.out, "{tag}");
                }
                Ok(true)
            }
            ReflectKind::List | ReflectKind::Array | ReflectKind::Map => {
                self.open_slot();
                self.out.push('[');
                self.levels.push(Level::Array { count: 0 });
                Ok(true)
            }
            // Transparent; the inner value or the null literal is what prints.
            ReflectKind::Nullable => Ok(true),
            ReflectKind::Opaque => {
                let Some(scalar) = value.scalar() else {
                    return Err(GraphError::UnsupportedValue {
                        type_path: value.reflect_type_path(),
                    });
                };
                self.open_slot();
                self.write_scalar(&scalar);
                Ok(true)
            }
        }
    }

    fn exit_value(&mut self, value: &mut dyn Reflect) -> Result<(), GraphError> {
        match value.reflect_kind() {
            ReflectKind::Struct => {
                self.levels.pop();
                self.out.push('}');
            }
            ReflectKind::List | ReflectKind::Array | ReflectKind::Map => {
                self.levels.pop();
                self.out.push(']');
            }
            // Only fully-encoded components were entered.
            ReflectKind::Component => {
                self.components.pop();
            }
            ReflectKind::Nullable | ReflectKind::Opaque => {}
        }
        Ok(())
    }

    fn enter_field(&mut self, field: &FieldInfo) -> Result<bool, GraphError> {
        let key = match field.persist_id() {
            Some(id) => id.to_string(),
            None => field.name().to_string(),
        };
        self.pending_field = Some(key);
        Ok(true)
    }

    fn enter_entry(&mut self, key: &dyn Reflect, _index: usize) -> Result<bool, GraphError> {
        let Some(scalar) = key.scalar() else {
            return Err(GraphError::NonScalarKey {
                type_path: key.reflect_type_path(),
            });
        };
        self.open_slot();
        self.out.push_str("{key:");
        self.write_scalar(&scalar);
        self.out.push_str(",value:");
        self.levels.push(Level::Entry);
        Ok(true)
    }

    fn exit_entry(&mut self, _index: usize) -> Result<(), GraphError> {
        self.levels.pop();
        self.out.push('}');
        Ok(())
    }

    fn null_value(&mut self) -> Result<(), GraphError> {
        self.open_slot();
        self.out.push_str("null");
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Text helpers

/// Writes a quoted string, escaping quotes, backslashes and control
/// characters.
fn write_quoted(out: &mut String, text: &str) {
    out.push('"');
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ch if ch.is_control() => {
                let _ = write!(out, "\\u{:04x}", ch as u32);
            }
            ch => out.push(ch),
        }
    }
    out.push('"');
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use sg_reflect::Reflect;
    use sg_reflect::buffer::FloatBuffer;
    use sg_reflect::component::{Component, ComponentRef};
    use sg_reflect::derive::Reflect;
    use sg_reflect::hash::HashMap;
    use sg_reflect::info::InclusionMode;
    use sg_reflect::registry::ClassRegistry;

    use super::Serializer;
    use crate::error::GraphError;

    #[derive(Reflect, Clone, Default)]
    struct Transform {
        #[field(persist = 0)]
        x: f32,
        #[field(persist = 1)]
        y: f32,
    }

    #[derive(Reflect, Clone, Default)]
    struct Node {
        #[field(persist = 0)]
        id: u64,
        #[field(persist = 1)]
        name: String,
        #[field(persist = 2)]
        transform: Transform,
        #[field(persist = 3)]
        parent: Option<ComponentRef>,
        #[field(persist = 4)]
        children: Vec<ComponentRef>,
        #[field(skip)]
        dirty: bool,
    }

    impl Component for Node {
        fn component_id(&self) -> u64 {
            self.id
        }
    }

    #[derive(Reflect, Clone, Default)]
    struct Label {
        #[field(persist = 0)]
        text: String,
        #[field(editor)]
        hint: String,
    }

    fn registry() -> ClassRegistry {
        let mut registry = ClassRegistry::new();
        registry.register::<Transform>(1).unwrap();
        registry.register_component::<Node>(2).unwrap();
        registry
    }

    fn node(id: u64, name: &str) -> Node {
        Node {
            id,
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn plain_struct_writes_persist_ids() {
        let registry = registry();
        let mut transform = Transform { x: 1.5, y: -2.0 };

        let text = Serializer::new(&registry)
            .serialize(&mut transform, InclusionMode::Persisted)
            .unwrap();
        assert_eq!(text, "{0:1.5,1:-2}");
    }

    #[test]
    fn non_persisted_fields_write_under_their_names() {
        let registry = registry();
        let mut label = Label {
            text: "saved".to_string(),
            hint: "shown".to_string(),
        };

        let text = Serializer::new(&registry)
            .serialize(&mut label, InclusionMode::EditorVisible)
            .unwrap();
        assert_eq!(text, "{hint:\"shown\"}");
    }

    #[test]
    fn component_root_is_written_in_full() {
        let registry = registry();
        let mut root = ComponentRef::new(node(7, "root"));

        let text = Serializer::new(&registry)
            .serialize(&mut root, InclusionMode::Persisted)
            .unwrap();
        assert_eq!(text, "{class:2,0:7,1:\"root\",2:{0:0,1:0},3:null,4:[]}");
    }

    #[test]
    fn nested_component_reduces_to_identity() {
        let registry = registry();
        let child = ComponentRef::new(node(8, "child"));
        let mut root = ComponentRef::new(Node {
            children: vec![child],
            ..node(7, "go")
        });

        let text = Serializer::new(&registry)
            .serialize(&mut root, InclusionMode::Persisted)
            .unwrap();
        assert_eq!(
            text,
            "{class:2,0:7,1:\"go\",2:{0:0,1:0},3:null,4:[{class:2,id:8}]}",
        );
    }

    #[test]
    fn plain_roots_keep_component_depth_tiers() {
        #[derive(Reflect, Clone, Default)]
        struct Scene {
            #[field(persist = 0)]
            roots: Vec<ComponentRef>,
            #[field(persist = 1)]
            origin: Transform,
        }

        let registry = registry();
        let hub = ComponentRef::new(Node {
            children: vec![ComponentRef::new(node(6, "leaf"))],
            ..node(5, "hub")
        });
        let mut scene = Scene {
            roots: vec![hub],
            origin: Transform { x: 1.0, y: 0.0 },
        };

        // The depth tiers count entered components, not nesting in general:
        // a component reached under a plain root is still written in full,
        // and only the reference inside it drops to identity.
        let text = Serializer::new(&registry)
            .serialize(&mut scene, InclusionMode::Persisted)
            .unwrap();
        assert_eq!(
            text,
            "{0:[{class:2,0:5,1:\"hub\",2:{0:0,1:0},3:null,4:[{class:2,id:6}]}],1:{0:1,1:0}}",
        );
    }

    #[test]
    fn self_reference_uses_cached_identity() {
        let registry = registry();
        let root = ComponentRef::new(node(7, "loop"));
        {
            let mut guard = root.write();
            let inner: &mut dyn Reflect = &mut **guard;
            let inner = inner.downcast_mut::<Node>().unwrap();
            inner.children.push(root.clone());
        }

        let mut value = root.clone();
        let text = Serializer::new(&registry)
            .serialize(&mut value, InclusionMode::Persisted)
            .unwrap();
        assert_eq!(
            text,
            "{class:2,0:7,1:\"loop\",2:{0:0,1:0},3:null,4:[{class:2,id:7}]}",
        );
    }

    #[test]
    fn cyclic_graph_terminates() {
        let registry = registry();
        let root = ComponentRef::new(node(1, "a"));
        let child = ComponentRef::new(Node {
            parent: Some(root.clone()),
            ..node(2, "b")
        });
        {
            let mut guard = root.write();
            let inner: &mut dyn Reflect = &mut **guard;
            inner.downcast_mut::<Node>().unwrap().children.push(child);
        }

        let mut value = root.clone();
        let text = Serializer::new(&registry)
            .serialize(&mut value, InclusionMode::Persisted)
            .unwrap();
        assert_eq!(
            text,
            "{class:2,0:1,1:\"a\",2:{0:0,1:0},3:null,4:[{class:2,id:2}]}",
        );
    }

    #[test]
    fn map_entries_are_key_value_objects() {
        #[derive(Reflect, Clone, Default)]
        struct Sheet {
            #[field(persist = 0)]
            weights: HashMap<String, f32>,
        }

        let registry = registry();
        let mut sheet = Sheet::default();
        sheet.weights.insert("a".to_string(), 1.5);

        let text = Serializer::new(&registry)
            .serialize(&mut sheet, InclusionMode::Persisted)
            .unwrap();
        assert_eq!(text, "{0:[{key:\"a\",value:1.5}]}");
    }

    #[test]
    fn serialization_compacts_float_buffers() {
        #[derive(Reflect, Clone, Default)]
        struct Track {
            #[field(persist = 0)]
            samples: FloatBuffer,
        }

        let registry = registry();
        let mut track = Track {
            samples: FloatBuffer::with_capacity(16),
        };
        track.samples.push_value(1.0);
        track.samples.push_value(2.5);

        let text = Serializer::new(&registry)
            .serialize(&mut track, InclusionMode::Persisted)
            .unwrap();
        assert_eq!(text, "{0:[1,2.5]}");
        assert_eq!(track.samples.capacity(), 2);
    }

    #[test]
    fn strings_are_quoted_and_escaped() {
        let registry = registry();
        let mut label = Label {
            text: "a\"b\\c\nd".to_string(),
            hint: String::new(),
        };

        let text = Serializer::new(&registry)
            .serialize(&mut label, InclusionMode::Persisted)
            .unwrap();
        assert_eq!(text, "{0:\"a\\\"b\\\\c\\nd\"}");
    }

    #[test]
    fn container_roots_are_rejected() {
        let registry = registry();
        let mut values = vec![1, 2];

        let err = Serializer::new(&registry)
            .serialize(&mut values, InclusionMode::Persisted)
            .unwrap_err();
        assert!(matches!(err, GraphError::InvalidRoot { .. }));
    }

    #[test]
    fn unregistered_component_class_fails() {
        #[derive(Reflect, Clone, Default)]
        struct Ghost {
            #[field(persist = 0)]
            id: u64,
        }

        impl Component for Ghost {
            fn component_id(&self) -> u64 {
                self.id
            }
        }

        let registry = registry();
        let mut ghost = ComponentRef::new(Ghost { id: 1 });

        let err = Serializer::new(&registry)
            .serialize(&mut ghost, InclusionMode::Persisted)
            .unwrap_err();
        assert!(matches!(err, GraphError::UnregisteredClass { .. }));
    }
}
