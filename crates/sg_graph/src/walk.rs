//! The generic object-graph walker.
//!
//! [`walk`] drives a depth-first visit over a reflected value tree and
//! reports everything it sees to a [`GraphVisitor`]. The walker owns the
//! traversal policy (field filtering, component locking, null handling);
//! visitors own what happens at each node. The serializer is one visitor,
//! but the hook surface is deliberately generic.

use sg_reflect::Reflect;
use sg_reflect::component::ComponentRef;
use sg_reflect::info::{FieldInfo, InclusionMode, TypeInfo};
use sg_reflect::ops::ReflectMut;

use crate::error::GraphError;

// -----------------------------------------------------------------------------
// GraphVisitor

/// Receives traversal events from [`walk`].
///
/// Every hook has a no-op default, so visitors implement only what they care
/// about. The `enter_*` hooks return `Ok(false)` to prune the node they were
/// offered; a pruned node produces no further events, including its matching
/// `exit_*`. For a node that was entered with `Ok(true)`, the matching exit
/// hook fires exactly once after its subtree completes.
///
/// Any hook may abort the whole walk by returning an error.
pub trait GraphVisitor {
    /// Called once with the root before traversal begins.
    fn on_start(&mut self, root: &dyn Reflect) -> Result<(), GraphError> {
        let _ = root;
        Ok(())
    }

    /// Called once after the whole tree was visited.
    fn on_finish(&mut self) -> Result<(), GraphError> {
        Ok(())
    }

    /// Called for every value before its children are visited.
    fn enter_value(&mut self, value: &mut dyn Reflect) -> Result<bool, GraphError> {
        let _ = value;
        Ok(true)
    }

    /// Called for every entered value after its children were visited.
    fn exit_value(&mut self, value: &mut dyn Reflect) -> Result<(), GraphError> {
        let _ = value;
        Ok(())
    }

    /// Called before a struct field's value, for fields the walk's
    /// [`InclusionMode`] admits.
    fn enter_field(&mut self, field: &FieldInfo) -> Result<bool, GraphError> {
        let _ = field;
        Ok(true)
    }

    /// Called before a list or array element.
    fn enter_item(&mut self, index: usize) -> Result<bool, GraphError> {
        let _ = index;
        Ok(true)
    }

    /// Called after an entered list or array element.
    fn exit_item(&mut self, index: usize) -> Result<(), GraphError> {
        let _ = index;
        Ok(())
    }

    /// Called before a map entry's value, with the entry's key.
    fn enter_entry(&mut self, key: &dyn Reflect, index: usize) -> Result<bool, GraphError> {
        let _ = (key, index);
        Ok(true)
    }

    /// Called after an entered map entry.
    fn exit_entry(&mut self, index: usize) -> Result<(), GraphError> {
        let _ = index;
        Ok(())
    }

    /// Called for a null optional slot in place of `enter_value`.
    fn null_value(&mut self) -> Result<(), GraphError> {
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// walk

/// Visits `root` and everything reachable from it, depth first.
///
/// Struct fields are filtered through `mode` before being offered to the
/// visitor; ignored fields are never visited. Component handles are entered
/// through their write lock, one cell at a time, and the lock is held for
/// the duration of that component's subtree. Optional slots are transparent:
/// a present value is visited directly, a null slot raises
/// [`null_value`](GraphVisitor::null_value).
///
/// A missing field slot is not an error; it is logged and skipped.
pub fn walk<V>(root: &mut dyn Reflect, mode: InclusionMode, visitor: &mut V) -> Result<(), GraphError>
where
    V: GraphVisitor + ?Sized,
{
    visitor.on_start(root)?;
    walk_value(root, mode, visitor)?;
    visitor.on_finish()
}

fn walk_value<V>(
    value: &mut dyn Reflect,
    mode: InclusionMode,
    visitor: &mut V,
) -> Result<(), GraphError>
where
    V: GraphVisitor + ?Sized,
{
    if !visitor.enter_value(value)? {
        return Ok(());
    }
    walk_children(value, mode, visitor)?;
    visitor.exit_value(value)
}

fn walk_children<V>(
    value: &mut dyn Reflect,
    mode: InclusionMode,
    visitor: &mut V,
) -> Result<(), GraphError>
where
    V: GraphVisitor + ?Sized,
{
    match value.reflect_mut() {
        ReflectMut::Struct(value) => {
            let info = value.reflect_type_info().as_struct()?;
            for (index, field) in info.iter().enumerate() {
                if !mode.includes(field.flags()) {
                    continue;
                }
                if !visitor.enter_field(field)? {
                    continue;
                }
                match value.field_at_mut(index) {
                    Some(field_value) => walk_value(field_value, mode, visitor)?,
                    None => log::warn!(
                        "field `{}` missing on `{}`, skipped",
                        field.name(),
                        info.type_path(),
                    ),
                }
            }
        }
        ReflectMut::List(value) => {
            for index in 0..value.len() {
                if !visitor.enter_item(index)? {
                    continue;
                }
                match value.get_mut(index) {
                    Some(item) => walk_value(item, mode, visitor)?,
                    None => log::warn!(
                        "item {index} missing on `{}`, skipped",
                        value.reflect_type_path(),
                    ),
                }
                visitor.exit_item(index)?;
            }
        }
        ReflectMut::Array(value) => {
            for index in 0..value.len() {
                if !visitor.enter_item(index)? {
                    continue;
                }
                match value.get_mut(index) {
                    Some(item) => walk_value(item, mode, visitor)?,
                    None => log::warn!(
                        "item {index} missing on `{}`, skipped",
                        value.reflect_type_path(),
                    ),
                }
                visitor.exit_item(index)?;
            }
        }
        ReflectMut::Map(value) => {
            for index in 0..value.len() {
                let Some((key, entry_value)) = value.get_at_mut(index) else {
                    continue;
                };
                if !visitor.enter_entry(key, index)? {
                    continue;
                }
                walk_value(entry_value, mode, visitor)?;
                visitor.exit_entry(index)?;
            }
        }
        ReflectMut::Nullable(value) => match value.value_mut() {
            Some(inner) => walk_value(inner, mode, visitor)?,
            None => {
                if let TypeInfo::Nullable(info) = value.reflect_type_info()
                    && info.item_is::<ComponentRef>()
                {
                    log::warn!(
                        "null component reference in `{}`, skipped",
                        value.reflect_type_path(),
                    );
                }
                visitor.null_value()?;
            }
        },
        ReflectMut::Component(handle) => {
            // One cell locked at a time; nested handles are never locked
            // while this one is held.
            let mut guard = handle.write();
            let inner: &mut dyn Reflect = &mut **guard;
            walk_value(inner, mode, visitor)?;
        }
        // Leaves have no children.
        ReflectMut::Opaque(_) => {}
    }
    Ok(())
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use sg_reflect::Reflect;
    use sg_reflect::derive::Reflect;
    use sg_reflect::info::InclusionMode;

    use super::{GraphVisitor, walk};
    use crate::error::GraphError;

    #[derive(Reflect, Clone, Default)]
    struct Sample {
        #[field(persist = 0)]
        value: i32,
        #[field(persist = 1)]
        items: Vec<i32>,
        #[field(persist = 2)]
        maybe: Option<i32>,
        #[field(editor)]
        hint: String,
    }

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl GraphVisitor for Recorder {
        fn enter_value(&mut self, value: &mut dyn Reflect) -> Result<bool, GraphError> {
            self.events.push(format!("+{}", value.reflect_kind()));
            Ok(true)
        }

        fn exit_value(&mut self, value: &mut dyn Reflect) -> Result<(), GraphError> {
            self.events.push(format!("-{}", value.reflect_kind()));
            Ok(())
        }

        fn enter_field(
            &mut self,
            field: &sg_reflect::info::FieldInfo,
        ) -> Result<bool, GraphError> {
            self.events.push(format!("field {}", field.name()));
            Ok(true)
        }

        fn null_value(&mut self) -> Result<(), GraphError> {
            self.events.push("null".to_string());
            Ok(())
        }
    }

    #[test]
    fn events_pair_up_and_mode_filters() {
        let mut sample = Sample {
            value: 1,
            items: vec![4, 5],
            maybe: None,
            hint: "ignored in persisted mode".to_string(),
        };

        let mut recorder = Recorder::default();
        walk(&mut sample, InclusionMode::Persisted, &mut recorder).unwrap();

        assert_eq!(
            recorder.events,
            [
                "+struct",
                "field value",
                "+opaque",
                "-opaque",
                "field items",
                "+list",
                "+opaque",
                "-opaque",
                "+opaque",
                "-opaque",
                "-list",
                "field maybe",
                "+nullable",
                "null",
                "-nullable",
                "-struct",
            ],
        );
    }

    #[test]
    fn pruned_values_produce_no_exit() {
        struct PruneLists {
            entered: usize,
            exited: usize,
        }

        impl GraphVisitor for PruneLists {
            fn enter_value(&mut self, value: &mut dyn Reflect) -> Result<bool, GraphError> {
                if value.reflect_kind() == sg_reflect::info::ReflectKind::List {
                    return Ok(false);
                }
                self.entered += 1;
                Ok(true)
            }

            fn exit_value(&mut self, _value: &mut dyn Reflect) -> Result<(), GraphError> {
                self.exited += 1;
                Ok(())
            }
        }

        let mut sample = Sample {
            items: vec![1, 2, 3],
            ..Default::default()
        };
        let mut visitor = PruneLists {
            entered: 0,
            exited: 0,
        };
        walk(&mut sample, InclusionMode::Persisted, &mut visitor).unwrap();

        // The list and its items were skipped; everything entered was exited.
        assert_eq!(visitor.entered, visitor.exited);
        // Root struct, the `value` scalar and the `maybe` slot.
        assert_eq!(visitor.entered, 3);
    }
}
