//! Editor-facing crawls over the component graph.
//!
//! Two crawls share one traversal core. [`crawl_components`] walks the
//! component graph itself, entering components down to a depth bound, with a
//! cycle guard so back references in the scene graph terminate.
//! [`crawl_properties`] inspects the property tree of a single component and
//! offers nested components to the callback without ever entering them.
//!
//! Both let the callback rewrite the graph while it is being walked: a
//! [`Replace`](CrawlAction::Replace) swaps the handle in place, a
//! [`Delete`](CrawlAction::Delete) removes the component from its owning
//! slot. Deletions inside containers are collected during iteration and
//! applied afterwards, so the container is never mutated under its own walk.

use sg_reflect::Reflect;
use sg_reflect::component::ComponentRef;
use sg_reflect::info::{InclusionMode, ReflectKind};
use sg_reflect::ops::ReflectMut;

use crate::error::GraphError;

// -----------------------------------------------------------------------------
// CrawlAction

/// What the callback wants done with the component it was offered.
#[derive(Debug)]
pub enum CrawlAction {
    /// Leave the component where it is.
    Keep,
    /// Swap the slot's handle for another component.
    Replace(ComponentRef),
    /// Remove the component from its owning slot.
    ///
    /// Only optional fields, lists and maps can actually lose an entry; a
    /// deletion requested for a slot that cannot be emptied is logged and
    /// ignored.
    Delete,
}

// -----------------------------------------------------------------------------
// Entry points

/// Crawls the component graph reachable from `root`.
///
/// The callback receives every component handle found, together with the
/// number of components entered above it. Components are entered (their own
/// properties crawled) only while that depth is below `max_depth`, and a
/// component already on the entered path is never entered again.
///
/// # Examples
///
/// ```
/// # use sg_graph::{CrawlAction, crawl_components};
/// # use sg_reflect::component::{Component, ComponentRef};
/// # use sg_reflect::derive::Reflect;
/// # #[derive(Reflect, Clone, Default)]
/// # struct Node { #[field(persist = 0)] id: u64 }
/// # impl Component for Node {
/// #     fn component_id(&self) -> u64 { self.id }
/// # }
/// let mut scene = vec![ComponentRef::new(Node { id: 1 }), ComponentRef::new(Node { id: 2 })];
///
/// crawl_components(&mut scene, 4, |handle, _depth| {
///     if handle.component_id() == 2 {
///         CrawlAction::Delete
///     } else {
///         CrawlAction::Keep
///     }
/// })
/// .unwrap();
///
/// assert_eq!(scene.len(), 1);
/// ```
pub fn crawl_components<F>(
    root: &mut dyn Reflect,
    max_depth: usize,
    mut action: F,
) -> Result<(), GraphError>
where
    F: FnMut(&ComponentRef, usize) -> CrawlAction,
{
    let mut crawler = Crawler {
        policy: Policy::Components { max_depth },
        entered: Vec::new(),
        action: &mut action,
    };
    if crawler.visit_slot(root, 0)? == SlotOutcome::Delete {
        log::warn!("crawl root cannot be deleted, ignored");
    }
    Ok(())
}

/// Crawls the property tree of a single component.
///
/// The callback is offered every component referenced from the tree, but
/// referenced components are never entered; their own properties stay
/// untouched. With `deep` set, plain values are recursed through without
/// limit; otherwise the crawl stops after the component's direct fields and
/// the immediate contents of their containers.
pub fn crawl_properties<F>(
    component: &ComponentRef,
    deep: bool,
    mut action: F,
) -> Result<(), GraphError>
where
    F: FnMut(&ComponentRef) -> CrawlAction,
{
    let mut adapter = |handle: &ComponentRef, _depth: usize| action(handle);
    let mut crawler = Crawler {
        policy: Policy::Properties { deep },
        entered: Vec::new(),
        action: &mut adapter,
    };
    let mut guard = component.write();
    let inner: &mut dyn Reflect = &mut **guard;
    crawler.visit_children(inner, 0)
}

// -----------------------------------------------------------------------------
// Traversal core

#[derive(Clone, Copy)]
enum Policy {
    Components { max_depth: usize },
    Properties { deep: bool },
}

#[derive(Debug, PartialEq, Eq)]
enum SlotOutcome {
    Kept,
    Delete,
}

struct Crawler<'f> {
    policy: Policy,
    /// Handles of the components currently entered, outermost first.
    entered: Vec<ComponentRef>,
    action: &'f mut dyn FnMut(&ComponentRef, usize) -> CrawlAction,
}

impl Crawler<'_> {
    /// Visits one value slot. `layer` counts plain-value nesting and only
    /// matters to the shallow property crawl.
    fn visit_slot(&mut self, slot: &mut dyn Reflect, layer: usize) -> Result<SlotOutcome, GraphError> {
        if slot.reflect_kind() != ReflectKind::Component {
            if self.recurse_plain(layer) {
                self.visit_children(slot, layer + 1)?;
            }
            return Ok(SlotOutcome::Kept);
        }

        let handle = slot.reflect_mut().as_component()?;
        let depth = self.entered.len();
        match (self.action)(handle, depth) {
            CrawlAction::Delete => return Ok(SlotOutcome::Delete),
            // A replacement is taken as-is and not crawled.
            CrawlAction::Replace(new_handle) => {
                *handle = new_handle;
                return Ok(SlotOutcome::Kept);
            }
            CrawlAction::Keep => {}
        }

        if !self.enter_component(handle, depth) {
            return Ok(SlotOutcome::Kept);
        }
        self.entered.push(handle.clone());
        let result = {
            let mut guard = handle.write();
            let inner: &mut dyn Reflect = &mut **guard;
            self.visit_children(inner, 0)
        };
        self.entered.pop();
        result?;
        Ok(SlotOutcome::Kept)
    }

    /// Whether a kept component at `depth` should itself be crawled.
    fn enter_component(&self, handle: &ComponentRef, depth: usize) -> bool {
        match self.policy {
            Policy::Components { max_depth } => {
                depth < max_depth
                    && !self
                        .entered
                        .as_slice()
                        .iter()
                        .any(|entered| entered.ptr_eq(handle))
            }
            Policy::Properties { .. } => false,
        }
    }

    /// Whether a plain aggregate at `layer` should have its children visited.
    fn recurse_plain(&self, layer: usize) -> bool {
        match self.policy {
            Policy::Components { .. } => true,
            Policy::Properties { deep } => deep || layer == 0,
        }
    }

    fn visit_children(&mut self, value: &mut dyn Reflect, layer: usize) -> Result<(), GraphError> {
        match value.reflect_mut() {
            ReflectMut::Struct(value) => {
                let info = value.reflect_type_info().as_struct()?;
                for (index, field) in info.iter().enumerate() {
                    if !InclusionMode::All.includes(field.flags()) {
                        continue;
                    }
                    let Some(slot) = value.field_at_mut(index) else {
                        continue;
                    };
                    if self.visit_slot(slot, layer)? == SlotOutcome::Delete {
                        log::warn!(
                            "component in non-optional field `{}` of `{}` cannot be deleted, kept",
                            field.name(),
                            info.type_path(),
                        );
                    }
                }
            }
            ReflectMut::List(value) => {
                let mut doomed = Vec::new();
                for index in 0..value.len() {
                    let Some(item) = value.get_mut(index) else {
                        continue;
                    };
                    if self.visit_slot(item, layer)? == SlotOutcome::Delete {
                        doomed.push(index);
                    }
                }
                // Back to front, so earlier indices stay valid.
                for index in doomed.into_iter().rev() {
                    value.remove(index);
                }
            }
            ReflectMut::Array(value) => {
                for index in 0..value.len() {
                    let Some(item) = value.get_mut(index) else {
                        continue;
                    };
                    if self.visit_slot(item, layer)? == SlotOutcome::Delete {
                        log::warn!(
                            "component in fixed-size `{}` cannot be deleted, kept",
                            value.reflect_type_path(),
                        );
                    }
                }
            }
            ReflectMut::Map(value) => {
                let mut doomed: Vec<Box<dyn Reflect>> = Vec::new();
                for index in 0..value.len() {
                    let Some((key, entry_value)) = value.get_at_mut(index) else {
                        continue;
                    };
                    if self.visit_slot(entry_value, layer)? == SlotOutcome::Delete {
                        doomed.push(key.reflect_clone()?);
                    }
                }
                for key in doomed {
                    value.remove(&*key);
                }
            }
            ReflectMut::Nullable(value) => {
                let delete = match value.value_mut() {
                    // The slot is transparent; the inner value sits at the
                    // same layer.
                    Some(inner) => self.visit_slot(inner, layer.saturating_sub(1))? == SlotOutcome::Delete,
                    None => false,
                };
                if delete {
                    value.take_value();
                }
            }
            // Components are dispatched by `visit_slot`; a bare handle here
            // means the caller passed one directly as a plain child.
            ReflectMut::Component(_) => {}
            ReflectMut::Opaque(_) => {}
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use sg_reflect::Reflect;
    use sg_reflect::component::{Component, ComponentRef};
    use sg_reflect::derive::Reflect;

    use super::{CrawlAction, crawl_components, crawl_properties};

    #[derive(Reflect, Clone, Default)]
    struct Node {
        #[field(persist = 0)]
        id: u64,
        #[field(persist = 1)]
        parent: Option<ComponentRef>,
        #[field(persist = 2)]
        children: Vec<ComponentRef>,
    }

    impl Component for Node {
        fn component_id(&self) -> u64 {
            self.id
        }
    }

    fn node(id: u64) -> ComponentRef {
        ComponentRef::new(Node {
            id,
            ..Default::default()
        })
    }

    fn node_with_children(id: u64, children: Vec<ComponentRef>) -> ComponentRef {
        ComponentRef::new(Node {
            id,
            children,
            ..Default::default()
        })
    }

    #[test]
    fn delete_during_crawl() {
        let mut scene = vec![node(1), node(2), node(3)];

        crawl_components(&mut scene, 4, |handle, _depth| {
            if handle.component_id() == 2 {
                CrawlAction::Delete
            } else {
                CrawlAction::Keep
            }
        })
        .unwrap();

        assert_eq!(scene.len(), 2);
        assert_eq!(scene[0].component_id(), 1);
        assert_eq!(scene[1].component_id(), 3);
    }

    #[test]
    fn replace_swaps_the_handle_in_place() {
        let old = node(1);
        let new = node(2);
        let mut scene = vec![old.clone()];

        crawl_components(&mut scene, 4, |handle, _depth| {
            if handle.ptr_eq(&old) {
                CrawlAction::Replace(new.clone())
            } else {
                CrawlAction::Keep
            }
        })
        .unwrap();

        assert!(scene[0].ptr_eq(&new));
    }

    #[test]
    fn depth_bound_stops_entering() {
        let c = node(3);
        let b = node_with_children(2, vec![c]);
        let a = node_with_children(1, vec![b]);

        let mut seen = Vec::new();
        let mut root = a.clone();
        crawl_components(&mut root, 1, |handle, depth| {
            seen.push((handle.component_id(), depth));
            CrawlAction::Keep
        })
        .unwrap();

        // `b` is offered at the bound but not entered, so `c` is never seen.
        assert_eq!(seen, [(1, 0), (2, 1)]);
    }

    #[test]
    fn cyclic_graphs_terminate() {
        let a = node(1);
        let b = node_with_children(2, vec![a.clone()]);
        {
            let mut guard = a.write();
            let inner: &mut dyn Reflect = &mut **guard;
            inner.downcast_mut::<Node>().unwrap().children.push(b);
        }

        let mut root = a.clone();
        let mut count = 0;
        crawl_components(&mut root, 8, |_handle, _depth| {
            count += 1;
            CrawlAction::Keep
        })
        .unwrap();

        // `a`, `b`, then `a` again through the cycle, never re-entered.
        assert_eq!(count, 3);
    }

    #[test]
    fn delete_empties_optional_fields() {
        let parent = node(9);
        let mut orphan = Node {
            id: 1,
            parent: Some(parent.clone()),
            ..Default::default()
        };

        crawl_components(&mut orphan, 2, |handle, _depth| {
            if handle.component_id() == 9 {
                CrawlAction::Delete
            } else {
                CrawlAction::Keep
            }
        })
        .unwrap();

        assert!(orphan.parent.is_none());
    }

    #[derive(Reflect, Clone, Default)]
    struct Anchor {
        #[field(persist = 0)]
        slot: Option<ComponentRef>,
    }

    #[derive(Reflect, Clone, Default)]
    struct Frame {
        #[field(persist = 0)]
        anchor: Anchor,
    }

    #[derive(Reflect, Clone, Default)]
    struct Widget {
        #[field(persist = 0)]
        id: u64,
        #[field(persist = 1)]
        target: Option<ComponentRef>,
        #[field(persist = 2)]
        frame: Frame,
    }

    impl Component for Widget {
        fn component_id(&self) -> u64 {
            self.id
        }
    }

    #[test]
    fn property_crawl_depth_flag() {
        let direct = ComponentRef::new(Widget {
            id: 1,
            ..Default::default()
        });
        let buried = ComponentRef::new(Widget {
            id: 2,
            ..Default::default()
        });
        let widget = ComponentRef::new(Widget {
            id: 3,
            target: Some(direct.clone()),
            frame: Frame {
                anchor: Anchor {
                    slot: Some(buried.clone()),
                },
            },
        });

        let mut seen = Vec::new();
        crawl_properties(&widget, false, |handle| {
            seen.push(handle.component_id());
            CrawlAction::Keep
        })
        .unwrap();
        assert_eq!(seen, [1]);

        seen.clear();
        crawl_properties(&widget, true, |handle| {
            seen.push(handle.component_id());
            CrawlAction::Keep
        })
        .unwrap();
        assert_eq!(seen, [1, 2]);
    }

    #[test]
    fn referenced_components_are_not_entered() {
        let inner = node(5);
        let child = node_with_children(4, vec![inner]);
        let root = node_with_children(3, vec![child]);

        let mut seen = Vec::new();
        crawl_properties(&root, true, |handle| {
            seen.push(handle.component_id());
            CrawlAction::Keep
        })
        .unwrap();

        // Only the direct reference; its own children stay untouched.
        assert_eq!(seen, [4]);
    }
}
