//! Drag-and-drop interaction state.
//!
//! A drag starts from the palette (a new element of some kind) or from an
//! element already on the canvas. While it is in flight the host reports
//! what the pointer is over; dropping performs at most one store mutation.

use crate::outcome::{IgnoreReason, Outcome};
use crate::store::Store;
use element::{ElementId, ElementKind};
use serde::{Deserialize, Serialize};

/// What is being dragged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum DragSource {
    Palette { kind: ElementKind },
    Element { id: ElementId },
}

/// Where a drop would land.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "target", rename_all = "snake_case")]
pub enum DropTarget {
    /// Append to the root list.
    Root,
    /// Append inside a container.
    Into { id: ElementId },
    /// The gap before child `index` of `parent` (or the root), counted
    /// before the dragged element is detached.
    Slot {
        parent: Option<ElementId>,
        index: usize,
    },
}

impl DropTarget {
    fn parent(&self) -> Option<ElementId> {
        match self {
            Self::Root => None,
            Self::Into { id } => Some(*id),
            Self::Slot { parent, .. } => *parent,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragState {
    pub source: DragSource,
    pub over: Option<DropTarget>,
}

impl DragState {
    pub(crate) fn references_any(&self, ids: &[ElementId]) -> bool {
        let source = match self.source {
            DragSource::Element { id } => Some(id),
            DragSource::Palette { .. } => None,
        };
        let target = self.over.as_ref().and_then(DropTarget::parent);
        [source, target].into_iter().flatten().any(|id| ids.contains(&id))
    }
}

impl Store {
    pub fn drag_state(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Start a drag, replacing any drag already in flight.
    pub fn begin_drag(&mut self, source: DragSource) -> Result<(), IgnoreReason> {
        if let DragSource::Element { id } = source {
            if !self.tree().contains(id) {
                return Err(IgnoreReason::NotFound { id });
            }
        }
        tracing::trace!("Begin drag {:?}", source);
        self.drag = Some(DragState { source, over: None });
        Ok(())
    }

    /// Record what the pointer is over. `None` leaves every target.
    pub fn drag_over(&mut self, target: Option<DropTarget>) {
        if let Some(drag) = self.drag.as_mut() {
            drag.over = target;
        }
    }

    /// Abandon the drag without touching the tree.
    pub fn cancel_drag(&mut self) {
        if self.drag.take().is_some() {
            tracing::trace!("Drag cancelled");
        }
    }

    /// Drop onto the current target.
    pub fn end_drag(&mut self) -> Outcome {
        let Some(DragState { source, over }) = self.drag.take() else {
            return Outcome::Ignored(IgnoreReason::NoActiveDrag);
        };
        let Some(target) = over else {
            return Outcome::Ignored(IgnoreReason::NoDropTarget);
        };
        tracing::trace!("Drop {:?} on {:?}", source, target);

        match (source, target) {
            (DragSource::Palette { kind }, target) => {
                let (parent, index) = match target {
                    DropTarget::Root => (None, None),
                    DropTarget::Into { id } => (Some(id), None),
                    DropTarget::Slot { parent, index } => (parent, Some(index)),
                };
                self.insert(element::Element::new(kind), parent, index)
            }
            (DragSource::Element { id }, DropTarget::Root) => self.move_to(id, None, None),
            (DragSource::Element { id }, DropTarget::Into { id: container }) => {
                self.move_to_container(id, container)
            }
            (DragSource::Element { id }, DropTarget::Slot { parent, index }) => {
                let Some((old_parent, old_index)) = self.tree().position_of(id) else {
                    return Outcome::not_found(id);
                };
                if old_parent == parent {
                    // Gaps on either side of the element are the same position.
                    let to = if index > old_index { index - 1 } else { index };
                    let len = self.tree().children_of(parent).map_or(0, <[_]>::len);
                    if to >= len {
                        return Outcome::Ignored(IgnoreReason::IndexOutOfRange { index, len });
                    }
                    self.reorder(parent, old_index, to)
                } else {
                    self.move_to(id, parent, Some(index))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Effect;

    fn store_with(kinds: &[ElementKind]) -> (Store, Vec<ElementId>) {
        let mut store = Store::new();
        let ids = kinds
            .iter()
            .map(|kind| store.add(*kind, None).created_id().unwrap())
            .collect();
        (store, ids)
    }

    fn root_ids(store: &Store) -> Vec<ElementId> {
        store.elements().iter().map(|e| e.id).collect()
    }

    #[test]
    fn palette_drop_into_container() {
        let (mut store, ids) = store_with(&[ElementKind::Container]);
        store.begin_drag(DragSource::Palette { kind: ElementKind::Email }).unwrap();
        store.drag_over(Some(DropTarget::Into { id: ids[0] }));

        let outcome = store.end_drag();
        let created = outcome.created_id().unwrap();
        assert_eq!(store.tree().parent_of(created), Some(ids[0]));
        assert_eq!(store.get(created).unwrap().kind, ElementKind::Email);
        assert!(!store.is_dragging());
    }

    #[test]
    fn palette_drop_into_slot() {
        let (mut store, ids) = store_with(&[ElementKind::Text, ElementKind::Text]);
        store.begin_drag(DragSource::Palette { kind: ElementKind::Divider }).unwrap();
        store.drag_over(Some(DropTarget::Slot { parent: None, index: 1 }));
        let created = store.end_drag().created_id().unwrap();
        assert_eq!(root_ids(&store), vec![ids[0], created, ids[1]]);
    }

    #[test]
    fn drop_without_target_is_ignored() {
        let (mut store, _) = store_with(&[ElementKind::Container]);
        assert_eq!(store.end_drag(), Outcome::Ignored(IgnoreReason::NoActiveDrag));

        store.begin_drag(DragSource::Palette { kind: ElementKind::Text }).unwrap();
        store.drag_over(Some(DropTarget::Root));
        store.drag_over(None);
        assert_eq!(store.end_drag(), Outcome::Ignored(IgnoreReason::NoDropTarget));
        assert_eq!(store.tree().len(), 1);
    }

    #[test]
    fn cancel_leaves_tree_alone() {
        let (mut store, ids) = store_with(&[ElementKind::Text, ElementKind::Container]);
        store.begin_drag(DragSource::Element { id: ids[0] }).unwrap();
        store.drag_over(Some(DropTarget::Into { id: ids[1] }));
        store.cancel_drag();
        assert_eq!(store.end_drag(), Outcome::Ignored(IgnoreReason::NoActiveDrag));
        assert_eq!(root_ids(&store), ids);
    }

    #[test]
    fn dragging_an_element_into_itself_is_rejected() {
        let (mut store, ids) = store_with(&[ElementKind::Container]);
        store.begin_drag(DragSource::Element { id: ids[0] }).unwrap();
        store.drag_over(Some(DropTarget::Into { id: ids[0] }));
        assert!(store.end_drag().is_rejected());
        assert_eq!(root_ids(&store), ids);
    }

    #[test]
    fn slot_drop_within_same_list_reorders() {
        let kinds = [ElementKind::Text; 4];
        let (mut store, ids) = store_with(&kinds);

        store.begin_drag(DragSource::Element { id: ids[0] }).unwrap();
        store.drag_over(Some(DropTarget::Slot { parent: None, index: 3 }));
        assert_eq!(
            store.end_drag(),
            Outcome::Applied(Effect::Reordered { parent: None, from: 0, to: 2 })
        );
        assert_eq!(root_ids(&store), vec![ids[1], ids[2], ids[0], ids[3]]);

        // Dropping just after itself is a no-op.
        store.begin_drag(DragSource::Element { id: ids[0] }).unwrap();
        store.drag_over(Some(DropTarget::Slot { parent: None, index: 3 }));
        assert_eq!(store.end_drag(), Outcome::Ignored(IgnoreReason::Unchanged));
    }

    #[test]
    fn slot_drop_across_parents_moves() {
        let (mut store, ids) = store_with(&[ElementKind::Text, ElementKind::Columns]);
        let inner = store.add(ElementKind::Heading, Some(ids[1])).created_id().unwrap();

        store.begin_drag(DragSource::Element { id: ids[0] }).unwrap();
        store.drag_over(Some(DropTarget::Slot { parent: Some(ids[1]), index: 0 }));
        assert!(store.end_drag().is_applied());

        let columns = store.get(ids[1]).unwrap();
        let children: Vec<_> = columns.children.iter().map(|e| e.id).collect();
        assert_eq!(children, vec![ids[0], inner]);
        assert!(store.tree().is_nested(ids[0]));
    }

    #[test]
    fn removing_the_dragged_element_ends_the_drag() {
        let (mut store, ids) = store_with(&[ElementKind::Text]);
        store.begin_drag(DragSource::Element { id: ids[0] }).unwrap();
        store.remove(ids[0]);
        assert!(!store.is_dragging());
    }

    #[test]
    fn begin_drag_of_missing_element_is_ignored() {
        let mut store = Store::new();
        let missing = ElementId::new();
        assert_eq!(
            store.begin_drag(DragSource::Element { id: missing }),
            Err(IgnoreReason::NotFound { id: missing })
        );
        assert!(!store.is_dragging());
    }
}
