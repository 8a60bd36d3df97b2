//! The element forest and its derived parent index.
//!
//! Elements own their children, so the forest is the serialized shape of the
//! document. Alongside it the tree keeps an id -> parent index, updated by
//! every mutation, so parent and ancestor lookups never walk the forest.
//! Lookups by id follow the index from the root down, scanning one sibling
//! list per level.

use crate::outcome::{Effect, IgnoreReason, Outcome, RejectReason};
use element::{is_valid_name, Element, ElementId, ElementKind, ElementPatch};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Errors building a tree from existing elements.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("element id {0} appears more than once")]
    DuplicateId(ElementId),
}

/// Ordered forest of elements with a parent index.
#[derive(Clone, Debug, Default)]
pub struct ElementTree {
    roots: Vec<Element>,
    /// Parent of every element in the forest; `None` for roots.
    parents: HashMap<ElementId, Option<ElementId>>,
}

impl PartialEq for ElementTree {
    fn eq(&self, other: &Self) -> bool {
        self.roots == other.roots
    }
}

impl ElementTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from a forest, dropping children of non-container elements.
    pub fn from_elements(mut roots: Vec<Element>) -> Result<Self, TreeError> {
        for root in &mut roots {
            for id in root.drop_invalid_children() {
                tracing::warn!("Dropped children of non-container element {}", id);
            }
        }

        let mut parents = HashMap::new();
        for root in &roots {
            index_subtree(&mut parents, root, None)?;
        }
        Ok(Self { roots, parents })
    }

    pub fn roots(&self) -> &[Element] {
        &self.roots
    }

    pub fn into_elements(self) -> Vec<Element> {
        self.roots
    }

    /// Total number of elements at any depth.
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.parents.contains_key(&id)
    }

    /// Parent of `id`; `None` for root elements and unknown ids.
    pub fn parent_of(&self, id: ElementId) -> Option<ElementId> {
        self.parents.get(&id).copied().flatten()
    }

    /// Ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: ElementId) -> Vec<ElementId> {
        let mut ancestors = Vec::new();
        let mut current = self.parent_of(id);
        while let Some(parent) = current {
            ancestors.push(parent);
            current = self.parent_of(parent);
        }
        ancestors
    }

    /// Whether `id` lies strictly inside the subtree rooted at `ancestor`.
    pub fn is_descendant_of(&self, id: ElementId, ancestor: ElementId) -> bool {
        self.ancestors(id).contains(&ancestor)
    }

    /// Whether `id` sits inside a container rather than at the root.
    ///
    /// Derived from tree position on every call.
    pub fn is_nested(&self, id: ElementId) -> bool {
        self.parent_of(id).is_some()
    }

    /// Number of ancestors of `id`.
    pub fn depth(&self, id: ElementId) -> usize {
        self.ancestors(id).len()
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        let path = self.path_to(id)?;
        let mut siblings = self.roots.as_slice();
        let (last, ancestors) = path.split_last()?;
        for step in ancestors {
            siblings = siblings.iter().find(|e| e.id == *step)?.children.as_slice();
        }
        siblings.iter().find(|e| e.id == *last)
    }

    fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        let path = self.path_to(id)?;
        let mut siblings = &mut self.roots;
        let (last, ancestors) = path.split_last()?;
        for step in ancestors {
            siblings = &mut siblings.iter_mut().find(|e| e.id == *step)?.children;
        }
        siblings.iter_mut().find(|e| e.id == *last)
    }

    /// Ids from the outermost ancestor down to `id` itself.
    fn path_to(&self, id: ElementId) -> Option<Vec<ElementId>> {
        if !self.contains(id) {
            return None;
        }
        let mut path = self.ancestors(id);
        path.reverse();
        path.push(id);
        Some(path)
    }

    /// Children of `parent`, or the root sequence for `None`.
    pub fn children_of(&self, parent: Option<ElementId>) -> Option<&[Element]> {
        match parent {
            None => Some(&self.roots),
            Some(id) => self.get(id).map(|e| e.children.as_slice()),
        }
    }

    fn children_of_mut(&mut self, parent: Option<ElementId>) -> Option<&mut Vec<Element>> {
        match parent {
            None => Some(&mut self.roots),
            Some(id) => self.get_mut(id).map(|e| &mut e.children),
        }
    }

    /// Parent and sibling index of `id`.
    pub fn position_of(&self, id: ElementId) -> Option<(Option<ElementId>, usize)> {
        let parent = *self.parents.get(&id)?;
        let index = self
            .children_of(parent)?
            .iter()
            .position(|e| e.id == id)?;
        Some((parent, index))
    }

    /// Depth-first, pre-order iteration over every element.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            stack: self.roots.iter().rev().collect(),
        }
    }

    pub fn find_by_kind(&self, kind: ElementKind) -> Vec<&Element> {
        self.iter().filter(|e| e.kind == kind).collect()
    }

    /// Validate that `parent` can receive children.
    fn check_container(&self, parent: Option<ElementId>) -> Result<(), Outcome> {
        let Some(parent_id) = parent else {
            return Ok(());
        };
        match self.get(parent_id) {
            None => Err(Outcome::not_found(parent_id)),
            Some(p) if !p.is_container() => {
                Err(Outcome::Rejected(RejectReason::NotAContainer { id: parent_id }))
            }
            Some(_) => Ok(()),
        }
    }

    /// Insert an element (with its subtree) under `parent` at `index`, or last.
    ///
    /// Every input in the subtree needs a valid name and every width must
    /// lie in 1..=12.
    pub fn insert(
        &mut self,
        mut element: Element,
        parent: Option<ElementId>,
        index: Option<usize>,
    ) -> Outcome {
        if let Err(outcome) = self.check_container(parent) {
            return outcome;
        }

        for id in element.drop_invalid_children() {
            tracing::warn!("Dropped children of non-container element {}", id);
        }

        if let Err(reason) = check_subtree(&element) {
            return Outcome::Rejected(reason);
        }
        self.attach(element, parent, index)
    }

    /// Place an already checked subtree.
    fn attach(&mut self, element: Element, parent: Option<ElementId>, index: Option<usize>) -> Outcome {
        let mut incoming = HashMap::new();
        if let Err(TreeError::DuplicateId(id)) = index_subtree(&mut incoming, &element, parent) {
            return Outcome::Rejected(RejectReason::DuplicateId { id });
        }
        if let Some(id) = incoming.keys().find(|id| self.contains(**id)) {
            return Outcome::Rejected(RejectReason::DuplicateId { id: *id });
        }

        let Some(siblings) = self.children_of_mut(parent) else {
            return Outcome::Ignored(IgnoreReason::NotFound {
                id: parent.unwrap_or(element.id),
            });
        };
        let len = siblings.len();
        let index = index.unwrap_or(len);
        if index > len {
            return Outcome::Ignored(IgnoreReason::IndexOutOfRange { index, len });
        }

        let id = element.id;
        siblings.insert(index, element);
        self.parents.extend(incoming);
        Outcome::Applied(Effect::Added { id, parent, index })
    }

    /// Shallow-merge `patch` into the element with `id`.
    pub fn update(&mut self, id: ElementId, patch: &ElementPatch) -> Outcome {
        let Some(current) = self.get(id) else {
            return Outcome::not_found(id);
        };

        let mut merged = match patch.apply_to(current) {
            Ok(merged) => merged,
            Err(e) => return Outcome::Rejected(e.into()),
        };

        for dropped in merged.drop_invalid_children() {
            tracing::warn!("Dropped children of non-container element {}", dropped);
        }

        // Rules apply only to the keys the patch touches.
        let checked = patch.keys().try_for_each(|key| match key {
            "name" => check_name(&merged),
            "width" => check_width(&merged),
            "children" => merged.children.iter().try_for_each(check_subtree),
            _ => Ok(()),
        });
        if let Err(reason) = checked {
            return Outcome::Rejected(reason);
        }

        if merged == *current {
            return Outcome::Ignored(IgnoreReason::Unchanged);
        }

        let parent = self.parent_of(id);
        let mut reindexed = None;
        if patch.touches_children() {
            let old_ids: HashSet<ElementId> = current.subtree_ids().into_iter().collect();
            let mut incoming = HashMap::new();
            if let Err(TreeError::DuplicateId(dup)) = index_subtree(&mut incoming, &merged, parent) {
                return Outcome::Rejected(RejectReason::DuplicateId { id: dup });
            }
            if let Some(dup) = incoming
                .keys()
                .find(|k| !old_ids.contains(*k) && self.contains(**k))
            {
                return Outcome::Rejected(RejectReason::DuplicateId { id: *dup });
            }
            reindexed = Some((old_ids, incoming));
        }

        if let Some(slot) = self.get_mut(id) {
            *slot = merged;
        }
        if let Some((old_ids, incoming)) = reindexed {
            for old in old_ids {
                self.parents.remove(&old);
            }
            self.parents.extend(incoming);
        }
        Outcome::Applied(Effect::Updated { id })
    }

    /// Detach and discard the element with `id` and its subtree.
    pub fn remove(&mut self, id: ElementId) -> Outcome {
        let Some((parent, index)) = self.position_of(id) else {
            return Outcome::not_found(id);
        };
        let Some(siblings) = self.children_of_mut(parent) else {
            return Outcome::not_found(id);
        };
        let removed = siblings.remove(index);
        let ids = removed.subtree_ids();
        for removed_id in &ids {
            self.parents.remove(removed_id);
        }
        Outcome::Applied(Effect::Removed { ids })
    }

    /// Clone the subtree at `id` with fresh ids, placing it right after the original.
    pub fn duplicate(&mut self, id: ElementId) -> Outcome {
        let Some((parent, index)) = self.position_of(id) else {
            return Outcome::not_found(id);
        };
        let Some(original) = self.get(id) else {
            return Outcome::not_found(id);
        };
        let clone = original.clone_with_fresh_ids();
        let clone_id = clone.id;
        let created = clone.subtree_ids();

        // The copy may repeat problems the original was loaded with.
        match self.attach(clone, parent, Some(index + 1)) {
            Outcome::Applied(_) => Outcome::Applied(Effect::Duplicated {
                source: id,
                clone: clone_id,
                created,
            }),
            other => other,
        }
    }

    /// Move the child at `from` to `to` within one sibling list.
    pub fn reorder(&mut self, parent: Option<ElementId>, from: usize, to: usize) -> Outcome {
        if let Some(parent_id) = parent.filter(|p| !self.contains(*p)) {
            return Outcome::not_found(parent_id);
        }
        let Some(siblings) = self.children_of_mut(parent) else {
            return Outcome::Ignored(IgnoreReason::Unchanged);
        };
        let len = siblings.len();
        for index in [from, to] {
            if index >= len {
                return Outcome::Ignored(IgnoreReason::IndexOutOfRange { index, len });
            }
        }
        if from == to {
            return Outcome::Ignored(IgnoreReason::Unchanged);
        }
        let element = siblings.remove(from);
        siblings.insert(to, element);
        Outcome::Applied(Effect::Reordered { parent, from, to })
    }

    /// Detach `id` and append it to `new_parent`'s children.
    pub fn move_to_container(&mut self, id: ElementId, new_parent: ElementId) -> Outcome {
        self.move_to(id, Some(new_parent), None)
    }

    /// Detach `id` and insert it under `new_parent` (or the root) at `index`.
    ///
    /// `index` is the element's position in the destination list after the
    /// move; `None` appends.
    pub fn move_to(
        &mut self,
        id: ElementId,
        new_parent: Option<ElementId>,
        index: Option<usize>,
    ) -> Outcome {
        let Some((old_parent, old_index)) = self.position_of(id) else {
            return Outcome::not_found(id);
        };
        if let Some(target) = new_parent {
            if target == id || self.is_descendant_of(target, id) {
                return Outcome::Rejected(RejectReason::Cycle { id, target });
            }
        }
        if let Err(outcome) = self.check_container(new_parent) {
            return outcome;
        }

        let Some(destination) = self.children_of(new_parent) else {
            return Outcome::Ignored(IgnoreReason::NotFound {
                id: new_parent.unwrap_or(id),
            });
        };
        // Length of the destination once `id` has been detached.
        let len = if old_parent == new_parent {
            destination.len() - 1
        } else {
            destination.len()
        };
        let index = index.unwrap_or(len);
        if index > len {
            return Outcome::Ignored(IgnoreReason::IndexOutOfRange { index, len });
        }
        if old_parent == new_parent && old_index == index {
            return Outcome::Ignored(IgnoreReason::Unchanged);
        }

        let Some(source) = self.children_of_mut(old_parent) else {
            return Outcome::not_found(id);
        };
        let element = source.remove(old_index);
        let Some(destination) = self.children_of_mut(new_parent) else {
            return Outcome::not_found(id);
        };
        destination.insert(index, element);
        self.parents.insert(id, new_parent);

        Outcome::Applied(Effect::Moved {
            id,
            from: old_parent,
            to: new_parent,
            index,
        })
    }
}

fn check_name(element: &Element) -> Result<(), RejectReason> {
    if !element.kind.is_input() {
        return Ok(());
    }
    match element.name.as_deref() {
        None | Some("") => Err(RejectReason::MissingName),
        Some(name) if !is_valid_name(name) => Err(RejectReason::InvalidName {
            name: name.to_string(),
        }),
        Some(_) => Ok(()),
    }
}

fn check_width(element: &Element) -> Result<(), RejectReason> {
    match element.layout.width {
        Some(width) if !element.layout.has_valid_width() => Err(RejectReason::InvalidAttributes {
            message: format!("width {} is outside 1-12", width),
        }),
        _ => Ok(()),
    }
}

/// Name and width rules for `element` and every descendant.
fn check_subtree(element: &Element) -> Result<(), RejectReason> {
    check_name(element)?;
    check_width(element)?;
    element.children.iter().try_for_each(check_subtree)
}

/// Record the parent of every element in `element`'s subtree.
fn index_subtree(
    parents: &mut HashMap<ElementId, Option<ElementId>>,
    element: &Element,
    parent: Option<ElementId>,
) -> Result<(), TreeError> {
    if parents.insert(element.id, parent).is_some() {
        return Err(TreeError::DuplicateId(element.id));
    }
    for child in &element.children {
        index_subtree(parents, child, Some(element.id))?;
    }
    Ok(())
}

/// Pre-order iterator over a tree.
pub struct Iter<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.stack.pop()?;
        self.stack.extend(element.children.iter().rev());
        Some(element)
    }
}
