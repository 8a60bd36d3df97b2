use crate::drag::DragState;
use crate::outcome::{Effect, IgnoreReason, Outcome, RejectReason};
use crate::tree::{ElementTree, TreeError};
use element::{merge_json, Element, ElementId, ElementKind, ElementPatch, Settings};
use serde_json::{Map, Value};

/// Events emitted by the store after an applied mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreEvent {
    ElementAdded(ElementId),
    ElementRemoved(ElementId),
    ElementUpdated(ElementId),
    ElementMoved(ElementId),
    SelectionChanged(Option<ElementId>),
    SettingsChanged,
    /// Emitted after every change to the tree or settings.
    ContentChanged,
}

/// Handle returned by [`Store::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&StoreEvent)>;

/// The builder state: element tree, settings, selection cursor and drag state.
///
/// Observers registered with [`Store::subscribe`] are called synchronously
/// after each applied mutation. Ignored and rejected mutations notify nobody.
pub struct Store {
    tree: ElementTree,
    settings: Settings,
    /// Currently selected element. Always present in `tree` when set.
    selection: Option<ElementId>,
    pub(crate) drag: Option<DragState>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("tree", &self.tree)
            .field("settings", &self.settings)
            .field("selection", &self.selection)
            .field("drag", &self.drag)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Store {
    pub fn new() -> Self {
        Self {
            tree: ElementTree::new(),
            settings: Settings::default(),
            selection: None,
            drag: None,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Load a store from an existing forest and settings.
    pub fn from_document(elements: Vec<Element>, settings: Settings) -> Result<Self, TreeError> {
        let mut store = Self::new();
        store.tree = ElementTree::from_elements(elements)?;
        store.settings = settings;
        Ok(store)
    }

    pub fn tree(&self) -> &ElementTree {
        &self.tree
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn elements(&self) -> &[Element] {
        self.tree.roots()
    }

    /// Clone of the forest and settings, for saving or exporting.
    pub fn snapshot(&self) -> (Vec<Element>, Settings) {
        (self.tree.roots().to_vec(), self.settings.clone())
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.tree.get(id)
    }

    pub fn selection(&self) -> Option<ElementId> {
        self.selection
    }

    pub fn selected(&self) -> Option<&Element> {
        self.selection.and_then(|id| self.tree.get(id))
    }

    /// Register an observer.
    pub fn subscribe(&mut self, listener: impl FnMut(&StoreEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove an observer. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    fn emit(&mut self, event: StoreEvent) {
        for (_, listener) in &mut self.listeners {
            listener(&event);
        }
    }

    fn set_selection(&mut self, id: Option<ElementId>) {
        if self.selection != id {
            self.selection = id;
            self.emit(StoreEvent::SelectionChanged(id));
        }
    }

    /// Append a new element of `kind` with its defaults, and select it.
    pub fn add(&mut self, kind: ElementKind, parent: Option<ElementId>) -> Outcome {
        self.insert(Element::new(kind), parent, None)
    }

    /// Insert a prepared element (and its subtree) under `parent` at `index`.
    pub fn insert(
        &mut self,
        element: Element,
        parent: Option<ElementId>,
        index: Option<usize>,
    ) -> Outcome {
        let kind = element.kind;
        let outcome = self.tree.insert(element, parent, index);
        if let Outcome::Applied(Effect::Added { id, .. }) = &outcome {
            let id = *id;
            tracing::debug!("Added {} element {}", kind, id);
            self.emit(StoreEvent::ElementAdded(id));
            self.emit(StoreEvent::ContentChanged);
            self.set_selection(Some(id));
        }
        outcome
    }

    /// Shallow-merge attribute changes into the element with `id`.
    pub fn update(&mut self, id: ElementId, patch: &ElementPatch) -> Outcome {
        let outcome = self.tree.update(id, patch);
        if outcome.is_applied() {
            tracing::debug!("Updated element {}", id);
            // Replacing children may have discarded the selected element.
            if let Some(selected) = self.selection {
                if !self.tree.contains(selected) {
                    self.set_selection(None);
                }
            }
            self.emit(StoreEvent::ElementUpdated(id));
            self.emit(StoreEvent::ContentChanged);
        }
        outcome
    }

    /// Remove the element with `id` and its subtree.
    pub fn remove(&mut self, id: ElementId) -> Outcome {
        let outcome = self.tree.remove(id);
        if let Outcome::Applied(Effect::Removed { ids }) = &outcome {
            tracing::debug!("Removed element {} ({} total)", id, ids.len());
            if self.selection.is_some_and(|s| ids.contains(&s)) {
                self.set_selection(None);
            }
            if self
                .drag
                .as_ref()
                .is_some_and(|drag| drag.references_any(ids))
            {
                self.drag = None;
            }
            self.emit(StoreEvent::ElementRemoved(id));
            self.emit(StoreEvent::ContentChanged);
        }
        outcome
    }

    /// Duplicate the subtree at `id` right after itself, and select the copy.
    pub fn duplicate(&mut self, id: ElementId) -> Outcome {
        let outcome = self.tree.duplicate(id);
        if let Outcome::Applied(Effect::Duplicated { clone, .. }) = &outcome {
            let clone = *clone;
            tracing::debug!("Duplicated element {} as {}", id, clone);
            self.emit(StoreEvent::ElementAdded(clone));
            self.emit(StoreEvent::ContentChanged);
            self.set_selection(Some(clone));
        }
        outcome
    }

    /// Move the child at `from` to `to` within `parent` (or the root).
    pub fn reorder(&mut self, parent: Option<ElementId>, from: usize, to: usize) -> Outcome {
        let outcome = self.tree.reorder(parent, from, to);
        if outcome.is_applied() {
            tracing::debug!("Reordered children of {:?}: {} -> {}", parent, from, to);
            self.emit(StoreEvent::ContentChanged);
        }
        outcome
    }

    /// Detach `id` and append it to the container `new_parent`.
    pub fn move_to_container(&mut self, id: ElementId, new_parent: ElementId) -> Outcome {
        self.move_to(id, Some(new_parent), None)
    }

    /// Detach `id` and insert it under `new_parent` (or the root) at `index`.
    pub fn move_to(
        &mut self,
        id: ElementId,
        new_parent: Option<ElementId>,
        index: Option<usize>,
    ) -> Outcome {
        let outcome = self.tree.move_to(id, new_parent, index);
        if outcome.is_applied() {
            tracing::debug!("Moved element {} into {:?}", id, new_parent);
            self.emit(StoreEvent::ElementMoved(id));
            self.emit(StoreEvent::ContentChanged);
        }
        outcome
    }

    /// Set or clear the selection cursor.
    ///
    /// Selecting an id not present in the tree is ignored and leaves the
    /// cursor where it was.
    pub fn select(&mut self, id: Option<ElementId>) -> Outcome {
        if let Some(target) = id {
            if !self.tree.contains(target) {
                return Outcome::not_found(target);
            }
        }
        if self.selection == id {
            return Outcome::Ignored(IgnoreReason::Unchanged);
        }
        self.set_selection(id);
        Outcome::Applied(Effect::Selected { id })
    }

    pub fn clear_selection(&mut self) -> Outcome {
        self.select(None)
    }

    /// Shallow-merge changes into the document settings.
    pub fn update_settings(&mut self, patch: &Map<String, Value>) -> Outcome {
        let merged: Settings = match merge_json(&self.settings, patch) {
            Ok(merged) => merged,
            Err(e) => return Outcome::Rejected(RejectReason::from(e)),
        };
        if merged == self.settings {
            return Outcome::Ignored(IgnoreReason::Unchanged);
        }
        self.settings = merged;
        tracing::debug!("Updated settings");
        self.emit(StoreEvent::SettingsChanged);
        self.emit(StoreEvent::ContentChanged);
        Outcome::Applied(Effect::SettingsUpdated)
    }
}
