//! Which element a command acts on.
//!
//! Commands that act on one existing element name it either directly or
//! through the current selection.

use element::ElementId;
use serde::{Deserialize, Serialize};
use store::{IgnoreReason, Store};

/// Specifies which element a command targets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    /// The current selection (most common for user actions).
    #[default]
    Selection,

    /// Specific element by ID.
    Element(ElementId),
}

impl From<ElementId> for Target {
    fn from(id: ElementId) -> Self {
        Self::Element(id)
    }
}

impl Target {
    /// Resolve to an element id present in `store`.
    pub fn resolve(&self, store: &Store) -> Result<ElementId, IgnoreReason> {
        let id = match self {
            Self::Selection => store.selection().ok_or(IgnoreReason::NoSelection)?,
            Self::Element(id) => *id,
        };
        if store.tree().contains(id) {
            Ok(id)
        } else {
            Err(IgnoreReason::NotFound { id })
        }
    }
}
