//! Builder commands - all operations that modify store state.
//!
//! Commands are intent-based: they describe what the user wants,
//! not how to achieve it. The executor maps each one onto a store
//! mutation and reports the result.

use crate::Target;
use element::{ElementId, ElementKind, ElementPatch};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use store::{Effect, IgnoreReason, Outcome, RejectReason};

/// A command that modifies builder state.
///
/// Commands are serializable for:
/// - Recording and replaying edits
/// - Scripting from the command line
/// - Generation by external tools
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    // === Creation ===
    /// Add a new element with its kind's defaults, plus optional overrides.
    AddElement {
        kind: ElementKind,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        parent: Option<ElementId>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        index: Option<usize>,
        #[serde(default, skip_serializing_if = "ElementPatch::is_empty")]
        attributes: ElementPatch,
    },

    /// Duplicate the target subtree right after itself.
    Duplicate {
        #[serde(default)]
        target: Target,
    },

    /// Remove the target and its subtree.
    Remove {
        #[serde(default)]
        target: Target,
    },

    // === Attributes ===
    /// Shallow-merge attribute changes into the target.
    UpdateElement {
        #[serde(default)]
        target: Target,
        attributes: ElementPatch,
    },

    // === Hierarchy ===
    /// Move a child within one sibling list.
    Reorder {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        parent: Option<ElementId>,
        from: usize,
        to: usize,
    },

    /// Append the target to a container's children.
    MoveToContainer {
        #[serde(default)]
        target: Target,
        container: ElementId,
    },

    /// Move the target under `parent` (or the root) at `index`.
    MoveTo {
        #[serde(default)]
        target: Target,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        parent: Option<ElementId>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        index: Option<usize>,
    },

    // === Selection ===
    /// Select one element.
    Select { id: ElementId },

    /// Clear the current selection.
    ClearSelection,

    // === Document ===
    /// Shallow-merge changes into the document settings.
    UpdateSettings { settings: Map<String, Value> },

    // === Batch ===
    /// Execute multiple commands in sequence, stopping at the first rejection.
    Batch { commands: Vec<Command> },
}

/// Result of executing a command.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CommandResult {
    /// Command succeeded.
    Success {
        /// IDs of elements created, if any.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        created: Vec<ElementId>,
        /// IDs of elements modified, if any.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        modified: Vec<ElementId>,
        /// IDs of elements deleted, if any.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        deleted: Vec<ElementId>,
    },
    /// Nothing to do; state is unchanged.
    Ignored { reason: IgnoreReason },
    /// Command refused; state is unchanged.
    Rejected { reason: RejectReason },
}

impl CommandResult {
    pub fn success() -> Self {
        Self::Success {
            created: vec![],
            modified: vec![],
            deleted: vec![],
        }
    }

    pub fn created(ids: Vec<ElementId>) -> Self {
        Self::Success {
            created: ids,
            modified: vec![],
            deleted: vec![],
        }
    }

    pub fn modified(ids: Vec<ElementId>) -> Self {
        Self::Success {
            created: vec![],
            modified: ids,
            deleted: vec![],
        }
    }

    pub fn deleted(ids: Vec<ElementId>) -> Self {
        Self::Success {
            created: vec![],
            modified: vec![],
            deleted: ids,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }

    /// First created id, for commands that add one element.
    pub fn created_id(&self) -> Option<ElementId> {
        match self {
            Self::Success { created, .. } => created.first().copied(),
            _ => None,
        }
    }
}

impl From<Outcome> for CommandResult {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Applied(effect) => match effect {
                Effect::Added { id, .. } => Self::created(vec![id]),
                Effect::Duplicated { created, .. } => Self::created(created),
                Effect::Updated { id } | Effect::Moved { id, .. } => Self::modified(vec![id]),
                Effect::Removed { ids } => Self::deleted(ids),
                Effect::Reordered { parent, .. } => Self::modified(parent.into_iter().collect()),
                Effect::Selected { .. } | Effect::SettingsUpdated => Self::success(),
            },
            Outcome::Ignored(reason) => Self::Ignored { reason },
            Outcome::Rejected(reason) => Self::Rejected { reason },
        }
    }
}

impl From<IgnoreReason> for CommandResult {
    fn from(reason: IgnoreReason) -> Self {
        Self::Ignored { reason }
    }
}
