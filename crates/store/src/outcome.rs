//! Result of a store mutation.
//!
//! Every mutation reports what it did. Invalid input never panics: it is
//! either ignored (nothing to do, e.g. the target is gone) or rejected (the
//! request would break a tree invariant).

use element::ElementId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What a mutation did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The mutation changed the store.
    Applied(Effect),
    /// Nothing to do; the store is unchanged.
    Ignored(IgnoreReason),
    /// The request was refused; the store is unchanged.
    Rejected(RejectReason),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self, Self::Ignored(_))
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    pub fn effect(&self) -> Option<&Effect> {
        match self {
            Self::Applied(effect) => Some(effect),
            _ => None,
        }
    }

    /// Id of the element an add or duplicate created.
    pub fn created_id(&self) -> Option<ElementId> {
        match self {
            Self::Applied(Effect::Added { id, .. }) => Some(*id),
            Self::Applied(Effect::Duplicated { clone, .. }) => Some(*clone),
            _ => None,
        }
    }

    pub(crate) fn not_found(id: ElementId) -> Self {
        Self::Ignored(IgnoreReason::NotFound { id })
    }
}

/// Description of an applied mutation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum Effect {
    Added {
        id: ElementId,
        parent: Option<ElementId>,
        index: usize,
    },
    Updated {
        id: ElementId,
    },
    /// `ids` lists the removed element and all its descendants.
    Removed {
        ids: Vec<ElementId>,
    },
    Duplicated {
        source: ElementId,
        clone: ElementId,
        /// Every id in the cloned subtree, in pre-order.
        created: Vec<ElementId>,
    },
    Reordered {
        parent: Option<ElementId>,
        from: usize,
        to: usize,
    },
    Moved {
        id: ElementId,
        from: Option<ElementId>,
        to: Option<ElementId>,
        index: usize,
    },
    Selected {
        id: Option<ElementId>,
    },
    SettingsUpdated,
}

/// Why a mutation did nothing.
#[derive(Clone, Debug, Error, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IgnoreReason {
    #[error("element {id} not found")]
    NotFound { id: ElementId },

    #[error("already in the requested state")]
    Unchanged,

    #[error("index {index} out of range for {len} children")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("drag ended without a drop target")]
    NoDropTarget,

    #[error("no drag in progress")]
    NoActiveDrag,

    #[error("no element selected")]
    NoSelection,
}

/// Why a mutation was refused.
#[derive(Clone, Debug, Error, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RejectReason {
    #[error("element {id} cannot hold children")]
    NotAContainer { id: ElementId },

    #[error("cannot move {id} into {target}: target is the element or one of its descendants")]
    Cycle { id: ElementId, target: ElementId },

    #[error("element id {id} is already in the tree")]
    DuplicateId { id: ElementId },

    #[error("attribute `{key}` cannot be changed")]
    ImmutableField { key: String },

    #[error("unknown attribute `{key}`")]
    UnknownAttribute { key: String },

    #[error("invalid field name `{name}` (allowed: A-Z a-z 0-9 _)")]
    InvalidName { name: String },

    #[error("input fields need a name")]
    MissingName,

    #[error("invalid attributes: {message}")]
    InvalidAttributes { message: String },
}

impl From<element::PatchError> for RejectReason {
    fn from(error: element::PatchError) -> Self {
        use element::PatchError;
        match error {
            PatchError::ImmutableField(key) => Self::ImmutableField { key },
            PatchError::UnknownAttribute(key) => Self::UnknownAttribute { key },
            error @ PatchError::NotAnObject => Self::InvalidAttributes {
                message: error.to_string(),
            },
            PatchError::Invalid(message) => Self::InvalidAttributes { message },
        }
    }
}
