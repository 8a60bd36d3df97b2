//! Builder queries - read-only access to store state.
//!
//! Queries allow inspecting the document without modifying it.
//! Useful for tools to understand current state before issuing commands.

use element::{Element, ElementId, ElementKind, Settings};
use serde::{Deserialize, Serialize};
use store::ElementTree;

/// A query for builder state (read-only).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Query {
    /// Get the whole element forest.
    GetTree,

    /// Get a specific element (with its subtree) by ID.
    GetElement { id: ElementId },

    /// Get the current selection.
    GetSelection,

    /// Get the document settings.
    GetSettings,

    /// Get the parent of an element.
    GetParent { id: ElementId },

    /// Get the total element count, nested elements included.
    GetElementCount,

    /// Get every element of one kind.
    FindByKind { kind: ElementKind },
}

/// Response to a query.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QueryResult {
    /// Tree result.
    Tree { elements: Vec<Element> },

    /// Single element result.
    Element { element: Option<Element> },

    /// Selection result.
    Selection { id: Option<ElementId> },

    /// Settings result.
    Settings { settings: Settings },

    /// Parent result. `parent` is `None` for root elements.
    Parent {
        parent: Option<ElementId>,
        nested: bool,
    },

    /// Count result.
    Count { count: usize },

    /// Element summaries result.
    Elements { elements: Vec<ElementInfo> },

    /// Error result.
    Error { message: String },
}

/// Serializable element summary, without the subtree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementInfo {
    pub id: ElementId,
    pub kind: ElementKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<ElementId>,
    pub depth: usize,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub children: usize,
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}

impl ElementInfo {
    pub fn new(element: &Element, tree: &ElementTree) -> Self {
        Self {
            id: element.id,
            kind: element.kind,
            label: element.label.clone(),
            name: element.name.clone(),
            parent: tree.parent_of(element.id),
            depth: tree.depth(element.id),
            children: element.children.len(),
        }
    }
}
