//! Document-level checks on element trees.
//!
//! The store enforces structural invariants on every mutation; these checks
//! cover what it cannot, such as a loaded document or a user-entered name.

use crate::layout::GRID_COLUMNS;
use crate::{Element, ElementId};
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;
use thiserror::Error;

fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("name pattern compiles"))
}

/// Whether `name` is usable as a submitted data key.
pub fn is_valid_name(name: &str) -> bool {
    name_pattern().is_match(name)
}

/// Replace every character outside `[A-Za-z0-9_]` with `_`.
pub fn sanitize_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if sanitized.is_empty() {
        "field".to_string()
    } else {
        sanitized
    }
}

/// A problem found by [`validate_elements`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    #[error("element {id} appears more than once")]
    DuplicateId { id: ElementId },

    #[error("input {id} has no name")]
    MissingName { id: ElementId },

    #[error("input {id} has invalid name `{name}` (allowed: A-Z a-z 0-9 _)")]
    InvalidName { id: ElementId, name: String },

    #[error("name `{name}` is used by {} inputs", ids.len())]
    DuplicateName { name: String, ids: Vec<ElementId> },

    #[error("element {id} has width {width} (allowed: 1-12)")]
    InvalidWidth { id: ElementId, width: u8 },

    #[error("element {id} is not a container but has children")]
    ChildrenOnNonContainer { id: ElementId },
}

/// Check a forest of elements, reporting every issue found.
pub fn validate_elements(roots: &[Element]) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let mut seen_ids = HashSet::new();
    let mut names: HashMap<&str, Vec<ElementId>> = HashMap::new();
    let mut name_order: Vec<&str> = Vec::new();

    let mut stack: Vec<&Element> = roots.iter().rev().collect();
    while let Some(element) = stack.pop() {
        if !seen_ids.insert(element.id) {
            issues.push(ValidationIssue::DuplicateId { id: element.id });
        }

        if element.kind.is_input() {
            match element.name.as_deref() {
                None | Some("") => issues.push(ValidationIssue::MissingName { id: element.id }),
                Some(name) if !is_valid_name(name) => issues.push(ValidationIssue::InvalidName {
                    id: element.id,
                    name: name.to_string(),
                }),
                Some(name) => {
                    let ids = names.entry(name).or_default();
                    if ids.is_empty() {
                        name_order.push(name);
                    }
                    ids.push(element.id);
                }
            }
        }

        if let Some(width) = element.layout.width {
            if width == 0 || width > GRID_COLUMNS {
                issues.push(ValidationIssue::InvalidWidth {
                    id: element.id,
                    width,
                });
            }
        }

        if !element.kind.is_container() && !element.children.is_empty() {
            issues.push(ValidationIssue::ChildrenOnNonContainer { id: element.id });
        }

        stack.extend(element.children.iter().rev());
    }

    for name in name_order {
        let ids = &names[name];
        if ids.len() > 1 {
            issues.push(ValidationIssue::DuplicateName {
                name: name.to_string(),
                ids: ids.clone(),
            });
        }
    }

    issues
}
