//! Element model for the form/page builder.
//!
//! An element tree is an ordered forest of typed [`Element`]s. Containers
//! own their children directly, so the forest serializes to nested JSON
//! without any flattening step. [`Settings`] travel alongside the tree.

pub mod attrs;
mod element;
mod element_id;
mod kind;
pub mod layout;
mod patch;
mod settings;
pub mod validate;

pub use attrs::{ButtonAttrs, ButtonVariant, ChoiceOption, ImageAttrs, MenuItem, SocialLink};
pub use element::{default_name, Element, ATTRIBUTE_KEYS, IMMUTABLE_KEYS};
pub use element_id::ElementId;
pub use kind::{ElementKind, KindCategory};
pub use layout::{Align, FlexDirection, FlexLayout, GridTemplate, Justify, Layout, Spacing};
pub use patch::{merge_json, ElementPatch, PatchError};
pub use settings::{ActionKind, ProjectKind, Settings, SubmissionAction};
pub use validate::{is_valid_name, sanitize_name, validate_elements, ValidationIssue};
