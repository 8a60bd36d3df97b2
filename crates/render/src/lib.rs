//! Canonical rendering projection.
//!
//! [`project`] turns an element tree and its settings into a [`RenderTree`]
//! with widths, spacing, nesting, field bindings and selection chrome
//! already computed. Outputs differ only in the [`Capabilities`] they pass.

mod node;
mod project;
pub mod style;

pub use node::{Chrome, Content, FieldBinding, InputType, RenderNode, RenderTree, SubmitButton};
pub use project::{project, project_store, Capabilities};
pub use style::{Declaration, Style};
