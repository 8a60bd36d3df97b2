//! Command and query interface for the form builder.
//!
//! This crate defines the typed command language for all builder operations.
//! Commands represent user intent and are:
//! - Serializable (for recording, scripting, external tools)
//! - Intent-based (what to do, not how to do it)
//! - Reported uniformly as success, ignored or rejected
//!
//! # Example
//! ```ignore
//! use api::{Command, execute_command};
//!
//! let cmd = Command::AddElement {
//!     kind: ElementKind::Email,
//!     parent: None,
//!     index: None,
//!     attributes: ElementPatch::new().set("required", true),
//! };
//! let result = execute_command(&mut store, cmd);
//! ```

mod command;
mod executor;
mod query;
mod target;

pub use command::*;
pub use executor::{execute_command, execute_query};
pub use query::*;
pub use target::*;
