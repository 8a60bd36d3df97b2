//! Builder state: the element tree, document settings, the selection cursor
//! and drag-and-drop state, behind one explicit [`Store`].
//!
//! Every mutation returns an [`Outcome`]. Observers registered with
//! [`Store::subscribe`] hear about applied mutations only.

mod drag;
mod outcome;
mod store;
mod tree;

pub use drag::{DragSource, DragState, DropTarget};
pub use outcome::{Effect, IgnoreReason, Outcome, RejectReason};
pub use store::{Store, StoreEvent, SubscriptionId};
pub use tree::{ElementTree, Iter, TreeError};
