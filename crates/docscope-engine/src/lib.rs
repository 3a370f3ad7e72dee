//! docscope-engine: inspection tooling for structured-document editors.
//!
//! The engine wraps a host editor (behind the [`host`] contracts) and a
//! rendering layer (behind the [`render`] contract) and gives the
//! surrounding UI two inspection capabilities:
//!
//! - **Time travel**: every non-skipped state transition is recorded into a
//!   bounded, newest-first [`history::History`], with a structural
//!   [`diff::Delta`] against the previous head, and the live editor can be
//!   rolled back to any recorded entry.
//! - **Node picking**: an interactive [`picker::PickerSession`] that maps
//!   the element under the pointer back to its child-index
//!   [`paths::NodePath`] inside the document tree.
//!
//! The [`inspect::Inspector`] ties both together and is the type frontends
//! embed. The engine never renders anything and never edits documents.

pub mod config;
pub mod diff;
pub mod history;
pub mod host;
pub mod inspect;
pub mod paths;
pub mod picker;
pub mod render;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use config::InspectorConfig;
pub use diff::{Delta, DiffOptions};
pub use history::{HISTORY_SIZE, History, HistoryError, Snapshot};
pub use host::{DocNode, EditorHost, EditorState, HostError, Transition, TransitionTags};
pub use inspect::{Inspector, InspectorTab};
pub use paths::NodePath;
pub use picker::{PickerError, PickerSession};
pub use render::{Owned, OwnerKind, Rect, ViewLayer};
