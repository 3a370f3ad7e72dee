//! Contracts the host document-editing engine must provide.
//!
//! The inspector never edits documents itself. It observes the host's state
//! transitions, reads serialized document trees out of states it has
//! recorded, and occasionally asks the host to rebuild and re-apply one of
//! those states (rollback). Everything it needs from the editor is expressed
//! by the three traits in this module plus the per-transition tag map.
//!
//! Serialized document trees are `serde_json::Value`s in the conventional
//! shape: a node object carries `"type"`, optionally `"text"` and `"attrs"`,
//! and its children in a `"content"` array.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Access to one node of the host's live (instantiated) document tree.
///
/// Implementations are expected to be cheap handles (an `Rc`/`Arc` or an
/// index into an arena), not deep copies. `same_node` is *identity*, not
/// structural equality: two structurally equal siblings must not compare as
/// the same node.
pub trait DocNode: Clone {
    fn child_count(&self) -> usize;

    /// Child at `index` in defined document order, `None` when out of range.
    fn child(&self, index: usize) -> Option<Self>;

    /// Identity comparison. Must hold across clones of the same handle.
    fn same_node(&self, other: &Self) -> bool;
}

/// One immutable editor state.
///
/// States are values: the host transitions by replacing its current state,
/// and a state held by the inspector keeps describing the document as it was
/// when the state was produced.
pub trait EditorState: Clone {
    type Node: DocNode;

    /// Root of the live document tree.
    fn doc(&self) -> Self::Node;

    /// The document tree in its serialized (JSON) form.
    fn doc_json(&self) -> Value;

    /// Node starting at the given document position, if any.
    fn node_at(&self, pos: usize) -> Option<Self::Node>;

    /// Rendered markup of the current selection's content. Used for the
    /// human-readable preview attached to history entries; may be empty.
    fn selection_markup(&self) -> String;
}

/// The live editor itself, as far as the inspector is concerned.
pub trait EditorHost {
    type State: EditorState;

    /// The state the editor currently displays.
    fn state(&self) -> &Self::State;

    /// Build a fresh state equivalent to `stored`: same serialized document
    /// tree, same selection, same schema/plugin configuration.
    ///
    /// The returned state must be a deep, independent copy. It must not
    /// alias `stored`'s live object graph, so that later edits to the live
    /// editor cannot reach back into a recorded snapshot.
    fn reconstruct(&self, stored: &Self::State) -> Result<Self::State, HostError>;

    /// Push a state into the live editor, attaching `tags` to the resulting
    /// transition so downstream listeners (including this crate) can tell it
    /// apart from a user edit.
    fn apply_state(&mut self, state: Self::State, tags: TransitionTags) -> Result<(), HostError>;

    /// Give input focus back to the editor surface.
    fn focus(&mut self);
}

/// Failures surfaced by the host while reconstructing or applying a state.
///
/// These are unrecoverable for the single operation that triggered them; the
/// inspector reports them to its caller and leaves its own records intact.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("malformed document tree: {0}")]
    MalformedTree(String),
    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),
}

/// Opaque per-transition tag map.
///
/// Hosts attach arbitrary boolean tags to each state transition. The
/// inspector reads [`TransitionTags::SKIP_HISTORY`] to keep its own
/// reinjected states out of the history pipeline, and sets
/// [`TransitionTags::ADD_TO_HISTORY`] to `false` on rollback transitions so
/// the host's native undo tracking ignores them as well.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransitionTags {
    flags: BTreeMap<String, bool>,
}

impl TransitionTags {
    /// Excludes a transition from the inspector's history pipeline.
    pub const SKIP_HISTORY: &'static str = "docscope.skip-history";
    /// Understood by hosts with native undo tracking; `false` keeps the
    /// transition out of the host's own undo stack.
    pub const ADD_TO_HISTORY: &'static str = "addToHistory";

    pub fn new() -> Self {
        Self::default()
    }

    /// Tags carried by every state the inspector reinjects on rollback.
    pub fn for_rollback() -> Self {
        Self::new()
            .with(Self::SKIP_HISTORY, true)
            .with(Self::ADD_TO_HISTORY, false)
    }

    pub fn with(mut self, tag: &str, value: bool) -> Self {
        self.set(tag, value);
        self
    }

    pub fn set(&mut self, tag: &str, value: bool) {
        self.flags.insert(tag.to_string(), value);
    }

    /// `None` when the tag was never set.
    pub fn get(&self, tag: &str) -> Option<bool> {
        self.flags.get(tag).copied()
    }

    /// Whether this transition is excluded from inspection history.
    pub fn skips_history(&self) -> bool {
        self.get(Self::SKIP_HISTORY) == Some(true)
    }

    /// Whether the host's own undo tracking should record this transition.
    /// Unset means yes.
    pub fn adds_to_host_history(&self) -> bool {
        self.get(Self::ADD_TO_HISTORY) != Some(false)
    }
}

/// A state-transition event as delivered to the inspector.
///
/// The host's native event usually also carries the pre-transition state;
/// the inspector deliberately diffs against the newest state *it recorded*
/// instead, so diffs stay consistent with the log even after a rollback.
#[derive(Debug, Clone)]
pub struct Transition<S> {
    pub new_state: S,
    pub tags: TransitionTags,
}

impl<S> Transition<S> {
    pub fn new(new_state: S) -> Self {
        Self {
            new_state,
            tags: TransitionTags::default(),
        }
    }

    pub fn with_tags(new_state: S, tags: TransitionTags) -> Self {
        Self { new_state, tags }
    }
}
