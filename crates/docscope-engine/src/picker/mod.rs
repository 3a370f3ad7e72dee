//! Interactive node picking.
//!
//! A [`PickerSession`] exists only while picking is armed. It is created by
//! the inspector on activation, fed pointer events while armed, and
//! consumed exactly once: by value on select, or dropped on deactivation.
//! Consuming the session *is* the listener teardown; an event cannot reach
//! a session that no longer exists.
//!
//! Picking never mutates the document. Its only outputs are the highlight
//! rectangle and, on select, the resolved path.

use crate::host::{DocNode, EditorState};
use crate::paths::{self, NodePath};
use crate::render::{OwnerKind, Rect, ViewLayer};

/// Errors from arming the picker.
#[derive(Debug, thiserror::Error)]
pub enum PickerError {
    /// At most one session may be armed at a time.
    #[error("a picking session is already active")]
    AlreadyActive,
}

/// An armed picking session.
#[derive(Debug)]
pub struct PickerSession {
    highlight: Rect,
}

impl PickerSession {
    pub(crate) fn new() -> Self {
        Self {
            highlight: Rect::ZERO,
        }
    }

    /// The rectangle currently highlighted, zero when nothing actionable is
    /// under the pointer.
    pub fn highlight(&self) -> Rect {
        self.highlight
    }

    /// Update the highlight for the element under the pointer.
    ///
    /// An element owned by a document node (other than the bare root) or by
    /// a mark highlights its owning element's bounding rectangle, shifted by
    /// the view's scroll offset. Everything else clears the highlight.
    pub(crate) fn hover<V: ViewLayer>(&mut self, view: &V, root: &V::Node, element: &V::Element) {
        self.highlight = match view.owner_of(element) {
            Some(owned) => match &owned.kind {
                OwnerKind::Node { node, .. } if node.same_node(root) => Rect::ZERO,
                _ => view.bounding_rect(&owned.element).offset_y(view.scroll_top()),
            },
            None => Rect::ZERO,
        };
    }

    /// Resolve the clicked element to a path in the live document,
    /// consuming the session.
    ///
    /// Mark-owned elements can be highlighted but have no start position,
    /// so they select nothing; the click is still consumed.
    pub(crate) fn select<V, S>(self, view: &V, state: &S, element: &V::Element) -> Option<NodePath>
    where
        V: ViewLayer,
        S: EditorState<Node = V::Node>,
    {
        let owned = view.owner_of(element)?;
        let OwnerKind::Node { pos_at_start, .. } = owned.kind else {
            return None;
        };
        let target = state.node_at(pos_at_start)?;
        paths::resolve_in(&state.doc(), &target)
    }
}
