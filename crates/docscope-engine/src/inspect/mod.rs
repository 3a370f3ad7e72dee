//! The inspector: the read model and command surface the surrounding UI
//! drives.
//!
//! One [`Inspector`] wraps one host editor and one view layer. It owns the
//! history store and the (at most one) picking session, and exposes
//! everything a frontend needs to render: the live state, the history log
//! and cursor, the picker highlight, the resolved inspection path, and the
//! active tab.
//!
//! All commands are synchronous `&mut self` calls; the embedding's event
//! loop is the only source of concurrency, so there is none.

use serde_json::Value;

use crate::config::InspectorConfig;
use crate::history::{self, History, HistoryError};
use crate::host::{EditorHost, EditorState, Transition};
use crate::paths::{self, NodePath};
use crate::picker::{PickerError, PickerSession};
use crate::render::{Rect, ViewLayer};

/// Which inspection view the UI should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InspectorTab {
    #[default]
    State,
    History,
}

pub struct Inspector<H, V>
where
    H: EditorHost,
    V: ViewLayer<Node = <H::State as EditorState>::Node>,
{
    host: H,
    view: V,
    history: History<H::State>,
    picker: Option<PickerSession>,
    inspection_path: Option<NodePath>,
    tab: InspectorTab,
}

impl<H, V> Inspector<H, V>
where
    H: EditorHost,
    V: ViewLayer<Node = <H::State as EditorState>::Node>,
{
    pub fn new(host: H, view: V) -> Self {
        Self::with_config(host, view, InspectorConfig::default())
    }

    pub fn with_config(host: H, view: V, config: InspectorConfig) -> Self {
        let history = History::with_config(host.state().clone(), config);
        Self {
            host,
            view,
            history,
            picker: None,
            inspection_path: None,
            tab: InspectorTab::default(),
        }
    }

    // ---- read model ----

    /// The state the editor currently displays.
    pub fn state(&self) -> &H::State {
        self.host.state()
    }

    pub fn history(&self) -> &History<H::State> {
        &self.history
    }

    pub fn selected_history_item(&self) -> usize {
        self.history.selected()
    }

    /// `Some(index)` while the editor shows a historical entry, `None` when
    /// it is live at the head.
    pub fn rolled_back_to(&self) -> Option<usize> {
        self.history.rolled_back_to()
    }

    /// Highlight rectangle for the picker overlay; zero whenever no session
    /// is armed or nothing actionable is hovered.
    pub fn highlight_rect(&self) -> Rect {
        self.picker
            .as_ref()
            .map(PickerSession::highlight)
            .unwrap_or(Rect::ZERO)
    }

    /// Path of the last picked node, the UI's inspection focus.
    pub fn inspection_path(&self) -> Option<&NodePath> {
        self.inspection_path.as_ref()
    }

    pub fn tab(&self) -> InspectorTab {
        self.tab
    }

    pub fn picker_active(&self) -> bool {
        self.picker.is_some()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    // ---- commands ----

    /// Feed one host state transition through the history pipeline.
    /// Transitions tagged to skip history leave the log and cursor alone.
    pub fn on_transition(&mut self, transition: Transition<H::State>) {
        self.history.shrink(&transition.tags);
        self.history.record(transition.new_state, &transition.tags);
    }

    pub fn select_history_item(&mut self, index: usize) {
        self.history.select(index);
    }

    /// Roll the live editor back to history entry `index`. The UI selection
    /// is not moved; pair with [`Inspector::select_history_item`].
    pub fn rollback(&mut self, index: usize) -> Result<(), HistoryError> {
        history::rollback(&mut self.host, &mut self.history, index)
    }

    /// Arm the picker. Guarded: a second activation while armed is refused
    /// rather than silently stacking sessions.
    pub fn activate_picker(&mut self) -> Result<(), PickerError> {
        if self.picker.is_some() {
            return Err(PickerError::AlreadyActive);
        }
        self.picker = Some(PickerSession::new());
        Ok(())
    }

    /// Disarm the picker and clear the highlight. Idempotent: calling it
    /// while inactive is a harmless no-op.
    pub fn deactivate_picker(&mut self) {
        self.picker = None;
    }

    /// Pointer moved over `element`. Ignored unless a session is armed.
    pub fn pointer_moved(&mut self, element: &V::Element) {
        let Some(session) = self.picker.as_mut() else {
            return;
        };
        let root = self.host.state().doc();
        session.hover(&self.view, &root, element);
    }

    /// Pointer clicked `element`. Returns `true` when an armed session
    /// consumed the click, in which case the embedding should suppress the
    /// element's default activation behavior.
    ///
    /// The session is taken out of the inspector before anything else, so
    /// whatever happens next, the listeners are gone and the highlight is
    /// zero.
    pub fn pointer_clicked(&mut self, element: &V::Element) -> bool {
        let Some(session) = self.picker.take() else {
            return false;
        };
        if let Some(path) = session.select(&self.view, self.host.state(), element) {
            self.inspection_path = Some(path);
            self.tab = InspectorTab::State;
        }
        true
    }

    /// Resolve `node`'s path inside `doc`, index the live document's
    /// serialized tree by it, and log what is there now. Returns the
    /// resolved value; falls back to logging the raw node when it cannot be
    /// located.
    pub fn log_node_value(&self, doc: &Value, node: &Value) -> Option<Value> {
        match paths::resolve_in_json(doc, node) {
            Some(path) => {
                let live = self.host.state().doc_json();
                let value = path.descend_json(&live).cloned();
                match &value {
                    Some(value) => {
                        tracing::info!(path = ?path.indices(), %value, "resolved node value")
                    }
                    None => tracing::info!(
                        path = ?path.indices(),
                        "path no longer exists in the live document"
                    ),
                }
                value
            }
            None => {
                tracing::info!(%node, "node not found in the given document");
                None
            }
        }
    }
}
