//! Bounded, navigable history of editor states.
//!
//! The store keeps a newest-first log of [`Snapshot`]s, capped at
//! [`HISTORY_SIZE`] entries, plus a cursor: the index the UI has selected
//! and, after a rollback, the index the live editor currently reflects.
//! Entries are only ever prepended by [`History::record`] or discarded by
//! eviction; a stored snapshot is never mutated.
//!
//! Transitions tagged with [`TransitionTags::SKIP_HISTORY`] pass through
//! both [`History::shrink`] and [`History::record`] untouched. That tag is
//! what keeps [`rollback`]'s own reinjected state from being recorded as a
//! fresh entry on every rollback.

pub mod preview;
mod rollback;

pub use rollback::rollback;

use chrono::Utc;
use serde_json::Value;

use crate::config::InspectorConfig;
use crate::diff::{self, Delta};
use crate::host::{EditorState, HostError, TransitionTags};

/// Hard cap on retained history entries; the oldest are evicted first.
pub const HISTORY_SIZE: usize = 200;

/// One recorded editor state plus its metadata.
#[derive(Debug, Clone)]
pub struct Snapshot<S> {
    /// The state as it was accepted. Treated as immutable from here on.
    pub state: S,
    /// Milliseconds since the Unix epoch at recording time.
    pub timestamp_ms: i64,
    /// Structural diff against the previous head, `None` for the oldest
    /// entry (and for transitions that left the tree unchanged).
    pub diff: Option<Delta>,
    /// Fixed-width preview of the selection's rendered content.
    pub selection_preview: String,
}

/// Errors from history operations that address a specific entry.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    /// The addressed index does not exist. Never clamped to a valid one.
    #[error("no history entry at index {0}")]
    NotFound(usize),
    #[error(transparent)]
    Host(#[from] HostError),
}

/// The bounded snapshot log and its cursor.
#[derive(Debug)]
pub struct History<S> {
    entries: Vec<Snapshot<S>>,
    selected: usize,
    rolled_back_to: Option<usize>,
    config: InspectorConfig,
}

impl<S: EditorState> History<S> {
    /// Seed the log with the editor's initial state so entry 0 always
    /// exists and `record` always has a previous head to diff against.
    pub fn new(initial: S) -> Self {
        Self::with_config(initial, InspectorConfig::default())
    }

    pub fn with_config(initial: S, config: InspectorConfig) -> Self {
        Self {
            entries: vec![Snapshot {
                state: initial,
                timestamp_ms: Utc::now().timestamp_millis(),
                diff: None,
                selection_preview: String::new(),
            }],
            selected: 0,
            rolled_back_to: None,
            config,
        }
    }

    pub fn entries(&self) -> &[Snapshot<S>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: the log is seeded at construction and never drained
    /// below one entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Snapshot<S>> {
        self.entries.get(index)
    }

    /// The most recently accepted snapshot.
    pub fn head(&self) -> &Snapshot<S> {
        &self.entries[0]
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Move the UI selection. Out-of-range indices are refused, not clamped.
    pub fn select(&mut self, index: usize) {
        if index < self.entries.len() {
            self.selected = index;
        } else {
            tracing::warn!(index, len = self.entries.len(), "ignoring selection out of range");
        }
    }

    /// `Some(index)` while the live editor reflects a historical entry
    /// instead of the head; cleared by the next recorded transition.
    pub fn rolled_back_to(&self) -> Option<usize> {
        self.rolled_back_to
    }

    pub(crate) fn set_rolled_back_to(&mut self, index: usize) {
        self.rolled_back_to = Some(index);
    }

    /// Prune the log down to the window the next `record` may prepend onto:
    /// entries newer than the rollback point are dropped (they describe a
    /// future the editor has abandoned), then the window is capped at the
    /// configured size. Called immediately before `record` on every
    /// qualifying transition; skipped transitions leave the log untouched.
    pub fn shrink(&mut self, tags: &TransitionTags) {
        if tags.skips_history() {
            return;
        }
        if let Some(start) = self.rolled_back_to.take() {
            self.entries.drain(..start.min(self.entries.len()));
            self.rolled_back_to = Some(0);
        }
        self.entries.truncate(self.config.history_size.max(1));
    }

    /// Accept a new head: diff against the previous head, build the
    /// selection preview, prepend, evict past the cap, and reset the cursor
    /// to the live head. Skipped transitions are a no-op.
    pub fn record(&mut self, new_state: S, tags: &TransitionTags) {
        if tags.skips_history() {
            return;
        }

        let diff = self
            .entries
            .first()
            .and_then(|head| self.diff_states(&head.state.doc_json(), &new_state.doc_json()));
        let selection_preview = preview::format_preview(
            &new_state.selection_markup(),
            self.config.preview_width,
            self.config.preview_indent,
        );

        self.entries.insert(
            0,
            Snapshot {
                state: new_state,
                timestamp_ms: Utc::now().timestamp_millis(),
                diff,
                selection_preview,
            },
        );
        self.entries.truncate(self.config.history_size.max(1));
        self.selected = 0;
        self.rolled_back_to = None;
    }

    fn diff_states(&self, previous: &Value, next: &Value) -> Option<Delta> {
        diff::diff(previous, next, &self.config.diff)
    }
}
