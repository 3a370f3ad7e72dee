use serde::{Deserialize, Serialize};

use crate::diff::DiffOptions;
use crate::history::HISTORY_SIZE;
use crate::history::preview::{PREVIEW_INDENT, PREVIEW_WIDTH};

/// Tunables for an [`Inspector`](crate::inspect::Inspector) and its history
/// store. The defaults are the intended production values; tests shrink
/// `history_size` to exercise eviction cheaply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectorConfig {
    /// Hard cap on retained history entries.
    pub history_size: usize,
    /// Column width selection previews are wrapped to.
    pub preview_width: usize,
    /// Indent prefix applied to wrapped preview continuation lines.
    pub preview_indent: usize,
    pub diff: DiffOptions,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            history_size: HISTORY_SIZE,
            preview_width: PREVIEW_WIDTH,
            preview_indent: PREVIEW_INDENT,
            diff: DiffOptions::default(),
        }
    }
}
