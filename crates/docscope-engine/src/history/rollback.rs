//! Rolling the live editor back to a recorded state.

use crate::history::{History, HistoryError};
use crate::host::{EditorHost, TransitionTags};

/// Replace the live editor state with a reconstruction of history entry
/// `index`.
///
/// The stored snapshot is read, never touched: the host rebuilds a fresh,
/// independent state from the snapshot's serialized document tree and its
/// original schema/plugin configuration, so later edits to the live editor
/// cannot reach back into the log. The reinjected state is tagged with
/// [`TransitionTags::for_rollback`], which keeps it out of the host's own
/// undo tracking and out of this history store.
///
/// On success the rolled-back marker points at `index`; the UI selection is
/// left to the caller. The only way back to the live head is a new,
/// non-skipped edit, which resets the marker through
/// [`History::shrink`]/[`History::record`].
///
/// An out-of-range index fails with [`HistoryError::NotFound`] and leaves
/// both the log and the cursor unchanged, as does any host failure during
/// reconstruction or application.
pub fn rollback<H: EditorHost>(
    host: &mut H,
    history: &mut History<H::State>,
    index: usize,
) -> Result<(), HistoryError> {
    let restored = {
        let stored = history.get(index).ok_or(HistoryError::NotFound(index))?;
        host.reconstruct(&stored.state)?
    };

    host.apply_state(restored, TransitionTags::for_rollback())?;
    host.focus();
    history.set_rolled_back_to(index);

    tracing::debug!(index, "rolled editor back to history entry");
    Ok(())
}
