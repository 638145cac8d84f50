//! Revalidation-set selection
//!
//! Picks the fields to revalidate after a schema sync. Blur-oriented modes
//! care about touched fields, change-oriented modes about dirty fields;
//! `onTouched` and `all` care about both.

use formsync_core::{FieldPathSet, MarkerTree, SyncMode};
use tracing::trace;

use crate::flatten;

/// Does `mode` revalidate touched fields?
pub fn validates_touched(mode: SyncMode) -> bool {
    matches!(mode, SyncMode::All | SyncMode::OnTouched | SyncMode::OnBlur)
}

/// Does `mode` revalidate dirty fields?
pub fn validates_dirty(mode: SyncMode) -> bool {
    matches!(mode, SyncMode::All | SyncMode::OnChange | SyncMode::OnTouched)
}

/// Select the fields to revalidate from touched / dirty snapshots.
///
/// Touched paths come first, then dirty paths. When either side selects
/// nothing the result is the other side in its own order. A path appears once,
/// at its first position, even when two tree shapes flatten to the same
/// dotted path (`{"a.b": true}` and `{"a": {"b": true}}`).
pub fn select_fields(mode: SyncMode, touched: &MarkerTree, dirty: &MarkerTree) -> FieldPathSet {
    let touched_paths = if validates_touched(mode) {
        flatten(touched)
    } else {
        Vec::new()
    };
    let dirty_paths = if validates_dirty(mode) {
        flatten(dirty)
    } else {
        Vec::new()
    };

    trace!(
        %mode,
        touched = touched_paths.len(),
        dirty = dirty_paths.len(),
        "selecting revalidation set"
    );

    FieldPathSet::union(touched_paths, dirty_paths)
}
