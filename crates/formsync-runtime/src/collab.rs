//! External collaborators
//!
//! The coordinator never owns form state or schema logic. It talks to:
//! - a [`FieldStore`] holding values and touched / dirty markers
//! - a [`FieldValidator`] that revalidates a set of paths asynchronously
//! - a [`ConstraintSource`] resolving the schema's constraints per field
//!
//! Implementations are shared between all fields of a form, so every method
//! takes `&self`; stores use interior mutability.

use async_trait::async_trait;
use serde_json::Value;

use formsync_core::{FieldConstraints, FieldPath, FieldPathSet, FormSyncResult, MarkerTree};

/// Form value store
pub trait FieldStore: Send + Sync {
    /// Snapshot of touched markers
    fn touched_fields(&self) -> MarkerTree;

    /// Snapshot of dirty markers
    fn dirty_fields(&self) -> MarkerTree;

    /// Has the field at `path` been touched?
    fn is_touched(&self, path: &FieldPath) -> bool {
        self.touched_fields().is_marked(path)
    }

    /// Native change handling: store the value, update dirty markers
    fn apply_change(&self, path: &FieldPath, value: Value);

    /// Native blur handling: mark the field touched
    fn apply_blur(&self, path: &FieldPath);
}

/// Asynchronous validator
#[async_trait]
pub trait FieldValidator: Send + Sync {
    /// Revalidate `paths`, resolving to whether they are all valid
    async fn validate(&self, paths: FieldPathSet) -> FormSyncResult<bool>;
}

/// Schema constraint resolution
pub trait ConstraintSource: Send + Sync {
    /// Currently displayed constraints of the field
    fn constraints_for(&self, path: &FieldPath) -> FieldConstraints;

    /// Recompute the field's constraints against current values
    fn refresh(&self, path: &FieldPath);
}
