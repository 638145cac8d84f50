//! Form-level sync handle
//!
//! [`FormSync`] owns the resolved configuration and the shared collaborators
//! and hands out one [`FieldSync`] coordinator per field. Configuration and
//! the tokio runtime validations run on are fixed when the form is built.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tracing::{debug, warn};

use formsync_core::{
    FieldPath, FieldPathSet, FormSyncError, FormSyncResult, FormTriggerState, SyncConfig, SyncMode, SyncOptions,
};
use formsync_state::{select_fields, SyncPolicy};

use crate::{
    dispatch_validation, ConstraintSource, FieldStore, FieldSync, FieldValidator,
    PendingValidation, SyncStats,
};

/// State shared by a form and all of its field coordinators
pub(crate) struct FormShared {
    pub(crate) policy: SyncPolicy,
    pub(crate) store: Arc<dyn FieldStore>,
    pub(crate) validator: Arc<dyn FieldValidator>,
    pub(crate) constraints: Arc<dyn ConstraintSource>,
    pub(crate) runtime: Option<Handle>,
    pub(crate) stats: Mutex<SyncStats>,
}

impl FormShared {
    /// Revalidation set for the current snapshots
    pub(crate) fn select_fields(&self) -> FieldPathSet {
        let touched = self.store.touched_fields();
        let dirty = self.store.dirty_fields();
        select_fields(self.policy.mode(), &touched, &dirty)
    }

    /// Select the revalidation set and hand it to the validator
    pub(crate) fn revalidate(&self) -> FormSyncResult<PendingValidation> {
        let runtime = self.runtime.as_ref().ok_or(FormSyncError::NoRuntime)?;
        let paths = self.select_fields();
        debug!(paths = ?paths, "dispatching revalidation");
        Ok(dispatch_validation(runtime, Arc::clone(&self.validator), paths))
    }
}

/// Schema sync for one form
#[derive(Clone)]
pub struct FormSync {
    shared: Arc<FormShared>,
}

impl FormSync {
    /// Form whose validations run on the runtime it is built in.
    ///
    /// Built outside a tokio runtime, the form still refreshes constraints but
    /// skips every revalidation.
    pub fn new(
        config: SyncConfig,
        store: Arc<dyn FieldStore>,
        validator: Arc<dyn FieldValidator>,
        constraints: Arc<dyn ConstraintSource>,
    ) -> Self {
        let runtime = Handle::try_current().ok();
        if runtime.is_none() {
            warn!("no tokio runtime at form construction, revalidation disabled");
        }
        Self::build(config, runtime, store, validator, constraints)
    }

    /// Form whose validations run on `runtime`, usable from any thread
    pub fn on_runtime(
        runtime: Handle,
        config: SyncConfig,
        store: Arc<dyn FieldStore>,
        validator: Arc<dyn FieldValidator>,
        constraints: Arc<dyn ConstraintSource>,
    ) -> Self {
        Self::build(config, Some(runtime), store, validator, constraints)
    }

    fn build(
        config: SyncConfig,
        runtime: Option<Handle>,
        store: Arc<dyn FieldStore>,
        validator: Arc<dyn FieldValidator>,
        constraints: Arc<dyn ConstraintSource>,
    ) -> Self {
        debug!(
            mode = %config.schema_sync_mode,
            validate_disabled = config.disable_validate_on_schema_sync,
            "schema sync configured"
        );

        FormSync {
            shared: Arc::new(FormShared {
                policy: SyncPolicy::new(config),
                store,
                validator,
                constraints,
                runtime,
                stats: Mutex::new(SyncStats::default()),
            }),
        }
    }

    /// Resolve caller options against the form's trigger state
    pub fn with_options(
        options: SyncOptions,
        form: &FormTriggerState,
        store: Arc<dyn FieldStore>,
        validator: Arc<dyn FieldValidator>,
        constraints: Arc<dyn ConstraintSource>,
    ) -> Self {
        Self::new(options.resolve(form), store, validator, constraints)
    }

    pub fn config(&self) -> SyncConfig {
        self.shared.policy.config()
    }

    pub fn mode(&self) -> SyncMode {
        self.shared.policy.mode()
    }

    /// Coordinator for the field at `path`
    pub fn field(&self, path: impl Into<FieldPath>) -> FieldSync {
        FieldSync::new(path.into(), Arc::clone(&self.shared))
    }

    /// Fields the current snapshots would revalidate
    pub fn select_fields(&self) -> FieldPathSet {
        self.shared.select_fields()
    }

    /// Revalidate every synced field now, independent of any field event
    pub fn revalidate_synced_fields(&self) -> FormSyncResult<PendingValidation> {
        self.shared.revalidate()
    }

    /// Totals across all coordinators of this form
    pub fn stats(&self) -> SyncStats {
        self.shared.stats.lock().clone()
    }
}
