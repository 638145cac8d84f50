//! Fire-and-forget validation dispatch
//!
//! A revalidation request is spawned onto the form's tokio runtime and the
//! event handler returns immediately. Validator failures are logged inside the
//! task and resolve to `false`; they never reach the handler.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use formsync_core::{FieldPathSet, FormSyncError, FormSyncResult};

use crate::FieldValidator;

/// An in-flight revalidation request
#[derive(Debug)]
pub struct PendingValidation {
    paths: FieldPathSet,
    handle: JoinHandle<bool>,
}

impl PendingValidation {
    /// Paths handed to the validator
    pub fn paths(&self) -> &FieldPathSet {
        &self.paths
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the validator's verdict
    pub async fn outcome(self) -> FormSyncResult<bool> {
        self.handle
            .await
            .map_err(|e| FormSyncError::TaskAborted(e.to_string()))
    }
}

/// Spawn `validator.validate(paths)` on `runtime`
pub fn dispatch_validation(
    runtime: &Handle,
    validator: Arc<dyn FieldValidator>,
    paths: FieldPathSet,
) -> PendingValidation {
    let request = paths.clone();
    let handle = runtime.spawn(async move {
        let fields = request.len();
        match validator.validate(request).await {
            Ok(valid) => {
                debug!(fields, valid, "revalidation finished");
                valid
            }
            Err(e) => {
                warn!(fields, "revalidation failed: {}", e);
                false
            }
        }
    });

    PendingValidation { paths, handle }
}
