//! Recording validator
//!
//! Records every revalidation request and, when given a rule book, computes
//! per-field error messages against the store's current values.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use indexmap::IndexMap;
use parking_lot::{Mutex, RwLock};
use tracing::debug;

use formsync_core::{FieldPath, FieldPathSet, FormSyncError, FormSyncResult};
use formsync_runtime::FieldValidator;

use crate::{MemoryFieldStore, RuleBook};

struct Checker {
    rules: Arc<RuleBook>,
    store: Arc<MemoryFieldStore>,
}

/// Validator double that keeps a log of requests
pub struct RecordingValidator {
    checker: Option<Checker>,
    calls: Mutex<Vec<FieldPathSet>>,
    errors: RwLock<IndexMap<FieldPath, String>>,
    failure: Mutex<Option<String>>,
    latency: Option<Duration>,
}

impl RecordingValidator {
    /// Accepts every request without checking values
    pub fn accepting() -> Self {
        RecordingValidator {
            checker: None,
            calls: Mutex::new(Vec::new()),
            errors: RwLock::new(IndexMap::new()),
            failure: Mutex::new(None),
            latency: None,
        }
    }

    /// Checks requested fields against `rules`
    pub fn with_rules(rules: Arc<RuleBook>, store: Arc<MemoryFieldStore>) -> Self {
        RecordingValidator {
            checker: Some(Checker { rules, store }),
            ..RecordingValidator::accepting()
        }
    }

    /// Delay each request before checking
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Make subsequent requests fail with `message`
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.failure.lock() = Some(message.into());
    }

    pub fn recover(&self) {
        *self.failure.lock() = None;
    }

    pub fn calls(&self) -> Vec<FieldPathSet> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn last_call(&self) -> Option<FieldPathSet> {
        self.calls.lock().last().cloned()
    }

    /// Current errors by field
    pub fn errors(&self) -> IndexMap<FieldPath, String> {
        self.errors.read().clone()
    }

    pub fn error_for(&self, path: &str) -> Option<String> {
        self.errors.read().get(path).cloned()
    }
}

#[async_trait]
impl FieldValidator for RecordingValidator {
    async fn validate(&self, paths: FieldPathSet) -> FormSyncResult<bool> {
        self.calls.lock().push(paths.clone());

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let failure = self.failure.lock().clone();
        if let Some(message) = failure {
            return Err(FormSyncError::ValidatorFailed(message));
        }

        let checker = match &self.checker {
            Some(checker) => checker,
            None => return Ok(true),
        };

        let values = checker.store.values();
        let mut errors = self.errors.write();
        let mut valid = true;
        for path in paths.iter() {
            match checker.rules.check(path, &values) {
                Some(message) => {
                    debug!(field = %path, %message, "field invalid");
                    errors.insert(path.clone(), message);
                    valid = false;
                }
                None => {
                    errors.shift_remove(path);
                }
            }
        }
        Ok(valid)
    }
}
