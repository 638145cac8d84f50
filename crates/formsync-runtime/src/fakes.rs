//! Minimal collaborator doubles for unit tests

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use formsync_core::{
    FieldConstraints, FieldPath, FieldPathSet, FormSyncError, FormSyncResult, MarkerTree,
};

use crate::{ConstraintSource, FieldStore, FieldValidator};

#[derive(Default)]
pub struct FakeStore {
    touched: Mutex<MarkerTree>,
    dirty: Mutex<MarkerTree>,
    touch_on_change: bool,
}

impl FakeStore {
    pub fn new() -> Self {
        FakeStore::default()
    }

    /// A store whose change handling also marks the field touched
    pub fn touching_on_change() -> Self {
        FakeStore {
            touch_on_change: true,
            ..FakeStore::default()
        }
    }

    pub fn touch(&self, path: &str) {
        self.touched.lock().mark(&path.into());
    }

    pub fn dirty(&self, path: &str) {
        self.dirty.lock().mark(&path.into());
    }
}

impl FieldStore for FakeStore {
    fn touched_fields(&self) -> MarkerTree {
        self.touched.lock().clone()
    }

    fn dirty_fields(&self) -> MarkerTree {
        self.dirty.lock().clone()
    }

    fn apply_change(&self, path: &FieldPath, _value: Value) {
        self.dirty.lock().mark(path);
        if self.touch_on_change {
            self.touched.lock().mark(path);
        }
    }

    fn apply_blur(&self, path: &FieldPath) {
        self.touched.lock().mark(path);
    }
}

pub struct FakeValidator {
    calls: Mutex<Vec<Vec<String>>>,
    failure: Option<String>,
}

impl FakeValidator {
    pub fn passing() -> Self {
        FakeValidator {
            calls: Mutex::new(Vec::new()),
            failure: None,
        }
    }

    pub fn failing(message: &str) -> Self {
        FakeValidator {
            calls: Mutex::new(Vec::new()),
            failure: Some(message.to_string()),
        }
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl FieldValidator for FakeValidator {
    async fn validate(&self, paths: FieldPathSet) -> FormSyncResult<bool> {
        self.calls.lock().push(paths.to_strings());
        match &self.failure {
            Some(message) => Err(FormSyncError::ValidatorFailed(message.clone())),
            None => Ok(true),
        }
    }
}

#[derive(Default)]
pub struct FakeConstraints {
    refreshed: Mutex<Vec<String>>,
}

impl FakeConstraints {
    pub fn new() -> Self {
        FakeConstraints::default()
    }

    pub fn refreshed(&self) -> Vec<String> {
        self.refreshed.lock().clone()
    }
}

impl ConstraintSource for FakeConstraints {
    fn constraints_for(&self, _path: &FieldPath) -> FieldConstraints {
        if self.refreshed.lock().is_empty() {
            FieldConstraints::optional()
        } else {
            FieldConstraints::required()
        }
    }

    fn refresh(&self, path: &FieldPath) {
        self.refreshed.lock().push(path.to_string());
    }
}
