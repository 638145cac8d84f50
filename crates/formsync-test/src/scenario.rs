//! Form scenarios
//!
//! A [`FormScenario`] assembles the in-memory collaborators and one
//! [`FieldSync`] per field, then lets a test drive input and blur events the
//! way a user would.

use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::{json, Value};
use tracing::info;

use formsync_core::{
    FieldConstraints, FieldPath, FieldPathSet, FormSyncError, FormSyncResult, FormTriggerState,
    SyncConfig, SyncOptions,
};
use formsync_runtime::{ConstraintSource, FieldSync, FieldValidator, FormSync, SyncOutcome};

use crate::{FormValues, MemoryFieldStore, RecordingValidator, RuleBook, RuleConstraintSource};

/// `name` is always required, `age` only once `name` is filled in
pub fn person_rules() -> RuleBook {
    RuleBook::new()
        .field("name", FieldConstraints::required().with_label("Name"))
        .field_when("age", |values| {
            let named = values
                .get("name")
                .and_then(Value::as_str)
                .map_or(false, |name| !name.is_empty());
            if named {
                FieldConstraints::required().with_label("Age")
            } else {
                FieldConstraints::optional().with_label("Age")
            }
        })
}

/// A form wired end to end with in-memory collaborators
pub struct FormScenario {
    store: Arc<MemoryFieldStore>,
    constraints: Arc<RuleConstraintSource>,
    validator: Arc<RecordingValidator>,
    form: FormSync,
    fields: IndexMap<FieldPath, FieldSync>,
}

impl FormScenario {
    pub fn new(defaults: FormValues, rules: RuleBook, config: SyncConfig) -> Self {
        let rules = Arc::new(rules);
        let store = Arc::new(MemoryFieldStore::with_defaults(defaults.clone()));
        let constraints = Arc::new(RuleConstraintSource::new(rules.clone(), store.clone()));
        let validator = Arc::new(RecordingValidator::with_rules(rules.clone(), store.clone()));
        let form = FormSync::new(config, store.clone(), validator.clone(), constraints.clone());

        let fields = defaults
            .keys()
            .chain(rules.fields())
            .map(|path| (path.clone(), form.field(path.clone())))
            .collect();

        info!(mode = %form.mode(), "form scenario ready");
        FormScenario {
            store,
            constraints,
            validator,
            form,
            fields,
        }
    }

    /// The name / age form with an explicit sync configuration
    pub fn person(config: SyncConfig) -> Self {
        let defaults = [("name", json!("")), ("age", json!(""))]
            .into_iter()
            .map(|(p, v)| (FieldPath::from(p), v))
            .collect();
        FormScenario::new(defaults, person_rules(), config)
    }

    /// The name / age form with options resolved against its trigger state
    pub fn person_with_options(options: SyncOptions, trigger: &FormTriggerState) -> Self {
        FormScenario::person(options.resolve(trigger))
    }

    pub fn store(&self) -> &Arc<MemoryFieldStore> {
        &self.store
    }

    pub fn constraints(&self) -> &Arc<RuleConstraintSource> {
        &self.constraints
    }

    pub fn validator(&self) -> &Arc<RecordingValidator> {
        &self.validator
    }

    pub fn form(&self) -> &FormSync {
        &self.form
    }

    pub fn field(&self, path: &str) -> FormSyncResult<&FieldSync> {
        self.fields
            .get(path)
            .ok_or_else(|| FormSyncError::UnknownField(FieldPath::from(path)))
    }

    fn field_mut(&mut self, path: &str) -> FormSyncResult<&mut FieldSync> {
        self.fields
            .get_mut(path)
            .ok_or_else(|| FormSyncError::UnknownField(FieldPath::from(path)))
    }

    /// Type `value` into the field
    pub fn input(&mut self, path: &str, value: Value) -> FormSyncResult<SyncOutcome> {
        Ok(self.field_mut(path)?.on_change(value))
    }

    /// Leave the field
    pub fn blur(&mut self, path: &str) -> FormSyncResult<SyncOutcome> {
        Ok(self.field_mut(path)?.on_blur())
    }

    /// Type `value`, leave the field, and wait for any revalidation
    pub async fn fill(&mut self, path: &str, value: Value) -> FormSyncResult<()> {
        self.input(path, value)?.settle().await;
        self.blur(path)?.settle().await;
        Ok(())
    }

    /// Whether the field currently displays as required
    pub fn is_required(&self, path: &str) -> bool {
        self.constraints
            .constraints_for(&FieldPath::from(path))
            .required
    }

    /// Error currently displayed for the field
    pub fn error(&self, path: &str) -> Option<String> {
        self.validator.error_for(path)
    }

    /// Validate every field, as a form submission does
    pub async fn submit(&self) -> FormSyncResult<bool> {
        let all: FieldPathSet = self.fields.keys().cloned().collect();
        self.validator.validate(all).await
    }
}
