//! Rule-driven constraints
//!
//! A [`RuleBook`] maps each field to a rule computing its constraints from the
//! current form values, which is enough to model cross-field dependencies
//! such as "age is required once name is filled".
//!
//! [`RuleConstraintSource`] caches the resolved constraints the way a rendered
//! form displays them: they stay stale until someone asks for a refresh.

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::{Mutex, RwLock};
use serde_json::Value;
use tracing::trace;

use formsync_core::{FieldConstraints, FieldPath};
use formsync_runtime::ConstraintSource;

use crate::{FormValues, MemoryFieldStore};

/// Computes a field's constraints from the current values
pub type ConstraintRule = Arc<dyn Fn(&FormValues) -> FieldConstraints + Send + Sync>;

/// Constraint rules per field
#[derive(Clone, Default)]
pub struct RuleBook {
    rules: IndexMap<FieldPath, ConstraintRule>,
}

impl RuleBook {
    pub fn new() -> Self {
        RuleBook::default()
    }

    /// Field with fixed constraints
    pub fn field(self, path: impl Into<FieldPath>, constraints: FieldConstraints) -> Self {
        self.field_when(path, move |_| constraints.clone())
    }

    /// Field whose constraints depend on other values
    pub fn field_when<F>(mut self, path: impl Into<FieldPath>, rule: F) -> Self
    where
        F: Fn(&FormValues) -> FieldConstraints + Send + Sync + 'static,
    {
        self.rules.insert(path.into(), Arc::new(rule));
        self
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldPath> {
        self.rules.keys()
    }

    /// Constraints of `path` for `values`; fields without a rule are unconstrained
    pub fn resolve(&self, path: &FieldPath, values: &FormValues) -> FieldConstraints {
        self.rules
            .get(path)
            .map(|rule| rule(values))
            .unwrap_or_default()
    }

    /// Error message for `path`, `None` when its value satisfies the rule
    pub fn check(&self, path: &FieldPath, values: &FormValues) -> Option<String> {
        let constraints = self.resolve(path, values);
        let value = values.get(path).unwrap_or(&Value::Null);
        check_value(path, &constraints, value)
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Check one value against resolved constraints
pub fn check_value(path: &FieldPath, constraints: &FieldConstraints, value: &Value) -> Option<String> {
    let label = constraints
        .label
        .clone()
        .unwrap_or_else(|| path.to_string());

    if is_blank(value) {
        return constraints
            .required
            .then(|| format!("{} is required", label));
    }

    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    if let Some(n) = number {
        if !constraints.accepts_number(n) {
            return Some(format!("{} is out of range", label));
        }
    }

    let len = match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    };
    if let Some(len) = len {
        if !constraints.accepts_length(len) {
            return Some(format!("{} has an invalid length", label));
        }
    }

    None
}

/// Constraint source backed by a rule book and the in-memory store
pub struct RuleConstraintSource {
    rules: Arc<RuleBook>,
    store: Arc<MemoryFieldStore>,
    resolved: RwLock<IndexMap<FieldPath, FieldConstraints>>,
    refreshes: Mutex<Vec<FieldPath>>,
}

impl RuleConstraintSource {
    pub fn new(rules: Arc<RuleBook>, store: Arc<MemoryFieldStore>) -> Self {
        let source = RuleConstraintSource {
            rules,
            store,
            resolved: RwLock::new(IndexMap::new()),
            refreshes: Mutex::new(Vec::new()),
        };
        source.resolve_all();
        source
    }

    // Dependent fields change together, so every field is recomputed
    fn resolve_all(&self) {
        let values = self.store.values();
        let resolved: IndexMap<FieldPath, FieldConstraints> = self
            .rules
            .fields()
            .map(|path| (path.clone(), self.rules.resolve(path, &values)))
            .collect();
        *self.resolved.write() = resolved;
    }

    /// Fields that requested a refresh, in order
    pub fn refreshes(&self) -> Vec<FieldPath> {
        self.refreshes.lock().clone()
    }

    pub fn refresh_count(&self) -> usize {
        self.refreshes.lock().len()
    }
}

impl ConstraintSource for RuleConstraintSource {
    fn constraints_for(&self, path: &FieldPath) -> FieldConstraints {
        self.resolved.read().get(path).cloned().unwrap_or_default()
    }

    fn refresh(&self, path: &FieldPath) {
        trace!(field = %path, "refreshing constraints");
        self.refreshes.lock().push(path.clone());
        self.resolve_all();
    }
}
