//! In-memory field store
//!
//! Behaves like a form state store as far as the sync engine can see:
//! - a field becomes touched when it is blurred
//! - a field is dirty while its value differs from its default

use indexmap::IndexMap;
use parking_lot::RwLock;
use serde_json::Value;

use formsync_core::{FieldPath, MarkerTree};
use formsync_runtime::FieldStore;

/// Current form values keyed by field path
pub type FormValues = IndexMap<FieldPath, Value>;

#[derive(Debug, Default)]
struct StoreState {
    defaults: FormValues,
    values: FormValues,
    touched: MarkerTree,
    dirty: MarkerTree,
}

/// Field store held entirely in memory
#[derive(Debug, Default)]
pub struct MemoryFieldStore {
    state: RwLock<StoreState>,
}

impl MemoryFieldStore {
    pub fn new() -> Self {
        MemoryFieldStore::default()
    }

    /// Store with default values; fields start clean and untouched
    pub fn with_defaults<I, P>(defaults: I) -> Self
    where
        I: IntoIterator<Item = (P, Value)>,
        P: Into<FieldPath>,
    {
        let defaults: FormValues = defaults.into_iter().map(|(p, v)| (p.into(), v)).collect();
        MemoryFieldStore {
            state: RwLock::new(StoreState {
                values: defaults.clone(),
                defaults,
                ..StoreState::default()
            }),
        }
    }

    pub fn contains(&self, path: &FieldPath) -> bool {
        let state = self.state.read();
        state.defaults.contains_key(path) || state.values.contains_key(path)
    }

    /// Current value, `Null` for unknown fields
    pub fn value(&self, path: &FieldPath) -> Value {
        self.state.read().values.get(path).cloned().unwrap_or(Value::Null)
    }

    /// Snapshot of every value
    pub fn values(&self) -> FormValues {
        self.state.read().values.clone()
    }

    pub fn is_dirty(&self, path: &FieldPath) -> bool {
        self.state.read().dirty.is_marked(path)
    }

    /// Restore defaults and clear all markers
    pub fn reset(&self) {
        let mut state = self.state.write();
        state.values = state.defaults.clone();
        state.touched = MarkerTree::empty();
        state.dirty = MarkerTree::empty();
    }
}

impl FieldStore for MemoryFieldStore {
    fn touched_fields(&self) -> MarkerTree {
        self.state.read().touched.clone()
    }

    fn dirty_fields(&self) -> MarkerTree {
        self.state.read().dirty.clone()
    }

    fn apply_change(&self, path: &FieldPath, value: Value) {
        let mut state = self.state.write();
        let is_default = state.defaults.get(path).unwrap_or(&Value::Null) == &value;
        if is_default {
            state.dirty.clear(path);
        } else {
            state.dirty.mark(path);
        }
        state.values.insert(path.clone(), value);
    }

    fn apply_blur(&self, path: &FieldPath) {
        self.state.write().touched.mark(path);
    }
}
