//! Resolved field constraints
//!
//! The constraints a schema currently imposes on one field. They may depend on
//! sibling values (e.g. `age` becomes required once `name` is filled), which is
//! why the coordinator asks the constraint source to refresh them.

use serde::{Deserialize, Serialize};

/// Constraints displayed for a field
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldConstraints {
    pub required: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub label: Option<String>,
}

impl FieldConstraints {
    /// No constraints at all
    pub fn optional() -> Self {
        FieldConstraints::default()
    }

    pub fn required() -> Self {
        FieldConstraints {
            required: true,
            ..FieldConstraints::default()
        }
    }

    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn with_length(mut self, min: Option<usize>, max: Option<usize>) -> Self {
        self.min_length = min;
        self.max_length = max;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Is a numeric value inside `[min, max]`?
    pub fn accepts_number(&self, value: f64) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }

    /// Is a text length inside `[min_length, max_length]`?
    pub fn accepts_length(&self, len: usize) -> bool {
        self.min_length.map_or(true, |min| len >= min)
            && self.max_length.map_or(true, |max| len <= max)
    }
}
