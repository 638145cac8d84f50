//! Sync configuration
//!
//! Two layers:
//! - [`SyncOptions`]: what the caller passed, every key optional
//! - [`SyncConfig`]: resolved values handed to coordinators
//!
//! Resolution depends on the form's validation trigger: when the form only
//! validates on submit, revalidating on schema sync is pointless and is
//! disabled unless the caller asked for it explicitly.

use serde::{Deserialize, Serialize};

use crate::{FormSyncError, FormSyncResult, SyncMode};

/// When the form itself runs validation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationTrigger {
    #[default]
    OnSubmit,
    OnBlur,
    OnChange,
    OnTouched,
    All,
}

/// The form's validation trigger settings at the time of resolution
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormTriggerState {
    /// Trigger before the first submit (defaults to on-submit)
    pub mode: Option<ValidationTrigger>,
    /// Trigger after the first submit (defaults to on-change)
    pub re_validate_mode: Option<ValidationTrigger>,
    pub submit_count: u32,
}

impl FormTriggerState {
    pub fn new(mode: ValidationTrigger) -> Self {
        FormTriggerState {
            mode: Some(mode),
            ..FormTriggerState::default()
        }
    }

    pub fn with_re_validate_mode(mut self, mode: ValidationTrigger) -> Self {
        self.re_validate_mode = Some(mode);
        self
    }

    pub fn with_submit_count(mut self, submit_count: u32) -> Self {
        self.submit_count = submit_count;
        self
    }

    /// Trigger currently in effect
    pub fn current(&self) -> ValidationTrigger {
        if self.submit_count > 0 {
            self.re_validate_mode.unwrap_or(ValidationTrigger::OnChange)
        } else {
            self.mode.unwrap_or(ValidationTrigger::OnSubmit)
        }
    }
}

/// Caller-supplied sync options
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SyncOptions {
    pub schema_sync_mode: Option<SyncMode>,
    pub disable_validate_on_schema_sync: Option<bool>,
}

impl SyncOptions {
    /// Parse options from a JSON object
    pub fn from_json(text: &str) -> FormSyncResult<Self> {
        serde_json::from_str(text).map_err(|e| FormSyncError::InvalidConfig(e.to_string()))
    }

    pub fn with_mode(mut self, mode: SyncMode) -> Self {
        self.schema_sync_mode = Some(mode);
        self
    }

    pub fn with_validate_disabled(mut self, disabled: bool) -> Self {
        self.disable_validate_on_schema_sync = Some(disabled);
        self
    }

    /// Apply defaults for the given form trigger state
    pub fn resolve(self, form: &FormTriggerState) -> SyncConfig {
        SyncConfig {
            schema_sync_mode: self.schema_sync_mode.unwrap_or_default(),
            disable_validate_on_schema_sync: self
                .disable_validate_on_schema_sync
                .unwrap_or(form.current() == ValidationTrigger::OnSubmit),
        }
    }
}

/// Resolved sync configuration, read-only for fields
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncConfig {
    pub schema_sync_mode: SyncMode,
    pub disable_validate_on_schema_sync: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncOptions::default().resolve(&FormTriggerState::default())
    }
}

impl SyncConfig {
    pub fn new(schema_sync_mode: SyncMode) -> Self {
        SyncConfig {
            schema_sync_mode,
            disable_validate_on_schema_sync: false,
        }
    }

    /// Sync on blur, revalidating
    pub fn on_blur() -> Self {
        Self::new(SyncMode::OnBlur)
    }

    /// Sync on every change, revalidating
    pub fn on_change() -> Self {
        Self::new(SyncMode::OnChange)
    }

    /// Sync on blur and on changes to touched fields, revalidating
    pub fn on_touched() -> Self {
        Self::new(SyncMode::OnTouched)
    }

    /// Sync on every event, revalidating
    pub fn all() -> Self {
        Self::new(SyncMode::All)
    }

    /// Never sync
    pub fn disabled() -> Self {
        Self::new(SyncMode::Disabled)
    }

    /// Keep refreshing constraints but never call the validator
    pub fn with_validate_disabled(mut self) -> Self {
        self.disable_validate_on_schema_sync = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_trigger() {
        let form = FormTriggerState::default();
        assert_eq!(form.current(), ValidationTrigger::OnSubmit);

        let form = FormTriggerState::new(ValidationTrigger::OnBlur);
        assert_eq!(form.current(), ValidationTrigger::OnBlur);

        let form = form.with_submit_count(1);
        assert_eq!(form.current(), ValidationTrigger::OnChange);

        let form = form.with_re_validate_mode(ValidationTrigger::OnSubmit);
        assert_eq!(form.current(), ValidationTrigger::OnSubmit);
    }

    #[test]
    fn test_defaults_follow_form_trigger() {
        let config = SyncOptions::default().resolve(&FormTriggerState::default());
        assert_eq!(config.schema_sync_mode, SyncMode::OnBlur);
        assert!(config.disable_validate_on_schema_sync);

        let config = SyncOptions::default().resolve(&FormTriggerState::new(ValidationTrigger::OnChange));
        assert!(!config.disable_validate_on_schema_sync);

        assert_eq!(SyncConfig::default(), config.with_validate_disabled());
    }

    #[test]
    fn test_explicit_options_win() {
        let options = SyncOptions::default()
            .with_mode(SyncMode::All)
            .with_validate_disabled(false);
        let config = options.resolve(&FormTriggerState::default());
        assert_eq!(config.schema_sync_mode, SyncMode::All);
        assert!(!config.disable_validate_on_schema_sync);
    }

    #[test]
    fn test_options_from_json() {
        let options =
            SyncOptions::from_json(r#"{"schemaSyncMode": false, "disableValidateOnSchemaSync": true}"#)
                .unwrap();
        assert_eq!(options.schema_sync_mode, Some(SyncMode::Disabled));
        assert_eq!(options.disable_validate_on_schema_sync, Some(true));

        let options = SyncOptions::from_json(r#"{"schemaSyncMode": "onChange"}"#).unwrap();
        assert_eq!(options.schema_sync_mode, Some(SyncMode::OnChange));
        assert_eq!(options.disable_validate_on_schema_sync, None);

        let options = SyncOptions::from_json("{}").unwrap();
        assert_eq!(options, SyncOptions::default());
    }

    #[test]
    fn test_options_with_odd_mode_values_disable_sync() {
        for text in [
            r#"{"schemaSyncMode": 1}"#,
            r#"{"schemaSyncMode": {"on": "blur"}}"#,
            r#"{"schemaSyncMode": ["onBlur"], "disableValidateOnSchemaSync": false}"#,
        ] {
            let options = SyncOptions::from_json(text).unwrap();
            assert_eq!(options.schema_sync_mode, Some(SyncMode::Disabled), "{}", text);
        }
    }

    #[test]
    fn test_options_from_json_rejects_garbage() {
        let err = SyncOptions::from_json(r#"{"disableValidateOnSchemaSync": "yes"}"#).unwrap_err();
        assert!(matches!(err, FormSyncError::InvalidConfig(_)));
    }
}
