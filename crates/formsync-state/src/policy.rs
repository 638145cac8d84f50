//! Sync-mode policy
//!
//! Decision table mapping (mode, event) to whether a field event refreshes the
//! field's constraints and whether it revalidates:
//!
//! | mode      | change              | blur |
//! |-----------|---------------------|------|
//! | onChange  | sync                | -    |
//! | onBlur    | -                   | sync |
//! | onTouched | sync if pre-touched | sync |
//! | all       | sync                | sync |
//! | disabled  | -                   | -    |
//!
//! "Pre-touched" is the field's touched status *before* the event was applied,
//! so the first keystroke in a fresh field never counts as touched.

use formsync_core::{SyncConfig, SyncDecision, SyncEvent, SyncMode};

/// Sync policy bound to a form's configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct SyncPolicy {
    config: SyncConfig,
}

impl SyncPolicy {
    pub fn new(config: SyncConfig) -> Self {
        SyncPolicy { config }
    }

    pub fn config(&self) -> SyncConfig {
        self.config
    }

    pub fn mode(&self) -> SyncMode {
        self.config.schema_sync_mode
    }

    /// Does a decision under this mode depend on the pre-event touched status?
    pub fn needs_touched_status(&self) -> bool {
        self.mode() == SyncMode::OnTouched
    }

    /// Raw table lookup, before the validate override
    pub fn table(mode: SyncMode, event: SyncEvent, was_touched: bool) -> SyncDecision {
        let sync = match (mode, event) {
            (SyncMode::All, _) => true,
            (SyncMode::OnChange, SyncEvent::Change) => true,
            (SyncMode::OnTouched, SyncEvent::Change) => was_touched,
            (SyncMode::OnBlur | SyncMode::OnTouched, SyncEvent::Blur) => true,
            (SyncMode::OnBlur, SyncEvent::Change)
            | (SyncMode::OnChange, SyncEvent::Blur)
            | (SyncMode::Disabled, _) => false,
        };

        SyncDecision::new(sync, sync)
    }

    /// Decision for one event, with `disableValidateOnSchemaSync` applied
    pub fn decide(&self, event: SyncEvent, was_touched: bool) -> SyncDecision {
        let decision = Self::table(self.mode(), event, was_touched);
        if self.config.disable_validate_on_schema_sync {
            decision.without_revalidation()
        } else {
            decision
        }
    }
}
