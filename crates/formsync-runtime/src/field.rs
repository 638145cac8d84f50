//! Field sync coordinator
//!
//! Wraps one field's native change / blur handling. Every event runs the same
//! steps: read the pre-event touched status, apply the native handling,
//! evaluate the policy, refresh constraints, then dispatch revalidation
//! without waiting for it.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use formsync_core::{
    FieldConstraints, FieldPath, SyncConfig, SyncDecision, SyncEvent, SyncMode,
};
use formsync_state::SyncPolicy;

use crate::form::FormShared;
use crate::PendingValidation;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SyncStats {
    pub events: u64,
    pub changes: u64,
    pub blurs: u64,
    pub refreshes: u64,
    pub validations_dispatched: u64,
    pub validations_suppressed: u64,
    /// Revalidations that could not be spawned
    pub validations_skipped: u64,
}

impl SyncStats {
    fn record_event(&mut self, event: SyncEvent) {
        self.events += 1;
        match event {
            SyncEvent::Change => self.changes += 1,
            SyncEvent::Blur => self.blurs += 1,
        }
    }
}

/// What one field event did
#[derive(Debug)]
pub struct SyncOutcome {
    pub event: SyncEvent,
    pub decision: SyncDecision,
    /// Revalidation request, if one was dispatched
    pub validation: Option<PendingValidation>,
}

impl SyncOutcome {
    pub fn refreshed(&self) -> bool {
        self.decision.refresh_constraints
    }

    pub fn revalidating(&self) -> bool {
        self.validation.is_some()
    }

    /// Wait for the dispatched revalidation, if any
    pub async fn settle(self) -> Option<bool> {
        match self.validation {
            Some(pending) => pending.outcome().await.ok(),
            None => None,
        }
    }
}

/// Per-field schema sync coordinator
pub struct FieldSync {
    path: FieldPath,
    form: Arc<FormShared>,
    stats: SyncStats,
}

impl FieldSync {
    pub(crate) fn new(path: FieldPath, form: Arc<FormShared>) -> Self {
        FieldSync {
            path,
            form,
            stats: SyncStats::default(),
        }
    }

    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    pub fn config(&self) -> SyncConfig {
        self.form.policy.config()
    }

    pub fn mode(&self) -> SyncMode {
        self.form.policy.mode()
    }

    pub fn is_touched(&self) -> bool {
        self.form.store.is_touched(&self.path)
    }

    /// Constraints currently displayed for this field
    pub fn schema_state(&self) -> FieldConstraints {
        self.form.constraints.constraints_for(&self.path)
    }

    pub fn stats(&self) -> &SyncStats {
        &self.stats
    }

    /// Wrapped change handler
    pub fn on_change(&mut self, value: Value) -> SyncOutcome {
        let was_touched = self.pre_event_touched();
        self.form.store.apply_change(&self.path, value);
        self.sync(SyncEvent::Change, was_touched)
    }

    /// Wrapped blur handler
    pub fn on_blur(&mut self) -> SyncOutcome {
        let was_touched = self.pre_event_touched();
        self.form.store.apply_blur(&self.path);
        self.sync(SyncEvent::Blur, was_touched)
    }

    // Must be read before the native handler runs
    fn pre_event_touched(&self) -> bool {
        self.form.policy.needs_touched_status() && self.form.store.is_touched(&self.path)
    }

    fn sync(&mut self, event: SyncEvent, was_touched: bool) -> SyncOutcome {
        let policy = self.form.policy;
        let table = SyncPolicy::table(policy.mode(), event, was_touched);
        let decision = policy.decide(event, was_touched);

        debug!(
            field = %self.path,
            %event,
            mode = %policy.mode(),
            was_touched,
            refresh = decision.refresh_constraints,
            revalidate = decision.revalidate,
            "schema sync decision"
        );
        self.record(|s| s.record_event(event));

        if decision.refresh_constraints {
            self.form.constraints.refresh(&self.path);
            self.record(|s| s.refreshes += 1);
        }

        if table.revalidate && !decision.revalidate {
            self.record(|s| s.validations_suppressed += 1);
        }

        let validation = if decision.revalidate {
            match self.form.revalidate() {
                Ok(pending) => {
                    self.record(|s| s.validations_dispatched += 1);
                    Some(pending)
                }
                Err(e) => {
                    warn!(field = %self.path, "revalidation skipped: {}", e);
                    self.record(|s| s.validations_skipped += 1);
                    None
                }
            }
        } else {
            None
        };

        SyncOutcome {
            event,
            decision,
            validation,
        }
    }

    fn record(&mut self, update: impl Fn(&mut SyncStats)) {
        update(&mut self.stats);
        update(&mut *self.form.stats.lock());
    }
}
