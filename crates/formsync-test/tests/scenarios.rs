//! End-to-end form scenarios on the name / age form

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use formsync_core::{FieldPath, FormTriggerState, SyncConfig, SyncMode, SyncOptions, ValidationTrigger};
use formsync_runtime::FormSync;
use formsync_test::{FormScenario, MemoryFieldStore, RecordingValidator, RuleConstraintSource, person_rules};

#[test]
fn test_schema_state_passed_to_fields() {
    let scenario = FormScenario::person(SyncConfig::default());
    let name = scenario.field("name").unwrap();
    let age = scenario.field("age").unwrap();
    assert!(name.schema_state().required);
    assert!(!age.schema_state().required);
}

#[tokio::test]
async fn test_submit_displays_error_for_invalid_input() {
    let scenario = FormScenario::person(SyncConfig::default());
    assert!(!scenario.submit().await.unwrap());
    assert_eq!(scenario.error("name").as_deref(), Some("Name is required"));
}

#[tokio::test]
async fn test_on_change_updates_other_fields_schema_state() {
    let mut scenario = FormScenario::person(SyncConfig::on_change());

    let outcome = scenario.input("name", json!("John Doe")).unwrap();
    assert!(outcome.refreshed());
    assert!(scenario.is_required("age"));
    outcome.settle().await;
}

#[tokio::test]
async fn test_default_mode_updates_schema_state_on_blur() {
    let mut scenario =
        FormScenario::person_with_options(SyncOptions::default(), &FormTriggerState::default());
    assert_eq!(scenario.form().mode(), SyncMode::OnBlur);

    scenario.input("name", json!("John Doe")).unwrap();
    assert!(!scenario.is_required("age"));

    let outcome = scenario.blur("name").unwrap();
    assert!(outcome.refreshed());
    assert!(scenario.is_required("age"));

    // The form validates on submit, so schema sync does not revalidate
    assert!(!outcome.revalidating());
    assert_eq!(scenario.validator().call_count(), 0);
}

async fn dirty_then_clear_age(scenario: &mut FormScenario) {
    scenario.input("age", json!("1")).unwrap().settle().await;
    scenario.blur("age").unwrap().settle().await;
    scenario.input("age", json!("")).unwrap().settle().await;
    scenario.blur("age").unwrap().settle().await;
    assert_eq!(scenario.error("age"), None);
}

#[tokio::test]
async fn test_on_touched_revalidates_other_fields_after_blur() {
    let mut scenario = FormScenario::person_with_options(
        SyncOptions::default().with_mode(SyncMode::OnTouched),
        &FormTriggerState::new(ValidationTrigger::OnTouched),
    );
    dirty_then_clear_age(&mut scenario).await;

    // name was never touched, so typing in it does not sync
    let outcome = scenario.input("name", json!("John Doe")).unwrap();
    assert!(outcome.decision.is_noop());
    assert_eq!(outcome.settle().await, None);
    assert_eq!(scenario.error("age"), None);
    assert!(!scenario.is_required("age"));

    let outcome = scenario.blur("name").unwrap();
    assert!(outcome.refreshed());
    assert_eq!(outcome.settle().await, Some(false));
    assert_eq!(scenario.error("age").as_deref(), Some("Age is required"));

    let last = scenario.validator().last_call().unwrap();
    assert_eq!(last.to_strings(), vec!["age", "name"]);

    // name is touched now, so further typing syncs
    let outcome = scenario.input("name", json!("John")).unwrap();
    assert!(outcome.revalidating());
    outcome.settle().await;
}

#[tokio::test]
async fn test_on_touched_sync_with_on_blur_form() {
    let mut scenario = FormScenario::person_with_options(
        SyncOptions::default().with_mode(SyncMode::OnTouched),
        &FormTriggerState::new(ValidationTrigger::OnBlur),
    );
    assert!(!scenario.form().config().disable_validate_on_schema_sync);
    dirty_then_clear_age(&mut scenario).await;

    scenario.input("name", json!("John Doe")).unwrap().settle().await;
    assert_eq!(scenario.error("age"), None);

    scenario.blur("name").unwrap().settle().await;
    assert_eq!(scenario.error("age").as_deref(), Some("Age is required"));
}

#[tokio::test]
async fn test_disabled_validation_on_change_form() {
    let mut scenario = FormScenario::person_with_options(
        SyncOptions::default().with_validate_disabled(true),
        &FormTriggerState::new(ValidationTrigger::OnChange),
    );

    scenario.fill("name", json!("John Doe")).await.unwrap();

    assert_eq!(scenario.error("age"), None);
    assert_eq!(scenario.validator().call_count(), 0);
    // constraints are still refreshed
    assert!(scenario.is_required("age"));
    assert_eq!(scenario.form().stats().validations_suppressed, 1);
}

#[tokio::test]
async fn test_disabled_validation_on_blur_form() {
    let mut scenario = FormScenario::person_with_options(
        SyncOptions::default().with_validate_disabled(true),
        &FormTriggerState::new(ValidationTrigger::OnBlur),
    );

    scenario.fill("name", json!("John Doe")).await.unwrap();
    assert_eq!(scenario.error("age"), None);
    assert_eq!(scenario.validator().call_count(), 0);
}

#[tokio::test]
async fn test_sync_mode_false_never_updates_schema_state() {
    let options = SyncOptions::from_json(r#"{"schemaSyncMode": false}"#).unwrap();
    let mut scenario =
        FormScenario::person_with_options(options, &FormTriggerState::new(ValidationTrigger::OnChange));
    assert_eq!(scenario.form().mode(), SyncMode::Disabled);

    scenario.input("name", json!("John Doe")).unwrap();
    assert!(!scenario.is_required("age"));

    scenario.blur("name").unwrap();
    assert!(!scenario.is_required("age"));
    assert_eq!(scenario.constraints().refresh_count(), 0);
    assert_eq!(scenario.validator().call_count(), 0);
}

#[tokio::test]
async fn test_revalidated_set_follows_submit_trigger() {
    let trigger = FormTriggerState::new(ValidationTrigger::OnSubmit).with_submit_count(1);
    let mut scenario = FormScenario::person_with_options(
        SyncOptions::default().with_mode(SyncMode::OnChange),
        &trigger,
    );
    // after the first submit the form revalidates on change
    assert!(!scenario.form().config().disable_validate_on_schema_sync);

    let outcome = scenario.input("name", json!("John Doe")).unwrap();
    assert_eq!(outcome.validation.as_ref().unwrap().paths().to_strings(), vec!["name"]);
    assert_eq!(outcome.settle().await, Some(true));
}

#[tokio::test]
async fn test_validator_failure_does_not_reach_handler() {
    let mut scenario = FormScenario::person(SyncConfig::on_blur());
    scenario.validator().fail_with("resolver unavailable");

    let outcome = scenario.blur("name").unwrap();
    assert!(outcome.refreshed());
    assert_eq!(outcome.settle().await, Some(false));

    scenario.validator().recover();
    scenario.blur("age").unwrap().settle().await;
    assert_eq!(scenario.validator().call_count(), 2);
}

#[tokio::test]
async fn test_handler_does_not_wait_for_validation() {
    let rules = Arc::new(person_rules());
    let store = Arc::new(MemoryFieldStore::with_defaults([("name", json!("")), ("age", json!(""))]));
    let constraints = Arc::new(RuleConstraintSource::new(rules.clone(), store.clone()));
    let validator = Arc::new(
        RecordingValidator::with_rules(rules, store.clone()).with_latency(Duration::from_millis(20)),
    );
    let form = FormSync::new(SyncConfig::on_blur(), store, validator.clone(), constraints);
    let mut age = form.field("age");

    let outcome = age.on_blur();
    let pending = outcome.validation.unwrap();
    assert!(!pending.is_finished());
    assert!(pending.outcome().await.unwrap());
    assert_eq!(validator.call_count(), 1);
}

#[tokio::test]
async fn test_revalidate_synced_fields_on_demand() {
    let mut scenario = FormScenario::person(SyncConfig::on_blur().with_validate_disabled());
    scenario.fill("name", json!("John Doe")).await.unwrap();
    scenario.blur("age").unwrap();
    assert_eq!(scenario.validator().call_count(), 0);

    let pending = scenario.form().revalidate_synced_fields().unwrap();
    assert_eq!(pending.paths().to_strings(), vec!["name", "age"]);
    assert!(!pending.outcome().await.unwrap());
    assert_eq!(scenario.error("age").as_deref(), Some("Age is required"));
    assert!(scenario.store().is_dirty(&FieldPath::from("name")));
}
