// tests/composition_tests.rs
mod common;

use common::*;
use proctor::{Process, SlotRole};
use serde_json::json;

#[tokio::test]
async fn test_compose_merges_bundle_from_secondary_instance() {
  setup_tracing();
  let registry = new_registry();
  let journal = Journal::new();
  let process = registry.get_or_create_with("users", ["1"]);

  process
    .perform([recording_job(&journal, "load", json!({"id": 1}), 0)])
    .on_success_as("mine", [recording_callback(&journal, "mine")]);

  let bundle_journal = journal.clone();
  let bundle_registry = &registry;
  process.compose(|p: &TestProcess| {
    let bundle = bundle_registry.get_or_create_with(p.identity().primary(), ["1", "bundle"]);
    bundle
      .on_start_as("bundle", [recording_callback(&bundle_journal, "bundle:start")])
      .on_success_as("bundle", [recording_callback(&bundle_journal, "bundle:success")]);
    bundle
  });

  assert_eq!(
    process.slot_names(SlotRole::OnSuccess),
    vec!["mine".to_string(), "bundle".to_string()]
  );

  process.start().await;
  assert_eq!(
    journal.entries(),
    vec!["bundle:start", "load:begin", "load:end", "mine", "bundle:success"]
  );
}

#[tokio::test]
async fn test_compose_overwrites_same_name() {
  setup_tracing();
  let registry = new_registry();
  let journal = Journal::new();
  let process = registry.get_or_create("overwrite");

  process.on_success_as("shared", [recording_callback(&journal, "local")]);

  let bundle = registry.get_or_create_with("overwrite", ["bundle"]);
  bundle.on_success_as("shared", [recording_callback(&journal, "bundled")]);
  process.compose(|_p: &TestProcess| bundle.clone());

  assert_eq!(process.slot_counts().on_success, 1);
  process.start().await;
  assert_eq!(journal.entries(), vec!["bundled"]);
}

#[tokio::test]
async fn test_compose_does_not_merge_predicates() {
  setup_tracing();
  let registry = new_registry();
  let journal = Journal::new();
  let process = registry.get_or_create("no-predicates");

  let bundle = registry.get_or_create_with("no-predicates", ["bundle"]);
  bundle
    .when([proctor::predicate(|_p: TestProcess| async { Ok::<bool, TestError>(false) })])
    .perform_as("bundle-job", [recording_job(&journal, "bundle-job", json!({"b": 1}), 0)]);

  process.compose(|_p: &TestProcess| bundle.clone());
  assert_eq!(process.slot_counts().predicates, 0);
  assert_eq!(process.slot_counts().jobs, 1);

  process.start().await;
  assert_eq!(process.result(), Some(json!({"b": 1})));
}

#[tokio::test]
async fn test_compose_with_self_registration_is_a_no_op_merge() {
  setup_tracing();
  let registry = new_registry();
  let journal = Journal::new();
  let process = registry.get_or_create("self");

  let j = journal.clone();
  let returned = process
    .compose(move |p: &TestProcess| {
      p.on_start_as("direct", [recording_callback(&j, "direct")]);
      p.clone()
    })
    .clone();

  assert!(Process::ptr_eq(&returned, &process));
  assert_eq!(process.slot_counts().on_start, 1);
  process.start().await;
  assert_eq!(journal.entries(), vec!["direct"]);
}

#[tokio::test]
async fn test_bundle_keeps_working_on_its_own_instance() {
  setup_tracing();
  let registry = new_registry();
  let journal = Journal::new();
  let process = registry.get_or_create("independent");
  let bundle = registry.get_or_create_with("independent", ["bundle"]);
  bundle.on_success_as("bundle", [recording_callback(&journal, "bundle")]);

  process.compose(|_p: &TestProcess| bundle.clone());
  // Later registrations on the bundle are not seen by the composed process.
  bundle.on_success_as("late", [recording_callback(&journal, "late")]);

  process.start().await;
  assert_eq!(journal.entries(), vec!["bundle"]);
}
