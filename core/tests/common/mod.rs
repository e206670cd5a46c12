// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use parking_lot::Mutex;
use proctor::{callback, error_callback, job, Callback, ErrorCallback, Job, LogSink, Process, Registry};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::Level;

// --- Common Error Type for Tests ---
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TestError {
  #[error("Test job failed: {0}")]
  Job(String),

  #[error("Test callback failed: {0}")]
  Callback(String),

  #[error("Test predicate failed: {0}")]
  Predicate(String),
}

pub type TestProcess = Process<Value, TestError>;
pub type TestRegistry = Registry<Value, TestError>;

pub fn new_registry() -> TestRegistry {
  Registry::<Value, TestError>::new()
}

// --- Execution journal shared by the helper callables ---
#[derive(Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn push(&self, entry: impl Into<String>) {
    self.0.lock().push(entry.into());
  }

  pub fn entries(&self) -> Vec<String> {
    self.0.lock().clone()
  }

  pub fn count(&self, entry: &str) -> usize {
    self.0.lock().iter().filter(|e| e.as_str() == entry).count()
  }
}

// --- Common Callable Creators ---
pub fn recording_job(journal: &Journal, label: &'static str, result: Value, delay_ms: u64) -> Job<Value, TestError> {
  let journal = journal.clone();
  job(move |_process: TestProcess| {
    let journal = journal.clone();
    let result = result.clone();
    async move {
      journal.push(format!("{}:begin", label));
      if delay_ms > 0 {
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
      }
      journal.push(format!("{}:end", label));
      Ok::<Value, TestError>(result)
    }
  })
}

pub fn failing_job(journal: &Journal, label: &'static str, error: TestError) -> Job<Value, TestError> {
  let journal = journal.clone();
  job(move |_process: TestProcess| {
    let journal = journal.clone();
    let error = error.clone();
    async move {
      journal.push(label);
      Err::<Value, TestError>(error)
    }
  })
}

pub fn recording_callback(journal: &Journal, label: &'static str) -> Callback<Value, TestError> {
  let journal = journal.clone();
  callback(move |_process: TestProcess| {
    let journal = journal.clone();
    async move {
      journal.push(label);
      Ok::<(), TestError>(())
    }
  })
}

pub fn failing_callback(journal: &Journal, label: &'static str, error: TestError) -> Callback<Value, TestError> {
  let journal = journal.clone();
  callback(move |_process: TestProcess| {
    let journal = journal.clone();
    let error = error.clone();
    async move {
      journal.push(label);
      Err::<(), TestError>(error)
    }
  })
}

/// Records `label:<error display>` for every captured failure it receives.
pub fn recording_error_callback(journal: &Journal, label: &'static str) -> ErrorCallback<Value, TestError> {
  let journal = journal.clone();
  error_callback(move |_process: TestProcess, error: Arc<TestError>| {
    let journal = journal.clone();
    async move {
      journal.push(format!("{}:{}", label, error));
      Ok::<(), TestError>(())
    }
  })
}

// --- Log sink capturing lines for assertions ---
#[derive(Default)]
pub struct CollectingSink {
  pub lines: Mutex<Vec<(String, Level, String)>>,
}

impl CollectingSink {
  pub fn lines(&self) -> Vec<(String, Level, String)> {
    self.lines.lock().clone()
  }
}

impl LogSink for CollectingSink {
  fn log(&self, namespace: &str, level: Level, message: &str) {
    self.lines.lock().push((namespace.to_string(), level, message.to_string()));
  }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
