// proctor/src/extensions/time_gate.rs

//! A "skip if recently run" predicate.
//!
//! The first evaluation on a process records the current time and the
//! dependency value, and lets the jobs run. Later evaluations let them run
//! again if the dependency value changed or if more than `threshold` has
//! elapsed since the recorded time; both cases refresh the record. Anything
//! else skips the jobs. [`TimeGate::cancel`] deletes the record so the next
//! evaluation behaves like the first one.
//!
//! Re-register the gate (same predicate name) whenever the dependency value
//! changes; the record survives re-registration because it lives in metadata.

use crate::core::metadata::Metadata;
use crate::extensions::predicate::ProcessPredicate;
use crate::process::Process;
use async_trait::async_trait;
use std::time::{Duration, Instant};
use tracing::{event, Level};

const METADATA_PREFIX: &str = "timeGate:";

struct TimeGateRecord<D> {
  last_run: Instant,
  dependencies: D,
}

#[derive(Debug, Clone)]
pub struct TimeGate<D> {
  key: String,
  threshold: Duration,
  dependencies: D,
}

impl<D> TimeGate<D>
where
  D: PartialEq + Clone + Send + Sync + 'static,
{
  /// `key` separates independent gates on the same process.
  pub fn new(key: impl Into<String>, threshold: Duration, dependencies: D) -> Self {
    Self {
      key: key.into(),
      threshold,
      dependencies,
    }
  }

  pub fn metadata_key(&self) -> String {
    metadata_key(&self.key)
  }

  /// Decides against `metadata` as of `now`, updating the record when the jobs may run.
  pub fn check(&self, metadata: &mut Metadata, now: Instant) -> bool {
    let key = self.metadata_key();
    let Some(record) = metadata.get_mut::<TimeGateRecord<D>>(&key) else {
      metadata.insert(
        key,
        TimeGateRecord {
          last_run: now,
          dependencies: self.dependencies.clone(),
        },
      );
      return true;
    };

    if record.dependencies != self.dependencies {
      record.dependencies = self.dependencies.clone();
      record.last_run = now;
      return true;
    }

    if now.saturating_duration_since(record.last_run) > self.threshold {
      record.last_run = now;
      return true;
    }

    false
  }

  /// Forgets the recorded state on `process`. Returns whether there was any.
  pub fn cancel<R, E>(&self, process: &Process<R, E>) -> bool {
    cancel_time_gate(process, &self.key)
  }
}

/// Forgets the state of the gate named `key` on `process`.
pub fn cancel_time_gate<R, E>(process: &Process<R, E>, key: &str) -> bool {
  let removed = process.with_metadata(|m| m.remove(&metadata_key(key)));
  event!(Level::DEBUG, process = %process.identity(), gate = key, removed, "Time gate cancelled.");
  removed
}

fn metadata_key(key: &str) -> String {
  format!("{}{}", METADATA_PREFIX, key)
}

#[async_trait]
impl<R, E, D> ProcessPredicate<R, E> for TimeGate<D>
where
  R: Send + Sync + 'static,
  E: Send + Sync + 'static,
  D: PartialEq + Clone + Send + Sync + 'static,
{
  async fn evaluate(&self, process: Process<R, E>) -> Result<bool, E> {
    let now = Instant::now();
    Ok(process.with_metadata(|m| self.check(m, now)))
  }
}
