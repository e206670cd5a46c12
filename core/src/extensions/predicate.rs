// proctor/src/extensions/predicate.rs

//! Trait form of a predicate, for extensions that carry configuration.

use crate::core::callable::{BoxFuture, Predicate};
use crate::process::Process;
use async_trait::async_trait;
use std::sync::Arc;

/// A predicate implemented as a type rather than a closure.
///
/// Implementations typically keep cross-invocation state in the process's
/// metadata bag under a key they own.
#[async_trait]
pub trait ProcessPredicate<R, E>: Send + Sync + 'static
where
  R: Send + Sync + 'static,
  E: Send + Sync + 'static,
{
  /// `Ok(true)` lets the jobs run, `Ok(false)` skips them.
  async fn evaluate(&self, process: Process<R, E>) -> Result<bool, E>;
}

/// Turns a [`ProcessPredicate`] into a [`Predicate`] ready for `when`.
pub fn predicate_from<R, E, P>(gate: P) -> Predicate<R, E>
where
  R: Send + Sync + 'static,
  E: Send + Sync + 'static,
  P: ProcessPredicate<R, E>,
{
  let gate = Arc::new(gate);
  Arc::new(move |process: Process<R, E>| -> BoxFuture<Result<bool, E>> {
    let gate = Arc::clone(&gate);
    Box::pin(async move { gate.evaluate(process).await })
  })
}
