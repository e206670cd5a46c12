// proctor/src/process/execution.rs

//! Contains `Process::start()`, which evaluates predicates and then runs
//! onStart callbacks, jobs and onSuccess callbacks in strict sequence,
//! diverting to the onError callbacks on the first failure.

use crate::core::merge::Merge;
use crate::process::definition::{Process, SlotRole};
use std::fmt;
use std::sync::Arc;
use tracing::{event, instrument, Level};

/// Clears every slot map when dropped if `delete_functions_when_jobs_started`
/// is set at that moment. Dropping also happens while unwinding from a
/// panicking callable, or when the `start()` future is dropped mid-flight.
struct FunctionCleanup<'a, R, E> {
  process: &'a Process<R, E>,
}

impl<R, E> Drop for FunctionCleanup<'_, R, E> {
  fn drop(&mut self) {
    let mut state = self.process.inner.state.lock();
    if state.options.delete_functions_when_jobs_started {
      state.clear_functions();
      if state.options.debug.log_function_executions {
        event!(Level::DEBUG, process = %self.process.inner.identity, "Registered functions deleted.");
      }
    }
  }
}

impl<R, E> Process<R, E>
where
  R: Merge + Clone + Send + Sync + 'static,
  E: fmt::Debug + Send + Sync + 'static,
{
  /// Runs the process once and resolves with the instance itself.
  ///
  /// Order: predicates, then (unless a predicate returned `false`) onStart
  /// callbacks, jobs and onSuccess callbacks. A skipped run still fires the
  /// onSuccess callbacks. Any `Err` from a predicate, job or callback aborts
  /// the run, is stored verbatim as [`Process::error`], clears the result and
  /// is handed to each onError callback. Failures of onError callbacks are
  /// logged and do not stop the remaining onError callbacks.
  ///
  /// This never fails; inspect [`Process::result`] / [`Process::error`] afterwards.
  #[instrument(name = "Process::start", skip_all, fields(process = %self.inner.identity))]
  pub async fn start(&self) -> Self {
    let _cleanup = FunctionCleanup { process: self };

    let log_executions = {
      let mut state = self.inner.state.lock();
      state.last_error = None;
      state.options.debug.log_function_executions
    };

    let outcome = match self.evaluate_predicates(log_executions).await {
      Ok(true) => self.run(log_executions).await,
      Ok(false) => self.run_callbacks(SlotRole::OnSuccess, log_executions).await,
      Err(e) => Err(e),
    };

    if let Err(e) = outcome {
      self.handle_failure(e, log_executions).await;
    }

    self.clone()
  }

  /// `Ok(false)` as soon as one predicate resolves to `false`.
  async fn evaluate_predicates(&self, log_executions: bool) -> Result<bool, E> {
    let predicates = self.inner.state.lock().predicates.snapshot();

    for (name, predicate) in predicates {
      if log_executions {
        event!(Level::DEBUG, process = %self.inner.identity, role = %SlotRole::Predicates, registration = %name, "Evaluating predicate.");
      }
      if !predicate(self.clone()).await? {
        if log_executions {
          event!(Level::INFO, process = %self.inner.identity, registration = %name, "Jobs skipped by predicate.");
        }
        return Ok(false);
      }
    }
    Ok(true)
  }

  async fn run(&self, log_executions: bool) -> Result<(), E> {
    self.run_callbacks(SlotRole::OnStart, log_executions).await?;

    let jobs = self.inner.state.lock().jobs.snapshot();
    let mut aggregate: Option<R> = None;
    for (name, job) in jobs {
      if log_executions {
        event!(Level::DEBUG, process = %self.inner.identity, role = %SlotRole::Jobs, registration = %name, "Running job.");
      }
      let result = job(self.clone()).await?;
      match aggregate.as_mut() {
        Some(acc) => acc.merge(result),
        None => aggregate = Some(result),
      }
    }
    self.inner.state.lock().last_result = aggregate;

    self.run_callbacks(SlotRole::OnSuccess, log_executions).await
  }

  /// Runs the onStart or onSuccess callbacks, stopping at the first failure.
  async fn run_callbacks(&self, role: SlotRole, log_executions: bool) -> Result<(), E> {
    let callbacks = {
      let state = self.inner.state.lock();
      match role {
        SlotRole::OnStart => state.on_start.snapshot(),
        _ => state.on_success.snapshot(),
      }
    };

    for (name, callback) in callbacks {
      if log_executions {
        event!(Level::DEBUG, process = %self.inner.identity, %role, registration = %name, "Running callback.");
      }
      callback(self.clone()).await?;
    }
    Ok(())
  }

  async fn handle_failure(&self, error: E, log_executions: bool) {
    if log_executions {
      event!(Level::DEBUG, process = %self.inner.identity, error = ?error, "Run failed, running onError callbacks.");
    }
    let error = Arc::new(error);
    let callbacks = {
      let mut state = self.inner.state.lock();
      state.last_error = Some(Arc::clone(&error));
      state.last_result = None;
      state.on_error.snapshot()
    };

    for (name, callback) in callbacks {
      if log_executions {
        event!(Level::DEBUG, process = %self.inner.identity, role = %SlotRole::OnError, registration = %name, "Running error callback.");
      }
      if let Err(callback_error) = callback(self.clone(), Arc::clone(&error)).await {
        event!(
          Level::WARN,
          process = %self.inner.identity,
          registration = %name,
          error = ?callback_error,
          "onError callback failed."
        );
      }
    }
  }
}
