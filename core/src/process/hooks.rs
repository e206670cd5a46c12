// proctor/src/process/hooks.rs

//! Registration of jobs, lifecycle callbacks and predicates.
//!
//! Every method comes in two forms: a plain one registering under the role's
//! default name, and an `_as` form taking an explicit registration name.
//! Registering under a name already in use replaces that group; a new name
//! adds a group next to the existing ones. Each method accepts anything
//! iterable (an array works for one or many callables) and returns `&Self`
//! for chaining.

use crate::core::callable::{Callback, ErrorCallback, Job, Predicate};
use crate::core::options::ProcessOptions;
use crate::process::definition::{
  Process, SlotRole, DEFAULT_JOBS, DEFAULT_ON_ERROR, DEFAULT_ON_START, DEFAULT_ON_SUCCESS, DEFAULT_PREDICATE,
};
use tracing::{event, Level};

impl<R, E> Process<R, E> {
  /// Registers jobs (the `do` step) under the default name.
  pub fn perform<I>(&self, jobs: I) -> &Self
  where
    I: IntoIterator<Item = Job<R, E>>,
  {
    self.perform_as(DEFAULT_JOBS, jobs)
  }

  pub fn perform_as<I>(&self, name: &str, jobs: I) -> &Self
  where
    I: IntoIterator<Item = Job<R, E>>,
  {
    let jobs: Vec<Job<R, E>> = jobs.into_iter().collect();
    let mut state = self.inner.state.lock();
    self.log_registration(&state.options, SlotRole::Jobs, name, jobs.len());
    state.jobs.register(name, jobs);
    self
  }

  /// Registers predicates (the `if` step) under the default name.
  pub fn when<I>(&self, predicates: I) -> &Self
  where
    I: IntoIterator<Item = Predicate<R, E>>,
  {
    self.when_as(DEFAULT_PREDICATE, predicates)
  }

  pub fn when_as<I>(&self, name: &str, predicates: I) -> &Self
  where
    I: IntoIterator<Item = Predicate<R, E>>,
  {
    let predicates: Vec<Predicate<R, E>> = predicates.into_iter().collect();
    let mut state = self.inner.state.lock();
    self.log_registration(&state.options, SlotRole::Predicates, name, predicates.len());
    state.predicates.register(name, predicates);
    self
  }

  pub fn on_start<I>(&self, callbacks: I) -> &Self
  where
    I: IntoIterator<Item = Callback<R, E>>,
  {
    self.on_start_as(DEFAULT_ON_START, callbacks)
  }

  pub fn on_start_as<I>(&self, name: &str, callbacks: I) -> &Self
  where
    I: IntoIterator<Item = Callback<R, E>>,
  {
    let callbacks: Vec<Callback<R, E>> = callbacks.into_iter().collect();
    let mut state = self.inner.state.lock();
    self.log_registration(&state.options, SlotRole::OnStart, name, callbacks.len());
    state.on_start.register(name, callbacks);
    self
  }

  pub fn on_success<I>(&self, callbacks: I) -> &Self
  where
    I: IntoIterator<Item = Callback<R, E>>,
  {
    self.on_success_as(DEFAULT_ON_SUCCESS, callbacks)
  }

  pub fn on_success_as<I>(&self, name: &str, callbacks: I) -> &Self
  where
    I: IntoIterator<Item = Callback<R, E>>,
  {
    let callbacks: Vec<Callback<R, E>> = callbacks.into_iter().collect();
    let mut state = self.inner.state.lock();
    self.log_registration(&state.options, SlotRole::OnSuccess, name, callbacks.len());
    state.on_success.register(name, callbacks);
    self
  }

  pub fn on_error<I>(&self, callbacks: I) -> &Self
  where
    I: IntoIterator<Item = ErrorCallback<R, E>>,
  {
    self.on_error_as(DEFAULT_ON_ERROR, callbacks)
  }

  pub fn on_error_as<I>(&self, name: &str, callbacks: I) -> &Self
  where
    I: IntoIterator<Item = ErrorCallback<R, E>>,
  {
    let callbacks: Vec<ErrorCallback<R, E>> = callbacks.into_iter().collect();
    let mut state = self.inner.state.lock();
    self.log_registration(&state.options, SlotRole::OnError, name, callbacks.len());
    state.on_error.register(name, callbacks);
    self
  }

  // Called with the state lock held, before the slot map is touched.
  fn log_registration(&self, options: &ProcessOptions, role: SlotRole, name: &str, count: usize) {
    if options.debug.log_function_registrations {
      event!(
        Level::DEBUG,
        process = %self.inner.identity,
        %role,
        registration = %name,
        count,
        "Registering functions."
      );
    }
  }
}
