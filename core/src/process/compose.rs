// proctor/src/process/compose.rs

//! Composition of reusable behavior bundles into a process.

use crate::process::definition::Process;
use tracing::{event, Level};

impl<R, E> Process<R, E> {
  /// Applies a behavior bundle.
  ///
  /// `bundle` receives this process and returns a process whose jobs, onStart,
  /// onSuccess and onError groups are merged into this one by registration
  /// name: a name already present here is overwritten, any other name is
  /// added alongside the existing ones. Predicates are not merged.
  ///
  /// A bundle may register directly on the process it receives and return it
  /// unchanged; merging an instance into itself is a no-op.
  pub fn compose<F>(&self, bundle: F) -> &Self
  where
    F: FnOnce(&Process<R, E>) -> Process<R, E>,
  {
    let source = bundle(self);
    if Process::ptr_eq(self, &source) {
      return self;
    }

    // Copy out first: the two instances have independent locks.
    let (jobs, on_start, on_success, on_error) = {
      let other = source.inner.state.lock();
      (
        other.jobs.clone(),
        other.on_start.clone(),
        other.on_success.clone(),
        other.on_error.clone(),
      )
    };

    let mut state = self.inner.state.lock();
    if state.options.debug.log_function_registrations {
      event!(
        Level::DEBUG,
        process = %self.inner.identity,
        source = %source.inner.identity,
        jobs = jobs.len(),
        on_start = on_start.len(),
        on_success = on_success.len(),
        on_error = on_error.len(),
        "Composing functions."
      );
    }
    state.jobs.merge(&jobs);
    state.on_start.merge(&on_start);
    state.on_success.merge(&on_success);
    state.on_error.merge(&on_error);
    self
  }
}
