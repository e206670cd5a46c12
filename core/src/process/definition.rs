// proctor/src/process/definition.rs

//! Contains the `Process<R, E>` handle, its internal state, and the accessors
//! that don't depend on the execution algorithm.

use crate::core::callable::{CallbackFn, ErrorCallbackFn, JobFn, PredicateFn};
use crate::core::identity::ProcessIdentity;
use crate::core::metadata::Metadata;
use crate::core::options::{PartialProcessOptions, ProcessOptions};
use crate::process::slots::SlotMap;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use tracing::{event, Level};

pub const DEFAULT_JOBS: &str = "defaultJobs";
pub const DEFAULT_PREDICATE: &str = "defaultPredicate";
pub const DEFAULT_ON_START: &str = "defaultOnStart";
pub const DEFAULT_ON_SUCCESS: &str = "defaultOnSuccess";
pub const DEFAULT_ON_ERROR: &str = "defaultOnError";

/// The five callable roles a process holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotRole {
  Jobs,
  OnStart,
  OnSuccess,
  OnError,
  Predicates,
}

impl fmt::Display for SlotRole {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      SlotRole::Jobs => "jobs",
      SlotRole::OnStart => "onStart",
      SlotRole::OnSuccess => "onSuccess",
      SlotRole::OnError => "onError",
      SlotRole::Predicates => "predicates",
    })
  }
}

/// Number of registration names currently held per role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlotCounts {
  pub jobs: usize,
  pub on_start: usize,
  pub on_success: usize,
  pub on_error: usize,
  pub predicates: usize,
}

impl SlotCounts {
  pub fn is_empty(&self) -> bool {
    *self == SlotCounts::default()
  }
}

pub(crate) struct ProcessState<R, E> {
  pub(crate) options: ProcessOptions,
  pub(crate) jobs: SlotMap<JobFn<R, E>>,
  pub(crate) on_start: SlotMap<CallbackFn<R, E>>,
  pub(crate) on_success: SlotMap<CallbackFn<R, E>>,
  pub(crate) on_error: SlotMap<ErrorCallbackFn<R, E>>,
  pub(crate) predicates: SlotMap<PredicateFn<R, E>>,
  pub(crate) last_result: Option<R>,
  pub(crate) last_error: Option<Arc<E>>,
}

impl<R, E> ProcessState<R, E> {
  fn new(options: ProcessOptions) -> Self {
    Self {
      options,
      jobs: SlotMap::new(),
      on_start: SlotMap::new(),
      on_success: SlotMap::new(),
      on_error: SlotMap::new(),
      predicates: SlotMap::new(),
      last_result: None,
      last_error: None,
    }
  }

  pub(crate) fn clear_functions(&mut self) {
    self.jobs.clear();
    self.on_start.clear();
    self.on_success.clear();
    self.on_error.clear();
    self.predicates.clear();
  }
}

pub(crate) struct ProcessInner<R, E> {
  pub(crate) identity: ProcessIdentity,
  pub(crate) state: Mutex<ProcessState<R, E>>,
  pub(crate) metadata: Mutex<Metadata>,
}

/// A process instance: one addressable unit of orchestrated async work plus
/// its registered callables.
///
/// `Process` is a cheap, cloneable handle; clones refer to the same instance.
/// Instances are only created by [`crate::Registry`], which guarantees exactly
/// one instance per identity.
///
/// `R` is the job result type (merged across jobs, see [`crate::Merge`]) and
/// `E` the failure type produced by the caller's callables, kept verbatim.
pub struct Process<R = serde_json::Value, E = anyhow::Error> {
  pub(crate) inner: Arc<ProcessInner<R, E>>,
}

impl<R, E> Clone for Process<R, E> {
  fn clone(&self) -> Self {
    Self {
      inner: Arc::clone(&self.inner),
    }
  }
}

impl<R, E> Process<R, E> {
  pub(crate) fn new(identity: ProcessIdentity, options: ProcessOptions) -> Self {
    Self {
      inner: Arc::new(ProcessInner {
        identity,
        state: Mutex::new(ProcessState::new(options)),
        metadata: Mutex::new(Metadata::new()),
      }),
    }
  }

  pub fn identity(&self) -> &ProcessIdentity {
    &self.inner.identity
  }

  /// Whether both handles refer to the same instance.
  pub fn ptr_eq(a: &Self, b: &Self) -> bool {
    Arc::ptr_eq(&a.inner, &b.inner)
  }

  /// Failure captured by the most recent `start()`, if it failed.
  pub fn error(&self) -> Option<Arc<E>> {
    self.inner.state.lock().last_error.clone()
  }

  pub fn options(&self) -> ProcessOptions {
    self.inner.state.lock().options
  }

  /// Overrides the given option fields, leaving the rest untouched.
  pub fn set_options(&self, partial: PartialProcessOptions) -> &Self {
    let mut state = self.inner.state.lock();
    state.options.apply(&partial);
    if state.options.debug.log_function_registrations {
      event!(Level::DEBUG, process = %self.inner.identity, options = ?state.options, "Options updated.");
    }
    self
  }

  /// Runs `f` with exclusive access to the metadata bag.
  ///
  /// The bag has its own lock, so `f` may not call back into `with_metadata`
  /// on the same process.
  pub fn with_metadata<T>(&self, f: impl FnOnce(&mut Metadata) -> T) -> T {
    let mut metadata = self.inner.metadata.lock();
    f(&mut metadata)
  }

  pub fn slot_counts(&self) -> SlotCounts {
    let state = self.inner.state.lock();
    SlotCounts {
      jobs: state.jobs.len(),
      on_start: state.on_start.len(),
      on_success: state.on_success.len(),
      on_error: state.on_error.len(),
      predicates: state.predicates.len(),
    }
  }

  /// Registration names for `role`, in insertion order.
  pub fn slot_names(&self, role: SlotRole) -> Vec<String> {
    let state = self.inner.state.lock();
    let names: Vec<&str> = match role {
      SlotRole::Jobs => state.jobs.names().collect(),
      SlotRole::OnStart => state.on_start.names().collect(),
      SlotRole::OnSuccess => state.on_success.names().collect(),
      SlotRole::OnError => state.on_error.names().collect(),
      SlotRole::Predicates => state.predicates.names().collect(),
    };
    names.into_iter().map(str::to_string).collect()
  }
}

impl<R: Clone, E> Process<R, E> {
  /// Aggregate result of the most recent successful `start()`.
  pub fn result(&self) -> Option<R> {
    self.inner.state.lock().last_result.clone()
  }
}

impl<R, E> fmt::Debug for Process<R, E> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Process")
      .field("identity", &self.inner.identity)
      .field("slots", &self.slot_counts())
      .finish()
  }
}
