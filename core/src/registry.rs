// proctor/src/registry.rs

//! Defines the `Registry<R, E>` struct, an identity-keyed store of process instances.
//! The registry is the only way to obtain a `Process`, which guarantees a single
//! instance per identity for as long as the registry isn't cleared.

use crate::core::identity::ProcessIdentity;
use crate::core::options::ProcessOptions;
use crate::process::Process;

use parking_lot::Mutex;
use std::collections::HashMap;
use tracing::{event, Level};

/// The process registry.
///
/// Construct one at application start and hand it (or an `Arc` of it) to
/// every call site that needs to address processes by identity. Tests can
/// create a fresh registry or call [`Registry::clear_all`].
pub struct Registry<R = serde_json::Value, E = anyhow::Error> {
  processes: Mutex<HashMap<String, Process<R, E>>>,
  default_options: ProcessOptions,
}

impl<R, E> Registry<R, E> {
  /// Creates a new, empty registry whose processes start with default options.
  pub fn new() -> Self {
    Self::with_default_options(ProcessOptions::default())
  }

  /// Creates a new, empty registry whose processes start with `default_options`.
  pub fn with_default_options(default_options: ProcessOptions) -> Self {
    Self {
      processes: Mutex::new(HashMap::new()),
      default_options,
    }
  }

  pub fn default_options(&self) -> ProcessOptions {
    self.default_options
  }

  /// Returns the process identified by `primary` alone, creating it on first access.
  pub fn get_or_create(&self, primary: &str) -> Process<R, E> {
    self.get_or_create_identity(ProcessIdentity::root(primary))
  }

  /// Returns the process identified by `primary` and `sub_identifiers`,
  /// creating it on first access. Empty sub-identifiers are ignored.
  ///
  /// Lookup goes by the joined key, so `get_or_create("a/b")` and
  /// `get_or_create_with("a", ["b"])` return the same instance. Its
  /// [`Process::identity`] is the one it was first created with.
  pub fn get_or_create_with<I, S>(&self, primary: &str, sub_identifiers: I) -> Process<R, E>
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    self.get_or_create_identity(ProcessIdentity::compute(primary, sub_identifiers))
  }

  fn get_or_create_identity(&self, identity: ProcessIdentity) -> Process<R, E> {
    let key = identity.key();
    let mut processes = self.processes.lock();
    processes
      .entry(key)
      .or_insert_with(|| {
        event!(Level::DEBUG, process = %identity, "Creating process.");
        Process::new(identity, self.default_options)
      })
      .clone()
  }

  /// Whether a process with this identity exists. Never creates one.
  pub fn contains<I, S>(&self, primary: &str, sub_identifiers: I) -> bool
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    let key = ProcessIdentity::compute(primary, sub_identifiers).key();
    self.processes.lock().contains_key(&key)
  }

  pub fn len(&self) -> usize {
    self.processes.lock().len()
  }

  pub fn is_empty(&self) -> bool {
    self.processes.lock().is_empty()
  }

  /// Forgets every process. Handles held elsewhere keep working but are no
  /// longer reachable through the registry.
  pub fn clear_all(&self) {
    let mut processes = self.processes.lock();
    event!(Level::DEBUG, count = processes.len(), "Clearing process registry.");
    processes.clear();
  }
}

impl<R, E> Default for Registry<R, E> {
  fn default() -> Self {
    Self::new()
  }
}

impl Registry<serde_json::Value, anyhow::Error> {
  /// Registry with JSON results and `anyhow::Error` failures.
  pub fn new_default() -> Self {
    Registry::<serde_json::Value, anyhow::Error>::new()
  }
}
