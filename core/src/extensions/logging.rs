// proctor/src/extensions/logging.rs

//! A composer attaching one log line per lifecycle event to a process.

use crate::core::callable::{callback, error_callback};
use crate::process::{Process, SlotRole};
use std::fmt;
use std::sync::Arc;
use tracing::{event, Level};

/// Destination of `(namespace, level, message)` log triples.
pub trait LogSink: Send + Sync + 'static {
  fn log(&self, namespace: &str, level: Level, message: &str);
}

/// Forwards every line to the installed `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
  fn log(&self, namespace: &str, level: Level, message: &str) {
    match level {
      Level::ERROR => event!(Level::ERROR, namespace, "{}", message),
      Level::WARN => event!(Level::WARN, namespace, "{}", message),
      Level::INFO => event!(Level::INFO, namespace, "{}", message),
      Level::DEBUG => event!(Level::DEBUG, namespace, "{}", message),
      Level::TRACE => event!(Level::TRACE, namespace, "{}", message),
    }
  }
}

/// Metadata key guarding against registering the same logger twice.
pub fn logging_guard_key(name: &str) -> String {
  format!("logging:{}:initialized", name)
}

/// Bundle for [`Process::compose`]: registers onStart, onSuccess and onError
/// callbacks under `name`, each emitting one line through `sink` tagged with
/// the process's primary identifier.
///
/// Repeated `compose` calls with the same `name` register nothing while the
/// group is still present. Once the process has dropped its functions
/// (`deleteFunctionsWhenJobsStarted`), the next application registers again.
pub fn with_logging<R, E, S>(name: impl Into<String>, sink: Arc<S>) -> impl FnOnce(&Process<R, E>) -> Process<R, E>
where
  R: 'static,
  E: fmt::Debug + Send + Sync + 'static,
  S: LogSink,
{
  let name = name.into();
  move |process: &Process<R, E>| {
    let guard_key = logging_guard_key(&name);
    let registered = process.slot_names(SlotRole::OnStart).iter().any(|n| n == &name);
    let already_applied = process.with_metadata(|m| {
      let seen = m.contains_key(&guard_key);
      m.insert(guard_key.clone(), true);
      seen
    });
    if already_applied && registered {
      return process.clone();
    }

    let primary = process.identity().primary().to_string();

    let (start_sink, start_primary) = (Arc::clone(&sink), primary.clone());
    let (success_sink, success_primary) = (Arc::clone(&sink), primary.clone());
    let (error_sink, error_primary) = (sink, primary);

    process
      .on_start_as(
        &name,
        [callback(move |_process: Process<R, E>| {
          start_sink.log(&start_primary, Level::INFO, &format!("{}: started", start_primary));
          async { Ok(()) }
        })],
      )
      .on_success_as(
        &name,
        [callback(move |_process: Process<R, E>| {
          success_sink.log(&success_primary, Level::INFO, &format!("{}: succeeded", success_primary));
          async { Ok(()) }
        })],
      )
      .on_error_as(
        &name,
        [error_callback(move |_process: Process<R, E>, error: Arc<E>| {
          error_sink.log(&error_primary, Level::ERROR, &format!("{}: failed: {:?}", error_primary, error));
          async { Ok(()) }
        })],
      );

    process.clone()
  }
}
