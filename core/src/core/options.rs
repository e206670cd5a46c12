// proctor/src/core/options.rs

//! Per-process options and their partial-override counterparts.

use crate::error::{ProctorError, ProctorResult};
use serde::{Deserialize, Serialize};
use std::env;

pub const ENV_DELETE_FUNCTIONS_WHEN_JOBS_STARTED: &str = "PROCTOR_DELETE_FUNCTIONS_WHEN_JOBS_STARTED";
pub const ENV_LOG_FUNCTION_REGISTRATIONS: &str = "PROCTOR_LOG_FUNCTION_REGISTRATIONS";
pub const ENV_LOG_FUNCTION_EXECUTIONS: &str = "PROCTOR_LOG_FUNCTION_EXECUTIONS";

/// Debug logging switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DebugOptions {
  /// Emit an event every time callables are registered.
  pub log_function_registrations: bool,
  /// Emit an event for every executed callable and for predicate skips.
  pub log_function_executions: bool,
}

/// Options owned by every process instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProcessOptions {
  /// Clear all five slot maps once a `start()` settles, whatever the outcome.
  pub delete_functions_when_jobs_started: bool,
  pub debug: DebugOptions,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PartialDebugOptions {
  pub log_function_registrations: Option<bool>,
  pub log_function_executions: Option<bool>,
}

/// Partial override for [`ProcessOptions`]. `None` fields leave the current value untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PartialProcessOptions {
  pub delete_functions_when_jobs_started: Option<bool>,
  pub debug: Option<PartialDebugOptions>,
}

impl PartialProcessOptions {
  pub fn delete_functions_when_jobs_started(mut self, value: bool) -> Self {
    self.delete_functions_when_jobs_started = Some(value);
    self
  }

  pub fn log_function_registrations(mut self, value: bool) -> Self {
    self.debug.get_or_insert_with(Default::default).log_function_registrations = Some(value);
    self
  }

  pub fn log_function_executions(mut self, value: bool) -> Self {
    self.debug.get_or_insert_with(Default::default).log_function_executions = Some(value);
    self
  }
}

impl ProcessOptions {
  /// Merges `partial` into `self`, field by field.
  pub fn apply(&mut self, partial: &PartialProcessOptions) {
    if let Some(delete) = partial.delete_functions_when_jobs_started {
      self.delete_functions_when_jobs_started = delete;
    }
    if let Some(debug) = &partial.debug {
      if let Some(v) = debug.log_function_registrations {
        self.debug.log_function_registrations = v;
      }
      if let Some(v) = debug.log_function_executions {
        self.debug.log_function_executions = v;
      }
    }
  }

  /// Reads options from `PROCTOR_*` environment variables. Missing variables default to `false`.
  pub fn from_env() -> ProctorResult<Self> {
    let options = Self {
      delete_functions_when_jobs_started: env_flag(ENV_DELETE_FUNCTIONS_WHEN_JOBS_STARTED)?,
      debug: DebugOptions {
        log_function_registrations: env_flag(ENV_LOG_FUNCTION_REGISTRATIONS)?,
        log_function_executions: env_flag(ENV_LOG_FUNCTION_EXECUTIONS)?,
      },
    };
    tracing::debug!(?options, "Process options loaded from environment.");
    Ok(options)
  }
}

fn env_flag(key: &str) -> ProctorResult<bool> {
  match env::var(key) {
    Ok(raw) => raw.trim().parse::<bool>().map_err(|e| ProctorError::Configuration {
      key: key.to_string(),
      message: format!("expected 'true' or 'false', got '{}': {}", raw, e),
    }),
    Err(env::VarError::NotPresent) => Ok(false),
    Err(e) => Err(ProctorError::Configuration {
      key: key.to_string(),
      message: e.to_string(),
    }),
  }
}
