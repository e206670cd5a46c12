// proctor/src/error.rs
use thiserror::Error;

/// Framework-level faults.
///
/// Failures produced by jobs, callbacks and predicates never become a
/// `ProctorError`: they are kept verbatim in the process's error slot.
#[derive(Debug, Error)]
pub enum ProctorError {
  #[error("Configuration error for '{key}': {message}")]
  Configuration { key: String, message: String },
}

pub type ProctorResult<T, E = ProctorError> = std::result::Result<T, E>;
