// proctor/src/lib.rs

//! Proctor: a declarative registry of asynchronous jobs bound to lifecycle callbacks.
//!
//! Proctor decouples *what triggers* an asynchronous operation from *how its
//! outcome is handled*. Call sites address a shared process by identity and
//! register behavior against it:
//!  - Jobs whose results are merged into one aggregate result.
//!  - `onStart`, `onSuccess` and `onError` callbacks.
//!  - Predicates deciding whether the jobs run at all.
//!  - Named registrations: re-registering a name replaces it, new names add up.
//!  - Composition of reusable behavior bundles.
//!  - A metadata bag for extensions such as the time gate or the logging composer.

pub mod core;
pub mod error;
pub mod extensions;
pub mod process;
pub mod registry;

// --- Re-exports for the Public API ---

pub use crate::core::callable::{
  callback, error_callback, job, predicate, BoxFuture, Callback, ErrorCallback, Job, Predicate,
};
pub use crate::core::identity::ProcessIdentity;
pub use crate::core::merge::Merge;
pub use crate::core::metadata::Metadata;
pub use crate::core::options::{DebugOptions, PartialDebugOptions, PartialProcessOptions, ProcessOptions};

pub use crate::process::definition::{
  DEFAULT_JOBS, DEFAULT_ON_ERROR, DEFAULT_ON_START, DEFAULT_ON_SUCCESS, DEFAULT_PREDICATE,
};
pub use crate::process::{Process, SlotCounts, SlotRole};

pub use crate::extensions::{
  cancel_time_gate, predicate_from, with_logging, LogSink, ProcessPredicate, TimeGate, TracingSink,
};

pub use crate::error::{ProctorError, ProctorResult};

pub use crate::registry::Registry;

/*
    Typical use:
    1. Create one `Registry` at application start and share it.
    2. `registry.get_or_create_with("users", [user_id])` at every call site.
    3. Register behavior: `.perform([job(..)])`, `.on_success([callback(..)])`,
       `.when([predicate(..)])`, `.compose(with_logging("log", sink))`.
    4. `process.start().await`, then inspect `process.result()` / `process.error()`.
*/
