pub mod callable;
pub mod identity;
pub mod merge;
pub mod metadata;
pub mod options;

pub use callable::{callback, error_callback, job, predicate, BoxFuture, Callback, ErrorCallback, Job, Predicate};
pub use identity::ProcessIdentity;
pub use merge::Merge;
pub use metadata::Metadata;
pub use options::{DebugOptions, PartialDebugOptions, PartialProcessOptions, ProcessOptions};
