// proctor/src/extensions/mod.rs

//! Predicates and composers built purely on the public process contract.
//!
//! Extensions register callables on the process they receive and keep their
//! own state in its metadata bag; the engine never inspects that state.

pub mod logging;
pub mod predicate;
pub mod time_gate;

pub use logging::{logging_guard_key, with_logging, LogSink, TracingSink};
pub use predicate::{predicate_from, ProcessPredicate};
pub use time_gate::{cancel_time_gate, TimeGate};
