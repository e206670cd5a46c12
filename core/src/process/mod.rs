// proctor/src/process/mod.rs

//! Defines the `Process<R, E>` instance: its slot maps, registration methods,
//! composition and the `start()` execution algorithm.

pub mod compose;
pub mod definition;
pub mod execution;
pub mod hooks;
pub mod slots;

pub use definition::{Process, SlotCounts, SlotRole};
pub use slots::SlotMap;
