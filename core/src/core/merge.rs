// proctor/src/core/merge.rs

//! Accumulation of job results into a single aggregate.

use serde_json::Value;

/// How a later job result folds into the running aggregate.
///
/// The first job's result becomes the aggregate; each subsequent result is
/// merged into it with [`Merge::merge`].
pub trait Merge {
  fn merge(&mut self, later: Self);
}

/// Objects merge key-wise and recursively; any other pairing is replaced by `later`.
impl Merge for Value {
  fn merge(&mut self, later: Self) {
    match (self, later) {
      (Value::Object(current), Value::Object(incoming)) => {
        for (key, incoming_value) in incoming {
          match current.get_mut(&key) {
            Some(existing) => existing.merge(incoming_value),
            None => {
              current.insert(key, incoming_value);
            }
          }
        }
      }
      (slot, later) => *slot = later,
    }
  }
}

impl Merge for () {
  fn merge(&mut self, _later: Self) {}
}
