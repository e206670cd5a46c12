// proctor/src/core/metadata.rs

//! The per-process metadata bag.
//!
//! Extensions (predicates, composers) keep cross-invocation state here under
//! keys they own. The execution engine never reads, writes or clears it.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;

#[derive(Default)]
pub struct Metadata {
  entries: HashMap<String, Box<dyn Any + Send + Sync>>,
}

impl Metadata {
  pub fn new() -> Self {
    Self::default()
  }

  /// Returns the value at `key` if present and of type `T`.
  pub fn get<T: Any>(&self, key: &str) -> Option<&T> {
    self.entries.get(key).and_then(|v| v.downcast_ref::<T>())
  }

  pub fn get_mut<T: Any>(&mut self, key: &str) -> Option<&mut T> {
    self.entries.get_mut(key).and_then(|v| v.downcast_mut::<T>())
  }

  /// Stores `value` at `key`, replacing whatever was there.
  pub fn insert<T: Any + Send + Sync>(&mut self, key: impl Into<String>, value: T) {
    self.entries.insert(key.into(), Box::new(value));
  }

  /// Removes the entry at `key`. Returns whether something was removed.
  pub fn remove(&mut self, key: &str) -> bool {
    self.entries.remove(key).is_some()
  }

  pub fn contains_key(&self, key: &str) -> bool {
    self.entries.contains_key(key)
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

impl fmt::Debug for Metadata {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut keys: Vec<&String> = self.entries.keys().collect();
    keys.sort();
    f.debug_struct("Metadata").field("keys", &keys).finish()
  }
}
