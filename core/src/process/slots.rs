// proctor/src/process/slots.rs

//! `SlotMap<F>`: named groups of callables for one role (jobs, onStart,
//! onSuccess, onError, predicates).
//!
//! Registering under an existing name replaces that group in place (the name
//! keeps its original position); a fresh name is appended. Within a group the
//! callables are deduplicated by pointer identity, first occurrence wins.

use indexmap::IndexMap;
use std::sync::Arc;

pub struct SlotMap<F: ?Sized> {
  groups: IndexMap<String, Vec<Arc<F>>>,
}

impl<F: ?Sized> SlotMap<F> {
  pub fn new() -> Self {
    Self { groups: IndexMap::new() }
  }

  /// Stores `callables` under `name`, overwriting any previous group with that name.
  pub fn register<I>(&mut self, name: impl Into<String>, callables: I)
  where
    I: IntoIterator<Item = Arc<F>>,
  {
    let mut group: Vec<Arc<F>> = Vec::new();
    for callable in callables {
      if !group.iter().any(|existing| Arc::ptr_eq(existing, &callable)) {
        group.push(callable);
      }
    }
    self.groups.insert(name.into(), group);
  }

  /// Copies every group of `other` into `self`, overwriting groups with the same name.
  pub fn merge(&mut self, other: &SlotMap<F>) {
    for (name, group) in &other.groups {
      self.groups.insert(name.clone(), group.clone());
    }
  }

  pub fn clear(&mut self) {
    self.groups.clear();
  }

  /// `(name, callable)` pairs in group-then-callable insertion order.
  pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<F>)> + '_ {
    self
      .groups
      .iter()
      .flat_map(|(name, group)| group.iter().map(move |callable| (name.as_str(), callable)))
  }

  /// Owned copy of [`SlotMap::iter`], so callers can await the callables without holding a lock.
  pub fn snapshot(&self) -> Vec<(String, Arc<F>)> {
    self
      .iter()
      .map(|(name, callable)| (name.to_string(), Arc::clone(callable)))
      .collect()
  }

  /// Number of registration names.
  pub fn len(&self) -> usize {
    self.groups.len()
  }

  pub fn is_empty(&self) -> bool {
    self.groups.is_empty()
  }

  pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
    self.groups.keys().map(String::as_str)
  }

  /// Number of callables registered under `name`.
  pub fn group_len(&self, name: &str) -> usize {
    self.groups.get(name).map_or(0, Vec::len)
  }
}

impl<F: ?Sized> Default for SlotMap<F> {
  fn default() -> Self {
    Self::new()
  }
}

impl<F: ?Sized> Clone for SlotMap<F> {
  fn clone(&self) -> Self {
    Self {
      groups: self.groups.clone(),
    }
  }
}

impl<F: ?Sized> std::fmt::Debug for SlotMap<F> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_map()
      .entries(self.groups.iter().map(|(name, group)| (name, group.len())))
      .finish()
  }
}
