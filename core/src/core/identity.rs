// proctor/src/core/identity.rs

//! Derives the canonical identity of a process from a primary identifier and
//! an optional, ordered list of sub-identifiers.

use std::fmt;

/// Separator used both to join sub-identifiers and to build registry keys.
pub const IDENTITY_SEPARATOR: &str = "/";

/// Immutable identity of a process instance.
///
/// Two identities are equal iff their `primary` and their joined `sub_path`
/// are equal. `sub_path` is `None` when no non-empty sub-identifier was given.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProcessIdentity {
  primary: String,
  sub_path: Option<String>,
}

impl ProcessIdentity {
  /// Builds an identity, joining the non-empty `sub_identifiers` with `/`
  /// in the order given.
  pub fn compute<I, S>(primary: impl Into<String>, sub_identifiers: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    let parts: Vec<String> = sub_identifiers
      .into_iter()
      .filter(|s| !s.as_ref().is_empty())
      .map(|s| s.as_ref().to_string())
      .collect();

    let sub_path = if parts.is_empty() {
      None
    } else {
      Some(parts.join(IDENTITY_SEPARATOR))
    };

    Self {
      primary: primary.into(),
      sub_path,
    }
  }

  /// Identity without any sub-identifier.
  pub fn root(primary: impl Into<String>) -> Self {
    Self {
      primary: primary.into(),
      sub_path: None,
    }
  }

  pub fn primary(&self) -> &str {
    &self.primary
  }

  pub fn sub_path(&self) -> Option<&str> {
    self.sub_path.as_deref()
  }

  /// Registry key: `primary` and `sub_path` (when present) joined with `/`.
  pub fn key(&self) -> String {
    match &self.sub_path {
      Some(sub) => format!("{}{}{}", self.primary, IDENTITY_SEPARATOR, sub),
      None => self.primary.clone(),
    }
  }
}

impl fmt::Display for ProcessIdentity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.key())
  }
}
