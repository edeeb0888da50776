//! Locked chart versions, keyed by chart name.

use std::collections::BTreeMap;

use super::error::{ConflictError, DependencyError, LockParseError};
use super::types::{LockedRequirements, ResolvedDependency};

/// The concrete versions pinned by a lock file.
///
/// Only built by parsing a lock document; read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedDependencySet {
  deps: BTreeMap<String, ResolvedDependency>,
}

impl ResolvedDependencySet {
  /// Parse a lock document.
  ///
  /// # Errors
  ///
  /// Fails if the content is not a valid lock document or pins a chart twice.
  pub fn from_lock(content: &[u8]) -> Result<Self, LockParseError> {
    let locked: LockedRequirements = serde_yaml::from_slice(content)?;
    Ok(Self::from_dependencies(locked.dependencies)?)
  }

  /// Build a set from locked entries, rejecting duplicate chart names.
  pub fn from_dependencies(
    dependencies: impl IntoIterator<Item = ResolvedDependency>,
  ) -> Result<Self, ConflictError> {
    let mut set = Self::default();
    for dep in dependencies {
      set.add(dep)?;
    }
    Ok(set)
  }

  fn add(&mut self, dep: ResolvedDependency) -> Result<(), ConflictError> {
    if self.deps.contains_key(&dep.name) {
      return Err(ConflictError::Locked { name: dep.name });
    }
    self.deps.insert(dep.name.clone(), dep);
    Ok(())
  }

  /// Get the locked version of `chart`.
  ///
  /// # Errors
  ///
  /// Returns [`DependencyError::NotFound`] if the lock has no entry for `chart`.
  pub fn get(&self, chart: &str) -> Result<&str, DependencyError> {
    self
      .deps
      .get(chart)
      .map(|dep| dep.version.as_str())
      .ok_or_else(|| DependencyError::NotFound {
        name: chart.to_string(),
      })
  }

  pub fn len(&self) -> usize {
    self.deps.len()
  }

  pub fn is_empty(&self) -> bool {
    self.deps.is_empty()
  }

  /// Iterate over locked entries, ordered by chart name.
  pub fn iter(&self) -> impl Iterator<Item = &ResolvedDependency> {
    self.deps.values()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const URL: &str = "https://example.com/charts";

  #[test]
  fn get_returns_locked_version() {
    let set = ResolvedDependencySet::from_dependencies([
      ResolvedDependency::new("envoy", URL, "1.2.3"),
      ResolvedDependency::new("nginx", URL, "1.4.0"),
    ])
    .unwrap();

    assert_eq!(set.get("envoy").unwrap(), "1.2.3");
    assert_eq!(set.get("nginx").unwrap(), "1.4.0");
  }

  #[test]
  fn get_missing_is_not_found() {
    let set = ResolvedDependencySet::default();

    let err = set.get("envoy").unwrap_err();
    assert!(matches!(err, DependencyError::NotFound { ref name } if name == "envoy"));
  }

  #[test]
  fn duplicate_entry_conflicts() {
    let result = ResolvedDependencySet::from_dependencies([
      ResolvedDependency::new("envoy", URL, "1.2.3"),
      ResolvedDependency::new("envoy", URL, "1.2.4"),
    ]);

    assert!(matches!(result, Err(ConflictError::Locked { ref name }) if name == "envoy"));
  }

  #[test]
  fn duplicate_entry_in_lock_is_parse_conflict() {
    let content = r#"
dependencies:
- name: envoy
  repository: https://example.com/charts
  version: 1.2.3
- name: envoy
  repository: https://example.com/charts
  version: 1.2.3
"#;

    let result = ResolvedDependencySet::from_lock(content.as_bytes());
    assert!(matches!(result, Err(LockParseError::Conflict(_))));
  }

  #[test]
  fn invalid_yaml_is_syntax_error() {
    let result = ResolvedDependencySet::from_lock(b"dependencies: [unterminated");
    assert!(matches!(result, Err(LockParseError::Syntax(_))));
  }

  #[test]
  fn lock_roundtrip_is_order_independent() {
    let original = ResolvedDependencySet::from_dependencies([
      ResolvedDependency::new("nginx", URL, "1.4.0"),
      ResolvedDependency::new("envoy", URL, "1.2.3"),
      ResolvedDependency::new("redis", "https://other.example.com", "10.0.1"),
    ])
    .unwrap();

    let lock = LockedRequirements {
      dependencies: original.iter().cloned().collect(),
    };
    let yaml = serde_yaml::to_string(&lock).unwrap();
    let parsed = ResolvedDependencySet::from_lock(yaml.as_bytes()).unwrap();

    assert_eq!(parsed, original);
  }
}
