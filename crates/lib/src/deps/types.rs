//! Dependency records and the documents they are serialized into.
//!
//! - [`DependencySpec`] - A declared dependency (version holds a constraint)
//! - [`ResolvedDependency`] - A locked dependency (version holds a concrete version)
//! - [`ChartRequirements`] - The `requirements.yaml` written into the workspace
//! - [`LockedRequirements`] - The lock document (`<name>.lock` / `requirements.lock`)
//! - [`ChartMeta`] - The `Chart.yaml` naming the synthetic package

use std::fmt;

use serde::{Deserialize, Serialize};

/// A chart dependency as declared by the state file.
///
/// In a state file, the name for `chart: stable/envoy` is just `envoy`. Two
/// releases can't use the same chart name from different repositories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencySpec {
  /// Chart name, without the repository alias.
  pub name: String,
  /// URL of the chart repository hosting the chart.
  pub repository: String,
  /// Version constraint. Empty means any version.
  #[serde(rename = "version")]
  pub constraint: String,
}

impl DependencySpec {
  pub fn new(name: &str, repository: &str, constraint: &str) -> Self {
    Self {
      name: name.to_string(),
      repository: repository.to_string(),
      constraint: constraint.to_string(),
    }
  }
}

impl fmt::Display for DependencySpec {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{{name: {}, repository: {}, version: {:?}}}",
      self.name, self.repository, self.constraint
    )
  }
}

/// A chart dependency pinned to a concrete version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedDependency {
  /// Chart name, without the repository alias.
  pub name: String,
  /// URL of the chart repository hosting the chart.
  pub repository: String,
  /// Concrete version chosen by the updater. Never a range.
  pub version: String,
}

impl ResolvedDependency {
  pub fn new(name: &str, repository: &str, version: &str) -> Self {
    Self {
      name: name.to_string(),
      repository: repository.to_string(),
      version: version.to_string(),
    }
  }
}

/// Requirements document handed to the updater.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartRequirements {
  #[serde(default)]
  pub dependencies: Vec<DependencySpec>,
}

/// Lock document produced by the updater and persisted as `<name>.lock`.
///
/// The updater may add fields of its own (`digest`, `generated`); they are
/// ignored on read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockedRequirements {
  #[serde(default)]
  pub dependencies: Vec<ResolvedDependency>,
}

/// Package descriptor of the synthetic chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartMeta {
  pub name: String,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn dependency_spec_serializes_constraint_as_version() {
    let spec = DependencySpec::new("envoy", "https://example.com/charts", ">=1.0");
    let yaml = serde_yaml::to_string(&spec).unwrap();

    let value: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(value["version"].as_str(), Some(">=1.0"));
    assert!(!yaml.contains("constraint"));
  }

  #[test]
  fn locked_requirements_ignore_extra_fields() {
    let content = r#"
dependencies:
- name: envoy
  repository: https://example.com/charts
  version: 1.2.3
digest: sha256:abc
generated: "2019-01-01T00:00:00Z"
"#;
    let lock: LockedRequirements = serde_yaml::from_str(content).unwrap();

    assert_eq!(
      lock.dependencies,
      vec![ResolvedDependency::new("envoy", "https://example.com/charts", "1.2.3")]
    );
  }

  #[test]
  fn locked_requirements_default_to_empty() {
    let lock: LockedRequirements = serde_yaml::from_str("{}").unwrap();
    assert!(lock.dependencies.is_empty());
  }
}
