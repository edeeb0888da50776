//! Declared chart dependencies, deduplicated by chart name.

use std::collections::BTreeMap;

use super::error::ConflictError;
use super::types::{ChartRequirements, DependencySpec};
use crate::consts::ANY_VERSION;

/// The set of chart dependencies declared by a state file.
///
/// Each chart name maps to exactly one repository and constraint. Rebuilt on
/// every resolution pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnresolvedDependencySet {
  deps: BTreeMap<String, DependencySpec>,
}

impl UnresolvedDependencySet {
  pub fn new() -> Self {
    Self::default()
  }

  /// Declare a dependency on `chart` from `url` with `constraint`.
  ///
  /// Declaring the same chart again with identical data is a no-op.
  ///
  /// # Errors
  ///
  /// Returns [`ConflictError::Declared`] if `chart` was already declared with a
  /// different repository or constraint. The set is left unchanged.
  pub fn add(&mut self, chart: &str, url: &str, constraint: &str) -> Result<(), ConflictError> {
    let incoming = DependencySpec::new(chart, url, constraint);

    if let Some(existing) = self.deps.get(chart) {
      if *existing != incoming {
        return Err(ConflictError::Declared {
          name: chart.to_string(),
          existing: Box::new(existing.clone()),
          incoming: Box::new(incoming),
        });
      }
      return Ok(());
    }

    self.deps.insert(chart.to_string(), incoming);
    Ok(())
  }

  /// Get a declared dependency by chart name.
  pub fn get(&self, chart: &str) -> Option<&DependencySpec> {
    self.deps.get(chart)
  }

  pub fn len(&self) -> usize {
    self.deps.len()
  }

  pub fn is_empty(&self) -> bool {
    self.deps.is_empty()
  }

  /// Build the requirements document for the updater.
  ///
  /// Empty constraints become `*` here and only here.
  pub fn to_requirements(&self) -> ChartRequirements {
    let dependencies = self
      .deps
      .values()
      .map(|dep| {
        let mut dep = dep.clone();
        if dep.constraint.is_empty() {
          dep.constraint = ANY_VERSION.to_string();
        }
        dep
      })
      .collect();

    ChartRequirements { dependencies }
  }
}
