//! Chart reference classification.
//!
//! A release's `chart` is either a filesystem path (`./charts/app`, `/srv/app`)
//! or a remote reference of the form `<repository>/<chart>`.

use std::path::Path;

use super::error::DependencyError;

/// A classified chart reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartReference<'a> {
  /// A chart on the local filesystem. Not subject to dependency management.
  Local,
  /// A `<repository>/<chart>` reference.
  Remote { repository: &'a str, chart: &'a str },
}

/// Returns true if the reference is a filesystem path.
pub fn is_local_chart(reference: &str) -> bool {
  reference == "."
    || reference == ".."
    || reference.starts_with("./")
    || reference.starts_with("../")
    || Path::new(reference).is_absolute()
}

/// Classify a chart reference.
///
/// # Errors
///
/// Returns [`DependencyError::MalformedReference`] if the reference is not local
/// and does not split into exactly two non-empty segments.
pub fn classify(reference: &str) -> Result<ChartReference<'_>, DependencyError> {
  if is_local_chart(reference) {
    return Ok(ChartReference::Local);
  }

  let mut parts = reference.split('/');
  match (parts.next(), parts.next(), parts.next()) {
    (Some(repository), Some(chart), None) if !repository.is_empty() && !chart.is_empty() => {
      Ok(ChartReference::Remote { repository, chart })
    }
    _ => Err(DependencyError::MalformedReference {
      reference: reference.to_string(),
    }),
  }
}
