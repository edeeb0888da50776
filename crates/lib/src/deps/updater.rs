//! The external dependency updater.
//!
//! Version resolution is delegated entirely: the updater reads the workspace's
//! `Chart.yaml`, `requirements.yaml` and any prior `requirements.lock`, talks
//! to the chart repositories, and writes a fresh `requirements.lock`.

use std::path::Path;
use std::process::Command;

use tracing::{debug, info};

use super::error::{HelmError, UpdaterError};
use crate::consts::DEFAULT_HELM_BINARY;

/// Updates the dependencies of a chart directory.
pub trait DependencyUpdater {
  /// Resolve the requirements in `chart_dir` and write its lock file.
  fn update_deps(&self, chart_dir: &Path) -> Result<(), UpdaterError>;
}

impl<F> DependencyUpdater for F
where
  F: Fn(&Path) -> Result<(), UpdaterError>,
{
  fn update_deps(&self, chart_dir: &Path) -> Result<(), UpdaterError> {
    self(chart_dir)
  }
}

/// Runs `<binary> dependency update <chart_dir>`.
#[derive(Debug, Clone)]
pub struct HelmUpdater {
  binary: String,
}

impl Default for HelmUpdater {
  fn default() -> Self {
    Self::new(DEFAULT_HELM_BINARY)
  }
}

impl HelmUpdater {
  pub fn new(binary: &str) -> Self {
    Self {
      binary: binary.to_string(),
    }
  }
}

impl DependencyUpdater for HelmUpdater {
  fn update_deps(&self, chart_dir: &Path) -> Result<(), UpdaterError> {
    info!(binary = %self.binary, dir = %chart_dir.display(), "updating chart dependencies");

    let output = Command::new(&self.binary)
      .arg("dependency")
      .arg("update")
      .arg(chart_dir)
      .output()
      .map_err(|source| HelmError::Spawn {
        binary: self.binary.clone(),
        source,
      })?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.is_empty() {
      debug!(stdout = %stdout, "updater stdout");
    }

    if !output.status.success() {
      return Err(
        HelmError::Failed {
          binary: self.binary.clone(),
          code: output.status.code(),
          stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
        .into(),
      );
    }

    Ok(())
  }
}
