//! The lock file protocol.
//!
//! A [`DependencyManager`] owns `<name>.lock`. Updating runs in four steps:
//!
//! 1. Stage a throwaway chart in the workspace: `Chart.yaml`, `requirements.yaml`
//!    and, if one is committed, the current lock as `requirements.lock` so the
//!    updater keeps previously chosen versions where constraints still allow
//! 2. Run the external updater against the workspace
//! 3. Commit the workspace's `requirements.lock` over `<name>.lock`
//! 4. Re-read the committed lock, so callers always see what is on disk
//!
//! The committed lock is only overwritten after the updater succeeded.
//!
//! # Lock File Format
//!
//! ```yaml
//! dependencies:
//! - name: envoy
//!   repository: https://example.com/charts
//!   version: 1.2.3
//! ```

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, trace};

use super::error::DependencyError;
use super::io::{FileIo, OsFileIo};
use super::resolved::ResolvedDependencySet;
use super::types::ChartMeta;
use super::unresolved::UnresolvedDependencySet;
use super::updater::DependencyUpdater;
use crate::consts::{CHART_FILENAME, LOCK_EXTENSION, REQUIREMENTS_FILENAME, REQUIREMENTS_LOCK_FILENAME};

/// Manages the lock file of one state file.
#[derive(Debug, Clone)]
pub struct DependencyManager<F = OsFileIo> {
  name: String,
  lock_dir: PathBuf,
  io: F,
}

impl DependencyManager<OsFileIo> {
  /// Create a manager for `<lock_dir>/<name>.lock` on the real filesystem.
  pub fn new(name: &str, lock_dir: &Path) -> Self {
    Self::with_io(name, lock_dir, OsFileIo)
  }
}

impl<F: FileIo> DependencyManager<F> {
  /// Create a manager using `io` for all file access.
  pub fn with_io(name: &str, lock_dir: &Path, io: F) -> Self {
    Self {
      name: name.to_string(),
      lock_dir: lock_dir.to_path_buf(),
      io,
    }
  }

  pub fn lock_file_name(&self) -> String {
    format!("{}.{}", self.name, LOCK_EXTENSION)
  }

  pub fn lock_path(&self) -> PathBuf {
    self.lock_dir.join(self.lock_file_name())
  }

  /// Load the committed lock.
  ///
  /// Returns `Ok(None)` if no lock has been committed yet.
  ///
  /// # Errors
  ///
  /// Returns [`DependencyError::Read`] if the lock exists but can't be read, or
  /// [`DependencyError::MalformedLock`] if it can't be parsed or pins a chart twice.
  pub fn resolve(&self) -> Result<Option<ResolvedDependencySet>, DependencyError> {
    let lock_path = self.lock_path();

    let Some(content) = self.read_bytes_if_exists(&lock_path)? else {
      debug!(path = %lock_path.display(), "no lock file");
      return Ok(None);
    };

    let resolved =
      ResolvedDependencySet::from_lock(&content).map_err(|source| DependencyError::MalformedLock {
        path: lock_path,
        source,
      })?;

    Ok(Some(resolved))
  }

  /// Resolve `unresolved` with `updater` inside `workspace_dir` and commit the result.
  ///
  /// # Errors
  ///
  /// Returns [`DependencyError::ExternalTool`] if the updater fails, in which case
  /// the committed lock is left untouched. Staging, commit and re-read failures
  /// are returned as they happen.
  pub fn update(
    &self,
    updater: &dyn DependencyUpdater,
    workspace_dir: &Path,
    unresolved: &UnresolvedDependencySet,
  ) -> Result<ResolvedDependencySet, DependencyError> {
    info!(name = %self.name, count = unresolved.len(), "updating chart dependencies");

    let chart_path = workspace_dir.join(CHART_FILENAME);
    let chart = ChartMeta {
      name: self.name.clone(),
    };
    self.write_yaml(&chart_path, &chart)?;

    let requirements_path = workspace_dir.join(REQUIREMENTS_FILENAME);
    self.write_yaml(&requirements_path, &unresolved.to_requirements())?;

    let lock_path = self.lock_path();
    let workspace_lock_path = workspace_dir.join(REQUIREMENTS_LOCK_FILENAME);
    if let Some(previous) = self.read_bytes_if_exists(&lock_path)? {
      self.write_bytes(&workspace_lock_path, &previous)?;
    }

    updater
      .update_deps(workspace_dir)
      .map_err(|source| DependencyError::ExternalTool {
        dir: workspace_dir.to_path_buf(),
        source,
      })?;

    let updated = self.read_bytes(&workspace_lock_path)?;

    // Commit only once the updater succeeded.
    self.write_bytes(&lock_path, &updated)?;
    info!(path = %lock_path.display(), "committed lock file");

    self.resolve()?.ok_or_else(|| DependencyError::Read {
      path: lock_path,
      source: io::Error::from(io::ErrorKind::NotFound),
    })
  }

  fn write_yaml<T: serde::Serialize>(&self, path: &Path, value: &T) -> Result<(), DependencyError> {
    let content = serde_yaml::to_string(value).map_err(|source| DependencyError::Encode {
      path: path.to_path_buf(),
      source,
    })?;
    self.write_bytes(path, content.as_bytes())
  }

  fn read_bytes_if_exists(&self, path: &Path) -> Result<Option<Vec<u8>>, DependencyError> {
    match self.read_bytes(path) {
      Ok(bytes) => Ok(Some(bytes)),
      Err(DependencyError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => Ok(None),
      Err(e) => Err(e),
    }
  }

  fn read_bytes(&self, path: &Path) -> Result<Vec<u8>, DependencyError> {
    let bytes = self.io.read(path).map_err(|source| DependencyError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), "read file");
    trace!(content = %String::from_utf8_lossy(&bytes), "file content");
    Ok(bytes)
  }

  fn write_bytes(&self, path: &Path, data: &[u8]) -> Result<(), DependencyError> {
    self.io.write(path, data).map_err(|source| DependencyError::Write {
      path: path.to_path_buf(),
      source,
    })?;
    debug!(path = %path.display(), bytes = data.len(), "wrote file");
    trace!(content = %String::from_utf8_lossy(data), "file content");
    Ok(())
  }
}
