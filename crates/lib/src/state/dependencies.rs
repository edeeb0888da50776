//! Locking the charts referenced by a state file.
//!
//! Both entry points start by scanning the releases into an
//! [`UnresolvedDependencySet`]; states without dependency-managed releases are
//! returned as they are.
//!
//! - [`merge_locked_dependencies`] pins release versions from the committed lock
//! - [`update_dependencies`] re-resolves the lock with the updater first
//!
//! A release is dependency-managed when its chart is `<repository>/<chart>` and
//! `<repository>` is one of the state's repository aliases. Other remote-looking
//! references (`charts/myapp`) are assumed to be local charts and left alone.
//!
//! The input state is never modified; merged versions go into a copy.

use std::io;
use std::path::Path;

use tempfile::TempDir;
use tracing::{debug, info};

use super::State;
use crate::consts::APP_NAME;
use crate::deps::io::FileIo;
use crate::deps::reference::{ChartReference, classify};
use crate::deps::{DependencyError, DependencyManager, DependencyUpdater, ResolvedDependencySet, UnresolvedDependencySet};

/// The dependency-managed charts of a state file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedDependencies {
  /// Lock identity derived from the state's file name.
  pub lock_name: String,
  pub unresolved: UnresolvedDependencySet,
}

/// Collect the dependency-managed charts of `state`.
///
/// # Errors
///
/// Returns [`DependencyError::MalformedReference`] for a chart reference that is
/// neither local nor `<repository>/<chart>`, and [`DependencyError::Conflict`]
/// when two releases declare the same chart differently.
pub fn scan(state: &State) -> Result<ScannedDependencies, DependencyError> {
  let repo_to_url = state.repository_urls();
  let mut unresolved = UnresolvedDependencySet::new();

  for release in &state.releases {
    let ChartReference::Remote { repository, chart } = classify(&release.chart)? else {
      continue;
    };

    let Some(url) = repo_to_url.get(repository) else {
      debug!(release = %release.name, chart = %release.chart, "no matching repository, treating as local chart");
      continue;
    };

    unresolved.add(chart, url, &release.version)?;
  }

  Ok(ScannedDependencies {
    lock_name: state.lock_name(),
    unresolved,
  })
}

/// Pin the versions of dependency-managed releases from the committed lock.
///
/// Returns an unchanged copy of `state` if nothing is dependency-managed or no
/// lock has been committed yet.
///
/// # Errors
///
/// Fails on scan errors, an unreadable or malformed lock, and with
/// [`DependencyError::NotFound`] if the lock misses a referenced chart.
pub fn merge_locked_dependencies(state: &State) -> Result<State, DependencyError> {
  let scanned = scan(state)?;
  if scanned.unresolved.is_empty() {
    return Ok(state.clone());
  }

  let manager = DependencyManager::new(&scanned.lock_name, &state.lock_dir());
  resolve_dependencies(state, &manager)
}

/// Pin release versions from the lock committed through `manager`.
pub fn resolve_dependencies<F: FileIo>(state: &State, manager: &DependencyManager<F>) -> Result<State, DependencyError> {
  match manager.resolve()? {
    Some(resolved) => pin_locked_versions(state, &resolved),
    None => {
      debug!(lock = %manager.lock_path().display(), "no lock file, leaving versions as declared");
      Ok(state.clone())
    }
  }
}

/// Re-resolve the lock with `updater`, then pin release versions from it.
///
/// The updater runs in a fresh temporary directory, removed before returning.
pub fn update_dependencies(state: &State, updater: &dyn DependencyUpdater) -> Result<State, DependencyError> {
  update_dependencies_in_temp_dir(state, updater, temp_workspace)
}

/// Create the ephemeral directory the updater runs in.
///
/// The directory is removed when the returned [`TempDir`] is dropped.
pub fn create_workspace() -> Result<TempDir, DependencyError> {
  temp_workspace().map_err(DependencyError::Workspace)
}

fn temp_workspace() -> io::Result<TempDir> {
  tempfile::Builder::new().prefix(&format!("{}-", APP_NAME)).tempdir()
}

/// Like [`update_dependencies`], with the workspace created by `temp_dir`.
///
/// The workspace is dropped, and so removed, on every return path.
pub fn update_dependencies_in_temp_dir<T>(
  state: &State,
  updater: &dyn DependencyUpdater,
  temp_dir: T,
) -> Result<State, DependencyError>
where
  T: FnOnce() -> io::Result<TempDir>,
{
  let scanned = scan(state)?;
  if scanned.unresolved.is_empty() {
    return Ok(state.clone());
  }

  let workspace = temp_dir().map_err(DependencyError::Workspace)?;
  let manager = DependencyManager::new(&scanned.lock_name, &state.lock_dir());

  update_dependencies_with(state, &manager, updater, workspace.path(), &scanned.unresolved)
}

/// Re-resolve `unresolved` through `manager` in `workspace_dir`, then pin release versions.
pub fn update_dependencies_with<F: FileIo>(
  state: &State,
  manager: &DependencyManager<F>,
  updater: &dyn DependencyUpdater,
  workspace_dir: &Path,
  unresolved: &UnresolvedDependencySet,
) -> Result<State, DependencyError> {
  let resolved = manager.update(updater, workspace_dir, unresolved)?;
  info!(count = resolved.len(), lock = %manager.lock_path().display(), "resolved chart dependencies");
  pin_locked_versions(state, &resolved)
}

/// Copy `state` with every dependency-managed release pinned to its version in `resolved`.
///
/// # Errors
///
/// Returns [`DependencyError::NotFound`] if `resolved` misses a referenced chart.
pub fn pin_locked_versions(state: &State, resolved: &ResolvedDependencySet) -> Result<State, DependencyError> {
  let mut updated = state.clone();
  let repo_to_url = state.repository_urls();

  for release in &mut updated.releases {
    let ChartReference::Remote { repository, chart } = classify(&release.chart)? else {
      continue;
    };

    if !repo_to_url.contains_key(repository) {
      continue;
    }

    let version = resolved.get(chart)?.to_string();
    debug!(release = %release.name, chart, version = %version, "pinning locked version");
    release.version = version;
  }

  Ok(updated)
}
