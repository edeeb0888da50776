//! Test utilities for chartdeps-lib.
//!
//! In-memory stand-ins for the filesystem and the external updater, so the
//! lock protocol can be exercised without helm or a real directory.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};

use crate::deps::io::FileIo;
use crate::deps::{LockedRequirements, ResolvedDependency, UpdaterError};

/// A [`FileIo`] that keeps files in memory.
#[derive(Debug, Default)]
pub struct MemoryFileIo {
  files: RefCell<BTreeMap<PathBuf, Vec<u8>>>,
  failing: RefCell<BTreeSet<PathBuf>>,
}

impl MemoryFileIo {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn insert(&self, path: impl Into<PathBuf>, data: Vec<u8>) {
    self.files.borrow_mut().insert(path.into(), data);
  }

  pub fn get(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
    self.files.borrow().get(path.as_ref()).cloned()
  }

  /// Make every read of `path` fail with a permission error.
  pub fn fail_reads(&self, path: impl Into<PathBuf>) {
    self.failing.borrow_mut().insert(path.into());
  }
}

impl FileIo for MemoryFileIo {
  fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
    if self.failing.borrow().contains(path) {
      return Err(io::Error::from(io::ErrorKind::PermissionDenied));
    }
    self
      .files
      .borrow()
      .get(path)
      .cloned()
      .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
  }

  fn write(&self, path: &Path, data: &[u8]) -> io::Result<()> {
    self.files.borrow_mut().insert(path.to_path_buf(), data.to_vec());
    Ok(())
  }
}

/// Serialize `(name, repository, version)` entries as a lock document.
pub fn lock_yaml(entries: &[(&str, &str, &str)]) -> Vec<u8> {
  let lock = LockedRequirements {
    dependencies: entries
      .iter()
      .map(|(name, repository, version)| ResolvedDependency::new(name, repository, version))
      .collect(),
  };
  serde_yaml::to_string(&lock).unwrap().into_bytes()
}

/// An updater that writes a lock with `entries` into the workspace held by `io`.
pub fn locking_updater<'a>(
  io: &'a MemoryFileIo,
  entries: &[(&str, &str, &str)],
) -> impl Fn(&Path) -> Result<(), UpdaterError> + 'a {
  let content = lock_yaml(entries);
  move |dir: &Path| {
    io.insert(dir.join("requirements.lock"), content.clone());
    Ok(())
  }
}
