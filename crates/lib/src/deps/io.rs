//! File access used by [`DependencyManager`](super::DependencyManager).
//!
//! The manager never touches the filesystem directly so that tests can swap
//! in an in-memory implementation.

use std::fs;
use std::io;
use std::path::Path;

/// Read and write whole files.
pub trait FileIo {
  /// Read the full contents of `path`.
  ///
  /// A missing file must be reported as [`io::ErrorKind::NotFound`].
  fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

  /// Create or truncate `path` and write `data` to it.
  fn write(&self, path: &Path, data: &[u8]) -> io::Result<()>;
}

/// [`FileIo`] backed by the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileIo;

impl FileIo for OsFileIo {
  fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
    fs::read(path)
  }

  fn write(&self, path: &Path, data: &[u8]) -> io::Result<()> {
    fs::write(path, data)
  }
}

impl<T: FileIo + ?Sized> FileIo for &T {
  fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
    (**self).read(path)
  }

  fn write(&self, path: &Path, data: &[u8]) -> io::Result<()> {
    (**self).write(path, data)
  }
}
