//! Errors raised while collecting, resolving and locking chart dependencies.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::types::DependencySpec;

/// Opaque failure reported by a [`DependencyUpdater`](super::DependencyUpdater).
pub type UpdaterError = Box<dyn std::error::Error + Send + Sync>;

/// Failures of [`HelmUpdater`](super::HelmUpdater).
#[derive(Debug, Error)]
pub enum HelmError {
  /// The binary could not be started.
  #[error("failed to run '{binary}': {source}")]
  Spawn {
    binary: String,
    #[source]
    source: io::Error,
  },

  /// `dependency update` ran and failed. `code` is `None` when killed by a signal.
  #[error("'{binary} dependency update' failed with exit code {code:?}: {stderr}")]
  Failed {
    binary: String,
    code: Option<i32>,
    stderr: String,
  },
}

/// The same chart name was recorded twice with divergent data.
#[derive(Debug, Error)]
pub enum ConflictError {
  /// Two releases declare the same chart with a different repository or constraint.
  #[error(
    "duplicate chart dependency \"{name}\". you can't have two or more charts with the same name but with different urls or versions: existing={existing}, new={incoming}"
  )]
  Declared {
    name: String,
    existing: Box<DependencySpec>,
    incoming: Box<DependencySpec>,
  },

  /// A lock document pins the same chart twice.
  #[error("duplicate chart dependency \"{name}\"")]
  Locked { name: String },
}

/// Why a lock document could not be loaded.
#[derive(Debug, Error)]
pub enum LockParseError {
  #[error(transparent)]
  Syntax(#[from] serde_yaml::Error),

  #[error(transparent)]
  Conflict(#[from] ConflictError),
}

/// Errors that can occur during dependency resolution.
#[derive(Debug, Error)]
pub enum DependencyError {
  /// Divergent declarations of the same chart.
  #[error(transparent)]
  Conflict(#[from] ConflictError),

  /// A referenced chart has no entry in the lock file.
  #[error("no resolved dependency found for \"{name}\"")]
  NotFound { name: String },

  /// A chart reference looks remote but is not `<repository>/<chart>`.
  #[error("unsupported format of chart name \"{reference}\": expected <repository>/<chart>")]
  MalformedReference { reference: String },

  /// The lock file exists but can't be parsed or pins a chart twice.
  #[error("malformed lock file '{}': {source}", .path.display())]
  MalformedLock {
    path: PathBuf,
    #[source]
    source: LockParseError,
  },

  /// Failed to read a lock or workspace file.
  #[error("failed to read '{}': {source}", .path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  /// Failed to write a lock or workspace file.
  #[error("failed to write '{}': {source}", .path.display())]
  Write {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  /// Failed to create the ephemeral workspace.
  #[error("unable to create workspace directory: {0}")]
  Workspace(#[source] io::Error),

  /// The external updater failed. Nothing was committed.
  #[error("failed to update dependencies in '{}': {source}", .dir.display())]
  ExternalTool {
    dir: PathBuf,
    #[source]
    source: UpdaterError,
  },

  /// Failed to encode a workspace document.
  #[error("failed to encode '{}': {source}", .path.display())]
  Encode {
    path: PathBuf,
    #[source]
    source: serde_yaml::Error,
  },
}

/// Stable classification of a [`DependencyError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  Conflict,
  NotFound,
  MalformedReference,
  MalformedLock,
  Io,
  ExternalTool,
}

impl ErrorKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      ErrorKind::Conflict => "conflict",
      ErrorKind::NotFound => "not-found",
      ErrorKind::MalformedReference => "malformed-reference",
      ErrorKind::MalformedLock => "malformed-lock",
      ErrorKind::Io => "io",
      ErrorKind::ExternalTool => "external-tool",
    }
  }
}

impl DependencyError {
  /// Returns the kind of this error.
  pub fn kind(&self) -> ErrorKind {
    match self {
      DependencyError::Conflict(_) => ErrorKind::Conflict,
      DependencyError::NotFound { .. } => ErrorKind::NotFound,
      DependencyError::MalformedReference { .. } => ErrorKind::MalformedReference,
      DependencyError::MalformedLock { .. } => ErrorKind::MalformedLock,
      DependencyError::Read { .. }
      | DependencyError::Write { .. }
      | DependencyError::Workspace(_)
      | DependencyError::Encode { .. } => ErrorKind::Io,
      DependencyError::ExternalTool { .. } => ErrorKind::ExternalTool,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn declared_conflict_names_both_specs() {
    let err = ConflictError::Declared {
      name: "envoy".to_string(),
      existing: Box::new(DependencySpec::new("envoy", "https://a.example.com", "1.2.0")),
      incoming: Box::new(DependencySpec::new("envoy", "https://a.example.com", "1.3.0")),
    };
    let message = err.to_string();

    assert!(message.contains("\"envoy\""));
    assert!(message.contains("\"1.2.0\""));
    assert!(message.contains("\"1.3.0\""));
  }

  #[test]
  fn malformed_lock_reports_path() {
    let err = DependencyError::MalformedLock {
      path: PathBuf::from("helmfile.lock"),
      source: ConflictError::Locked {
        name: "envoy".to_string(),
      }
      .into(),
    };

    assert_eq!(err.kind(), ErrorKind::MalformedLock);
    assert!(err.to_string().contains("helmfile.lock"));
  }

  #[test]
  fn io_variants_share_a_kind() {
    let read = DependencyError::Read {
      path: PathBuf::from("a"),
      source: io::Error::other("boom"),
    };
    let write = DependencyError::Write {
      path: PathBuf::from("a"),
      source: io::Error::other("boom"),
    };

    assert_eq!(read.kind(), ErrorKind::Io);
    assert_eq!(write.kind(), ErrorKind::Io);
  }

  #[test]
  fn encode_failure_is_io() {
    let source = serde_yaml::from_str::<DependencySpec>("[").unwrap_err();
    let err = DependencyError::Encode {
      path: PathBuf::from("requirements.yaml"),
      source,
    };

    assert_eq!(err.kind(), ErrorKind::Io);
  }

  #[test]
  fn helm_failure_keeps_exit_code_and_stderr() {
    let err = HelmError::Failed {
      binary: "helm".to_string(),
      code: Some(1),
      stderr: "no repository definition for myrepo".to_string(),
    };
    let message = err.to_string();

    assert!(message.contains("Some(1)"));
    assert!(message.contains("no repository definition"));
  }
}
