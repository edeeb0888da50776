mod build;
mod deps;
mod lock;

use std::process::ExitCode;

use chartdeps_lib::deps::{DependencyError, ErrorKind};
use tracing::debug;

pub use build::cmd_build;
pub use deps::cmd_deps;
pub use lock::cmd_lock;

/// Map a command failure to the process exit code for its error kind.
pub fn exit_code(err: &anyhow::Error) -> ExitCode {
  let kind = err
    .chain()
    .find_map(|e| e.downcast_ref::<DependencyError>())
    .map(DependencyError::kind);

  if let Some(kind) = kind {
    debug!(kind = kind.as_str(), "command failed");
  }

  ExitCode::from(exit_code_for(kind))
}

fn exit_code_for(kind: Option<ErrorKind>) -> u8 {
  match kind {
    Some(ErrorKind::Conflict) => 3,
    Some(ErrorKind::NotFound) => 4,
    Some(ErrorKind::MalformedReference) => 5,
    Some(ErrorKind::MalformedLock) => 6,
    Some(ErrorKind::Io) => 7,
    Some(ErrorKind::ExternalTool) => 8,
    None => 1,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use anyhow::Context;

  #[test]
  fn dependency_errors_have_distinct_codes() {
    let kinds = [
      ErrorKind::Conflict,
      ErrorKind::NotFound,
      ErrorKind::MalformedReference,
      ErrorKind::MalformedLock,
      ErrorKind::Io,
      ErrorKind::ExternalTool,
    ];
    let mut codes: Vec<u8> = kinds.iter().map(|k| exit_code_for(Some(*k))).collect();
    codes.sort_unstable();
    codes.dedup();

    assert_eq!(codes.len(), kinds.len());
    assert!(!codes.contains(&1));
  }

  #[test]
  fn kind_is_found_behind_context() {
    let result: Result<(), DependencyError> = Err(DependencyError::NotFound {
      name: "envoy".to_string(),
    });
    let err = result.context("unable to resolve 1 deps").unwrap_err();

    let kind = err
      .chain()
      .find_map(|e| e.downcast_ref::<DependencyError>())
      .map(DependencyError::kind);

    assert_eq!(kind, Some(ErrorKind::NotFound));
  }

  #[test]
  fn other_errors_exit_with_one() {
    assert_eq!(exit_code_for(None), 1);
  }
}
