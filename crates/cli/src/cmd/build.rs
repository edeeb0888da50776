//! Implementation of the `chartdeps build` command.
//!
//! Prints the state file with each dependency-managed release pinned to the
//! version recorded in the lock file.

use std::path::Path;

use anyhow::{Context, Result};

use chartdeps_lib::deps::DependencyManager;
use chartdeps_lib::state::{State, pin_locked_versions, scan};

use crate::output::{OutputFormat, print_json, print_warning};

pub fn cmd_build(file: &Path, output: OutputFormat) -> Result<()> {
  let state = State::load(file).context("Failed to load state file")?;

  let scanned = scan(&state).context("Failed to collect chart dependencies")?;
  let merged = if scanned.unresolved.is_empty() {
    state
  } else {
    let manager = DependencyManager::new(&scanned.lock_name, &state.lock_dir());
    let context = || format!("unable to resolve {} deps", scanned.unresolved.len());

    match manager.resolve().with_context(context)? {
      Some(resolved) => pin_locked_versions(&state, &resolved).with_context(context)?,
      None => {
        print_warning(&format!(
          "No lock file at {}. Run 'chartdeps deps' to lock chart versions.",
          manager.lock_path().display()
        ));
        state
      }
    }
  };

  if output.is_json() {
    print_json(&merged)?;
  } else {
    print!("{}", merged.to_yaml()?);
  }

  Ok(())
}
