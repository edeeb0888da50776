//! Implementation of the `chartdeps deps` command.
//!
//! This command resolves the charts referenced by the state file with
//! `helm dependency update` and commits the result to the lock file.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use chartdeps_lib::deps::{DependencyManager, HelmUpdater};
use chartdeps_lib::state::{State, create_workspace, scan};

use crate::output::{format_duration, print_info, print_locked, print_success, symbols};

pub fn cmd_deps(file: &Path, helm_binary: &str) -> Result<()> {
  let start = Instant::now();
  let state = State::load(file).context("Failed to load state file")?;

  let scanned = scan(&state).context("Failed to collect chart dependencies")?;
  if scanned.unresolved.is_empty() {
    print_info("No chart dependencies to lock.");
    return Ok(());
  }

  let updater = HelmUpdater::new(helm_binary);
  let manager = DependencyManager::new(&scanned.lock_name, &state.lock_dir());
  let workspace = create_workspace()?;
  let resolved = manager
    .update(&updater, workspace.path(), &scanned.unresolved)
    .with_context(|| format!("unable to resolve {} deps", scanned.unresolved.len()))?;

  for dep in resolved.iter() {
    print_locked(&dep.name, &dep.version, &dep.repository);
  }

  println!();
  print_success(&format!("Lock file updated: {}", manager.lock_path().display()));
  println!(
    "  {} Duration: {}",
    symbols::INFO.dimmed(),
    format_duration(start.elapsed()).dimmed()
  );

  Ok(())
}
