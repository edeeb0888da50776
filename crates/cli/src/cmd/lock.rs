//! Implementation of the `chartdeps lock` command.

use std::path::Path;

use anyhow::{Context, Result};

use chartdeps_lib::deps::DependencyManager;
use chartdeps_lib::state::State;

use crate::output::{print_info, print_locked};

pub fn cmd_lock(file: &Path) -> Result<()> {
  let state = State::load(file).context("Failed to load state file")?;
  let manager = DependencyManager::new(&state.lock_name(), &state.lock_dir());

  match manager.resolve().context("Failed to read lock file")? {
    Some(resolved) if !resolved.is_empty() => {
      print_info(&format!("{}:", manager.lock_path().display()));
      for dep in resolved.iter() {
        print_locked(&dep.name, &dep.version, &dep.repository);
      }
    }
    Some(_) => print_info(&format!("Lock file {} is empty.", manager.lock_path().display())),
    None => print_info(&format!(
      "No lock file at {}. Run 'chartdeps deps' to create one.",
      manager.lock_path().display()
    )),
  }

  Ok(())
}
