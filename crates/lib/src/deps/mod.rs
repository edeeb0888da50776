//! Chart dependency management.
//!
//! This module collects the remote charts referenced by a state file, hands
//! version resolution to an external updater (`helm dependency update`) and
//! keeps the result pinned in a lock file.
//!
//! # Modules
//!
//! - [`reference`] - Classification of chart references (local vs `repo/chart`)
//! - [`unresolved`] - Declared version constraints, deduplicated per chart
//! - [`resolved`] - Concrete versions parsed from a lock file
//! - [`manager`] - The lock file protocol (stage, update, commit, re-read)
//! - [`updater`] - The external updater boundary
//! - [`io`] - Injectable file access used by the manager

mod error;
pub mod io;
pub mod manager;
pub mod reference;
pub mod resolved;
mod types;
pub mod unresolved;
pub mod updater;

pub use error::*;
pub use manager::DependencyManager;
pub use resolved::ResolvedDependencySet;
pub use types::*;
pub use unresolved::UnresolvedDependencySet;
pub use updater::{DependencyUpdater, HelmUpdater};
