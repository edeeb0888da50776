//! chartdeps-lib: chart dependency locking for deployment state files
//!
//! This crate resolves the remote charts referenced by a state file's releases
//! and pins them in a lock file kept next to the state file:
//! - `deps`: dependency sets, the lock file protocol and the external updater boundary
//! - `state`: the consuming state document and the scan/merge/update orchestration

pub mod consts;
pub mod deps;
pub mod state;
pub mod util;
