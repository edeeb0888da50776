/// Application name, used for temporary directory prefixes.
pub const APP_NAME: &str = "chartdeps";

/// Package descriptor written into the ephemeral workspace.
pub const CHART_FILENAME: &str = "Chart.yaml";

/// Requirements document written into the ephemeral workspace.
pub const REQUIREMENTS_FILENAME: &str = "requirements.yaml";

/// Lock document read from and written to the ephemeral workspace.
pub const REQUIREMENTS_LOCK_FILENAME: &str = "requirements.lock";

/// Extension of the persisted lock file (`<name>.lock`).
pub const LOCK_EXTENSION: &str = "lock";

/// Suffixes stripped from a state file name, in order, to derive its lock identity.
pub const STATE_FILE_SUFFIXES: &[&str] = &[".gotmpl", ".yaml", ".yml"];

/// Constraint used in place of an empty one when writing requirements.
pub const ANY_VERSION: &str = "*";

/// Default binary used to resolve chart dependencies.
pub const DEFAULT_HELM_BINARY: &str = "helm";
