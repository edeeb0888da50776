//! The state file consuming chart dependencies.
//!
//! Only the parts relevant to dependency locking are modelled: the repository
//! aliases and each release's `chart` and `version`. Everything else is kept
//! as-is so a merged state can be written back out without loss.
//!
//! ```yaml
//! repositories:
//! - name: myrepo
//!   url: https://example.com/charts
//! releases:
//! - name: proxy
//!   chart: myrepo/envoy
//!   version: ">=1.0"
//! ```

mod dependencies;

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::consts::STATE_FILE_SUFFIXES;

pub use dependencies::*;

/// Errors that can occur when loading or writing a state file.
#[derive(Debug, Error)]
pub enum StateError {
  /// Failed to read the state file.
  #[error("failed to read state file '{}': {source}", .path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  /// Failed to parse the state file YAML.
  #[error("failed to parse state file '{}': {source}", .path.display())]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_yaml::Error,
  },

  /// Failed to serialize the state.
  #[error("failed to serialize state: {0}")]
  Serialize(#[source] serde_yaml::Error),
}

/// A parsed state file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct State {
  /// Path the state was loaded from. Determines the lock file's name and location.
  #[serde(skip)]
  pub file_path: PathBuf,

  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub repositories: Vec<RepositorySpec>,

  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub releases: Vec<ReleaseSpec>,

  /// Any other top-level keys.
  #[serde(flatten)]
  pub other: BTreeMap<String, serde_yaml::Value>,
}

/// A chart repository alias.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepositorySpec {
  pub name: String,
  pub url: String,

  #[serde(flatten)]
  pub other: BTreeMap<String, serde_yaml::Value>,
}

/// A deployable release.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReleaseSpec {
  #[serde(default)]
  pub name: String,

  /// Local path or `<repository>/<chart>`.
  #[serde(default)]
  pub chart: String,

  /// Version constraint, replaced by the locked version on merge.
  #[serde(
    default,
    deserialize_with = "scalar_string",
    skip_serializing_if = "String::is_empty"
  )]
  pub version: String,

  #[serde(flatten)]
  pub other: BTreeMap<String, serde_yaml::Value>,
}

/// Accept `version: 1.0` as well as `version: "1.0"`.
fn scalar_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
  use serde::de::Error;

  match serde_yaml::Value::deserialize(deserializer)? {
    serde_yaml::Value::Null => Ok(String::new()),
    serde_yaml::Value::String(s) => Ok(s),
    serde_yaml::Value::Number(n) => Ok(n.to_string()),
    serde_yaml::Value::Bool(b) => Ok(b.to_string()),
    other => Err(D::Error::custom(format!("expected a version string, found {:?}", other))),
  }
}

impl RepositorySpec {
  pub fn new(name: &str, url: &str) -> Self {
    Self {
      name: name.to_string(),
      url: url.to_string(),
      other: BTreeMap::new(),
    }
  }
}

impl ReleaseSpec {
  pub fn new(name: &str, chart: &str, version: &str) -> Self {
    Self {
      name: name.to_string(),
      chart: chart.to_string(),
      version: version.to_string(),
      other: BTreeMap::new(),
    }
  }
}

impl State {
  /// Load a state file.
  pub fn load(path: &Path) -> Result<Self, StateError> {
    let content = fs::read_to_string(path).map_err(|source| StateError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    Self::from_yaml(path, &content)
  }

  /// Parse `content` as the state file at `path`.
  pub fn from_yaml(path: &Path, content: &str) -> Result<Self, StateError> {
    let mut state: State = serde_yaml::from_str(content).map_err(|source| StateError::Parse {
      path: path.to_path_buf(),
      source,
    })?;
    state.file_path = path.to_path_buf();
    Ok(state)
  }

  pub fn to_yaml(&self) -> Result<String, StateError> {
    serde_yaml::to_string(self).map_err(StateError::Serialize)
  }

  /// The lock identity: the file name without `.gotmpl`, `.yaml` and `.yml` suffixes.
  ///
  /// `helmfile.2.yaml.gotmpl` becomes `helmfile.2`.
  pub fn lock_name(&self) -> String {
    let mut name = self
      .file_path
      .file_name()
      .map(|n| n.to_string_lossy().into_owned())
      .unwrap_or_default();

    for suffix in STATE_FILE_SUFFIXES {
      if let Some(stripped) = name.strip_suffix(*suffix) {
        name = stripped.to_string();
      }
    }

    name
  }

  /// Directory holding the state file, and therefore its lock file.
  pub fn lock_dir(&self) -> PathBuf {
    match self.file_path.parent() {
      Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
      _ => PathBuf::from("."),
    }
  }

  /// Map of repository alias to URL.
  pub fn repository_urls(&self) -> BTreeMap<&str, &str> {
    self
      .repositories
      .iter()
      .map(|r| (r.name.as_str(), r.url.as_str()))
      .collect()
  }
}
