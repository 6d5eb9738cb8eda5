//! Configuration for the external tools.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How to invoke `gotestsum tool ci-matrix`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    /// Program and leading arguments, e.g. `["gotestsum"]`.
    pub command: Vec<String>,
    /// Directory holding timing reports from earlier runs.
    pub timing_dir: PathBuf,
    /// Kill the partitioner after this many seconds.
    pub timeout_seconds: Option<u64>,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            command: vec!["gotestsum".to_string()],
            timing_dir: PathBuf::from("test-results"),
            timeout_seconds: None,
        }
    }
}

/// How to invoke the Go toolchain for discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Program and leading arguments, e.g. `["go"]`.
    pub command: Vec<String>,
    pub build_tags: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            command: vec!["go".to_string()],
            build_tags: "all".to_string(),
        }
    }
}
