//! CLI configuration management.

use cimatrix_planner::{ClassifierRules, MakefileTests};
use cimatrix_runner::{DiscoveryConfig, OracleConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up in the working directory.
pub const LOCAL_CONFIG: &str = "cimatrix.yaml";

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Which packages count as integration tests.
    pub classifier: ClassifierRules,
    /// Makefile suites added ahead of the partitioned Go tests.
    pub makefile_tests: MakefileTests,
    /// Platforms that may be requested; all of them by default.
    pub platforms: Vec<String>,
    /// Partitioner invocation.
    pub oracle: OracleConfig,
    /// Go toolchain invocation.
    pub discovery: DiscoveryConfig,
    /// Output format.
    pub output_format: OutputFormat,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            classifier: ClassifierRules::default(),
            makefile_tests: MakefileTests::default(),
            platforms: vec![
                "ubuntu-latest".to_string(),
                "windows-latest".to_string(),
                "macos-latest".to_string(),
            ],
            oracle: OracleConfig::default(),
            discovery: DiscoveryConfig::default(),
            output_format: OutputFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl CliConfig {
    /// Load configuration.
    ///
    /// An explicit path must exist. Otherwise `./cimatrix.yaml` is tried,
    /// then the user configuration directory, then built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, Box<dyn std::error::Error>> {
        if let Some(path) = explicit {
            return Self::read(path);
        }

        let local = PathBuf::from(LOCAL_CONFIG);
        if local.exists() {
            return Self::read(&local);
        }

        if let Ok(path) = Self::config_path() {
            if path.exists() {
                return Self::read(&path);
            }
        }

        Ok(Self::default())
    }

    fn read(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Could not read config {}: {}", path.display(), e))?;
        let config = serde_yaml::from_str(&content)
            .map_err(|e| format!("Invalid config {}: {}", path.display(), e))?;
        Ok(config)
    }

    /// Get the user configuration file path.
    pub fn config_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
        let dirs = directories::ProjectDirs::from("dev", "cimatrix", "cimatrix")
            .ok_or("Could not determine config directory")?;
        Ok(dirs.config_dir().join("config.yaml"))
    }

    /// Check requested platforms against the configured list.
    pub fn check_platforms(&self, requested: &[String]) -> Result<Vec<String>, String> {
        if requested.is_empty() {
            return Ok(self.platforms.clone());
        }
        for platform in requested {
            if !self.platforms.contains(platform) {
                return Err(format!(
                    "Unknown platform {} (choose from {})",
                    platform,
                    self.platforms.join(", ")
                ));
            }
        }
        Ok(requested.to_vec())
    }
}
