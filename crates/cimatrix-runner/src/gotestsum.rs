//! Balancing through `gotestsum tool ci-matrix`.
//!
//! gotestsum reads items on stdin, weighs them with the timing reports of
//! earlier runs and prints a GitHub Actions style `include` list.

use crate::config::OracleConfig;
use crate::process::{self, ProcessSpec};
use async_trait::async_trait;
use cimatrix_core::ports::{BalanceRequest, Partitioner};
use cimatrix_core::{BalanceMode, Error, PartitionedGroup, Result, Verbosity};
use serde::Deserialize;
use tracing::{debug, info};

/// Job entry printed by `gotestsum tool ci-matrix`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GotestsumInclude {
    id: u32,
    #[serde(default)]
    estimated_runtime: String,
    #[serde(default)]
    packages: String,
    #[serde(default)]
    tests: Option<String>,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Clone, Deserialize)]
struct GotestsumOutput {
    include: Vec<GotestsumInclude>,
}

impl From<GotestsumInclude> for PartitionedGroup {
    fn from(include: GotestsumInclude) -> Self {
        PartitionedGroup {
            id: include.id,
            estimated_runtime: include.estimated_runtime,
            packages: include.packages.split_whitespace().map(String::from).collect(),
            tests: include.tests.filter(|t| !t.is_empty()),
            description: include.description,
        }
    }
}

/// Partitioner backed by the gotestsum binary.
pub struct GotestsumOracle {
    config: OracleConfig,
    verbosity: Verbosity,
}

impl GotestsumOracle {
    pub fn new(config: OracleConfig, verbosity: Verbosity) -> Self {
        Self { config, verbosity }
    }

    fn argv(&self, request: &BalanceRequest) -> Vec<String> {
        let mut argv = self.config.command.clone();
        argv.extend([
            "tool".to_string(),
            "ci-matrix".to_string(),
            "--partitions".to_string(),
            request.partitions.to_string(),
            "--timing-files".to_string(),
            format!("{}/*.json", self.config.timing_dir.display()),
        ]);
        if let BalanceMode::Test { package } = &request.mode {
            argv.push("--partition-tests-in-package".to_string());
            argv.push(package.clone());
        }
        argv.push("--debug".to_string());
        argv
    }
}

#[async_trait]
impl Partitioner for GotestsumOracle {
    async fn balance(&self, request: &BalanceRequest) -> Result<Vec<PartitionedGroup>> {
        tokio::fs::create_dir_all(&self.config.timing_dir)
            .await
            .map_err(|e| {
                Error::OracleInvocation(format!(
                    "failed to create timing directory {}: {}",
                    self.config.timing_dir.display(),
                    e
                ))
            })?;

        info!(
            items = request.items.len(),
            partitions = request.partitions,
            mode = ?request.mode,
            "Running gotestsum ci-matrix"
        );

        let output = process::run(ProcessSpec {
            argv: self.argv(request),
            stdin: Some(request.items.join("\n")),
            timeout_seconds: self.config.timeout_seconds,
            ..Default::default()
        })
        .await
        .map_err(|e| Error::OracleInvocation(format!("failed to run gotestsum ci-matrix: {}", e)))?;

        if self.verbosity.shows_oracle_output() {
            debug!(stderr = %output.stderr, "gotestsum diagnostics");
        }

        let groups = parse_output(&output.stdout)?;
        debug!(groups = groups.len(), "gotestsum returned groups");
        Ok(groups)
    }
}

fn parse_output(stdout: &str) -> Result<Vec<PartitionedGroup>> {
    let parsed: GotestsumOutput = serde_json::from_str(stdout).map_err(|e| {
        Error::OracleInvocation(format!("unparseable gotestsum ci-matrix output: {}", e))
    })?;
    Ok(parsed.include.into_iter().map(PartitionedGroup::from).collect())
}
