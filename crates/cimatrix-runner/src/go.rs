//! Package and test discovery through the Go toolchain.

use crate::config::DiscoveryConfig;
use crate::process::{self, ProcessSpec};
use async_trait::async_trait;
use cimatrix_core::ports::PackageDiscovery;
use cimatrix_core::{Error, Result};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::debug;

/// Lists packages with `go list` and tests with `go test --list`.
pub struct GoDiscovery {
    config: DiscoveryConfig,
}

impl GoDiscovery {
    pub fn new(config: DiscoveryConfig) -> Self {
        Self { config }
    }

    fn argv(&self, args: &[&str]) -> Vec<String> {
        self.config
            .command
            .iter()
            .cloned()
            .chain(args.iter().map(|arg| arg.to_string()))
            .collect()
    }
}

impl Default for GoDiscovery {
    fn default() -> Self {
        Self::new(DiscoveryConfig::default())
    }
}

#[async_trait]
impl PackageDiscovery for GoDiscovery {
    async fn list_packages(&self, module_dir: &str) -> Result<BTreeSet<String>> {
        let output = process::run(ProcessSpec {
            argv: self.argv(&["list", "-tags", &self.config.build_tags, "-find", "./..."]),
            cwd: Some(Path::new(module_dir)),
            ..Default::default()
        })
        .await
        .map_err(|e| {
            Error::discovery(
                module_dir,
                format!(
                    "failed to list packages, usually this implies a Go compilation error: {}",
                    e
                ),
            )
        })?;

        let packages: BTreeSet<String> = output
            .stdout
            .split_whitespace()
            .map(String::from)
            .collect();
        debug!(module_dir, packages = packages.len(), "Listed packages");
        Ok(packages)
    }

    async fn list_tests(&self, package_dir: &str) -> Result<Vec<String>> {
        // `go test --list` only works when run from the package directory with
        // `.` as the target; package paths and relative paths both fail.
        let output = process::run(ProcessSpec {
            argv: self.argv(&["test", "-tags", &self.config.build_tags, "--list", "."]),
            cwd: Some(Path::new(package_dir)),
            ..Default::default()
        })
        .await
        .map_err(|e| Error::discovery(package_dir, e.to_string()))?;

        let tests = parse_test_list(&output.stdout);
        debug!(package_dir, tests = tests.len(), "Listed tests");
        Ok(tests)
    }
}

/// Test names precede the trailing `ok <package> <elapsed>` summary, which
/// is printed on stdout as well.
fn parse_test_list(stdout: &str) -> Vec<String> {
    stdout
        .split_whitespace()
        .take_while(|token| !token.starts_with("ok"))
        .map(String::from)
        .collect()
}
