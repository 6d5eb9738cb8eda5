//! Partition planning.
//!
//! Turns a module's packages, or a single package's tests, into balanced
//! test-suite entries with the help of a [`Partitioner`].

use crate::classify::Classifier;
use cimatrix_core::ports::{BalanceRequest, Partitioner};
use cimatrix_core::{
    BalanceMode, Error, JobKind, PartitionModule, PartitionPackage, PartitionedGroup, Result,
    TestFilter, TestSuite, Verbosity,
};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info};

/// Flag `go test` uses to select tests by pattern.
const RUN_FLAG: &str = "-run";

/// Plans module and package partitions into test suites.
pub struct PartitionPlanner {
    partitioner: Arc<dyn Partitioner>,
    classifier: Classifier,
    verbosity: Verbosity,
}

impl PartitionPlanner {
    pub fn new(
        partitioner: Arc<dyn Partitioner>,
        classifier: Classifier,
        verbosity: Verbosity,
    ) -> Self {
        Self {
            partitioner,
            classifier,
            verbosity,
        }
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Split the packages of a module into balanced suites.
    ///
    /// Packages in `excluded` are claimed by package partitions and never
    /// scheduled at module level.
    pub async fn plan_module(
        &self,
        kind: JobKind,
        unit: &PartitionModule,
        discovered: BTreeSet<String>,
        excluded: &BTreeSet<String>,
    ) -> Result<Vec<TestSuite>> {
        unit.validate()?;
        let remaining: BTreeSet<String> = discovered.difference(excluded).cloned().collect();
        let packages = self.classifier.classify(kind, remaining);

        debug!(
            module_dir = %unit.module_dir,
            %kind,
            packages = packages.len(),
            partitions = unit.partitions,
            "Planning module partitions"
        );

        let packages: Vec<String> = packages.into_iter().collect();

        if unit.partitions == 1 {
            let command = format!(
                r#"make PKGS="{}" gotestsum/{}"#,
                packages.join(" "),
                unit.module_dir
            );
            self.log_command(&command);
            return Ok(vec![TestSuite::new(&unit.module_dir, command)]);
        }

        let request = BalanceRequest {
            items: packages,
            partitions: unit.partitions,
            mode: BalanceMode::Package,
        };
        let groups = self.balance(&request).await?;

        let groups: Vec<PartitionedGroup> = groups.into_iter().filter(|g| !g.is_empty()).collect();
        let width = index_width(groups.len());

        let suites = groups
            .iter()
            .enumerate()
            .map(|(idx, group)| {
                let command = format!(
                    r#"PKGS="{}" make gotestsum/{}"#,
                    group.packages.join(" "),
                    unit.module_dir
                );
                self.log_command(&command);
                TestSuite::new(
                    partition_name(&unit.module_dir, idx + 1, width, unit.partitions),
                    command,
                )
            })
            .collect();

        Ok(suites)
    }

    /// Split the tests of a single package into balanced suites.
    ///
    /// Groups left without tests are dropped and the remaining groups are
    /// numbered consecutively.
    pub async fn plan_package(
        &self,
        unit: &PartitionPackage,
        tests: Vec<String>,
    ) -> Result<Vec<TestSuite>> {
        unit.validate()?;
        debug!(
            package = %unit.package,
            tests = tests.len(),
            partitions = unit.partitions,
            "Planning package partitions"
        );

        let request = BalanceRequest {
            items: tests,
            partitions: unit.partitions,
            mode: BalanceMode::Test {
                package: unit.package.clone(),
            },
        };
        let groups = self.balance(&request).await?;

        let mut selections = Vec::with_capacity(groups.len());
        for group in groups {
            let Some(raw) = group.tests.as_deref() else {
                continue;
            };
            let mut filter = TestFilter::parse(raw).map_err(|e| {
                Error::OracleInvocation(format!(
                    "unparseable test selection for {}: {}",
                    unit.package, e
                ))
            })?;
            filter.flag.get_or_insert_with(|| RUN_FLAG.to_string());
            let Some(opts) = filter.native_option() else {
                continue;
            };
            let packages = if group.packages.is_empty() {
                unit.package.clone()
            } else {
                group.packages.join(" ")
            };
            selections.push((packages, opts));
        }

        let width = index_width(selections.len());
        let suites = selections
            .into_iter()
            .enumerate()
            .map(|(idx, (packages, opts))| {
                let command = format!(
                    r#"PKGS="{}" OPTS="{}" make gotestsum/{}"#,
                    packages, opts, unit.package_dir
                );
                self.log_command(&command);
                TestSuite::new(
                    partition_name(&unit.package_dir, idx + 1, width, unit.partitions),
                    command,
                )
            })
            .collect();

        Ok(suites)
    }

    async fn balance(&self, request: &BalanceRequest) -> Result<Vec<PartitionedGroup>> {
        let groups = self.partitioner.balance(request).await?;
        if self.verbosity.shows_oracle_output() {
            debug!(?groups, "Partitioner groups");
        }
        Ok(groups)
    }

    fn log_command(&self, command: &str) {
        if self.verbosity.shows_commands() {
            info!(command = %command, "Rendered test command");
        }
    }
}

/// Number of digits in the largest index.
fn index_width(count: usize) -> usize {
    count.max(1).to_string().len()
}

fn partition_name(dir: &str, index: usize, width: usize, partitions: u32) -> String {
    format!("{} {:0width$}/{}", dir, index, partitions, width = width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_name_padding() {
        assert_eq!(partition_name("pkg", 1, 1, 3), "pkg 1/3");
        assert_eq!(partition_name("tests", 3, 2, 12), "tests 03/12");
        assert_eq!(partition_name("tests", 12, 2, 12), "tests 12/12");
    }

    #[test]
    fn test_index_width() {
        assert_eq!(index_width(0), 1);
        assert_eq!(index_width(9), 1);
        assert_eq!(index_width(10), 2);
        assert_eq!(index_width(100), 3);
    }
}
