//! Job matrix construction.

use crate::matrix::MatrixCombiner;
use crate::planner::PartitionPlanner;
use cimatrix_core::ports::PackageDiscovery;
use cimatrix_core::{
    Error, JobKind, JobMatrixDocument, MakefileTest, PartitionModule, PartitionPackage, Result,
    TestSuite, VersionSet,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;
use tracing::info;

/// Fixed Makefile-driven suites that run alongside the partitioned Go tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MakefileTests {
    pub integration: Vec<MakefileTest>,
    pub unit: Vec<MakefileTest>,
}

impl Default for MakefileTests {
    fn default() -> Self {
        Self {
            integration: vec![
                MakefileTest::new("sdk/dotnet test_auto", "cd sdk/dotnet && make test_auto", 5),
                MakefileTest::new("sdk/nodejs test_auto", "cd sdk/nodejs && make test_auto", 3),
                MakefileTest::new("sdk/nodejs unit_tests", "cd sdk/nodejs && make unit_tests", 4),
                MakefileTest::new("sdk/python test_auto", "cd sdk/python && make test_auto", 6),
                MakefileTest::new("sdk/python test_fast", "cd sdk/python && make test_fast", 3),
            ],
            unit: vec![
                MakefileTest::new("sdk/dotnet dotnet_test", "cd sdk/dotnet && make dotnet_test", 3),
                MakefileTest::new("sdk/nodejs sxs_tests", "cd sdk/nodejs && make sxs_tests", 3),
            ],
        }
    }
}

impl MakefileTests {
    /// Suites for a job kind, skipping slow ones when `fast` is set.
    pub fn select(&self, kind: JobKind, fast: bool) -> Vec<TestSuite> {
        let tests: Vec<&MakefileTest> = match kind {
            JobKind::IntegrationTest => self.integration.iter().collect(),
            JobKind::UnitTest => self.unit.iter().collect(),
            JobKind::AllTest => self.integration.iter().chain(&self.unit).collect(),
        };
        tests
            .into_iter()
            .filter(|test| !(fast && test.is_slow()))
            .map(MakefileTest::to_suite)
            .collect()
    }
}

/// Everything needed to build one job matrix.
#[derive(Debug, Clone)]
pub struct MatrixRequest {
    pub kind: JobKind,
    pub fast: bool,
    pub partition_modules: Vec<PartitionModule>,
    pub partition_packages: Vec<PartitionPackage>,
    pub platforms: Vec<String>,
    pub version_sets: Vec<VersionSet>,
}

impl MatrixRequest {
    pub fn new(kind: JobKind) -> Self {
        Self {
            kind,
            fast: false,
            partition_modules: Vec::new(),
            partition_packages: Vec::new(),
            platforms: Vec::new(),
            version_sets: Vec::new(),
        }
    }
}

/// Builds the job matrix document from discovery, planning and assembly.
pub struct MatrixBuilder {
    discovery: Arc<dyn PackageDiscovery>,
    planner: PartitionPlanner,
    makefile_tests: MakefileTests,
    combiner: MatrixCombiner,
}

impl MatrixBuilder {
    pub fn new(
        discovery: Arc<dyn PackageDiscovery>,
        planner: PartitionPlanner,
        makefile_tests: MakefileTests,
    ) -> Self {
        Self {
            discovery,
            planner,
            makefile_tests,
            combiner: MatrixCombiner::new(),
        }
    }

    /// Build the matrix. Any discovery or partitioner failure aborts the
    /// whole build; a partial matrix would silently drop coverage.
    pub async fn build(&self, request: &MatrixRequest) -> Result<JobMatrixDocument> {
        let mut test_suites = self.makefile_tests.select(request.kind, request.fast);

        let excluded: BTreeSet<String> = request
            .partition_packages
            .iter()
            .map(|part| part.package.clone())
            .collect();

        for module in &request.partition_modules {
            let discovered = self.discovery.list_packages(&module.module_dir).await?;
            let suites = self
                .planner
                .plan_module(request.kind, module, discovered, &excluded)
                .await?;
            info!(module_dir = %module.module_dir, suites = suites.len(), "Planned module");
            test_suites.extend(suites);
        }

        for package in &request.partition_packages {
            let tests = self.discovery.list_tests(&package.package_dir).await?;
            let suites = self.planner.plan_package(package, tests).await?;
            info!(package = %package.package, suites = suites.len(), "Planned package");
            test_suites.extend(suites);
        }

        ensure_unique_names(&test_suites)?;

        Ok(self.combiner.assemble(
            test_suites,
            request.platforms.clone(),
            request.version_sets.clone(),
        ))
    }
}

fn ensure_unique_names(suites: &[TestSuite]) -> Result<()> {
    let mut seen = HashSet::with_capacity(suites.len());
    for suite in suites {
        if !seen.insert(suite.name.as_str()) {
            return Err(Error::DuplicateSuiteName(suite.name.clone()));
        }
    }
    Ok(())
}
