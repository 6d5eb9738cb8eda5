//! Partition units and balanced groups.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// A module whose packages are split into balanced jobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ModuleFields")]
pub struct PartitionModule {
    pub module_dir: String,
    pub partitions: u32,
}

impl PartitionModule {
    /// Create a module partition, rejecting counts below one.
    pub fn new(module_dir: impl Into<String>, partitions: i64) -> Result<Self> {
        let module_dir = module_dir.into();
        let partitions = validate_count(&module_dir, partitions)?;
        Ok(Self {
            module_dir,
            partitions,
        })
    }

    /// Re-check a unit that may have been built without [`Self::new`].
    pub fn validate(&self) -> Result<()> {
        validate_count(&self.module_dir, i64::from(self.partitions)).map(|_| ())
    }
}

#[derive(Deserialize)]
struct ModuleFields {
    module_dir: String,
    partitions: i64,
}

impl TryFrom<ModuleFields> for PartitionModule {
    type Error = Error;

    fn try_from(fields: ModuleFields) -> Result<Self> {
        Self::new(fields.module_dir, fields.partitions)
    }
}

/// A single package whose tests are split into balanced jobs.
///
/// Packages named here are removed from every module partition so that no
/// test is scheduled twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PackageFields")]
pub struct PartitionPackage {
    pub package: String,
    pub package_dir: String,
    pub partitions: u32,
}

impl PartitionPackage {
    /// Create a package partition, rejecting counts below one.
    pub fn new(
        package: impl Into<String>,
        package_dir: impl Into<String>,
        partitions: i64,
    ) -> Result<Self> {
        let package = package.into();
        let partitions = validate_count(&package, partitions)?;
        Ok(Self {
            package,
            package_dir: package_dir.into(),
            partitions,
        })
    }

    /// Re-check a unit that may have been built without [`Self::new`].
    pub fn validate(&self) -> Result<()> {
        validate_count(&self.package, i64::from(self.partitions)).map(|_| ())
    }
}

#[derive(Deserialize)]
struct PackageFields {
    package: String,
    package_dir: String,
    partitions: i64,
}

impl TryFrom<PackageFields> for PartitionPackage {
    type Error = Error;

    fn try_from(fields: PackageFields) -> Result<Self> {
        Self::new(fields.package, fields.package_dir, fields.partitions)
    }
}

fn validate_count(unit: &str, count: i64) -> Result<u32> {
    u32::try_from(count)
        .ok()
        .filter(|&n| n >= 1)
        .ok_or_else(|| Error::InvalidPartitionCount {
            unit: unit.to_string(),
            count,
        })
}

/// Granularity requested from the partitioner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BalanceMode {
    /// Items are package identifiers.
    Package,
    /// Items are test names inside `package`.
    Test { package: String },
}

/// One group returned by the partitioner.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PartitionedGroup {
    pub id: u32,
    /// Opaque runtime estimate supplied by the partitioner.
    pub estimated_runtime: String,
    pub packages: Vec<String>,
    /// Test selection in the partitioner's syntax, e.g. `-run='^A$,^B$'`.
    pub tests: Option<String>,
    pub description: String,
}

impl PartitionedGroup {
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}
