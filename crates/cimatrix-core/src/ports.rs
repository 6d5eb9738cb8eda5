//! Port traits (hexagonal architecture).
//!
//! These traits define the interfaces between matrix construction and the
//! external tooling that discovers tests and balances them.

use crate::partition::{BalanceMode, PartitionedGroup};
use crate::Result;
use async_trait::async_trait;
use std::collections::BTreeSet;

/// Lists the packages and tests that make up the corpus.
#[async_trait]
pub trait PackageDiscovery: Send + Sync {
    /// List every package in a module directory.
    async fn list_packages(&self, module_dir: &str) -> Result<BTreeSet<String>>;

    /// List the top-level tests of the package in `package_dir`.
    async fn list_tests(&self, package_dir: &str) -> Result<Vec<String>>;
}

/// A request to split items into balanced groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceRequest {
    pub items: Vec<String>,
    pub partitions: u32,
    pub mode: BalanceMode,
}

/// History-aware balancing of packages or tests into groups.
///
/// Implementations must return pairwise disjoint groups whose union is the
/// requested item list. Groups may be empty when there are fewer items than
/// partitions.
#[async_trait]
pub trait Partitioner: Send + Sync {
    async fn balance(&self, request: &BalanceRequest) -> Result<Vec<PartitionedGroup>>;
}
