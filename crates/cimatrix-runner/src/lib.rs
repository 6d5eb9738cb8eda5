//! Subprocess adapters for package discovery and partitioning in cimatrix.

pub mod config;
pub mod go;
pub mod gotestsum;
pub mod process;

pub use config::{DiscoveryConfig, OracleConfig};
pub use go::GoDiscovery;
pub use gotestsum::GotestsumOracle;
pub use process::{CommandOutput, ProcessError, ProcessSpec};
