//! cimatrix Core
//!
//! Core domain types, traits, and error handling for cimatrix.
//! This crate has minimal dependencies and defines the shared vocabulary
//! used by the planner, the subprocess adapters and the CLI.

pub mod document;
pub mod error;
pub mod filter;
pub mod kind;
pub mod partition;
pub mod ports;
pub mod suite;
pub mod verbosity;
pub mod version;

pub use document::{CombinedMatrix, JobMatrixDocument, MatrixRecord};
pub use error::{Error, Result};
pub use filter::TestFilter;
pub use kind::JobKind;
pub use partition::{BalanceMode, PartitionModule, PartitionPackage, PartitionedGroup};
pub use suite::{MakefileTest, TestSuite};
pub use verbosity::Verbosity;
pub use version::{Language, VersionSet};
