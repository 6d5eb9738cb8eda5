//! Test classification, partition planning and matrix assembly for cimatrix.

pub mod builder;
pub mod classify;
pub mod matrix;
pub mod planner;
pub mod versions;

pub use builder::{MakefileTests, MatrixBuilder, MatrixRequest};
pub use classify::{Classifier, ClassifierRules};
pub use matrix::MatrixCombiner;
pub use planner::PartitionPlanner;
pub use versions::VersionSetResolver;
