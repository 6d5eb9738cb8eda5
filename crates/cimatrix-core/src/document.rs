//! Job matrix documents.

use crate::suite::TestSuite;
use crate::version::VersionSet;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A single flattened combination produced by matrix combination.
///
/// Keys keep the axis order of the source document.
pub type MatrixRecord = serde_json::Map<String, serde_json::Value>;

/// The three-axis matrix handed to the CI orchestrator.
///
/// Axes are not expanded here; the orchestrator computes the product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct JobMatrixDocument {
    #[serde(rename = "test-suite")]
    pub test_suite: Vec<TestSuite>,
    pub platform: Vec<String>,
    #[serde(rename = "version-set")]
    pub version_set: Vec<VersionSet>,
}

/// Output of combining several matrix documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedMatrix {
    pub include: Vec<MatrixRecord>,
}

impl JobMatrixDocument {
    /// JSON schema describing the document layout.
    pub fn json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(JobMatrixDocument)
    }
}
