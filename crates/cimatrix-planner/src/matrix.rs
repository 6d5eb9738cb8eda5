//! Matrix assembly and combination.

use cimatrix_core::{Error, JobMatrixDocument, MatrixRecord, Result, TestSuite, VersionSet};
use tracing::debug;

/// Packages axes into matrix documents and expands documents into records.
pub struct MatrixCombiner;

impl MatrixCombiner {
    pub fn new() -> Self {
        Self
    }

    /// Package the three axes as a document without expanding them.
    pub fn assemble(
        &self,
        test_suites: Vec<TestSuite>,
        platforms: Vec<String>,
        version_sets: Vec<VersionSet>,
    ) -> JobMatrixDocument {
        JobMatrixDocument {
            test_suite: test_suites,
            platform: platforms,
            version_set: version_sets,
        }
    }

    /// Expand each document into its full cartesian product and concatenate
    /// the results. Documents are never crossed with each other.
    pub fn combine(&self, documents: &[MatrixRecord]) -> Result<Vec<MatrixRecord>> {
        let mut includes = Vec::new();
        for (idx, document) in documents.iter().enumerate() {
            let combinations = self.generate_combinations(document)?;
            debug!(document = idx, combinations = combinations.len(), "Expanded matrix");
            includes.extend(combinations);
        }
        Ok(includes)
    }

    /// Combine a serialized document, as accepted on the command line.
    pub fn combine_json(&self, documents: &[impl AsRef<str>]) -> Result<Vec<MatrixRecord>> {
        let parsed = documents
            .iter()
            .map(|raw| {
                serde_json::from_str::<MatrixRecord>(raw.as_ref())
                    .map_err(|e| Error::InvalidMatrix(e.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;
        self.combine(&parsed)
    }

    /// Later axes vary fastest, matching a nested-loop product over the
    /// document's key order.
    fn generate_combinations(&self, document: &MatrixRecord) -> Result<Vec<MatrixRecord>> {
        let mut result = vec![MatrixRecord::new()];

        for (key, values) in document {
            let values = values.as_array().ok_or_else(|| {
                Error::InvalidMatrix(format!("axis {:?} is not a list", key))
            })?;

            let mut new_result = Vec::with_capacity(result.len() * values.len());

            for combo in result {
                for value in values {
                    let mut new_combo = combo.clone();
                    new_combo.insert(key.clone(), value.clone());
                    new_result.push(new_combo);
                }
            }

            result = new_result;
        }

        Ok(result)
    }
}

impl Default for MatrixCombiner {
    fn default() -> Self {
        Self::new()
    }
}
