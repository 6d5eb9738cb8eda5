//! Test suite entries.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A rendered, executable unit on the test-suite axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TestSuite {
    pub name: String,
    pub command: String,
}

impl TestSuite {
    pub fn new(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
        }
    }
}

/// A fixed, non-partitioned suite driven by a Makefile target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MakefileTest {
    pub name: String,
    pub run: String,
    /// Rough runtime in minutes; fast matrices skip anything above
    /// [`MakefileTest::FAST_ETA_LIMIT`].
    pub eta: u32,
}

impl MakefileTest {
    pub const FAST_ETA_LIMIT: u32 = 5;

    pub fn new(name: impl Into<String>, run: impl Into<String>, eta: u32) -> Self {
        Self {
            name: name.into(),
            run: run.into(),
            eta,
        }
    }

    pub fn is_slow(&self) -> bool {
        self.eta > Self::FAST_ETA_LIMIT
    }

    pub fn to_suite(&self) -> TestSuite {
        TestSuite::new(&self.name, &self.run)
    }
}
