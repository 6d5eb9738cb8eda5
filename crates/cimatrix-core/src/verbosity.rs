//! Diagnostic verbosity.

use serde::{Deserialize, Serialize};

/// How much diagnostic detail components emit.
///
/// Passed into each component at construction rather than read from
/// process-wide state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Verbosity(pub u8);

impl Verbosity {
    pub const QUIET: Verbosity = Verbosity(0);

    /// Log every rendered test command.
    pub fn shows_commands(&self) -> bool {
        self.0 >= 1
    }

    /// Log raw partitioner diagnostics and parsed output.
    pub fn shows_oracle_output(&self) -> bool {
        self.0 >= 3
    }
}

impl From<u8> for Verbosity {
    fn from(level: u8) -> Self {
        Verbosity(level)
    }
}
