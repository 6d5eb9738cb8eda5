//! Error types for cimatrix.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    // Collaborator errors
    #[error("Discovery failed for {target}: {message}")]
    Discovery { target: String, message: String },

    #[error("Partitioner invocation failed: {0}")]
    OracleInvocation(String),

    // Configuration errors
    #[error("Unknown version set: {0}")]
    UnknownVersionSet(String),

    #[error("Unknown language: {0}")]
    UnknownLanguage(String),

    #[error("Invalid version spec (expected lang=version): {0}")]
    InvalidVersionSpec(String),

    #[error("Exactly one version set must be specified (received {0})")]
    VersionSetCount(usize),

    #[error("Unknown job kind: {0}")]
    InvalidKind(String),

    #[error("Invalid partition count {count} for {unit}: must be at least 1")]
    InvalidPartitionCount { unit: String, count: i64 },

    #[error("Configuration error: {0}")]
    Config(String),

    // Matrix errors
    #[error("Invalid test filter: {0}")]
    InvalidTestFilter(String),

    #[error("Duplicate test suite name: {0}")]
    DuplicateSuiteName(String),

    #[error("Invalid matrix document: {0}")]
    InvalidMatrix(String),

    // Infrastructure errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl Error {
    /// Wrap a discovery failure for the given module or package directory.
    pub fn discovery(target: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Discovery {
            target: target.into(),
            message: message.into(),
        }
    }
}
