//! Error types for the settlement engine

use thiserror::Error;

/// Result type for settlement operations
pub type Result<T> = std::result::Result<T, Error>;

/// Settlement errors
///
/// Registry failures are surfaced to the caller unchanged: lookups precede
/// any mutation (so a missing reference persists nothing), while a
/// persistence failure mid-transaction leaves earlier writes in place —
/// there is no compensating rollback (see crate docs).
#[derive(Error, Debug)]
pub enum Error {
    /// Registry error (missing reference or persistence failure)
    #[error("Registry error: {0}")]
    Registry(#[from] registry_core::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Other(msg)
    }
}

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Other(msg.to_string())
    }
}
