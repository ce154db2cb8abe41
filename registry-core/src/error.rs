//! Error types for the entity registries

use thiserror::Error;

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Registry errors
#[derive(Error, Debug)]
pub enum Error {
    /// Entity not found
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Entity kind (e.g. "shipment")
        kind: &'static str,
        /// Entity id
        id: String,
    },

    /// Entity already registered
    #[error("{kind} already registered: {id}")]
    AlreadyExists {
        /// Entity kind
        kind: &'static str,
        /// Entity id
        id: String,
    },

    /// Backend storage failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Notification dispatch failure
    #[error("Notification error: {0}")]
    Notify(String),

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
