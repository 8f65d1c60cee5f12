use thiserror::Error;

/// Errors that can occur while querying an authoritative event source.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
