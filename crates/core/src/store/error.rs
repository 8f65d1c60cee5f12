use thiserror::Error;

/// Errors that can occur while talking to the external store.
///
/// Shared by the cache, notification queue, and update pub/sub backends:
/// they all speak to the same store and fail in the same ways.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Store connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Store operation failed: {0}")]
    OperationFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Publish failed: {0}")]
    PublishFailed(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
