//! Error types for integration test operations.

use thiserror::Error;

use crate::dev::error::DevError;

/// Result type alias for integration module.
pub type Result<T> = std::result::Result<T, IntegrationError>;

/// Errors that can occur during integration test operations.
#[derive(Error, Debug)]
pub enum IntegrationError {
    #[error("Container operation failed: {0}")]
    Container(#[from] DevError),

    #[error("Test execution failed: {0}")]
    TestFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
