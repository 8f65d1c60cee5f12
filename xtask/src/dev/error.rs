use thiserror::Error;

#[derive(Debug, Error)]
pub enum DevError {
    #[error("Container runtime not found: {0}")]
    ContainerRuntimeNotFound(String),

    #[error("Container start failed: {0}")]
    ContainerStartFailed(String),

    #[error("Container '{name}' is not healthy after {timeout_secs}s")]
    ContainerNotHealthy { name: String, timeout_secs: u64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DevError>;
