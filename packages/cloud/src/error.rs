//! Cloud error types
use thiserror::Error;

/// Result type for cloud operations
pub type CloudResult<T> = Result<T, CloudError>;

/// Cloud-specific error types
#[derive(Debug, Error)]
pub enum CloudError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Container {0} has no awslogs-group log option")]
    MissingLogConfiguration(String),

    #[error("Container {0} has no runtime ID, it most likely is still starting")]
    ContainerNotReady(String),
}

impl CloudError {
    /// Create an API error from any SDK error, keeping the full error chain
    pub fn api<E>(err: E) -> Self
    where
        E: std::error::Error,
    {
        Self::Api(aws_sdk_ecs::error::DisplayErrorContext(err).to_string())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}
