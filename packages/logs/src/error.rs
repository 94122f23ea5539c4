// ABOUTME: Error types for log querying and tailing

use thiserror::Error;

pub type LogResult<T> = Result<T, LogError>;

#[derive(Error, Debug)]
pub enum LogError {
    #[error("Log query failed: {0}")]
    Query(String),

    #[error("Invalid log target: {0}")]
    InvalidTarget(String),
}
