// ABOUTME: Error types for configuration loading
// ABOUTME: Distinguishes unreadable files, parse failures and missing profile settings

use thiserror::Error;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine home directory")]
    HomeDirUnavailable,

    #[error("Failed to parse AWS config file: {0}")]
    Parse(String),

    #[error("No profile named '{0}'")]
    ProfileNotFound(String),

    #[error("Profile '{0}' has no sso_start_url configured")]
    MissingSsoStartUrl(String),

    #[error("Profile '{0}' has no sso_region or region configured")]
    MissingSsoRegion(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
