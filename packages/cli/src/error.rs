// ABOUTME: Error type for the berth CLI library
// ABOUTME: Wraps the library crates' errors so commands can report one message per failure

use thiserror::Error;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("No AWS profile selected")]
    NoProfile,

    #[error(transparent)]
    Config(#[from] berth_config::ConfigError),

    #[error(transparent)]
    Auth(#[from] berth_auth::AuthError),

    #[error(transparent)]
    Cloud(#[from] berth_cloud::CloudError),

    #[error(transparent)]
    Logs(#[from] berth_logs::LogError),

    #[error("Failed to resolve AWS credentials: {0}")]
    Credentials(String),

    #[error("Cannot read logs from {hours} hours back")]
    LookbackOutOfRange { hours: u32 },

    #[error("Failed to update {path}: {source}")]
    EnvFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
