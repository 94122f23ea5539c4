// ABOUTME: Resolution of well-known file locations
// ABOUTME: Environment overrides win, otherwise paths are derived from the user's home directory

use std::env;
use std::path::PathBuf;

use crate::constants::AWS_CONFIG_FILE;
use crate::error::{ConfigError, ConfigResult};

/// Path of the AWS shared config file (`AWS_CONFIG_FILE` or `~/.aws/config`)
pub fn default_config_path() -> ConfigResult<PathBuf> {
    if let Some(path) = env_path(AWS_CONFIG_FILE) {
        return Ok(path);
    }

    let home = dirs::home_dir().ok_or(ConfigError::HomeDirUnavailable)?;
    Ok(home.join(".aws").join("config"))
}

/// Directory holding cached SSO tokens, `~/.aws/sso/cache`
///
/// Fixed to the location the AWS SDK credential chain reads SSO tokens from;
/// a token cached anywhere else is never seen by it.
pub fn default_sso_cache_dir() -> ConfigResult<PathBuf> {
    let home = dirs::home_dir().ok_or(ConfigError::HomeDirUnavailable)?;
    Ok(home.join(".aws").join("sso").join("cache"))
}

fn env_path(var: &str) -> Option<PathBuf> {
    env::var_os(var)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
