// ABOUTME: Berth configuration library: environment variables, well-known paths and AWS profiles
// ABOUTME: Parses the AWS shared config file into explicit profile values passed to each command

pub mod constants;
pub mod error;
pub mod paths;
pub mod profile;

pub use error::{ConfigError, ConfigResult};
pub use paths::{default_config_path, default_sso_cache_dir};
pub use profile::{AwsConfigFile, Profile, SsoSettings};
