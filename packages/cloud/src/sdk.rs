//! SDK configuration loading

use aws_config::{BehaviorVersion, SdkConfig};
use tracing::debug;

/// Load the shared AWS configuration, optionally pinned to a named profile
pub async fn load_sdk_config(profile: Option<&str>) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(profile) = profile {
        debug!("Loading AWS configuration for profile {}", profile);
        loader = loader.profile_name(profile);
    }
    loader.load().await
}
