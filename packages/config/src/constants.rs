// ABOUTME: Environment variable name constants
// ABOUTME: Centralized definitions of all environment variable names used across Berth

// Profile Selection
pub const AWS_PROFILE: &str = "AWS_PROFILE";
pub const AWS_CONFIG_FILE: &str = "AWS_CONFIG_FILE";

// Logging
pub const BERTH_LOG: &str = "BERTH_LOG";

// Env files rewritten by `berth sso replace`
pub const AWS_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
pub const AWS_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
pub const AWS_SESSION_TOKEN: &str = "AWS_SESSION_TOKEN";
