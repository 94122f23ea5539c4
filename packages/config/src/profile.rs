// ABOUTME: AWS shared config file parsing
// ABOUTME: Extracts named profiles and their IAM Identity Center (SSO) settings

use std::fs;
use std::path::Path;

use ini::Ini;
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};

const PROFILE_PREFIX: &str = "profile ";
const DEFAULT_PROFILE: &str = "default";

/// A single `[profile NAME]` (or `[default]`) section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub sso_start_url: Option<String>,
    pub sso_region: Option<String>,
    pub region: Option<String>,
}

/// Identity Center endpoint a profile signs in through
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SsoSettings {
    pub start_url: String,
    pub region: String,
}

impl Profile {
    /// SSO settings for this profile; `sso_region` falls back to `region`
    pub fn sso_settings(&self) -> ConfigResult<SsoSettings> {
        let start_url = self
            .sso_start_url
            .clone()
            .ok_or_else(|| ConfigError::MissingSsoStartUrl(self.name.clone()))?;

        let region = self
            .sso_region
            .clone()
            .or_else(|| self.region.clone())
            .ok_or_else(|| ConfigError::MissingSsoRegion(self.name.clone()))?;

        Ok(SsoSettings { start_url, region })
    }
}

/// Parsed AWS shared config file
#[derive(Debug, Clone, Default)]
pub struct AwsConfigFile {
    profiles: Vec<Profile>,
}

impl AwsConfigFile {
    /// Load and parse the config file at `path`
    pub fn load(path: &Path) -> ConfigResult<Self> {
        debug!("Loading AWS config from {}", path.display());
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse config file content
    pub fn parse(content: &str) -> ConfigResult<Self> {
        let ini = Ini::load_from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        let profiles = ini
            .iter()
            .filter_map(|(section, properties)| {
                let section = section?;
                let name = match section.strip_prefix(PROFILE_PREFIX) {
                    Some(name) => name.trim(),
                    None if section == DEFAULT_PROFILE => DEFAULT_PROFILE,
                    None => return None,
                };

                let value = |key: &str| {
                    properties
                        .get(key)
                        .map(str::trim)
                        .filter(|v| !v.is_empty())
                        .map(str::to_string)
                };

                Some(Profile {
                    name: name.to_string(),
                    sso_start_url: value("sso_start_url"),
                    sso_region: value("sso_region"),
                    region: value("region"),
                })
            })
            .collect();

        Ok(Self { profiles })
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn profile_names(&self) -> Vec<String> {
        self.profiles.iter().map(|p| p.name.clone()).collect()
    }

    pub fn profile(&self, name: &str) -> ConfigResult<&Profile> {
        self.profiles
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| ConfigError::ProfileNotFound(name.to_string()))
    }
}
