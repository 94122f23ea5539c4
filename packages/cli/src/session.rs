// ABOUTME: Per-invocation session: selected profile, its SDK config and credential manager
// ABOUTME: Built once per command and passed explicitly to every step

use std::sync::Arc;

use aws_config::SdkConfig;
use aws_credential_types::{provider::ProvideCredentials, Credentials};
use berth_auth::{
    AuthOutcome, AwsCredentialProbe, AwsIdentityProvider, CredentialManager, Tenant, TokenCache,
};
use berth_config::{constants::AWS_PROFILE, default_config_path, default_sso_cache_dir, AwsConfigFile};
use tracing::debug;

use crate::error::{CliError, CliResult};

/// Profile from the flag, else from `AWS_PROFILE`
pub fn profile_from_flag_or_env(flag: Option<&str>) -> Option<String> {
    flag.map(str::to_string)
        .or_else(|| std::env::var(AWS_PROFILE).ok())
        .filter(|p| !p.is_empty())
}

/// Profile names from the shared config file, for interactive selection
pub fn available_profiles() -> CliResult<Vec<String>> {
    let config = AwsConfigFile::load(&default_config_path()?)?;
    Ok(config.profile_names())
}

pub struct Session {
    profile: String,
    tenant: Tenant,
    sdk_config: SdkConfig,
    manager: CredentialManager,
}

impl Session {
    pub async fn open(profile: &str) -> CliResult<Self> {
        let config = AwsConfigFile::load(&default_config_path()?)?;
        let sso = config.profile(profile)?.sso_settings()?;
        let tenant = Tenant::new(sso.start_url, sso.region);

        let sdk_config = berth_cloud::load_sdk_config(Some(profile)).await;
        let cache = TokenCache::new(default_sso_cache_dir()?);
        debug!(
            "Session for profile {} using token cache {}",
            profile,
            cache.dir().display()
        );

        let manager = CredentialManager::new(
            cache,
            Arc::new(AwsIdentityProvider::new(&sdk_config, &tenant.region)),
            Arc::new(AwsCredentialProbe::new(&sdk_config)),
        );

        Ok(Self {
            profile: profile.to_string(),
            tenant,
            sdk_config,
            manager,
        })
    }

    pub fn profile(&self) -> &str {
        &self.profile
    }

    pub fn tenant(&self) -> &Tenant {
        &self.tenant
    }

    pub fn sdk_config(&self) -> &SdkConfig {
        &self.sdk_config
    }

    pub async fn ensure_authenticated(&self) -> CliResult<AuthOutcome> {
        let outcome = self.manager.ensure_authenticated(&self.tenant).await?;
        debug!("Authentication outcome: {:?}", outcome);
        Ok(outcome)
    }

    pub async fn login(&self) -> CliResult<()> {
        self.manager.perform_full_login(&self.tenant).await?;
        Ok(())
    }

    /// Returns whether a cached token was removed
    pub async fn logout(&self) -> CliResult<bool> {
        Ok(self.manager.logout(&self.tenant).await?)
    }

    /// Resolve short-lived credentials through the profile's credential chain
    pub async fn credentials(&self) -> CliResult<Credentials> {
        let provider = self
            .sdk_config
            .credentials_provider()
            .ok_or_else(|| CliError::Credentials("no credentials provider configured".to_string()))?;

        provider
            .provide_credentials()
            .await
            .map_err(|e| CliError::Credentials(error_chain(&e)))
    }
}

fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
