// ABOUTME: Live credential probe for the selected profile
// ABOUTME: Tells apart "session works", "session needs a login" and hard credential failures

use std::error::Error as _;
use std::time::SystemTime;

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_credential_types::provider::{
    error::CredentialsError, ProvideCredentials, SharedCredentialsProvider,
};
use aws_sdk_sso::{error::SdkError, operation::get_role_credentials::GetRoleCredentialsError};
use tracing::debug;

use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialStatus {
    /// Credentials resolved and are not expired
    Usable,
    /// The session is missing, expired or rejected; a login can fix it
    Invalid,
}

#[async_trait]
pub trait CredentialProbe: Send + Sync {
    async fn probe(&self) -> AuthResult<CredentialStatus>;
}

/// Probes the credential chain of a loaded SDK config
#[derive(Debug, Clone)]
pub struct AwsCredentialProbe {
    provider: Option<SharedCredentialsProvider>,
}

impl AwsCredentialProbe {
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self {
            provider: sdk_config.credentials_provider(),
        }
    }
}

#[async_trait]
impl CredentialProbe for AwsCredentialProbe {
    async fn probe(&self) -> AuthResult<CredentialStatus> {
        let Some(provider) = &self.provider else {
            debug!("No credentials provider configured");
            return Ok(CredentialStatus::Invalid);
        };

        match provider.provide_credentials().await {
            Ok(credentials) => Ok(status_for_expiry(credentials.expiry(), SystemTime::now())),
            Err(e) => classify_error(e),
        }
    }
}

fn status_for_expiry(expiry: Option<SystemTime>, now: SystemTime) -> CredentialStatus {
    match expiry {
        Some(expiry) if now >= expiry => CredentialStatus::Invalid,
        _ => CredentialStatus::Usable,
    }
}

fn classify_error(error: CredentialsError) -> AuthResult<CredentialStatus> {
    let login_fixable = match &error {
        CredentialsError::CredentialsNotLoaded(_) | CredentialsError::InvalidConfiguration(_) => true,
        // Token load failures are login-fixable; a failed GetRoleCredentials call only when
        // the portal rejected the token
        CredentialsError::ProviderError(_) => match role_credentials_error(&error) {
            Some(sdk_error) => sdk_error
                .as_service_error()
                .is_some_and(|e| e.is_unauthorized_exception()),
            None => true,
        },
        _ => false,
    };

    if login_fixable {
        debug!("Credentials unavailable: {}", error);
        return Ok(CredentialStatus::Invalid);
    }

    Err(AuthError::Credentials(
        aws_sdk_sso::error::DisplayErrorContext(&error).to_string(),
    ))
}

/// The portal error behind a provider error, if any; profile chains nest it
fn role_credentials_error(error: &CredentialsError) -> Option<&SdkError<GetRoleCredentialsError>> {
    let mut source = error.source();
    while let Some(cause) = source {
        if let Some(sdk_error) = cause.downcast_ref::<SdkError<GetRoleCredentialsError>>() {
            return Some(sdk_error);
        }
        source = cause.source();
    }
    None
}
