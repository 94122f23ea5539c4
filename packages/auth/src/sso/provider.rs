// ABOUTME: Identity provider client for the IAM Identity Center device authorization flow
// ABOUTME: Trait seam plus the AWS SSO-OIDC / SSO portal implementation

use async_trait::async_trait;
use aws_config::{Region, SdkConfig};
use aws_sdk_ssooidc::{error::SdkError, operation::create_token::CreateTokenError};
use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::{
    error::{AuthError, AuthResult},
    sso::{
        poll::PollOutcome,
        types::{ClientRegistration, DeviceAuthorization, IssuedToken},
    },
};

/// Client type sent when registering the CLI as an OIDC client
const OIDC_CLIENT_TYPE: &str = "public";

/// Grant type used when exchanging a device code for a token
const DEVICE_CODE_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:device_code";

/// Protocol operations of the identity provider. Holds no local state.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Register this CLI as an OIDC client
    async fn register_client(&self, client_name: &str) -> AuthResult<ClientRegistration>;

    /// Start a device authorization for the tenant at `start_url`
    async fn start_device_authorization(
        &self,
        registration: &ClientRegistration,
        start_url: &str,
    ) -> AuthResult<DeviceAuthorization>;

    /// Exchange the device code for a token; `Pending` until the operator approves
    async fn create_token(
        &self,
        registration: &ClientRegistration,
        device_code: &str,
    ) -> AuthResult<PollOutcome<IssuedToken>>;

    /// Invalidate the server-side session for an access token
    async fn sign_out(&self, access_token: &str) -> AuthResult<()>;
}

/// AWS IAM Identity Center implementation
#[derive(Debug, Clone)]
pub struct AwsIdentityProvider {
    oidc: aws_sdk_ssooidc::Client,
    portal: aws_sdk_sso::Client,
}

impl AwsIdentityProvider {
    /// Build clients pinned to the tenant's SSO region
    pub fn new(sdk_config: &SdkConfig, sso_region: &str) -> Self {
        let region = Region::new(sso_region.to_string());

        let oidc_config = aws_sdk_ssooidc::config::Builder::from(sdk_config)
            .region(region.clone())
            .build();
        let portal_config = aws_sdk_sso::config::Builder::from(sdk_config)
            .region(region)
            .build();

        Self {
            oidc: aws_sdk_ssooidc::Client::from_conf(oidc_config),
            portal: aws_sdk_sso::Client::from_conf(portal_config),
        }
    }
}

#[async_trait]
impl IdentityProvider for AwsIdentityProvider {
    async fn register_client(&self, client_name: &str) -> AuthResult<ClientRegistration> {
        debug!("Registering OIDC client {}", client_name);

        let output = self
            .oidc
            .register_client()
            .client_name(client_name)
            .client_type(OIDC_CLIENT_TYPE)
            .send()
            .await
            .map_err(|e| {
                AuthError::Registration(aws_sdk_ssooidc::error::DisplayErrorContext(&e).to_string())
            })?;

        let client_id = required(output.client_id(), "clientId").map_err(AuthError::Registration)?;
        let client_secret =
            required(output.client_secret(), "clientSecret").map_err(AuthError::Registration)?;

        Ok(ClientRegistration {
            client_id,
            client_secret,
            expires_at: DateTime::from_timestamp(output.client_secret_expires_at(), 0)
                .unwrap_or_default(),
        })
    }

    async fn start_device_authorization(
        &self,
        registration: &ClientRegistration,
        start_url: &str,
    ) -> AuthResult<DeviceAuthorization> {
        debug!("Starting device authorization for {}", start_url);

        let output = self
            .oidc
            .start_device_authorization()
            .client_id(&registration.client_id)
            .client_secret(&registration.client_secret)
            .start_url(start_url)
            .send()
            .await
            .map_err(|e| {
                AuthError::DeviceAuthorization(
                    aws_sdk_ssooidc::error::DisplayErrorContext(&e).to_string(),
                )
            })?;

        Ok(DeviceAuthorization {
            device_code: required(output.device_code(), "deviceCode")
                .map_err(AuthError::DeviceAuthorization)?,
            user_code: output.user_code().map(str::to_string),
            verification_uri: required(output.verification_uri(), "verificationUri")
                .map_err(AuthError::DeviceAuthorization)?,
            verification_uri_complete: output.verification_uri_complete().map(str::to_string),
        })
    }

    async fn create_token(
        &self,
        registration: &ClientRegistration,
        device_code: &str,
    ) -> AuthResult<PollOutcome<IssuedToken>> {
        let result = self
            .oidc
            .create_token()
            .client_id(&registration.client_id)
            .client_secret(&registration.client_secret)
            .grant_type(DEVICE_CODE_GRANT_TYPE)
            .device_code(device_code)
            .send()
            .await;

        let output = match result {
            Ok(output) => output,
            Err(e) => return classify_token_error(&e),
        };

        let access_token =
            required(output.access_token(), "accessToken").map_err(AuthError::IdentityProvider)?;

        Ok(PollOutcome::Ready(IssuedToken {
            access_token,
            expires_at: Utc::now() + Duration::seconds(i64::from(output.expires_in())),
        }))
    }

    async fn sign_out(&self, access_token: &str) -> AuthResult<()> {
        self.portal
            .logout()
            .access_token(access_token)
            .send()
            .await
            .map_err(|e| AuthError::SignOut(aws_sdk_sso::error::DisplayErrorContext(&e).to_string()))?;
        Ok(())
    }
}

/// A failed token poll is either still pending, refused by the operator or lapsed,
/// or an infrastructure failure that signing in again would not fix
fn classify_token_error<T>(error: &SdkError<CreateTokenError>) -> AuthResult<PollOutcome<T>> {
    let message = || aws_sdk_ssooidc::error::DisplayErrorContext(error).to_string();

    match error.as_service_error() {
        Some(e) if e.is_authorization_pending_exception() || e.is_slow_down_exception() => {
            Ok(PollOutcome::Pending)
        }
        Some(e)
            if e.is_access_denied_exception()
                || e.is_expired_token_exception()
                || e.is_invalid_grant_exception() =>
        {
            Err(AuthError::AuthorizationDenied(message()))
        }
        _ => Err(AuthError::IdentityProvider(message())),
    }
}

fn required(value: Option<&str>, field: &str) -> Result<String, String> {
    value
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| format!("response is missing {}", field))
}
