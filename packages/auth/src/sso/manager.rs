// ABOUTME: Credential lifecycle manager deciding between reuse, refresh and full re-registration
// ABOUTME: Runs the live-credential probe first and persists every newly issued token atomically

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::{
    error::AuthResult,
    sso::{
        cache::TokenCache,
        device::DeviceFlow,
        probe::{CredentialProbe, CredentialStatus},
        provider::IdentityProvider,
        types::{CachedToken, Tenant},
    },
};

/// OIDC client name used when registering with the identity provider
pub const CLIENT_NAME: &str = "berth";

/// What has to happen before an authenticated call can proceed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthDecision {
    /// Live credentials or the cached access token can be used as-is
    Usable,
    /// Access token lapsed but the client registration is still valid
    NeedsRefresh,
    /// No usable registration: register a new client, then authorize
    NeedsFullLogin,
}

/// Decide the next step from the live probe and the cached token
///
/// Rows are checked in order: live session, valid access token, valid
/// registration, otherwise full login.
pub fn decide(
    status: CredentialStatus,
    token: Option<&CachedToken>,
    now: DateTime<Utc>,
) -> AuthDecision {
    if status == CredentialStatus::Usable {
        return AuthDecision::Usable;
    }

    match token {
        Some(token) if token.has_usable_access_token_at(now) => AuthDecision::Usable,
        Some(token) if token.has_usable_registration_at(now) => AuthDecision::NeedsRefresh,
        _ => AuthDecision::NeedsFullLogin,
    }
}

/// How `ensure_authenticated` was satisfied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOutcome {
    LiveSession,
    Reused,
    Refreshed,
    Registered,
}

pub struct CredentialManager {
    cache: TokenCache,
    provider: Arc<dyn IdentityProvider>,
    probe: Arc<dyn CredentialProbe>,
    flow: DeviceFlow,
}

impl CredentialManager {
    pub fn new(
        cache: TokenCache,
        provider: Arc<dyn IdentityProvider>,
        probe: Arc<dyn CredentialProbe>,
    ) -> Self {
        Self {
            cache,
            provider,
            probe,
            flow: DeviceFlow::default(),
        }
    }

    /// Replace the device flow (poll policy and operator prompt)
    pub fn with_device_flow(mut self, flow: DeviceFlow) -> Self {
        self.flow = flow;
        self
    }

    pub fn cache(&self) -> &TokenCache {
        &self.cache
    }

    /// Make sure the tenant has a usable session, logging in if needed
    ///
    /// On failure the cached token is left as it was.
    pub async fn ensure_authenticated(&self, tenant: &Tenant) -> AuthResult<AuthOutcome> {
        let status = self.probe.probe().await?;
        if status == CredentialStatus::Usable {
            debug!("Live credentials usable, skipping device flow");
            return Ok(AuthOutcome::LiveSession);
        }

        let cached = self
            .cache
            .read(&tenant.start_url)
            .await
            .map(|token| token.with_tenant(tenant));

        match (decide(status, cached.as_ref(), Utc::now()), cached) {
            (AuthDecision::Usable, _) => {
                debug!("Reusing cached SSO token for {}", tenant.start_url);
                Ok(AuthOutcome::Reused)
            }
            (AuthDecision::NeedsRefresh, Some(cached)) => {
                info!("SSO token expired, refreshing with existing registration");
                let registration = cached.registration();
                let issued = self
                    .flow
                    .authorize(self.provider.as_ref(), &registration, &tenant.start_url)
                    .await?;

                let token = CachedToken::issue(tenant, &registration, issued);
                self.cache.write(&token).await?;
                Ok(AuthOutcome::Refreshed)
            }
            _ => {
                self.perform_full_login(tenant).await?;
                Ok(AuthOutcome::Registered)
            }
        }
    }

    /// Register a new client and run the device flow regardless of cache state
    pub async fn perform_full_login(&self, tenant: &Tenant) -> AuthResult<CachedToken> {
        info!("Registering new SSO client for {}", tenant.start_url);
        let registration = self.provider.register_client(CLIENT_NAME).await?;

        let issued = self
            .flow
            .authorize(self.provider.as_ref(), &registration, &tenant.start_url)
            .await?;

        let token = CachedToken::issue(tenant, &registration, issued);
        let path = self.cache.write(&token).await?;
        debug!("Cached SSO token at {}", path.display());
        Ok(token)
    }

    /// Sign out server-side (best effort) and delete the cached token
    ///
    /// Returns whether a cache file was removed.
    pub async fn logout(&self, tenant: &Tenant) -> AuthResult<bool> {
        if let Some(token) = self.cache.read(&tenant.start_url).await {
            if !token.access_token.is_empty() {
                if let Err(e) = self.provider.sign_out(&token.access_token).await {
                    warn!("Server-side sign-out failed: {}", e);
                }
            }
        }

        self.cache.delete(&tenant.start_url).await
    }
}
