// ABOUTME: Core type definitions for SSO authentication
// ABOUTME: Cached token value, tenant identity, client registration and device authorization types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity Center tenant selected by the current profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tenant {
    pub start_url: String,
    pub region: String,
}

impl Tenant {
    pub fn new(start_url: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            start_url: start_url.into(),
            region: region.into(),
        }
    }
}

/// One cached SSO session for one tenant, in the AWS SDK token cache format
///
/// Missing timestamps deserialize to the Unix epoch, which always reads as
/// expired.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CachedToken {
    pub start_url: String,
    pub region: String,
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
    pub client_id: String,
    pub client_secret: String,
    pub registration_expires_at: DateTime<Utc>,
}

impl CachedToken {
    /// Build a fresh cache entry from a registration and a newly issued token
    pub fn issue(tenant: &Tenant, registration: &ClientRegistration, issued: IssuedToken) -> Self {
        Self {
            start_url: tenant.start_url.clone(),
            region: tenant.region.clone(),
            access_token: issued.access_token,
            expires_at: issued.expires_at,
            client_id: registration.client_id.clone(),
            client_secret: registration.client_secret.clone(),
            registration_expires_at: registration.expires_at,
        }
    }

    /// Replace tenant fields from the current profile selection
    pub fn with_tenant(mut self, tenant: &Tenant) -> Self {
        self.start_url = tenant.start_url.clone();
        self.region = tenant.region.clone();
        self
    }

    /// Expiry is inclusive: a token expiring exactly at `now` is expired
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn registration_is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.registration_expires_at
    }

    pub fn registration_is_expired(&self) -> bool {
        self.registration_is_expired_at(Utc::now())
    }

    /// Access token present and not yet expired
    pub fn has_usable_access_token_at(&self, now: DateTime<Utc>) -> bool {
        !self.access_token.is_empty() && !self.is_expired_at(now)
    }

    /// Registration present and not yet expired
    pub fn has_usable_registration_at(&self, now: DateTime<Utc>) -> bool {
        !self.client_id.is_empty()
            && !self.client_secret.is_empty()
            && !self.registration_is_expired_at(now)
    }

    /// The client registration this token was issued under
    pub fn registration(&self) -> ClientRegistration {
        ClientRegistration {
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            expires_at: self.registration_expires_at,
        }
    }
}

/// OIDC client registration (outlives individual access tokens)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientRegistration {
    pub client_id: String,
    pub client_secret: String,
    pub expires_at: DateTime<Utc>,
}

/// Result of starting a device authorization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceAuthorization {
    pub device_code: String,
    pub user_code: Option<String>,
    pub verification_uri: String,
    pub verification_uri_complete: Option<String>,
}

impl DeviceAuthorization {
    /// URL to open in the browser; prefers the variant with the user code embedded
    pub fn browser_url(&self) -> &str {
        self.verification_uri_complete
            .as_deref()
            .unwrap_or(&self.verification_uri)
    }
}

/// Access token returned once the operator approves the device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}
