// ABOUTME: Error types for SSO authentication and token caching
// ABOUTME: Keeps denied or expired authorization apart from identity provider and storage failures

use thiserror::Error;

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Not authenticated: {0}")]
    NotAuthenticated(String),

    #[error("Client registration failed: {0}")]
    Registration(String),

    #[error("Device authorization failed: {0}")]
    DeviceAuthorization(String),

    #[error("Authorization denied or expired: {0}")]
    AuthorizationDenied(String),

    #[error("Identity provider request failed: {0}")]
    IdentityProvider(String),

    #[error("Verification timed out after {attempts} attempts")]
    VerificationTimedOut { attempts: u32 },

    #[error("Sign-out failed: {0}")]
    SignOut(String),

    #[error("Credential resolution failed: {0}")]
    Credentials(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AuthError {
    /// Authorization was refused or has lapsed; signing in again is the remedy
    pub fn is_authorization_error(&self) -> bool {
        matches!(
            self,
            AuthError::NotAuthenticated(_)
                | AuthError::AuthorizationDenied(_)
                | AuthError::VerificationTimedOut { .. }
        )
    }
}
