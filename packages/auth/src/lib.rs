// ABOUTME: Berth authentication library for AWS IAM Identity Center (SSO)
// ABOUTME: Device authorization flow, race-safe token cache and the credential lifecycle state machine

pub mod error;
pub mod sso;

// Re-export main types
pub use error::{AuthError, AuthResult};
pub use sso::{
    decide, AuthDecision, AuthOutcome, AwsCredentialProbe, AwsIdentityProvider, BrowserPrompt,
    CachedToken, ClientRegistration, CredentialManager, CredentialProbe, CredentialStatus,
    DeviceAuthorization, DeviceFlow, IdentityProvider, IssuedToken, PollOutcome, PollPolicy,
    Tenant, TokenCache, VerificationPrompt,
};
