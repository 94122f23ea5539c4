// ABOUTME: SSO module providing the device authorization flow and token lifecycle
// ABOUTME: Includes the token cache, bounded polling, identity provider client and credential manager

pub mod cache;
pub mod device;
pub mod manager;
pub mod poll;
pub mod probe;
pub mod provider;
pub mod types;

pub use cache::{cache_key, TokenCache};
pub use device::{BrowserPrompt, DeviceFlow, VerificationPrompt};
pub use manager::{decide, AuthDecision, AuthOutcome, CredentialManager, CLIENT_NAME};
pub use poll::{PollOutcome, PollPolicy};
pub use probe::{AwsCredentialProbe, CredentialProbe, CredentialStatus};
pub use provider::{AwsIdentityProvider, IdentityProvider};
pub use types::{CachedToken, ClientRegistration, DeviceAuthorization, IssuedToken, Tenant};
