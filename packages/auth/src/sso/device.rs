// ABOUTME: Device authorization flow driver
// ABOUTME: Starts authorization, sends the operator to the browser once, then polls for the token

use std::io::Write;
use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    error::AuthResult,
    sso::{
        poll::{PollOutcome, PollPolicy},
        provider::IdentityProvider,
        types::{ClientRegistration, DeviceAuthorization, IssuedToken},
    },
};

/// Operator-facing side of the device flow
pub trait VerificationPrompt: Send + Sync {
    /// Direct the operator to the verification page; called once per flow, before the first poll
    fn present(&self, authorization: &DeviceAuthorization);

    /// Called for every pending poll response
    fn pending(&self) {}

    /// Called once the token has been issued
    fn approved(&self) {}
}

/// Prints the verification URL and opens it in the default browser
#[derive(Debug, Default, Clone)]
pub struct BrowserPrompt;

impl VerificationPrompt for BrowserPrompt {
    fn present(&self, authorization: &DeviceAuthorization) {
        let url = authorization.browser_url();
        println!("Opening URL in default browser: {}", url);
        if let Some(code) = &authorization.user_code {
            println!("Verification code: {}", code);
        }

        if let Err(e) = open::that(url) {
            warn!("Failed to open browser: {}", e);
            println!("Could not open a browser automatically, please visit the URL above.");
        }

        print!("Waiting for authorization");
        let _ = std::io::stdout().flush();
    }

    fn pending(&self) {
        print!(".");
        let _ = std::io::stdout().flush();
    }

    fn approved(&self) {
        println!("\nSuccessfully logged in");
    }
}

/// Device authorization + polling, parameterized by poll policy and prompt
#[derive(Clone)]
pub struct DeviceFlow {
    policy: PollPolicy,
    prompt: Arc<dyn VerificationPrompt>,
}

impl Default for DeviceFlow {
    fn default() -> Self {
        Self::new(PollPolicy::default(), Arc::new(BrowserPrompt))
    }
}

impl DeviceFlow {
    pub fn new(policy: PollPolicy, prompt: Arc<dyn VerificationPrompt>) -> Self {
        Self { policy, prompt }
    }

    pub fn policy(&self) -> PollPolicy {
        self.policy
    }

    /// Run one device authorization for `start_url` under `registration`
    pub async fn authorize(
        &self,
        provider: &dyn IdentityProvider,
        registration: &ClientRegistration,
        start_url: &str,
    ) -> AuthResult<IssuedToken> {
        let authorization = provider
            .start_device_authorization(registration, start_url)
            .await?;

        self.prompt.present(&authorization);

        let prompt = self.prompt.as_ref();
        let device_code = authorization.device_code.as_str();

        let issued = self
            .policy
            .run(|| async move {
                let outcome = provider.create_token(registration, device_code).await?;
                if matches!(outcome, PollOutcome::Pending) {
                    prompt.pending();
                }
                Ok(outcome)
            })
            .await?;

        prompt.approved();
        info!("Device authorization approved for {}", start_url);
        Ok(issued)
    }
}
