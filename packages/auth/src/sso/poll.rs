// ABOUTME: Bounded fixed-interval polling primitive
// ABOUTME: Retries while an attempt reports Pending, aborts on the first error, times out after max attempts

use std::future::Future;
use std::time::Duration;

use backoff::{backoff::Backoff, future::retry};
use tracing::debug;

use crate::error::{AuthError, AuthResult};

/// Default interval between token polls
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Default number of token polls before giving up (about 30 seconds)
pub const DEFAULT_POLL_ATTEMPTS: u32 = 10;

/// Outcome of a single poll attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome<T> {
    Ready(T),
    Pending,
}

/// Fixed-interval, bounded retry policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_attempts: DEFAULT_POLL_ATTEMPTS,
        }
    }
}

impl PollPolicy {
    pub const fn new(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts,
        }
    }

    /// Run `attempt` until it is ready, fails, or the attempt bound is reached
    ///
    /// Sleeps `interval` after each pending attempt except the last.
    pub async fn run<T, F, Fut>(&self, mut attempt: F) -> AuthResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = AuthResult<PollOutcome<T>>>,
    {
        let timed_out = || AuthError::VerificationTimedOut {
            attempts: self.max_attempts,
        };
        if self.max_attempts == 0 {
            return Err(timed_out());
        }

        let max_attempts = self.max_attempts;
        let mut n = 0u32;
        retry(self.schedule(), || {
            n += 1;
            let outcome = attempt();
            async move {
                match outcome.await {
                    Ok(PollOutcome::Ready(value)) => Ok(value),
                    Ok(PollOutcome::Pending) => {
                        debug!("Poll attempt {}/{} pending", n, max_attempts);
                        Err(backoff::Error::transient(timed_out()))
                    }
                    Err(e) => Err(backoff::Error::permanent(e)),
                }
            }
        })
        .await
    }

    fn schedule(&self) -> FixedSchedule {
        let sleeps = self.max_attempts.saturating_sub(1);
        FixedSchedule {
            interval: self.interval,
            sleeps,
            remaining: sleeps,
        }
    }
}

/// Constant delay, available a fixed number of times
#[derive(Debug, Clone)]
struct FixedSchedule {
    interval: Duration,
    sleeps: u32,
    remaining: u32,
}

impl Backoff for FixedSchedule {
    fn reset(&mut self) {
        self.remaining = self.sleeps;
    }

    fn next_backoff(&mut self) -> Option<Duration> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.interval)
    }
}
