use anyhow::{anyhow, Result};
use std::thread;
use std::time::Duration;
use tracing::{error, info, warn};

pub const MAX_RETRIES: u32 = 3;
pub const RETRY_DELAY: Duration = Duration::from_secs(5);

/// Bounded retry with a fixed, blocking delay between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_RETRIES,
            delay: RETRY_DELAY,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// Run `op` until it succeeds or attempts run out, returning the last error.
    ///
    /// `op` receives the 1-based attempt number. No sleep follows the final attempt.
    pub fn run<T, F>(&self, mut op: F) -> Result<T>
    where
        F: FnMut(u32) -> Result<T>,
    {
        let mut last_error = None;

        for attempt in 1..=self.max_attempts {
            info!(attempt, max = self.max_attempts, "Attempt {attempt} of {}", self.max_attempts);

            match op(attempt) {
                Ok(value) => return Ok(value),
                Err(e) => {
                    error!(attempt, "Error on attempt {attempt}: {e:#}");
                    last_error = Some(e);

                    if attempt < self.max_attempts {
                        warn!(delay_ms = self.delay.as_millis() as u64, "Retrying in {:?}", self.delay);
                        thread::sleep(self.delay);
                    }
                }
            }
        }

        error!("All retry attempts failed");
        Err(last_error.unwrap_or_else(|| anyhow!("All retry attempts exhausted")))
    }
}
