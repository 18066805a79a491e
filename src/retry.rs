use std::time::Duration;

use serde::Deserialize;

/// Bounded exponential backoff used while establishing a connection.
///
/// The first attempt is made immediately. Each retry `n` (0-based)
/// waits `base * 2^n` before trying again, so the default policy
/// sleeps 1s, 2s and 4s before giving up.
///
/// Reads are never retried; this policy only covers connection setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Base interval in milliseconds
    pub base_ms: u64,

    /// Retries after the initial attempt
    pub max_retries: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            base_ms: 1000,
            max_retries: 3,
        }
    }
}

impl RetryPolicy {
    pub fn new(base: Duration, max_retries: u32) -> Self {
        Self {
            base_ms: base.as_millis() as u64,
            max_retries,
        }
    }

    /// Total number of connection attempts, initial one included.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries + 1
    }

    /// Delay before retry `retry` (0-based), or `None` once the
    /// budget is exhausted.
    pub fn delay_for(&self, retry: u32) -> Option<Duration> {
        if retry >= self.max_retries {
            return None;
        }
        let factor = 1u64.checked_shl(retry).unwrap_or(u64::MAX);
        Some(Duration::from_millis(self.base_ms.saturating_mul(factor)))
    }

    /// Full backoff schedule.
    pub fn delays(&self) -> impl Iterator<Item = Duration> + '_ {
        (0..self.max_retries).filter_map(|n| self.delay_for(n))
    }
}
