use std::time::Duration;

use crate::utils::http::get_user_agent;

/// Wikimedia Commons redirect endpoint that serves a file by its page name
pub const COMMONS_FILE_PATH: &str = "https://commons.wikimedia.org/wiki/Special:FilePath/";

/// Linear backoff: attempt `i` (zero based) is followed by a sleep of
/// `base_delay + i * step` unless it was the last one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub base_delay: Duration,
    pub step: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            base_delay: Duration::from_millis(600),
            step: Duration::from_millis(600),
        }
    }
}

impl RetryPolicy {
    /// Policy without any sleeping between attempts
    #[cfg(test)]
    pub fn immediate(attempts: u32) -> Self {
        Self {
            attempts,
            base_delay: Duration::ZERO,
            step: Duration::ZERO,
        }
    }

    pub fn delay_for(&self, attempt_index: u32) -> Duration {
        self.base_delay + self.step * attempt_index
    }
}

/// Settings for the HTTP side of a run
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: COMMONS_FILE_PATH.to_string(),
            user_agent: get_user_agent().to_string(),
            timeout: Duration::from_secs(30),
            retry: RetryPolicy::default(),
        }
    }
}
