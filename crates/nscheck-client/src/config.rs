//! Client configuration types.

use std::time::Duration;

/// Cloud Resource Manager API base URL
pub const RESOURCE_MANAGER_URL: &str = "https://cloudresourcemanager.googleapis.com";

/// Cloud Asset API base URL
pub const ASSET_URL: &str = "https://cloudasset.googleapis.com";

/// Cloud DNS API base URL
pub const DNS_URL: &str = "https://dns.googleapis.com";

/// Base URLs of the APIs the client talks to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Cloud Resource Manager
    pub resource_manager: String,
    /// Cloud Asset
    pub asset: String,
    /// Cloud DNS
    pub dns: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            resource_manager: RESOURCE_MANAGER_URL.to_string(),
            asset: ASSET_URL.to_string(),
            dns: DNS_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// Route every API to one base URL (useful for testing)
    #[must_use]
    pub fn all(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            resource_manager: base_url.clone(),
            asset: base_url.clone(),
            dns: base_url,
        }
    }
}

/// Retry configuration for failed requests
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts
    pub max_retries: u32,

    /// Initial backoff duration
    pub initial_backoff: Duration,

    /// Maximum backoff duration
    pub max_backoff: Duration,

    /// Whether to retry on rate limit errors
    pub retry_on_rate_limit: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl RetryConfig {
    /// Create a new retry configuration
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_retries: 3,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(30),
            retry_on_rate_limit: true,
        }
    }

    /// Disable retries entirely
    #[must_use]
    pub const fn none() -> Self {
        Self::new().max_retries(0)
    }

    /// Set maximum retries
    #[must_use]
    pub const fn max_retries(mut self, max: u32) -> Self {
        self.max_retries = max;
        self
    }

    /// Set initial backoff duration
    #[must_use]
    pub const fn initial_backoff(mut self, duration: Duration) -> Self {
        self.initial_backoff = duration;
        self
    }

    /// Set maximum backoff duration
    #[must_use]
    pub const fn max_backoff(mut self, duration: Duration) -> Self {
        self.max_backoff = duration;
        self
    }

    /// Calculate backoff for a given attempt
    #[must_use]
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let initial = u64::try_from(self.initial_backoff.as_millis()).unwrap_or(u64::MAX);
        let max = u64::try_from(self.max_backoff.as_millis()).unwrap_or(u64::MAX);
        let backoff = initial.saturating_mul(2u64.saturating_pow(attempt));
        Duration::from_millis(backoff.min(max))
    }
}

/// Client-side request quota
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Sustained requests per second
    pub requests_per_second: u32,
    /// Requests allowed in a burst
    pub burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_second: 10,
            burst_size: 10,
        }
    }
}
