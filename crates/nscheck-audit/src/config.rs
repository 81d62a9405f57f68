//! Audit configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default number of zones audited concurrently
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Default bound on a single live NS lookup
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

/// Options controlling catalog construction and reconciliation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Audit zones with private visibility too
    #[serde(default)]
    pub include_private_zones: bool,

    /// Zones audited concurrently
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Bound on a single live NS lookup, resolver retries included
    #[serde(default = "default_lookup_timeout", with = "duration_secs")]
    pub lookup_timeout: Duration,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AuditConfig {
    /// Default configuration: public zones only, 8 zones at a time, 10 s lookups
    #[must_use]
    pub const fn new() -> Self {
        Self {
            include_private_zones: false,
            concurrency: DEFAULT_CONCURRENCY,
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
        }
    }

    /// Include or exclude private zones
    #[must_use]
    pub const fn include_private_zones(mut self, include: bool) -> Self {
        self.include_private_zones = include;
        self
    }

    /// Set the number of zones audited concurrently, at least one
    #[must_use]
    pub const fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = if concurrency == 0 { 1 } else { concurrency };
        self
    }

    /// Set the bound on a single live NS lookup
    #[must_use]
    pub const fn lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = timeout;
        self
    }

    /// Effective concurrency, never zero
    #[must_use]
    pub fn effective_concurrency(&self) -> usize {
        self.concurrency.max(1)
    }
}

const fn default_concurrency() -> usize {
    DEFAULT_CONCURRENCY
}

const fn default_lookup_timeout() -> Duration {
    DEFAULT_LOOKUP_TIMEOUT
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
