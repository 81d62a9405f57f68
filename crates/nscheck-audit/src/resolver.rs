//! Live NS lookups through hickory.

use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use hickory_resolver::config::{NameServerConfigGroup, ResolverConfig, ResolverOpts};
use hickory_resolver::name_server::TokioConnectionProvider;
use hickory_resolver::{ResolveError, TokioResolver};
use nscheck_core::{NameserverAnswer, NameserverResolver, ResolutionError, ResolutionFailure};
use tracing::debug;

const DNS_PORT: u16 = 53;

/// Retries hickory makes after a failed attempt
pub const LOOKUP_RETRIES: u32 = 2;

/// Timeout of one attempt, so the first try and every retry fit in `budget`
#[must_use]
pub fn attempt_timeout(budget: Duration) -> Duration {
    budget / (LOOKUP_RETRIES + 1)
}

/// [`NameserverResolver`] backed by a hickory stub resolver.
///
/// Queries Google public DNS unless pointed at a specific nameserver. The
/// timeout given to the constructors bounds a whole lookup, retries included.
#[derive(Clone)]
pub struct HickoryNameserverResolver {
    resolver: TokioResolver,
}

impl std::fmt::Debug for HickoryNameserverResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HickoryNameserverResolver").finish_non_exhaustive()
    }
}

impl HickoryNameserverResolver {
    /// Resolve through Google public DNS
    #[must_use]
    pub fn google(budget: Duration) -> Self {
        Self::with_config(ResolverConfig::google(), budget)
    }

    /// Resolve through one nameserver, over UDP with TCP fallback
    #[must_use]
    pub fn nameserver(ip: IpAddr, budget: Duration) -> Self {
        let group = NameServerConfigGroup::from_ips_clear(&[ip], DNS_PORT, true);
        Self::with_config(ResolverConfig::from_parts(None, vec![], group), budget)
    }

    fn with_config(config: ResolverConfig, budget: Duration) -> Self {
        let mut opts = ResolverOpts::default();
        opts.timeout = attempt_timeout(budget);
        opts.attempts = LOOKUP_RETRIES as usize;
        // Repeated runs must see fresh answers
        opts.cache_size = 0;

        let resolver =
            TokioResolver::builder_with_config(config, TokioConnectionProvider::default())
                .with_options(opts)
                .build();
        Self { resolver }
    }
}

#[async_trait]
impl NameserverResolver for HickoryNameserverResolver {
    async fn lookup_ns(&self, domain: &str) -> NameserverAnswer {
        match self.resolver.ns_lookup(domain).await {
            Ok(lookup) => {
                let hosts: Vec<String> = lookup.iter().map(ToString::to_string).collect();
                debug!(domain, count = hosts.len(), "NS lookup answered");
                Ok(hosts)
            }
            Err(e) => {
                debug!(domain, error = %e, "NS lookup failed");
                Err(ResolutionError::new(domain, classify(&e)))
            }
        }
    }
}

fn classify(err: &ResolveError) -> ResolutionFailure {
    if err.is_nx_domain() {
        return ResolutionFailure::NxDomain;
    }
    if err.is_no_records_found() {
        return ResolutionFailure::NoRecords;
    }
    classify_message(&err.to_string())
}

fn classify_message(message: &str) -> ResolutionFailure {
    let lower = message.to_ascii_lowercase();
    if lower.contains("timed out") || lower.contains("timeout") {
        ResolutionFailure::Timeout
    } else if lower.contains("servfail") {
        ResolutionFailure::ServFail
    } else {
        ResolutionFailure::Other(message.to_string())
    }
}
