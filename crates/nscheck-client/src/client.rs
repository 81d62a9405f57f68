//! Main Google Cloud API client implementation.

use crate::api::{AssetsApi, ManagedZonesApi, OrganizationsApi};
use crate::config::{Endpoints, RateLimitConfig, RetryConfig};
use governor::{Quota, RateLimiter};
use nscheck_core::{Credentials, NsCheckError, Result};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

type DirectRateLimiter = RateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// Google Cloud API client
#[derive(Clone)]
pub struct GcpClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    timeout: Duration,
    credentials: Credentials,
    endpoints: Endpoints,
    retry_config: RetryConfig,
    rate_limiter: DirectRateLimiter,
}

impl GcpClient {
    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder(credentials: Credentials) -> GcpClientBuilder {
        GcpClientBuilder::new(credentials)
    }

    /// Access Cloud Resource Manager organization endpoints
    #[must_use]
    pub fn organizations(&self) -> OrganizationsApi<'_> {
        OrganizationsApi::new(self)
    }

    /// Access Cloud Asset endpoints
    #[must_use]
    pub fn assets(&self) -> AssetsApi<'_> {
        AssetsApi::new(self)
    }

    /// Access Cloud DNS managed zone endpoints
    #[must_use]
    pub fn managed_zones(&self) -> ManagedZonesApi<'_> {
        ManagedZonesApi::new(self)
    }

    pub(crate) fn endpoints(&self) -> &Endpoints {
        &self.inner.endpoints
    }

    /// Perform a GET request, retrying transient failures
    #[instrument(skip(self, params))]
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let url = build_url(url, params)?;
        let retry = &self.inner.retry_config;
        let mut attempt = 0;

        loop {
            match self.get_once(&url).await {
                Err(e) if attempt < retry.max_retries && should_retry(&e, retry) => {
                    let backoff = retry.backoff_for(attempt);
                    warn!(error = %e, attempt, ?backoff, "retrying request");
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                }
                result => return result,
            }
        }
    }

    async fn get_once<T: DeserializeOwned>(&self, url: &Url) -> Result<T> {
        self.inner.rate_limiter.until_ready().await;
        debug!(url = %url, "GET request");

        let response = self
            .inner
            .http
            .get(url.clone())
            .bearer_auth(self.inner.credentials.access_token())
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    NsCheckError::Timeout(self.inner.timeout.as_secs())
                } else {
                    NsCheckError::Http(e.to_string())
                }
            })?;

        handle_response(response).await
    }
}

fn should_retry(err: &NsCheckError, retry: &RetryConfig) -> bool {
    match err {
        NsCheckError::RateLimited { .. } => retry.retry_on_rate_limit,
        other => other.is_retryable(),
    }
}

/// Build a URL with query parameters
fn build_url(url: &str, params: &[(&str, &str)]) -> Result<Url> {
    let mut url = Url::parse(url).map_err(|e| NsCheckError::Config(format!("invalid URL {url}: {e}")))?;
    if !params.is_empty() {
        url.query_pairs_mut().extend_pairs(params);
    }
    Ok(url)
}

/// Handle an API response that returns JSON
async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();

    if status.is_success() {
        let body = response
            .text()
            .await
            .map_err(|e| NsCheckError::Http(e.to_string()))?;
        serde_json::from_str(&body).map_err(NsCheckError::Json)
    } else {
        let resource = response.url().path().to_string();
        let body = response.text().await.unwrap_or_default();
        Err(error_from_status(status.as_u16(), &resource, body))
    }
}

/// Convert an error response to an [`NsCheckError`]
pub(crate) fn error_from_status(status: u16, resource: &str, body: String) -> NsCheckError {
    // Google APIs wrap errors as {"error": {"code": .., "message": ..}}
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| {
            v.get("error").and_then(|e| {
                e.get("message")
                    .and_then(|m| m.as_str())
                    .or_else(|| e.as_str())
                    .map(String::from)
            })
        })
        .unwrap_or(body);

    match status {
        401 | 403 => {
            let message = if message.trim().is_empty() {
                "credentials rejected or permission denied".to_string()
            } else {
                message
            };
            warn!(status, %message, "request was not authorized");
            NsCheckError::Unauthorized(message)
        }
        404 => NsCheckError::NotFound {
            resource: resource.to_string(),
        },
        429 => {
            warn!("rate limited by Google Cloud API");
            NsCheckError::RateLimited { retry_after: None }
        }
        _ => NsCheckError::Api {
            code: status,
            message,
        },
    }
}

/// Builder for configuring a [`GcpClient`]
pub struct GcpClientBuilder {
    credentials: Credentials,
    endpoints: Endpoints,
    timeout: Duration,
    user_agent: String,
    retry_config: RetryConfig,
    rate_limit: RateLimitConfig,
}

impl GcpClientBuilder {
    /// Create a new builder with the given credentials
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            endpoints: Endpoints::default(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("nscheck/{}", env!("CARGO_PKG_VERSION")),
            retry_config: RetryConfig::default(),
            rate_limit: RateLimitConfig::default(),
        }
    }

    /// Route every API to one base URL (useful for testing)
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.endpoints = Endpoints::all(url);
        self
    }

    /// Set the API endpoints
    #[must_use]
    pub fn endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Set the request timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Set retry configuration
    #[must_use]
    pub fn retry(mut self, config: RetryConfig) -> Self {
        self.retry_config = config;
        self
    }

    /// Set the client-side request quota
    #[must_use]
    pub fn rate_limit(mut self, config: RateLimitConfig) -> Self {
        self.rate_limit = config;
        self
    }

    /// Build the client
    pub fn build(self) -> Result<GcpClient> {
        let http = HttpClient::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .gzip(true)
            .build()
            .map_err(|e| NsCheckError::Http(format!("failed to build HTTP client: {e}")))?;

        let quota = Quota::per_second(
            NonZeroU32::new(self.rate_limit.requests_per_second).unwrap_or(NonZeroU32::MIN),
        )
        .allow_burst(NonZeroU32::new(self.rate_limit.burst_size).unwrap_or(NonZeroU32::MIN));

        Ok(GcpClient {
            inner: Arc::new(ClientInner {
                http,
                timeout: self.timeout,
                credentials: self.credentials,
                endpoints: self.endpoints,
                retry_config: self.retry_config,
                rate_limiter: RateLimiter::direct(quota),
            }),
        })
    }
}
