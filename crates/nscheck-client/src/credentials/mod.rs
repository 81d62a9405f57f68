//! Credential providers.
//!
//! - [`GcloudCredentials`]: the active `gcloud` account (the default)
//! - [`ApplicationDefaultCredentials`]: the Google ADC chain
//! - [`StaticToken`]: a bearer token supplied by the caller

mod adc;
mod gcloud;

pub use adc::{ApplicationDefaultCredentials, CLOUD_PLATFORM_SCOPE};
pub use gcloud::GcloudCredentials;

use async_trait::async_trait;
use nscheck_core::{CredentialProvider, Credentials, NsCheckError, Result};

/// A fixed bearer token
#[derive(Clone)]
pub struct StaticToken {
    token: String,
}

impl StaticToken {
    /// Use `token` as-is
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl std::fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticToken").finish_non_exhaustive()
    }
}

#[async_trait]
impl CredentialProvider for StaticToken {
    async fn obtain(&self) -> Result<Credentials> {
        let token = self.token.trim();
        if token.is_empty() {
            return Err(NsCheckError::Credentials("access token is empty".into()));
        }
        Ok(Credentials::new(token, "static"))
    }
}
