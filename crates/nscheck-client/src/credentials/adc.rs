//! Google Application Default Credentials.
//!
//! Lookup order:
//!
//! 1. an explicitly configured credentials file
//! 2. the file named by `GOOGLE_APPLICATION_CREDENTIALS`
//! 3. the well-known `gcloud/application_default_credentials.json`
//! 4. the GCE metadata server
//!
//! Credential files may hold an `authorized_user` (refresh token) or a
//! `service_account` (private key, exchanged through a signed JWT).

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use nscheck_core::{CredentialProvider, Credentials, NsCheckError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// OAuth scope granting access to all Google Cloud APIs
pub const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

const CREDENTIALS_ENV: &str = "GOOGLE_APPLICATION_CREDENTIALS";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const METADATA_TOKEN_URL: &str =
    "http://metadata.google.internal/computeMetadata/v1/instance/service-accounts/default/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Application Default Credentials provider
#[derive(Debug, Clone)]
pub struct ApplicationDefaultCredentials {
    http: reqwest::Client,
    credentials_file: Option<PathBuf>,
    metadata_url: String,
    scope: String,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum CredentialsFile {
    AuthorizedUser {
        client_id: String,
        client_secret: String,
        refresh_token: String,
        #[serde(default)]
        token_uri: Option<String>,
    },
    ServiceAccount {
        client_email: String,
        private_key: String,
        #[serde(default)]
        token_uri: Option<String>,
    },
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl Default for ApplicationDefaultCredentials {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationDefaultCredentials {
    /// Follow the standard lookup order
    #[must_use]
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            credentials_file: None,
            metadata_url: METADATA_TOKEN_URL.to_string(),
            scope: CLOUD_PLATFORM_SCOPE.to_string(),
        }
    }

    /// Read credentials from this file instead of searching for one
    #[must_use]
    pub fn credentials_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.credentials_file = Some(path.into());
        self
    }

    /// Override the metadata server token URL (useful for testing)
    #[must_use]
    pub fn metadata_url(mut self, url: impl Into<String>) -> Self {
        self.metadata_url = url.into();
        self
    }

    /// Request a different OAuth scope
    #[must_use]
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    fn locate_file(&self) -> Result<Option<PathBuf>> {
        if let Some(ref path) = self.credentials_file {
            return Ok(Some(path.clone()));
        }

        if let Some(path) = std::env::var_os(CREDENTIALS_ENV).filter(|p| !p.is_empty()) {
            let path = PathBuf::from(path);
            if !path.exists() {
                return Err(NsCheckError::Credentials(format!(
                    "{CREDENTIALS_ENV} points to {}, which does not exist",
                    path.display()
                )));
            }
            return Ok(Some(path));
        }

        Ok(well_known_file().filter(|p| p.exists()))
    }

    async fn load_file(&self, path: &Path) -> Result<Credentials> {
        debug!(path = %path.display(), "reading application default credentials");
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            NsCheckError::Credentials(format!("cannot read {}: {e}", path.display()))
        })?;
        let file: CredentialsFile = serde_json::from_str(&content).map_err(|e| {
            NsCheckError::Credentials(format!("unsupported credentials file {}: {e}", path.display()))
        })?;

        match file {
            CredentialsFile::AuthorizedUser {
                client_id,
                client_secret,
                refresh_token,
                token_uri,
            } => {
                let token_uri = token_uri.as_deref().unwrap_or(DEFAULT_TOKEN_URI);
                let form = [
                    ("grant_type", "refresh_token"),
                    ("client_id", client_id.as_str()),
                    ("client_secret", client_secret.as_str()),
                    ("refresh_token", refresh_token.as_str()),
                ];
                let token = self.exchange(token_uri, &form).await?;
                Ok(Credentials::new(token, "adc"))
            }
            CredentialsFile::ServiceAccount {
                client_email,
                private_key,
                token_uri,
            } => {
                let token_uri = token_uri.as_deref().unwrap_or(DEFAULT_TOKEN_URI);
                let assertion = service_account_assertion(
                    &client_email,
                    &private_key,
                    token_uri,
                    &self.scope,
                    chrono::Utc::now().timestamp(),
                )?;
                let form = [("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())];
                let token = self.exchange(token_uri, &form).await?;
                Ok(Credentials::new(token, "adc"))
            }
        }
    }

    async fn exchange(&self, token_uri: &str, form: &[(&str, &str)]) -> Result<String> {
        let response = self
            .http
            .post(token_uri)
            .form(form)
            .send()
            .await
            .map_err(|e| NsCheckError::Credentials(format!("token exchange failed: {e}")))?;
        token_from_response(response).await
    }

    async fn query_metadata_server(&self) -> Result<Credentials> {
        debug!(url = %self.metadata_url, "requesting token from metadata server");
        let response = self
            .http
            .get(&self.metadata_url)
            .header("Metadata-Flavor", "Google")
            .send()
            .await
            .map_err(|e| {
                NsCheckError::Credentials(format!(
                    "no application default credentials found and the metadata server is unreachable: {e}"
                ))
            })?;
        let token = token_from_response(response).await?;
        Ok(Credentials::new(token, "metadata"))
    }
}

#[async_trait]
impl CredentialProvider for ApplicationDefaultCredentials {
    async fn obtain(&self) -> Result<Credentials> {
        match self.locate_file()? {
            Some(path) => self.load_file(&path).await,
            None => self.query_metadata_server().await,
        }
    }
}

async fn token_from_response(response: reqwest::Response) -> Result<String> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(NsCheckError::Credentials(format!(
            "token endpoint returned {status}: {}",
            body.trim()
        )));
    }
    let token: TokenResponse = response
        .json()
        .await
        .map_err(|e| NsCheckError::Credentials(format!("malformed token response: {e}")))?;
    Ok(token.access_token)
}

fn well_known_file() -> Option<PathBuf> {
    let config_dir = if cfg!(windows) {
        dirs::config_dir()
    } else {
        dirs::home_dir().map(|home| home.join(".config"))
    };
    config_dir.map(|dir| dir.join("gcloud").join("application_default_credentials.json"))
}

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

/// Build the RS256-signed JWT a service account exchanges for an access token
fn service_account_assertion(
    client_email: &str,
    private_key_pem: &str,
    token_uri: &str,
    scope: &str,
    issued_at: i64,
) -> Result<String> {
    let claims = AssertionClaims {
        iss: client_email,
        scope,
        aud: token_uri,
        iat: issued_at,
        exp: issued_at + ASSERTION_LIFETIME_SECS,
    };
    let key = EncodingKey::from_rsa_pem(private_key_pem.as_bytes())
        .map_err(|e| NsCheckError::Credentials(format!("invalid service account key: {e}")))?;

    jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &key).map_err(|e| {
        NsCheckError::Credentials(format!("failed to sign service account assertion: {e}"))
    })
}
