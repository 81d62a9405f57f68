//! Credentials of the active gcloud configuration.

use async_trait::async_trait;
use nscheck_core::{CredentialProvider, Credentials, NsCheckError, Result};
use serde::Deserialize;
use tokio::process::Command;
use tracing::debug;

/// Reads the access token of the active (or a named) gcloud configuration
/// via `gcloud config config-helper`.
#[derive(Debug, Clone)]
pub struct GcloudCredentials {
    program: String,
    configuration: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ConfigHelperOutput {
    credential: HelperCredential,
}

#[derive(Debug, Deserialize)]
struct HelperCredential {
    access_token: Option<String>,
}

impl Default for GcloudCredentials {
    fn default() -> Self {
        Self::new()
    }
}

impl GcloudCredentials {
    /// Use `gcloud` from `PATH` with its active configuration
    #[must_use]
    pub fn new() -> Self {
        Self {
            program: "gcloud".to_string(),
            configuration: None,
        }
    }

    /// Use a named gcloud configuration
    #[must_use]
    pub fn configuration(mut self, name: impl Into<String>) -> Self {
        self.configuration = Some(name.into());
        self
    }

    /// Use a different gcloud executable
    #[must_use]
    pub fn program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }
}

#[async_trait]
impl CredentialProvider for GcloudCredentials {
    async fn obtain(&self) -> Result<Credentials> {
        let mut command = Command::new(&self.program);
        command.args(["config", "config-helper", "--format=json"]);
        if let Some(ref name) = self.configuration {
            command.arg(format!("--configuration={name}"));
        }
        debug!(program = %self.program, "requesting gcloud access token");

        let output = command
            .output()
            .await
            .map_err(|e| NsCheckError::Credentials(format!("failed to run {}: {e}", self.program)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(NsCheckError::Credentials(format!(
                "{} config config-helper failed: {}",
                self.program,
                stderr.trim()
            )));
        }

        parse_config_helper(&output.stdout)
    }
}

fn parse_config_helper(stdout: &[u8]) -> Result<Credentials> {
    let helper: ConfigHelperOutput = serde_json::from_slice(stdout)
        .map_err(|e| NsCheckError::Credentials(format!("unexpected config-helper output: {e}")))?;

    helper
        .credential
        .access_token
        .filter(|t| !t.is_empty())
        .map(|t| Credentials::new(t, "gcloud"))
        .ok_or_else(|| {
            NsCheckError::Credentials("gcloud has no active account, run `gcloud auth login`".into())
        })
}
