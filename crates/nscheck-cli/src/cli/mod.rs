//! CLI argument parsing and run setup.

pub mod args;
pub mod audit;

use std::net::IpAddr;
use std::time::Duration;

use anyhow::Result;
use args::Cli;
use clap::Parser;
use nscheck_audit::AuditConfig;
use nscheck_client::credentials::{ApplicationDefaultCredentials, GcloudCredentials, StaticToken};
use nscheck_core::CredentialProvider;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::config::Config;
use crate::output::OutputFormat;

/// Where the access token comes from
#[derive(Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// A token given on the command line or in the environment
    Static(String),
    /// Google Application Default Credentials
    ApplicationDefault,
    /// The active gcloud account
    Gcloud,
}

impl std::fmt::Debug for CredentialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Static(_) => write!(f, "Static(..)"),
            Self::ApplicationDefault => write!(f, "ApplicationDefault"),
            Self::Gcloud => write!(f, "Gcloud"),
        }
    }
}

impl CredentialSource {
    /// The provider for this source
    #[must_use]
    pub fn provider(&self) -> Box<dyn CredentialProvider> {
        match self {
            Self::Static(token) => Box::new(StaticToken::new(token.clone())),
            Self::ApplicationDefault => Box::new(ApplicationDefaultCredentials::new()),
            Self::Gcloud => Box::new(GcloudCredentials::new()),
        }
    }
}

/// Effective settings after merging flags, environment and config file
#[derive(Debug, Clone)]
pub struct Settings {
    /// Organization query, if any
    pub organization: Option<String>,
    /// Credential source
    pub credentials: CredentialSource,
    /// Audit options
    pub audit: AuditConfig,
    /// Nameserver for live lookups, Google Public DNS if unset
    pub nameserver: Option<IpAddr>,
    /// Overall run deadline
    pub deadline: Option<Duration>,
    /// Report format
    pub output_format: OutputFormat,
}

impl Settings {
    /// Merge `cli` over `config`. Clap has already applied the environment.
    #[must_use]
    pub fn resolve(cli: Cli, config: Config) -> Self {
        let credentials = match cli.access_token.filter(|t| !t.trim().is_empty()) {
            Some(token) => CredentialSource::Static(token),
            None if cli
                .use_default_credentials
                .or(config.use_default_credentials)
                .unwrap_or(false) =>
            {
                CredentialSource::ApplicationDefault
            }
            None => CredentialSource::Gcloud,
        };

        let mut audit = AuditConfig::default().include_private_zones(
            cli.include_private_zones
                .or(config.include_private_zones)
                .unwrap_or(false),
        );
        if let Some(concurrency) = cli.concurrency.or(config.concurrency) {
            audit = audit.concurrency(concurrency);
        }
        if let Some(secs) = cli.lookup_timeout.or(config.lookup_timeout_secs) {
            audit = audit.lookup_timeout(Duration::from_secs(secs.max(1)));
        }

        Self {
            organization: cli.organization.or(config.organization),
            credentials,
            audit,
            nameserver: cli.nameserver.or(config.nameserver),
            deadline: cli.deadline.map(Duration::from_secs),
            output_format: cli.output.or(config.output_format).unwrap_or_default(),
        }
    }
}

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    crate::logging::init(cli.verbose, cli.quiet);
    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let settings = Settings::resolve(cli, config);

    let cancel = CancellationToken::new();
    watch_interrupt(cancel.clone());
    if let Some(deadline) = settings.deadline {
        watch_deadline(cancel.clone(), deadline);
    }

    audit::execute(&settings, &cancel).await
}

fn watch_interrupt(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted, cancelling audit");
            cancel.cancel();
        }
    });
}

fn watch_deadline(cancel: CancellationToken, deadline: Duration) {
    tokio::spawn(async move {
        tokio::time::sleep(deadline).await;
        warn!(deadline_secs = deadline.as_secs(), "deadline reached, cancelling audit");
        cancel.cancel();
    });
}
