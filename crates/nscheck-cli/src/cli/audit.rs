//! The audit run: credentials, organization, catalog, reconciliation, report.

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use nscheck_audit::{HickoryNameserverResolver, ReconciliationEngine, ZoneCatalogBuilder};
use nscheck_client::GcpClient;
use nscheck_core::{
    select_organization, NameserverResolver, NsCheckError, Organization, OrganizationDirectory,
};
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::Settings;
use crate::output;

/// Execute one audit pass and print the report.
///
/// Fails only on run-level errors; findings are not failures.
pub async fn execute(settings: &Settings, cancel: &CancellationToken) -> Result<()> {
    let client = tokio::select! {
        biased;
        () = cancel.cancelled() => return Err(NsCheckError::Cancelled.into()),
        client = connect(settings) => client?,
    };

    let organization = {
        let organizations = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(NsCheckError::Cancelled.into()),
            organizations = client.list_organizations() => organizations?,
        };
        select_organization(organizations, settings.organization.as_deref())?
    };
    info!(organization = %organization.name, "{}", start_message(&organization));

    let catalog = ZoneCatalogBuilder::new(client.clone(), client.clone(), settings.audit.clone())
        .build(&organization, cancel)
        .await?;

    let timeout = settings.audit.lookup_timeout;
    let resolver: Arc<dyn NameserverResolver> = match settings.nameserver {
        Some(ip) => Arc::new(HickoryNameserverResolver::nameserver(ip, timeout)),
        None => Arc::new(HickoryNameserverResolver::google(timeout)),
    };

    let report = ReconciliationEngine::new(client, resolver, settings.audit.clone())
        .reconcile(&catalog, cancel)
        .await?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    output::render(&report, catalog.excluded(), settings.output_format, &mut out)?;
    out.flush()?;

    Ok(())
}

fn start_message(organization: &Organization) -> String {
    format!(
        "checking DNS nameserver integrity for organization {}",
        organization.display_name
    )
}

async fn connect(settings: &Settings) -> Result<Arc<GcpClient>> {
    let credentials = settings
        .credentials
        .provider()
        .obtain()
        .await
        .context("Could not obtain Google Cloud credentials")?;
    info!(source = credentials.source(), "obtained credentials");

    Ok(Arc::new(GcpClient::builder(credentials).build()?))
}
