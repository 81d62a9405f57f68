//! DNS delegation audit engine.
//!
//! Builds a catalog of an organization's managed zones, resolves every
//! declared NS record set against the live DNS and classifies the
//! differences into [`Finding`](nscheck_core::Finding)s.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use nscheck_audit::{
//!     AuditConfig, FindingReporter, HickoryNameserverResolver, ReconciliationEngine,
//!     ZoneCatalogBuilder,
//! };
//! use nscheck_client::GcpClient;
//! use nscheck_core::{Credentials, Organization};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example(org: Organization) -> nscheck_core::Result<()> {
//! let client = Arc::new(GcpClient::builder(Credentials::new("ya29.token", "static")).build()?);
//! let config = AuditConfig::default();
//! let cancel = CancellationToken::new();
//!
//! let catalog = ZoneCatalogBuilder::new(client.clone(), client.clone(), config.clone())
//!     .build(&org, &cancel)
//!     .await?;
//!
//! let resolver = Arc::new(HickoryNameserverResolver::google(config.lookup_timeout));
//! let report = ReconciliationEngine::new(client, resolver, config)
//!     .reconcile(&catalog, &cancel)
//!     .await?;
//!
//! FindingReporter::new(std::io::stdout()).report(&report.findings)?;
//! # Ok(())
//! # }
//! ```

mod catalog;
mod config;
mod engine;
mod report;
mod resolver;

#[cfg(test)]
mod testing;

pub use catalog::{CatalogExclusion, ZoneCatalog, ZoneCatalogBuilder};
pub use config::{AuditConfig, DEFAULT_CONCURRENCY, DEFAULT_LOOKUP_TIMEOUT};
pub use engine::{ReconciliationEngine, ReconciliationReport, ReconciliationState, SkippedZone};
pub use report::{format_finding, FindingReporter};
pub use resolver::{attempt_timeout, HickoryNameserverResolver, LOOKUP_RETRIES};
