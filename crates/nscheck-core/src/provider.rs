//! Collaborator traits consumed by the audit.
//!
//! Each trait is a thin capability over an external system: credentials,
//! the organization directory, the asset catalog, the managed zone API and
//! the live DNS. The Google Cloud implementations live in `nscheck-client`,
//! the DNS one in `nscheck-audit`.

use async_trait::async_trait;

use crate::compare::NameserverAnswer;
use crate::error::Result;
use crate::types::{AssetPage, Credentials, ManagedZone, Organization, ResourceRecordSet};

/// Source of API credentials
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Obtain credentials, failing with `Credentials` or `Unauthorized`
    async fn obtain(&self) -> Result<Credentials>;
}

/// Lists the organizations visible to the caller
#[async_trait]
pub trait OrganizationDirectory: Send + Sync {
    /// All visible organizations
    async fn list_organizations(&self) -> Result<Vec<Organization>>;
}

/// Enumerates managed zone assets under an organization.
///
/// Listing is paged: start with `page_token = None` and follow
/// `next_page_token` until it is absent. Any page can be requested again.
#[async_trait]
pub trait AssetCatalog: Send + Sync {
    /// One page of managed zone assets
    async fn list_managed_zone_assets(
        &self,
        organization: &Organization,
        page_token: Option<&str>,
    ) -> Result<AssetPage>;
}

/// Per-zone configuration and record listings
#[async_trait]
pub trait ZoneDirectory: Send + Sync {
    /// Zone metadata, `NotFound` if the zone vanished
    async fn get(&self, project_id: &str, zone_name: &str) -> Result<ManagedZone>;

    /// Every record set in the zone
    async fn list_records(&self, project_id: &str, zone_name: &str)
        -> Result<Vec<ResourceRecordSet>>;
}

/// Live NS resolution
#[async_trait]
pub trait NameserverResolver: Send + Sync {
    /// Nameserver host names currently served for `domain`
    async fn lookup_ns(&self, domain: &str) -> NameserverAnswer;
}
