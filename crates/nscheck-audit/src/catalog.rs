//! Zone catalog construction.
//!
//! The builder walks every page of managed zone assets, parses each asset's
//! resource name and fetches the zone's metadata. Per-asset problems (a
//! malformed name, a zone that vanished or became unreadable) exclude that
//! one asset and are recorded; only a failure to enumerate the assets
//! themselves aborts the build.

use std::collections::BTreeMap;
use std::sync::Arc;

use futures_util::stream::{self, StreamExt};
use nscheck_core::{
    parse_managed_zone_name, AssetCatalog, AssetRef, ManagedZone, NsCheckError, Organization,
    Result, ZoneDirectory, ZoneResourceName,
};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::config::AuditConfig;

/// An asset left out of the catalog, and why
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogExclusion {
    /// Full resource name of the asset
    pub asset: String,
    /// What went wrong
    pub reason: String,
}

/// Zones under audit, keyed by zone identifier (`{project}/{zone}`)
#[derive(Debug, Clone, Default)]
pub struct ZoneCatalog {
    organization: Option<String>,
    zones: BTreeMap<String, ManagedZone>,
    excluded: Vec<CatalogExclusion>,
}

impl ZoneCatalog {
    /// Create an empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag the catalog with the organization it was built for
    #[must_use]
    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = Some(organization.into());
        self
    }

    /// Resource name of the organization, if known
    #[must_use]
    pub fn organization(&self) -> Option<&str> {
        self.organization.as_deref()
    }

    /// Add a zone, replacing any zone with the same identifier
    pub fn insert(&mut self, zone: ManagedZone) -> Option<ManagedZone> {
        self.zones.insert(zone.identifier.clone(), zone)
    }

    /// Record an asset that could not be catalogued
    pub fn exclude(&mut self, asset: impl Into<String>, reason: impl Into<String>) {
        self.excluded.push(CatalogExclusion {
            asset: asset.into(),
            reason: reason.into(),
        });
    }

    /// Zones in identifier order
    pub fn zones(&self) -> impl Iterator<Item = &ManagedZone> {
        self.zones.values()
    }

    /// Look up a zone by identifier
    #[must_use]
    pub fn get(&self, identifier: &str) -> Option<&ManagedZone> {
        self.zones.get(identifier)
    }

    /// Assets excluded while building
    #[must_use]
    pub fn excluded(&self) -> &[CatalogExclusion] {
        &self.excluded
    }

    /// Number of zones
    #[must_use]
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    /// Returns true if the catalog holds no zones
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

impl FromIterator<ManagedZone> for ZoneCatalog {
    fn from_iter<I: IntoIterator<Item = ManagedZone>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for zone in iter {
            catalog.insert(zone);
        }
        catalog
    }
}

/// Builds a [`ZoneCatalog`] from the asset catalog and zone directory
#[derive(Clone)]
pub struct ZoneCatalogBuilder {
    assets: Arc<dyn AssetCatalog>,
    directory: Arc<dyn ZoneDirectory>,
    config: AuditConfig,
}

enum Lookup {
    Zone(ManagedZone),
    Private(ManagedZone),
    Excluded(CatalogExclusion),
}

impl ZoneCatalogBuilder {
    /// Create a builder over the given collaborators
    #[must_use]
    pub fn new(
        assets: Arc<dyn AssetCatalog>,
        directory: Arc<dyn ZoneDirectory>,
        config: AuditConfig,
    ) -> Self {
        Self {
            assets,
            directory,
            config,
        }
    }

    /// Enumerate every managed zone of `organization`.
    ///
    /// Fails only if enumeration itself fails or `cancel` fires.
    #[instrument(skip(self, cancel), fields(organization = %organization.name))]
    pub async fn build(
        &self,
        organization: &Organization,
        cancel: &CancellationToken,
    ) -> Result<ZoneCatalog> {
        tokio::select! {
            biased;
            () = cancel.cancelled() => Err(NsCheckError::Cancelled),
            catalog = self.build_all(organization) => catalog,
        }
    }

    async fn build_all(&self, organization: &Organization) -> Result<ZoneCatalog> {
        let mut catalog = ZoneCatalog::new().with_organization(&organization.name);
        let mut page_token: Option<String> = None;
        let mut pages = 0usize;

        loop {
            let page = self
                .assets
                .list_managed_zone_assets(organization, page_token.as_deref())
                .await?;
            pages += 1;
            debug!(page = pages, assets = page.assets.len(), "fetched asset page");

            let lookups: Vec<Lookup> = stream::iter(page.assets)
                .map(|asset| self.lookup(asset))
                .buffered(self.config.effective_concurrency())
                .collect()
                .await;

            for lookup in lookups {
                match lookup {
                    Lookup::Zone(zone) => {
                        if let Some(previous) = catalog.insert(zone) {
                            debug!(zone = %previous.identifier, "asset listed more than once");
                        }
                    }
                    Lookup::Private(zone) => {
                        debug!(zone = %zone.identifier, "skipping private zone");
                    }
                    Lookup::Excluded(exclusion) => catalog.excluded.push(exclusion),
                }
            }

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        info!(
            zones = catalog.len(),
            excluded = catalog.excluded.len(),
            "zone catalog built"
        );
        Ok(catalog)
    }

    async fn lookup(&self, asset: AssetRef) -> Lookup {
        let resource: ZoneResourceName = match parse_managed_zone_name(&asset.name) {
            Ok(resource) => resource,
            Err(e) => {
                warn!(asset = %asset.name, error = %e, "skipping asset");
                return Lookup::Excluded(CatalogExclusion {
                    asset: asset.name,
                    reason: e.to_string(),
                });
            }
        };

        match self
            .directory
            .get(&resource.project_id, &resource.zone_name)
            .await
        {
            Ok(zone) if zone.is_public() || self.config.include_private_zones => Lookup::Zone(zone),
            Ok(zone) => Lookup::Private(zone),
            Err(e) => {
                warn!(zone = %resource.identifier(), error = %e, "failed to fetch zone metadata");
                Lookup::Excluded(CatalogExclusion {
                    asset: asset.name,
                    reason: e.to_string(),
                })
            }
        }
    }
}
