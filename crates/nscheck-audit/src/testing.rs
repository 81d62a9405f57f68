//! In-memory collaborators for catalog and engine tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use nscheck_core::name::normalize;
use nscheck_core::{
    AssetCatalog, AssetPage, AssetRef, ManagedZone, NameserverAnswer, NameserverResolver,
    NsCheckError, Organization, ResolutionError, ResolutionFailure, ResourceRecordSet, Result,
    ZoneDirectory,
};

pub fn asset_name(project: &str, zone: &str) -> String {
    format!("//dns.googleapis.com/projects/{project}/managedZones/{zone}")
}

/// Asset listing served from fixed pages; page tokens are page indexes
#[derive(Debug, Clone, Default)]
pub struct FakeAssets {
    pages: Vec<Vec<String>>,
    fail_on: Option<usize>,
}

impl FakeAssets {
    pub fn pages(pages: Vec<Vec<String>>) -> Self {
        Self {
            pages,
            fail_on: None,
        }
    }

    pub fn fail_on_page(mut self, page: usize) -> Self {
        self.fail_on = Some(page);
        self
    }
}

#[async_trait]
impl AssetCatalog for FakeAssets {
    async fn list_managed_zone_assets(
        &self,
        _organization: &Organization,
        page_token: Option<&str>,
    ) -> Result<AssetPage> {
        let index = page_token.map_or(Ok(0), str::parse::<usize>).map_err(|e| {
            NsCheckError::Internal(format!("bad page token: {e}"))
        })?;
        if self.fail_on == Some(index) {
            return Err(NsCheckError::Http("connection reset".into()));
        }

        let assets = self
            .pages
            .get(index)
            .map(|names| {
                names
                    .iter()
                    .map(|n| AssetRef::new(n.clone(), "dns.googleapis.com/ManagedZone"))
                    .collect()
            })
            .unwrap_or_default();
        let next_page_token = (index + 1 < self.pages.len()).then(|| (index + 1).to_string());

        Ok(AssetPage {
            assets,
            next_page_token,
        })
    }
}

/// Zone metadata and record sets keyed by zone identifier
#[derive(Debug, Clone, Default)]
pub struct FakeDirectory {
    zones: HashMap<String, ManagedZone>,
    records: HashMap<String, Vec<ResourceRecordSet>>,
    failing: HashSet<String>,
    list_calls: Arc<AtomicUsize>,
}

impl FakeDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn zone(mut self, zone: ManagedZone) -> Self {
        self.zones.insert(zone.identifier.clone(), zone);
        self
    }

    pub fn records(mut self, identifier: &str, records: Vec<ResourceRecordSet>) -> Self {
        self.records.insert(identifier.to_string(), records);
        self
    }

    /// Make record listing for this zone fail with a transport error
    pub fn failing(mut self, identifier: &str) -> Self {
        self.failing.insert(identifier.to_string());
        self
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ZoneDirectory for FakeDirectory {
    async fn get(&self, project_id: &str, zone_name: &str) -> Result<ManagedZone> {
        let identifier = format!("{project_id}/{zone_name}");
        self.zones
            .get(&identifier)
            .cloned()
            .ok_or(NsCheckError::NotFound {
                resource: identifier,
            })
    }

    async fn list_records(
        &self,
        project_id: &str,
        zone_name: &str,
    ) -> Result<Vec<ResourceRecordSet>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let identifier = format!("{project_id}/{zone_name}");
        if self.failing.contains(&identifier) {
            return Err(NsCheckError::Http("connection reset by peer".into()));
        }
        Ok(self.records.get(&identifier).cloned().unwrap_or_default())
    }
}

/// Fixed NS answers; unknown domains are NXDOMAIN
#[derive(Debug, Clone, Default)]
pub struct FakeResolver {
    answers: HashMap<String, NameserverAnswer>,
    delay: Option<Duration>,
}

impl FakeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(mut self, domain: &str, hosts: &[&str]) -> Self {
        self.answers.insert(
            normalize(domain),
            Ok(hosts.iter().map(|h| (*h).to_string()).collect()),
        );
        self
    }

    pub fn fail(mut self, domain: &str, cause: ResolutionFailure) -> Self {
        self.answers
            .insert(normalize(domain), Err(ResolutionError::new(domain, cause)));
        self
    }

    /// Delay every answer
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl NameserverResolver for FakeResolver {
    async fn lookup_ns(&self, domain: &str) -> NameserverAnswer {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.answers
            .get(&normalize(domain))
            .cloned()
            .unwrap_or_else(|| Err(ResolutionError::new(domain, ResolutionFailure::NxDomain)))
    }
}

pub fn ns(name: &str, values: &[&str]) -> ResourceRecordSet {
    ResourceRecordSet::new(name, "NS", values.iter().copied())
}
