//! Cloud DNS managed zone endpoints.

use crate::GcpClient;
use nscheck_core::{ManagedZone, ResourceRecordSet, Result, Visibility};
use serde::Deserialize;

/// Managed zone endpoints
pub struct ManagedZonesApi<'a> {
    client: &'a GcpClient,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ManagedZoneResource {
    #[serde(default)]
    name: String,
    dns_name: String,
    #[serde(default)]
    visibility: Option<String>,
    #[serde(default)]
    private_visibility_config: Option<serde_json::Value>,
}

impl ManagedZoneResource {
    fn visibility(&self) -> Visibility {
        let private = self
            .visibility
            .as_deref()
            .is_some_and(|v| v.eq_ignore_ascii_case("private"))
            || self.private_visibility_config.is_some();
        if private {
            Visibility::Private
        } else {
            Visibility::Public
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListRecordSetsResponse {
    #[serde(default)]
    rrsets: Vec<RecordSetResource>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RecordSetResource {
    name: String,
    #[serde(rename = "type")]
    record_type: String,
    #[serde(default)]
    rrdatas: Vec<String>,
}

impl<'a> ManagedZonesApi<'a> {
    pub(crate) fn new(client: &'a GcpClient) -> Self {
        Self { client }
    }

    fn zone_url(&self, project_id: &str, zone_name: &str) -> String {
        format!(
            "{}/dns/v1/projects/{project_id}/managedZones/{zone_name}",
            self.client.endpoints().dns
        )
    }

    /// Zone metadata
    pub async fn get(&self, project_id: &str, zone_name: &str) -> Result<ManagedZone> {
        let zone: ManagedZoneResource = self
            .client
            .get(&self.zone_url(project_id, zone_name), &[])
            .await?;

        let visibility = zone.visibility();
        let name = if zone.name.is_empty() {
            zone_name
        } else {
            zone.name.as_str()
        };
        Ok(ManagedZone::new(project_id, name, &zone.dns_name, visibility))
    }

    /// Every record set in the zone, across all pages
    pub async fn record_sets(
        &self,
        project_id: &str,
        zone_name: &str,
    ) -> Result<Vec<ResourceRecordSet>> {
        let url = format!("{}/rrsets", self.zone_url(project_id, zone_name));
        let mut record_sets = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let page: ListRecordSetsResponse = {
                let params: Vec<(&str, &str)> = page_token
                    .as_deref()
                    .map(|t| vec![("pageToken", t)])
                    .unwrap_or_default();
                self.client.get(&url, &params).await?
            };
            record_sets.extend(
                page.rrsets
                    .into_iter()
                    .map(|r| ResourceRecordSet::new(r.name, r.record_type, r.rrdatas)),
            );

            match super::next_token(page.next_page_token) {
                Some(token) => page_token = Some(token),
                None => return Ok(record_sets),
            }
        }
    }
}
