//! Cloud Asset endpoints.

use crate::GcpClient;
use nscheck_core::{AssetPage, AssetRef, Organization, Result};
use serde::Deserialize;

/// Asset type of a Cloud DNS managed zone
pub const MANAGED_ZONE_ASSET_TYPE: &str = "dns.googleapis.com/ManagedZone";

/// Asset listing endpoints
pub struct AssetsApi<'a> {
    client: &'a GcpClient,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListAssetsResponse {
    #[serde(default)]
    assets: Vec<AssetResource>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssetResource {
    name: String,
    #[serde(default)]
    asset_type: String,
}

impl<'a> AssetsApi<'a> {
    pub(crate) fn new(client: &'a GcpClient) -> Self {
        Self { client }
    }

    /// One page of managed zone assets under `organization`
    pub async fn managed_zones(
        &self,
        organization: &Organization,
        page_token: Option<&str>,
    ) -> Result<AssetPage> {
        let url = format!(
            "{}/v1/{}/assets",
            self.client.endpoints().asset,
            organization.name
        );
        let mut params = vec![("assetTypes", MANAGED_ZONE_ASSET_TYPE)];
        if let Some(token) = page_token {
            params.push(("pageToken", token));
        }

        let page: ListAssetsResponse = self.client.get(&url, &params).await?;
        Ok(AssetPage {
            assets: page
                .assets
                .into_iter()
                .map(|a| AssetRef::new(a.name, a.asset_type))
                .collect(),
            next_page_token: super::next_token(page.next_page_token),
        })
    }
}
