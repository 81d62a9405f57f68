//! Collaborator trait implementations for [`GcpClient`].

use async_trait::async_trait;
use nscheck_core::{
    AssetCatalog, AssetPage, ManagedZone, Organization, OrganizationDirectory, ResourceRecordSet,
    Result, ZoneDirectory,
};

use crate::GcpClient;

#[async_trait]
impl OrganizationDirectory for GcpClient {
    async fn list_organizations(&self) -> Result<Vec<Organization>> {
        self.organizations().list().await
    }
}

#[async_trait]
impl AssetCatalog for GcpClient {
    async fn list_managed_zone_assets(
        &self,
        organization: &Organization,
        page_token: Option<&str>,
    ) -> Result<AssetPage> {
        self.assets().managed_zones(organization, page_token).await
    }
}

#[async_trait]
impl ZoneDirectory for GcpClient {
    async fn get(&self, project_id: &str, zone_name: &str) -> Result<ManagedZone> {
        self.managed_zones().get(project_id, zone_name).await
    }

    async fn list_records(
        &self,
        project_id: &str,
        zone_name: &str,
    ) -> Result<Vec<ResourceRecordSet>> {
        self.managed_zones().record_sets(project_id, zone_name).await
    }
}
