//! Cloud Resource Manager organization endpoints.

use crate::GcpClient;
use nscheck_core::{Organization, Result};
use serde::Deserialize;

/// Organization endpoints
pub struct OrganizationsApi<'a> {
    client: &'a GcpClient,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListOrganizationsResponse {
    #[serde(default)]
    organizations: Vec<OrganizationResource>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrganizationResource {
    name: String,
    #[serde(default)]
    organization_id: Option<String>,
    #[serde(default)]
    display_name: String,
}

impl From<OrganizationResource> for Organization {
    fn from(org: OrganizationResource) -> Self {
        let organization_id = org.organization_id.unwrap_or_else(|| {
            org.name
                .strip_prefix("organizations/")
                .unwrap_or(&org.name)
                .to_string()
        });
        Self {
            name: org.name,
            organization_id,
            display_name: org.display_name,
        }
    }
}

impl<'a> OrganizationsApi<'a> {
    pub(crate) fn new(client: &'a GcpClient) -> Self {
        Self { client }
    }

    /// List every organization the caller can see
    pub async fn list(&self) -> Result<Vec<Organization>> {
        let url = format!(
            "{}/v1beta1/organizations",
            self.client.endpoints().resource_manager
        );
        let mut organizations = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let page: ListOrganizationsResponse = {
                let params: Vec<(&str, &str)> = page_token
                    .as_deref()
                    .map(|t| vec![("pageToken", t)])
                    .unwrap_or_default();
                self.client.get(&url, &params).await?
            };
            organizations.extend(page.organizations.into_iter().map(Organization::from));

            match super::next_token(page.next_page_token) {
                Some(token) => page_token = Some(token),
                None => return Ok(organizations),
            }
        }
    }
}
