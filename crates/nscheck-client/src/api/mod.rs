//! API endpoint modules.

mod assets;
mod dns;
mod organizations;

pub use assets::{AssetsApi, MANAGED_ZONE_ASSET_TYPE};
pub use dns::ManagedZonesApi;
pub use organizations::OrganizationsApi;

/// Google list responses send `""` or omit the token on the last page
pub(crate) fn next_token(token: Option<String>) -> Option<String> {
    token.filter(|t| !t.is_empty())
}
