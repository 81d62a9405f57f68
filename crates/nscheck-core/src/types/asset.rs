use serde::{Deserialize, Serialize};

/// A managed zone asset as listed by the asset catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRef {
    /// Full resource name, e.g. `//dns.googleapis.com/projects/p/managedZones/z`
    pub name: String,

    /// Asset type, e.g. `dns.googleapis.com/ManagedZone`
    #[serde(default)]
    pub asset_type: String,
}

impl AssetRef {
    /// Create an asset reference from its resource name
    #[must_use]
    pub fn new(name: impl Into<String>, asset_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            asset_type: asset_type.into(),
        }
    }
}

/// One page of an asset listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetPage {
    /// Assets on this page
    pub assets: Vec<AssetRef>,

    /// Token for the next page, absent on the last one
    pub next_page_token: Option<String>,
}
