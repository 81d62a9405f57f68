use serde::{Deserialize, Serialize};

use crate::name::normalize;

/// Record type of a nameserver record set
pub const NS_RECORD_TYPE: &str = "NS";

/// Who can resolve a managed zone
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Visibility {
    /// Served on the public internet
    #[default]
    Public,
    /// Only visible inside selected networks
    Private,
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Public => write!(f, "public"),
            Self::Private => write!(f, "private"),
        }
    }
}

/// One DNS zone under organizational control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagedZone {
    /// Stable key: `{project}/{zone}`
    pub identifier: String,

    /// Hosting project
    pub project_id: String,

    /// Zone name within the project
    pub zone_name: String,

    /// Canonical domain of the zone, normalized
    pub dns_name: String,

    /// Zone visibility
    pub visibility: Visibility,
}

impl ManagedZone {
    /// Create a zone, normalizing its DNS name
    #[must_use]
    pub fn new(
        project_id: impl Into<String>,
        zone_name: impl Into<String>,
        dns_name: &str,
        visibility: Visibility,
    ) -> Self {
        let project_id = project_id.into();
        let zone_name = zone_name.into();
        Self {
            identifier: format!("{project_id}/{zone_name}"),
            project_id,
            zone_name,
            dns_name: normalize(dns_name),
            visibility,
        }
    }

    /// Returns true for publicly resolvable zones
    #[must_use]
    pub const fn is_public(&self) -> bool {
        matches!(self.visibility, Visibility::Public)
    }
}

/// Record data for one label as declared by the authoritative zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRecordSet {
    /// Owner name of the records
    pub name: String,

    /// Record type (A, NS, SOA, ...)
    #[serde(rename = "type")]
    pub record_type: String,

    /// Record values in declaration order
    #[serde(default)]
    pub values: Vec<String>,
}

impl ResourceRecordSet {
    /// Create a record set
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        record_type: impl Into<String>,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            record_type: record_type.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true for NS record sets
    #[must_use]
    pub fn is_nameserver(&self) -> bool {
        self.record_type.eq_ignore_ascii_case(NS_RECORD_TYPE)
    }
}
