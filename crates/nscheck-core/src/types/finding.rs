use serde::{Deserialize, Serialize};

use super::ManagedZone;

/// Severity of a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Informational
    Info,
    /// Worth a look
    Warning,
    /// Misconfiguration
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARNING"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// Category of a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FindingKind {
    /// A second zone claims a domain already owned by another zone
    DuplicateZoneOwnership,
    /// The zone's own apex NS record does not resolve
    UnresolvedRootDelegation,
    /// A delegated subdomain's NS record does not resolve
    UnresolvedSubdomainDelegation,
    /// Declared and live nameserver sets differ
    NameserverMismatch,
    /// A delegation points at a subdomain no managed zone owns
    OrphanedSubdomainReferral,
}

impl FindingKind {
    /// All kinds, in reporting order
    pub const ALL: [Self; 5] = [
        Self::DuplicateZoneOwnership,
        Self::UnresolvedRootDelegation,
        Self::UnresolvedSubdomainDelegation,
        Self::NameserverMismatch,
        Self::OrphanedSubdomainReferral,
    ];

    /// Severity a finding of this kind is reported at
    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Self::DuplicateZoneOwnership
            | Self::UnresolvedRootDelegation
            | Self::UnresolvedSubdomainDelegation
            | Self::NameserverMismatch
            | Self::OrphanedSubdomainReferral => Severity::Error,
        }
    }

    /// Upper-case tag used in reports
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DuplicateZoneOwnership => "DUPLICATE_ZONE_OWNERSHIP",
            Self::UnresolvedRootDelegation => "UNRESOLVED_ROOT_DELEGATION",
            Self::UnresolvedSubdomainDelegation => "UNRESOLVED_SUBDOMAIN_DELEGATION",
            Self::NameserverMismatch => "NAMESERVER_MISMATCH",
            Self::OrphanedSubdomainReferral => "ORPHANED_SUBDOMAIN_REFERRAL",
        }
    }
}

impl std::fmt::Display for FindingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single audit result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// How serious the finding is
    pub severity: Severity,

    /// Domain the finding is about
    pub domain: String,

    /// Identifier of the zone the finding is attributed to
    pub zone_identifier: String,

    /// Project hosting that zone
    pub project_id: String,

    /// Finding category
    pub kind: FindingKind,

    /// Human-readable explanation
    pub detail: String,

    /// Declared nameservers the live answer lacks (mismatches only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<String>,

    /// Live nameservers the zone does not declare (mismatches only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extraneous: Vec<String>,
}

impl Finding {
    /// Create a finding attributed to `zone`
    #[must_use]
    pub fn new(
        kind: FindingKind,
        zone: &ManagedZone,
        domain: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            severity: kind.severity(),
            domain: domain.into(),
            zone_identifier: zone.identifier.clone(),
            project_id: zone.project_id.clone(),
            kind,
            detail: detail.into(),
            missing: Vec::new(),
            extraneous: Vec::new(),
        }
    }

    /// Attach the differing nameserver sets of a mismatch
    #[must_use]
    pub fn with_differences(mut self, missing: Vec<String>, extraneous: Vec<String>) -> Self {
        self.missing = missing;
        self.extraneous = extraneous;
        self
    }
}
