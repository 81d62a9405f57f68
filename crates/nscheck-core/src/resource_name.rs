//! Managed zone resource names as listed by the asset catalog.
//!
//! Grammar:
//!
//! ```text
//! resource-name = "//dns." provider "/projects/" project "/managedZones/" zone
//! provider      = 1*( any char except "/" )
//! project       = 1*( any char except "/" )
//! zone          = 1*( any char except "/" )
//! ```
//!
//! For Google Cloud the provider is `googleapis.com`, e.g.
//! `//dns.googleapis.com/projects/my-project/managedZones/example-com`.

use crate::error::{NsCheckError, Result};
use serde::{Deserialize, Serialize};

const SCHEME: &str = "//dns.";
const PROJECTS: &str = "projects";
const MANAGED_ZONES: &str = "managedZones";

/// The parts of a managed zone resource name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ZoneResourceName {
    /// Hosting provider domain, e.g. `googleapis.com`
    pub provider: String,
    /// Project hosting the zone
    pub project_id: String,
    /// Zone name within the project
    pub zone_name: String,
}

impl ZoneResourceName {
    /// Stable identifier combining project and zone: `{project}/{zone}`
    #[must_use]
    pub fn identifier(&self) -> String {
        format!("{}/{}", self.project_id, self.zone_name)
    }
}

impl std::fmt::Display for ZoneResourceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{SCHEME}{}/{PROJECTS}/{}/{MANAGED_ZONES}/{}",
            self.provider, self.project_id, self.zone_name
        )
    }
}

impl std::str::FromStr for ZoneResourceName {
    type Err = NsCheckError;

    fn from_str(s: &str) -> Result<Self> {
        parse_managed_zone_name(s)
    }
}

/// Parse a catalog resource name into provider, project and zone.
///
/// Returns [`NsCheckError::InvalidResourceName`] for anything that does not
/// follow the grammar in the module docs.
pub fn parse_managed_zone_name(name: &str) -> Result<ZoneResourceName> {
    let invalid = || NsCheckError::InvalidResourceName(name.to_string());

    let rest = name.strip_prefix(SCHEME).ok_or_else(invalid)?;
    let mut segments = rest.split('/');

    let provider = segments.next().filter(|s| !s.is_empty()).ok_or_else(invalid)?;
    if segments.next() != Some(PROJECTS) {
        return Err(invalid());
    }
    let project_id = segments.next().filter(|s| !s.is_empty()).ok_or_else(invalid)?;
    if segments.next() != Some(MANAGED_ZONES) {
        return Err(invalid());
    }
    let zone_name = segments.next().filter(|s| !s.is_empty()).ok_or_else(invalid)?;
    if segments.next().is_some() {
        return Err(invalid());
    }

    Ok(ZoneResourceName {
        provider: provider.to_string(),
        project_id: project_id.to_string(),
        zone_name: zone_name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_google_zone() {
        let parsed =
            parse_managed_zone_name("//dns.googleapis.com/projects/my-project/managedZones/example-com")
                .unwrap();
        assert_eq!(parsed.provider, "googleapis.com");
        assert_eq!(parsed.project_id, "my-project");
        assert_eq!(parsed.zone_name, "example-com");
        assert_eq!(parsed.identifier(), "my-project/example-com");
    }

    #[test]
    fn display_round_trips() {
        let name = "//dns.googleapis.com/projects/p/managedZones/z";
        assert_eq!(parse_managed_zone_name(name).unwrap().to_string(), name);
    }

    #[test]
    fn from_str() {
        let parsed: ZoneResourceName = "//dns.example.net/projects/p1/managedZones/z1".parse().unwrap();
        assert_eq!(parsed.provider, "example.net");
    }

    #[test]
    fn rejects_malformed_names() {
        let bad = [
            "",
            "dns.googleapis.com/projects/p/managedZones/z",
            "//compute.googleapis.com/projects/p/managedZones/z",
            "//dns./projects/p/managedZones/z",
            "//dns.googleapis.com/projects//managedZones/z",
            "//dns.googleapis.com/projects/p/managedZones/",
            "//dns.googleapis.com/projects/p/managedZones",
            "//dns.googleapis.com/folders/p/managedZones/z",
            "//dns.googleapis.com/projects/p/policies/z",
            "//dns.googleapis.com/projects/p/managedZones/z/rrsets",
        ];
        for name in bad {
            let err = parse_managed_zone_name(name).unwrap_err();
            assert!(
                matches!(err, NsCheckError::InvalidResourceName(ref n) if n == name),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn accepts_numeric_and_dotted_segments() {
        let parsed =
            parse_managed_zone_name("//dns.googleapis.com/projects/123456789/managedZones/zone.v2")
                .unwrap();
        assert_eq!(parsed.project_id, "123456789");
        assert_eq!(parsed.zone_name, "zone.v2");
    }
}
