use serde::{Deserialize, Serialize};

use crate::error::{NsCheckError, Result};

/// An organization visible to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    /// Resource name, `organizations/<id>`
    pub name: String,

    /// Numeric organization id
    pub organization_id: String,

    /// Human-readable name
    pub display_name: String,
}

impl Organization {
    /// Returns true if `query` names this organization by display name, id or resource name
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        self.display_name == query || self.organization_id == query || self.name == query
    }
}

impl std::fmt::Display for Organization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.display_name, self.name)
    }
}

/// Pick the organization to audit.
///
/// Without a query the caller must see exactly one organization. With a
/// query exactly one organization must match it.
pub fn select_organization(orgs: Vec<Organization>, query: Option<&str>) -> Result<Organization> {
    let Some(query) = query.filter(|q| !q.is_empty()) else {
        let available = orgs.len();
        let mut orgs = orgs.into_iter();
        return match (orgs.next(), orgs.next()) {
            (Some(org), None) => Ok(org),
            _ => Err(NsCheckError::NoOrganizationSelected { available }),
        };
    };

    let mut matching: Vec<Organization> = orgs.into_iter().filter(|o| o.matches(query)).collect();
    match matching.len() {
        0 => Err(NsCheckError::OrganizationNotFound(query.to_string())),
        1 => Ok(matching.remove(0)),
        _ => Err(NsCheckError::OrganizationAmbiguous {
            query: query.to_string(),
            candidates: matching.into_iter().map(|o| o.name).collect(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn org(id: &str, display: &str) -> Organization {
        Organization {
            name: format!("organizations/{id}"),
            organization_id: id.to_string(),
            display_name: display.to_string(),
        }
    }

    #[test]
    fn single_org_selected_without_query() {
        let selected = select_organization(vec![org("1", "acme.com")], None).unwrap();
        assert_eq!(selected.organization_id, "1");
    }

    #[test]
    fn empty_query_behaves_like_none() {
        let selected = select_organization(vec![org("1", "acme.com")], Some("")).unwrap();
        assert_eq!(selected.organization_id, "1");
    }

    #[test]
    fn several_orgs_require_a_query() {
        let err = select_organization(vec![org("1", "a"), org("2", "b")], None).unwrap_err();
        assert!(matches!(err, NsCheckError::NoOrganizationSelected { available: 2 }));

        let err = select_organization(Vec::new(), None).unwrap_err();
        assert!(matches!(err, NsCheckError::NoOrganizationSelected { available: 0 }));
    }

    #[test]
    fn matches_display_name_id_or_resource_name() {
        let orgs = vec![org("1", "acme.com"), org("2", "example.org")];
        assert_eq!(select_organization(orgs.clone(), Some("example.org")).unwrap().organization_id, "2");
        assert_eq!(select_organization(orgs.clone(), Some("1")).unwrap().display_name, "acme.com");
        assert_eq!(
            select_organization(orgs, Some("organizations/2")).unwrap().display_name,
            "example.org"
        );
    }

    #[test]
    fn unknown_org_is_not_found() {
        let err = select_organization(vec![org("1", "acme.com")], Some("other")).unwrap_err();
        assert!(matches!(err, NsCheckError::OrganizationNotFound(ref q) if q == "other"));
    }

    #[test]
    fn duplicate_display_names_are_ambiguous() {
        let err = select_organization(vec![org("1", "acme"), org("2", "acme")], Some("acme"))
            .unwrap_err();
        match err {
            NsCheckError::OrganizationAmbiguous { candidates, .. } => {
                assert_eq!(candidates, vec!["organizations/1", "organizations/2"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
