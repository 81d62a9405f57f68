//! Nameserver reconciliation.
//!
//! A run has three phases:
//!
//! 1. **Ownership**: every zone claims its `dns_name`, in identifier order.
//!    The first claimant owns the domain, every later one is reported as a
//!    duplicate. Running this before any lookup makes duplicate detection
//!    independent of how the per-zone phase is scheduled.
//! 2. **Per-zone audit**: each zone's NS record sets are resolved live and
//!    compared with what the zone declares. Zones are audited concurrently
//!    but their results are collected in catalog order. A zone whose
//!    records cannot be listed is skipped and recorded, never fatal.
//! 3. **Orphans**: once every zone has finished, delegations to subdomains
//!    that no catalogued zone owns are reported.
//!
//! Workers never touch [`ReconciliationState`]; they hand back their
//! findings and referrals and the coordinator merges them after the join.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures_util::stream::{self, StreamExt};
use nscheck_core::name::normalize;
use nscheck_core::{
    evaluate, ComparisonVerdict, Finding, FindingKind, ManagedZone, NameserverAnswer,
    NameserverResolver, NsCheckError, ResolutionError, ResolutionFailure, ResourceRecordSet,
    Result, ZoneDirectory,
};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::catalog::ZoneCatalog;
use crate::config::AuditConfig;

/// A zone whose records could not be audited
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedZone {
    /// Zone identifier
    pub zone_identifier: String,
    /// Hosting project
    pub project_id: String,
    /// Why the zone was skipped
    pub reason: String,
}

/// Outcome of one reconciliation pass
#[derive(Debug, Clone, Serialize)]
pub struct ReconciliationReport {
    /// Organization the catalog was built for
    pub organization: Option<String>,
    /// When the pass started
    pub started_at: DateTime<Utc>,
    /// When the pass completed
    pub finished_at: DateTime<Utc>,
    /// Zones whose records were audited
    pub zones_audited: usize,
    /// Findings in reporting order
    pub findings: Vec<Finding>,
    /// Zones skipped because their records could not be listed
    pub skipped: Vec<SkippedZone>,
}

impl ReconciliationReport {
    /// Returns true if the pass produced no findings
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    /// Number of findings of the given kind
    #[must_use]
    pub fn count(&self, kind: FindingKind) -> usize {
        self.findings.iter().filter(|f| f.kind == kind).count()
    }
}

/// Cross-zone bookkeeping for a single run
#[derive(Debug, Clone, Default)]
pub struct ReconciliationState {
    domain_to_owning_zone: BTreeMap<String, ManagedZone>,
    subdomain_referrals: BTreeMap<String, ManagedZone>,
}

impl ReconciliationState {
    /// Register `zone` as the owner of its domain.
    ///
    /// Returns the existing owner if another zone already claimed it.
    pub fn claim(&mut self, zone: &ManagedZone) -> Option<&ManagedZone> {
        let key = normalize(&zone.dns_name);
        if self.domain_to_owning_zone.contains_key(&key) {
            return self
                .domain_to_owning_zone
                .get(&key)
                .filter(|owner| owner.identifier != zone.identifier);
        }
        self.domain_to_owning_zone.insert(key, zone.clone());
        None
    }

    /// Record that `parent` delegates `subdomain`. The first parent wins.
    pub fn refer(&mut self, subdomain: &str, parent: &ManagedZone) {
        self.subdomain_referrals
            .entry(normalize(subdomain))
            .or_insert_with(|| parent.clone());
    }

    /// Zone owning `domain`, if any
    #[must_use]
    pub fn owner(&self, domain: &str) -> Option<&ManagedZone> {
        self.domain_to_owning_zone.get(&normalize(domain))
    }

    /// Referred subdomains without an owning zone, ordered by subdomain
    pub fn orphans(&self) -> impl Iterator<Item = (&str, &ManagedZone)> {
        self.subdomain_referrals
            .iter()
            .filter(|(subdomain, _)| !self.domain_to_owning_zone.contains_key(*subdomain))
            .map(|(subdomain, parent)| (subdomain.as_str(), parent))
    }
}

/// What one zone's audit hands back to the coordinator
#[derive(Debug, Default)]
struct ZoneAudit {
    findings: Vec<Finding>,
    referrals: Vec<String>,
    skipped: Option<SkippedZone>,
}

/// Walks a [`ZoneCatalog`] and classifies every delegation problem
#[derive(Clone)]
pub struct ReconciliationEngine {
    directory: Arc<dyn ZoneDirectory>,
    resolver: Arc<dyn NameserverResolver>,
    config: AuditConfig,
}

impl std::fmt::Debug for ReconciliationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReconciliationEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ReconciliationEngine {
    /// Create an engine over the given collaborators
    #[must_use]
    pub fn new(
        directory: Arc<dyn ZoneDirectory>,
        resolver: Arc<dyn NameserverResolver>,
        config: AuditConfig,
    ) -> Self {
        Self {
            directory,
            resolver,
            config,
        }
    }

    /// Audit every zone in `catalog`.
    ///
    /// Per-zone and per-record failures become findings or skip records;
    /// the only error is [`NsCheckError::Cancelled`] when `cancel` fires
    /// before the pass completes.
    #[instrument(skip_all, fields(zones = catalog.len()))]
    pub async fn reconcile(
        &self,
        catalog: &ZoneCatalog,
        cancel: &CancellationToken,
    ) -> Result<ReconciliationReport> {
        if cancel.is_cancelled() {
            return Err(NsCheckError::Cancelled);
        }
        let started_at = Utc::now();
        let mut state = ReconciliationState::default();
        let mut findings = Vec::new();

        for zone in catalog.zones() {
            if let Some(owner) = state.claim(zone) {
                warn!(
                    domain = %zone.dns_name,
                    zone = %zone.identifier,
                    owner = %owner.identifier,
                    "duplicate zone ownership"
                );
                let detail = format!(
                    "{} is already served by zone {} in project {}",
                    zone.dns_name, owner.identifier, owner.project_id
                );
                findings.push(Finding::new(
                    FindingKind::DuplicateZoneOwnership,
                    zone,
                    zone.dns_name.clone(),
                    detail,
                ));
            }
        }

        let audits: Vec<(&ManagedZone, ZoneAudit)> = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(NsCheckError::Cancelled),
            audits = stream::iter(catalog.zones())
                .map(|zone| async move { (zone, self.audit_zone(zone).await) })
                .buffered(self.config.effective_concurrency())
                .collect::<Vec<_>>() => audits,
        };

        let mut skipped = Vec::new();
        for (zone, audit) in audits {
            findings.extend(audit.findings);
            for subdomain in &audit.referrals {
                state.refer(subdomain, zone);
            }
            skipped.extend(audit.skipped);
        }

        for (subdomain, parent) in state.orphans() {
            warn!(domain = %subdomain, zone = %parent.identifier, "orphaned subdomain referral");
            let detail = format!(
                "zone {} delegates {subdomain} but no managed zone serves it",
                parent.identifier
            );
            findings.push(Finding::new(
                FindingKind::OrphanedSubdomainReferral,
                parent,
                subdomain,
                detail,
            ));
        }

        let zones_audited = catalog.len() - skipped.len();
        info!(
            zones_audited,
            skipped = skipped.len(),
            findings = findings.len(),
            "reconciliation complete"
        );

        Ok(ReconciliationReport {
            organization: catalog.organization().map(ToString::to_string),
            started_at,
            finished_at: Utc::now(),
            zones_audited,
            findings,
            skipped,
        })
    }

    async fn audit_zone(&self, zone: &ManagedZone) -> ZoneAudit {
        let records = match self
            .directory
            .list_records(&zone.project_id, &zone.zone_name)
            .await
        {
            Ok(records) => records,
            Err(e) => {
                warn!(zone = %zone.identifier, error = %e, "failed to list records, skipping zone");
                return ZoneAudit {
                    skipped: Some(SkippedZone {
                        zone_identifier: zone.identifier.clone(),
                        project_id: zone.project_id.clone(),
                        reason: e.to_string(),
                    }),
                    ..ZoneAudit::default()
                };
            }
        };

        let mut audit = ZoneAudit::default();
        for record in records.iter().filter(|r| r.is_nameserver()) {
            let name = normalize(&record.name);
            let apex = name == zone.dns_name;
            if !apex {
                audit.referrals.push(name.clone());
            }

            let answer = self.lookup(&name).await;
            if let Some(finding) = classify(zone, record, &name, apex, &answer) {
                audit.findings.push(finding);
            }
        }
        audit
    }

    /// Hard cap on one lookup. [`HickoryNameserverResolver`] spreads its own
    /// retries within the same budget.
    ///
    /// [`HickoryNameserverResolver`]: crate::HickoryNameserverResolver
    async fn lookup(&self, domain: &str) -> NameserverAnswer {
        let timeout: Duration = self.config.lookup_timeout;
        match tokio::time::timeout(timeout, self.resolver.lookup_ns(domain)).await {
            Ok(answer) => answer,
            Err(_) => Err(ResolutionError::new(domain, ResolutionFailure::Timeout)),
        }
    }
}

fn classify(
    zone: &ManagedZone,
    record: &ResourceRecordSet,
    name: &str,
    apex: bool,
    answer: &NameserverAnswer,
) -> Option<Finding> {
    match evaluate(&record.values, answer) {
        ComparisonVerdict::Match => {
            debug!(zone = %zone.identifier, domain = %name, "nameservers match");
            None
        }
        ComparisonVerdict::Unresolved { cause } => {
            let (kind, what) = if apex {
                (FindingKind::UnresolvedRootDelegation, "apex")
            } else {
                (FindingKind::UnresolvedSubdomainDelegation, "delegated subdomain")
            };
            info!(zone = %zone.identifier, domain = %name, %cause, "NS lookup failed");
            Some(Finding::new(
                kind,
                zone,
                name,
                format!("NS lookup for {what} {name} failed: {cause}"),
            ))
        }
        ComparisonVerdict::Mismatch {
            extraneous,
            missing,
        } => {
            info!(zone = %zone.identifier, domain = %name, "nameserver mismatch");
            let missing: Vec<String> = missing.into_iter().collect();
            let extraneous: Vec<String> = extraneous.into_iter().collect();
            let detail = format!(
                "declared and live nameservers differ: missing [{}], extraneous [{}]",
                missing.join(", "),
                extraneous.join(", ")
            );
            Some(
                Finding::new(FindingKind::NameserverMismatch, zone, name, detail)
                    .with_differences(missing, extraneous),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ns, FakeDirectory, FakeResolver};
    use nscheck_core::Visibility;

    fn zone(project: &str, name: &str, dns_name: &str) -> ManagedZone {
        ManagedZone::new(project, name, dns_name, Visibility::Public)
    }

    fn engine(directory: FakeDirectory, resolver: FakeResolver) -> ReconciliationEngine {
        ReconciliationEngine::new(
            Arc::new(directory),
            Arc::new(resolver),
            AuditConfig::default(),
        )
    }

    async fn run(
        catalog: &ZoneCatalog,
        directory: FakeDirectory,
        resolver: FakeResolver,
    ) -> ReconciliationReport {
        engine(directory, resolver)
            .reconcile(catalog, &CancellationToken::new())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn matching_zone_is_clean() {
        let catalog: ZoneCatalog = [zone("p", "a", "a.com.")].into_iter().collect();
        let directory = FakeDirectory::new().records(
            "p/a",
            vec![
                ns("a.com.", &["ns1.a.com.", "ns2.a.com."]),
                ResourceRecordSet::new("a.com.", "SOA", ["ns1.a.com. hostmaster.a.com. 1 2 3 4 5"]),
            ],
        );
        let resolver = FakeResolver::new().answer("a.com", &["NS2.A.COM", "ns1.a.com"]);

        let report = run(&catalog, directory, resolver).await;
        assert!(report.is_clean());
        assert_eq!(report.zones_audited, 1);
        assert!(report.skipped.is_empty());
    }

    #[tokio::test]
    async fn mismatch_reports_missing_and_extraneous() {
        let catalog: ZoneCatalog = [zone("p", "x", "a.com.")].into_iter().collect();
        let directory =
            FakeDirectory::new().records("p/x", vec![ns("a.com.", &["ns1.a.com", "ns2.a.com"])]);
        let resolver = FakeResolver::new().answer("a.com.", &["ns1.a.com", "ns3.a.com"]);

        let report = run(&catalog, directory, resolver).await;
        assert_eq!(report.findings.len(), 1);
        let finding = &report.findings[0];
        assert_eq!(finding.kind, FindingKind::NameserverMismatch);
        assert_eq!(finding.domain, "a.com.");
        assert_eq!(finding.zone_identifier, "p/x");
        assert_eq!(finding.missing, vec!["ns2.a.com."]);
        assert_eq!(finding.extraneous, vec!["ns3.a.com."]);
        assert_eq!(
            finding.detail,
            "declared and live nameservers differ: missing [ns2.a.com.], extraneous [ns3.a.com.]"
        );
    }

    #[tokio::test]
    async fn nxdomain_apex_is_unresolved_root_only() {
        let catalog: ZoneCatalog = [zone("p", "x", "a.com.")].into_iter().collect();
        let directory =
            FakeDirectory::new().records("p/x", vec![ns("a.com.", &["ns1.a.com", "ns2.a.com"])]);
        let resolver = FakeResolver::new().fail("a.com.", ResolutionFailure::NxDomain);

        let report = run(&catalog, directory, resolver).await;
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].kind, FindingKind::UnresolvedRootDelegation);
        assert!(report.findings[0].detail.contains("NXDOMAIN"));
        assert_eq!(report.count(FindingKind::NameserverMismatch), 0);
    }

    #[tokio::test]
    async fn failed_subdomain_lookup_is_unresolved_subdomain() {
        let catalog: ZoneCatalog = [
            zone("p", "a", "a.com."),
            zone("p", "sub", "sub.a.com."),
        ]
        .into_iter()
        .collect();
        let directory = FakeDirectory::new()
            .records(
                "p/a",
                vec![
                    ns("a.com.", &["ns1.a.com."]),
                    ns("sub.a.com.", &["ns-sub.a.com."]),
                ],
            )
            .records("p/sub", vec![ns("sub.a.com.", &["ns-sub.a.com."])]);
        let resolver = FakeResolver::new()
            .answer("a.com.", &["ns1.a.com."])
            .fail("sub.a.com.", ResolutionFailure::ServFail);

        let report = run(&catalog, directory, resolver).await;
        let kinds: Vec<FindingKind> = report.findings.iter().map(|f| f.kind).collect();
        assert_eq!(
            kinds,
            vec![
                FindingKind::UnresolvedSubdomainDelegation,
                FindingKind::UnresolvedRootDelegation,
            ]
        );
        assert_eq!(report.findings[0].zone_identifier, "p/a");
        assert_eq!(report.findings[1].zone_identifier, "p/sub");
        assert_eq!(report.count(FindingKind::OrphanedSubdomainReferral), 0);
    }

    #[tokio::test]
    async fn duplicate_ownership_reported_once_and_both_audited() {
        let catalog: ZoneCatalog = [
            zone("p1", "example", "example.com."),
            zone("p2", "example", "Example.com"),
        ]
        .into_iter()
        .collect();
        let directory = FakeDirectory::new()
            .records("p1/example", vec![ns("example.com.", &["ns1.example.com."])])
            .records("p2/example", vec![ns("example.com.", &["ns9.example.com."])]);
        let resolver = FakeResolver::new().answer("example.com.", &["ns1.example.com."]);

        let report = run(&catalog, directory.clone(), resolver).await;
        assert_eq!(report.count(FindingKind::DuplicateZoneOwnership), 1);

        let duplicate = &report.findings[0];
        assert_eq!(duplicate.kind, FindingKind::DuplicateZoneOwnership);
        assert_eq!(duplicate.zone_identifier, "p2/example");
        assert!(duplicate.detail.contains("p1/example"));

        // The second zone is still audited and its mismatch reported
        assert_eq!(directory.list_calls(), 2);
        assert_eq!(report.count(FindingKind::NameserverMismatch), 1);
        assert_eq!(report.findings[1].zone_identifier, "p2/example");
    }

    #[tokio::test]
    async fn orphaned_referral_names_the_parent() {
        let catalog: ZoneCatalog = [zone("p", "a", "example.com.")].into_iter().collect();
        let directory = FakeDirectory::new().records(
            "p/a",
            vec![
                ns("example.com.", &["ns1.example.com."]),
                ns("sub.example.com.", &["ns1.elsewhere.net."]),
            ],
        );
        let resolver = FakeResolver::new()
            .answer("example.com.", &["ns1.example.com."])
            .answer("sub.example.com.", &["ns1.elsewhere.net."]);

        let report = run(&catalog, directory, resolver).await;
        assert_eq!(report.findings.len(), 1);
        let orphan = &report.findings[0];
        assert_eq!(orphan.kind, FindingKind::OrphanedSubdomainReferral);
        assert_eq!(orphan.domain, "sub.example.com.");
        assert_eq!(orphan.zone_identifier, "p/a");
    }

    #[tokio::test]
    async fn referral_owned_by_a_later_zone_is_not_orphaned() {
        // "p/a" is audited before "p/z", which owns the delegated subdomain
        let catalog: ZoneCatalog = [
            zone("p", "a", "example.com."),
            zone("p", "z", "sub.example.com."),
        ]
        .into_iter()
        .collect();
        let directory = FakeDirectory::new()
            .records("p/a", vec![ns("sub.example.com.", &["ns1.sub.example.com."])])
            .records("p/z", vec![ns("sub.example.com.", &["ns1.sub.example.com."])]);
        let resolver = FakeResolver::new().answer("sub.example.com.", &["ns1.sub.example.com."]);

        let report = run(&catalog, directory, resolver).await;
        assert!(report.is_clean(), "{:?}", report.findings);
    }

    #[tokio::test]
    async fn failed_listing_skips_only_that_zone() {
        let catalog: ZoneCatalog = [zone("p", "a", "a.com."), zone("p", "b", "b.com.")]
            .into_iter()
            .collect();
        let directory = FakeDirectory::new()
            .records("p/a", vec![ns("a.com.", &["ns1.a.com", "ns2.a.com"])])
            .failing("p/b");
        let resolver = FakeResolver::new().answer("a.com.", &["ns1.a.com", "ns3.a.com"]);

        let report = run(&catalog, directory, resolver).await;
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].zone_identifier, "p/a");
        assert_eq!(report.zones_audited, 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].zone_identifier, "p/b");
        assert!(report.skipped[0].reason.contains("connection reset"));
    }

    #[tokio::test]
    async fn empty_live_answer_reports_everything_missing() {
        let catalog: ZoneCatalog = [zone("p", "a", "a.com.")].into_iter().collect();
        let directory = FakeDirectory::new().records("p/a", vec![ns("a.com.", &["ns1.a.com."])]);
        let resolver = FakeResolver::new().answer("a.com.", &[]);

        let report = run(&catalog, directory, resolver).await;
        assert_eq!(report.findings[0].kind, FindingKind::NameserverMismatch);
        assert_eq!(report.findings[0].missing, vec!["ns1.a.com."]);
        assert!(report.findings[0].extraneous.is_empty());
    }

    #[tokio::test]
    async fn repeated_runs_are_identical() {
        let catalog: ZoneCatalog = (0..20)
            .map(|i| zone("p", &format!("z{i:02}"), &format!("d{}.com.", i % 15)))
            .collect();
        let mut directory = FakeDirectory::new();
        let mut resolver = FakeResolver::new();
        for (i, z) in catalog.zones().enumerate() {
            directory = directory.records(
                &z.identifier,
                vec![
                    ns(&z.dns_name, &["ns1.host.net.", "ns2.host.net."]),
                    ns(&format!("sub{i}.{}", z.dns_name), &["ns.sub.net."]),
                ],
            );
            if i % 3 == 0 {
                resolver = resolver.answer(&z.dns_name, &["ns2.host.net.", "ns1.host.net."]);
            } else if i % 3 == 1 {
                resolver = resolver.answer(&z.dns_name, &["ns3.host.net."]);
            }
        }

        let engine = ReconciliationEngine::new(
            Arc::new(directory),
            Arc::new(resolver),
            AuditConfig::default().concurrency(4),
        );
        let first = engine.reconcile(&catalog, &CancellationToken::new()).await.unwrap();
        let second = engine.reconcile(&catalog, &CancellationToken::new()).await.unwrap();

        assert!(!first.findings.is_empty());
        assert_eq!(first.findings, second.findings);
        assert_eq!(first.skipped, second.skipped);
        assert_eq!(first.count(FindingKind::DuplicateZoneOwnership), 5);
    }

    #[tokio::test]
    async fn finding_order_is_duplicates_then_zones_then_orphans() {
        let catalog: ZoneCatalog = [
            zone("p", "a", "a.com."),
            zone("p", "b", "a.com."),
        ]
        .into_iter()
        .collect();
        let directory = FakeDirectory::new()
            .records(
                "p/a",
                vec![ns("a.com.", &["ns1.a.com."]), ns("z.a.com.", &["ns.z.net."])],
            )
            .records("p/b", vec![ns("y.a.com.", &["ns.y.net."])]);
        let resolver = FakeResolver::new()
            .answer("a.com.", &["ns2.a.com."])
            .answer("z.a.com.", &["ns.z.net."])
            .answer("y.a.com.", &["ns.y.net."]);

        let report = run(&catalog, directory, resolver).await;
        let summary: Vec<(FindingKind, &str)> = report
            .findings
            .iter()
            .map(|f| (f.kind, f.domain.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (FindingKind::DuplicateZoneOwnership, "a.com."),
                (FindingKind::NameserverMismatch, "a.com."),
                (FindingKind::OrphanedSubdomainReferral, "y.a.com."),
                (FindingKind::OrphanedSubdomainReferral, "z.a.com."),
            ]
        );
    }

    #[tokio::test]
    async fn slow_lookup_times_out() {
        let catalog: ZoneCatalog = [zone("p", "a", "a.com.")].into_iter().collect();
        let directory = FakeDirectory::new().records("p/a", vec![ns("a.com.", &["ns1.a.com."])]);
        let resolver = FakeResolver::new()
            .answer("a.com.", &["ns1.a.com."])
            .delay(Duration::from_secs(30));

        let engine = ReconciliationEngine::new(
            Arc::new(directory),
            Arc::new(resolver),
            AuditConfig::default().lookup_timeout(Duration::from_millis(20)),
        );
        let report = engine.reconcile(&catalog, &CancellationToken::new()).await.unwrap();
        assert_eq!(report.findings[0].kind, FindingKind::UnresolvedRootDelegation);
        assert!(report.findings[0].detail.ends_with("timeout"));
    }

    #[tokio::test]
    async fn cancellation_aborts_the_pass() {
        let catalog: ZoneCatalog = [zone("p", "a", "a.com.")].into_iter().collect();
        let directory = FakeDirectory::new().records("p/a", vec![ns("a.com.", &["ns1.a.com."])]);
        let resolver = FakeResolver::new().delay(Duration::from_secs(30));
        let engine = engine(directory, resolver);

        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.cancel();
        });

        let started = std::time::Instant::now();
        let err = engine.reconcile(&catalog, &cancel).await.unwrap_err();
        assert!(matches!(err, NsCheckError::Cancelled));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn state_claims_and_orphans() {
        let a = zone("p", "a", "a.com.");
        let b = zone("p", "b", "A.COM");
        let mut state = ReconciliationState::default();

        assert!(state.claim(&a).is_none());
        assert_eq!(state.claim(&b).map(|z| z.identifier.as_str()), Some("p/a"));
        // Re-claiming by the owner is not a duplicate
        assert!(state.claim(&a).is_none());

        state.refer("x.a.com", &a);
        state.refer("x.a.com.", &b);
        let orphans: Vec<(&str, &str)> = state
            .orphans()
            .map(|(s, p)| (s, p.identifier.as_str()))
            .collect();
        assert_eq!(orphans, vec![("x.a.com.", "p/a")]);
        assert_eq!(state.owner("A.com.").map(|z| z.identifier.as_str()), Some("p/a"));
    }
}
