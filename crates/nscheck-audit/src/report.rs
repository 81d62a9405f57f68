//! Plain-text finding stream.

use std::io::{self, Write};

use nscheck_core::Finding;

/// Writes one severity-prefixed line per finding, in the order given
#[derive(Debug)]
pub struct FindingReporter<W> {
    out: W,
}

impl<W: Write> FindingReporter<W> {
    /// Report to `out`
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Write every finding, without reordering or deduplicating
    pub fn report(&mut self, findings: &[Finding]) -> io::Result<()> {
        for finding in findings {
            writeln!(self.out, "{}", format_finding(finding))?;
        }
        self.out.flush()
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Single-line rendering of a finding
#[must_use]
pub fn format_finding(finding: &Finding) -> String {
    format!(
        "[{}] {} zone={} project={} domain={}: {}",
        finding.severity,
        finding.kind,
        finding.zone_identifier,
        finding.project_id,
        finding.domain,
        finding.detail
    )
}
