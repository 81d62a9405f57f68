//! Output formatting for different formats.

use std::io::Write;
use std::str::FromStr;

use anyhow::Result;
use clap::ValueEnum;
use colored::{ColoredString, Colorize};
use nscheck_audit::{CatalogExclusion, FindingReporter, ReconciliationReport};
use nscheck_core::{Finding, Severity};
use serde::{Deserialize, Serialize};

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Colored findings with a summary
    #[default]
    Pretty,
    /// One plain line per finding
    Text,
    /// JSON report
    Json,
    /// CSV, one row per finding
    Csv,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => anyhow::bail!(
                "Unknown output format: {s}\n\
                 Valid formats: pretty, text, json, csv"
            ),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    report: &'a ReconciliationReport,
    excluded: &'a [CatalogExclusion],
}

#[derive(Serialize)]
struct CsvRow<'a> {
    severity: Severity,
    kind: &'static str,
    domain: &'a str,
    zone: &'a str,
    project: &'a str,
    detail: &'a str,
    missing: String,
    extraneous: String,
}

impl<'a> From<&'a Finding> for CsvRow<'a> {
    fn from(finding: &'a Finding) -> Self {
        Self {
            severity: finding.severity,
            kind: finding.kind.as_str(),
            domain: &finding.domain,
            zone: &finding.zone_identifier,
            project: &finding.project_id,
            detail: &finding.detail,
            missing: finding.missing.join(" "),
            extraneous: finding.extraneous.join(" "),
        }
    }
}

/// Write `report` to `out` in the requested format.
pub fn render<W: Write>(
    report: &ReconciliationReport,
    excluded: &[CatalogExclusion],
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &JsonReport { report, excluded })?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(&mut *out);
            for finding in &report.findings {
                writer.serialize(CsvRow::from(finding))?;
            }
            if report.findings.is_empty() {
                writer.write_record([
                    "severity", "kind", "domain", "zone", "project", "detail", "missing",
                    "extraneous",
                ])?;
            }
            writer.flush()?;
        }
        OutputFormat::Text => {
            FindingReporter::new(&mut *out).report(&report.findings)?;
        }
        OutputFormat::Pretty => render_pretty(report, excluded, out)?,
    }
    Ok(())
}

fn severity_tag(severity: Severity) -> ColoredString {
    let tag = format!("[{severity}]");
    match severity {
        Severity::Error => tag.bright_red().bold(),
        Severity::Warning => tag.bright_yellow(),
        Severity::Info => tag.bright_blue(),
    }
}

fn render_pretty<W: Write>(
    report: &ReconciliationReport,
    excluded: &[CatalogExclusion],
    out: &mut W,
) -> Result<()> {
    if let Some(ref org) = report.organization {
        writeln!(out, "{} {}", "Organization:".bold(), org.cyan())?;
    }
    writeln!(
        out,
        "{} {} audited, {} skipped, {} excluded",
        "Zones:".bold(),
        report.zones_audited.to_string().bright_white(),
        report.skipped.len(),
        excluded.len()
    )?;
    writeln!(out)?;

    if report.findings.is_empty() {
        writeln!(out, "  {}", "No delegation problems found".bright_green())?;
    } else {
        for finding in &report.findings {
            writeln!(
                out,
                "  {} {} {}",
                severity_tag(finding.severity),
                finding.kind.as_str().bold(),
                finding.domain.cyan()
            )?;
            writeln!(
                out,
                "      {} {} ({})",
                "zone".dimmed(),
                finding.zone_identifier,
                finding.project_id.dimmed()
            )?;
            writeln!(out, "      {}", finding.detail)?;
        }
    }

    if !report.skipped.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", "Skipped zones:".bold().underline())?;
        for skipped in &report.skipped {
            writeln!(
                out,
                "  {} {}",
                skipped.zone_identifier.yellow(),
                skipped.reason.dimmed()
            )?;
        }
    }

    if !excluded.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", "Excluded assets:".bold().underline())?;
        for exclusion in excluded {
            writeln!(
                out,
                "  {} {}",
                exclusion.asset.yellow(),
                exclusion.reason.dimmed()
            )?;
        }
    }

    writeln!(out)?;
    let summary = format!(
        "{} finding(s) in {:.1}s",
        report.findings.len(),
        duration_secs(report)
    );
    if report.findings.is_empty() {
        writeln!(out, "{}", summary.bright_green())?;
    } else {
        writeln!(out, "{}", summary.bright_red())?;
    }
    Ok(())
}

#[allow(clippy::cast_precision_loss)]
fn duration_secs(report: &ReconciliationReport) -> f64 {
    (report.finished_at - report.started_at).num_milliseconds().max(0) as f64 / 1000.0
}
