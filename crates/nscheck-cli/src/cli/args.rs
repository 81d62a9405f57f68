//! Command-line argument definitions using clap.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::output::OutputFormat;

/// Audit an organization's Cloud DNS zones against their live delegations
///
/// Lists every managed zone of the organization, resolves each declared NS
/// record set against the public DNS and reports duplicate zones,
/// unresolvable delegations, nameserver mismatches and orphaned subdomain
/// referrals. Read-only: nothing is ever changed.
#[derive(Parser, Debug, Default)]
#[command(name = "nscheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Organization to audit: display name, numeric id or `organizations/<id>`
    #[arg(long, env = "NSCHECK_ORGANIZATION")]
    pub organization: Option<String>,

    /// Authenticate with Application Default Credentials instead of gcloud
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
    pub use_default_credentials: Option<bool>,

    /// Bearer access token to use as-is
    #[arg(long, env = "NSCHECK_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// Audit private zones too
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
    pub include_private_zones: Option<bool>,

    /// Number of zones audited concurrently [default: 8]
    #[arg(long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Nameserver used for live lookups [default: 8.8.8.8]
    #[arg(long, value_name = "IP")]
    pub nameserver: Option<IpAddr>,

    /// Timeout of a single NS lookup in seconds [default: 10]
    #[arg(long, value_name = "SECS")]
    pub lookup_timeout: Option<u64>,

    /// Abort the whole run after this many seconds
    #[arg(long, value_name = "SECS")]
    pub deadline: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Configuration file [default: platform config dir]
    #[arg(long, env = "NSCHECK_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}
