//! Tracing setup.
//!
//! Logs go to stderr so stdout carries nothing but the report. `RUST_LOG`
//! overrides the level chosen with `-v`/`-q`.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const CRATES: [&str; 4] = ["nscheck_core", "nscheck_client", "nscheck_audit", "nscheck_cli"];

/// Filter directives for the given verbosity
#[must_use]
pub fn directives(verbose: u8, quiet: bool) -> String {
    let level = match (quiet, verbose) {
        (true, _) => return "error".to_string(),
        (false, 0) => return "warn".to_string(),
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };

    let mut directives = String::from("warn");
    for krate in CRATES {
        directives.push_str(&format!(",{krate}={level}"));
    }
    directives
}

/// Install the global subscriber. A second call is a no-op.
pub fn init(verbose: u8, quiet: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directives(verbose, quiet)));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbose > 1),
        )
        .try_init();
}
