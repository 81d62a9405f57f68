//! # nscheck-cli
//!
//! Command-line front end of the nscheck DNS delegation audit.
//!
//! Selects an organization, builds its zone catalog, reconciles every
//! zone's declared NS records against the live DNS and prints the
//! findings as pretty text, plain lines, JSON or CSV.
//!
//! Exit status is zero whenever the pass completes, findings or not.

pub mod cli;
pub mod config;
pub mod logging;
pub mod output;

pub use cli::run;
