//! Core types and traits for the nscheck DNS delegation audit.
//!
//! This crate provides the foundational pieces shared across the workspace:
//!
//! - **Types**: managed zones, record sets, findings and organizations
//! - **Errors**: run-level failures with [`NsCheckError`], per-lookup
//!   failures with [`ResolutionError`]
//! - **Providers**: the collaborator traits the audit engine consumes
//! - **Algorithms**: name normalization, resource-name parsing and the
//!   nameserver set comparison, all free of I/O
//!
//! # Example
//!
//! ```rust
//! use nscheck_core::{compare, ComparisonVerdict};
//!
//! let declared = ["ns1.example.com.", "ns2.example.com."];
//! let live = ["NS2.example.com", "ns1.example.com."];
//! assert_eq!(compare(&declared, &live), ComparisonVerdict::Match);
//! ```

#![doc(html_root_url = "https://docs.rs/nscheck-core/0.1.0")]

mod compare;
mod error;
pub mod name;
pub mod provider;
pub mod resource_name;
pub mod types;

pub use compare::{compare, evaluate, ComparisonVerdict, NameserverAnswer};
pub use error::{NsCheckError, ResolutionError, ResolutionFailure, Result};
pub use provider::{
    AssetCatalog, CredentialProvider, NameserverResolver, OrganizationDirectory, ZoneDirectory,
};
pub use resource_name::{parse_managed_zone_name, ZoneResourceName};
pub use types::*;
