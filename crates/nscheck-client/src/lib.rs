//! Google Cloud REST client for the nscheck audit.
//!
//! This crate provides [`GcpClient`], which implements the
//! [`OrganizationDirectory`](nscheck_core::OrganizationDirectory),
//! [`AssetCatalog`](nscheck_core::AssetCatalog) and
//! [`ZoneDirectory`](nscheck_core::ZoneDirectory) collaborators on top of the
//! Cloud Resource Manager, Cloud Asset and Cloud DNS APIs, plus the
//! [`credentials`] providers that obtain a bearer token for it.

#![doc(html_root_url = "https://docs.rs/nscheck-client/0.1.0")]

mod client;
mod config;
mod provider;
pub mod api;
pub mod credentials;

pub use client::{GcpClient, GcpClientBuilder};
pub use config::*;
pub use nscheck_core::{NsCheckError, Result};
