//! SharePoint API module.
//!
//! This module provides:
//! - App-only authentication (realm discovery and ACS token request)
//! - A REST client scoped to one site
//! - API response types

pub mod auth;
pub mod client;
pub mod types;

pub use auth::ClientCredential;
pub use client::SharePointApi;
pub use types::*;
