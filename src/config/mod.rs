//! Configuration module for sharepoint-fetch.
//!
//! This module handles:
//! - Reading connection and file settings from flags and the environment
//! - Reporting every missing required variable at once
//! - Masking the client secret in all output

pub mod loader;
pub mod secret;
pub mod validation;

pub use loader::{
    Config, OptionsConfig, RawConfig, DEFAULT_AUTHORITY_URL, DEFAULT_TIMEOUT_SECS,
    ENV_AUTHORITY_URL, ENV_CLIENT_ID, ENV_CLIENT_SECRET, ENV_DOWNLOAD_PATH,
    ENV_FILE_SERVER_RELATIVE_URL, ENV_SITE_URL, ENV_TENANT_ID, ENV_TIMEOUT_SECS,
};
pub use secret::{mask_secret, Secret};
pub use validation::{normalize_server_relative_url, validate_site_url};
