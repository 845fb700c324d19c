//! Command-line argument definitions using clap.

use clap::Parser;

use crate::config::{
    RawConfig, ENV_AUTHORITY_URL, ENV_CLIENT_ID, ENV_CLIENT_SECRET, ENV_DOWNLOAD_PATH,
    ENV_FILE_SERVER_RELATIVE_URL, ENV_SITE_URL, ENV_TENANT_ID, ENV_TIMEOUT_SECS,
};

/// SharePoint single-file downloader CLI.
///
/// Every value falls back to its environment variable, so the tool runs
/// unchanged inside CI jobs that only export variables.
#[derive(Parser)]
#[command(
    name = "sharepoint-fetch",
    version,
    about = "Download one file from a SharePoint site using app-only credentials",
    long_about = "Authenticates to a SharePoint site with a client id and secret, resolves a \
                  file by its server-relative URL and writes it into a local directory.\n\n\
                  Exits 0 on success and 1 on any failure."
)]
pub struct Args {
    /// Base URL of the SharePoint site.
    #[arg(long = "site-url", env = ENV_SITE_URL)]
    pub site_url: Option<String>,

    /// Tenant identifier, used only when the site does not advertise its realm.
    #[arg(long = "tenant-id", env = ENV_TENANT_ID)]
    pub tenant_id: Option<String>,

    /// Application (client) identifier.
    #[arg(long = "client-id", env = ENV_CLIENT_ID)]
    pub client_id: Option<String>,

    /// Application secret.
    #[arg(long = "client-secret", env = ENV_CLIENT_SECRET, hide_env_values = true)]
    pub client_secret: Option<String>,

    /// Path of the file relative to the site's server root.
    #[arg(short = 'f', long = "file", env = ENV_FILE_SERVER_RELATIVE_URL)]
    pub file_server_relative_url: Option<String>,

    /// Local directory to write the file into.
    #[arg(short = 'd', long = "directory", env = ENV_DOWNLOAD_PATH)]
    pub download_path: Option<String>,

    /// Token authority for the client-credential flow.
    #[arg(long = "authority-url", env = ENV_AUTHORITY_URL)]
    pub authority_url: Option<String>,

    /// HTTP timeout in seconds.
    #[arg(long = "timeout", env = ENV_TIMEOUT_SECS)]
    pub timeout_secs: Option<String>,

    /// Hide the download progress bar.
    #[arg(long, short)]
    pub quiet: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// Convert parsed arguments into unvalidated configuration values.
    pub fn into_raw_config(self) -> RawConfig {
        RawConfig {
            site_url: self.site_url,
            tenant_id: self.tenant_id,
            client_id: self.client_id,
            client_secret: self.client_secret,
            file_server_relative_url: self.file_server_relative_url,
            download_path: self.download_path,
            authority_url: self.authority_url,
            timeout_secs: self.timeout_secs,
            show_progress: !self.quiet,
        }
    }
}
