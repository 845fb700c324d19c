//! The fetch pipeline: authenticate, resolve, download.

use std::path::PathBuf;

use crate::api::SharePointApi;
use crate::config::Config;
use crate::download::file::download_remote_file;
use crate::download::stage::{Stage, StageTracker};
use crate::error::Result;
use crate::fs::file_name_from_server_relative_url;
use crate::output::print_info;

/// Outcome of a successful fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadReport {
    pub file_name: String,
    pub local_path: PathBuf,
    pub bytes: u64,
}

/// Fetch the configured file. `tracker` records how far the pipeline got.
pub async fn fetch_file(config: &Config, tracker: &mut StageTracker) -> Result<DownloadReport> {
    if tracker.stage() < Stage::ConfigValidated {
        tracker.advance(Stage::ConfigValidated);
    }

    let api = SharePointApi::connect(config).await?;
    tracker.advance(Stage::Authenticated);
    tracing::debug!("Authenticated against {}", api.site_url());

    let file = api
        .get_file_by_server_relative_url(&config.file_server_relative_url)
        .await?;
    tracker.advance(Stage::FileResolved);
    tracing::debug!(
        "Resolved {} ({} bytes)",
        file.server_relative_url,
        file.length
            .map(|l| l.to_string())
            .unwrap_or_else(|| "unknown".into())
    );

    let file_name = file_name_from_server_relative_url(&config.file_server_relative_url)?;
    print_info(&format!(
        "Downloading '{}' to '{}'...",
        file_name,
        config.download_path.join(&file_name).display()
    ));

    let (local_path, bytes) = download_remote_file(
        &api,
        &file,
        &file_name,
        &config.download_path,
        config.options.show_progress,
    )
    .await?;
    tracker.advance(Stage::Downloaded);

    Ok(DownloadReport {
        file_name,
        local_path,
        bytes,
    })
}
