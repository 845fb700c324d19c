//! sharepoint-fetch - download one file from a SharePoint site.
//!
//! The tool reads its settings from the environment (or matching flags),
//! authenticates with an app-only client credential, resolves a file by its
//! server-relative URL and streams it into a local directory.
//!
//! # Example
//!
//! ```no_run
//! use sharepoint_fetch::{fetch_file, Config, StageTracker};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let mut tracker = StageTracker::new();
//!     let report = fetch_file(&config, &mut tracker).await?;
//!     println!("{} bytes written to {}", report.bytes, report.local_path.display());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod fs;
pub mod output;

// Re-exports for convenience
pub use api::{RemoteFile, SharePointApi};
pub use config::{Config, RawConfig, Secret};
pub use download::{fetch_file, DownloadReport, Stage, StageTracker};
pub use error::{Error, ErrorClass, Result};
