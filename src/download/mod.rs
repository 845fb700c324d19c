//! Download module.
//!
//! This module provides:
//! - Pipeline stage tracking
//! - The fetch pipeline (authenticate, resolve, download)
//! - Streaming file writes that never leave a truncated target behind

pub mod fetch;
pub mod file;
pub mod stage;

pub use fetch::{fetch_file, DownloadReport};
pub use file::{download_remote_file, write_stream_atomically};
pub use stage::{Stage, StageTracker};
