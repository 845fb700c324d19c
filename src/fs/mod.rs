//! Filesystem module.
//!
//! Provides:
//! - Local file name derivation from remote paths
//! - Destination path and directory management

pub mod naming;
pub mod paths;

pub use naming::{file_name_from_server_relative_url, partial_file_name, sanitize_filename};
pub use paths::{ensure_dir, local_file_path, partial_file_path};
