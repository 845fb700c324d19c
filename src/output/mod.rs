//! Output module for console output and progress.
//!
//! Provides:
//! - Colored console output
//! - Progress bars

pub mod console;
pub mod progress;

pub use console::{
    print_config_summary, print_error, print_failure_guidance, print_info, print_missing_vars,
    print_success, print_warning, FAILURE_GUIDANCE,
};
pub use progress::{create_download_bar, create_spinner};
