//! Transfer indicators for the file download.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

const BAR_TEMPLATE: &str =
    "{msg:.bold} [{bar:40.cyan/blue}] {bytes}/{total_bytes} {bytes_per_sec} ({eta})";

/// Used when the server sends no `Content-Length` and the metadata has no
/// `Length`: shows the bytes received so far under the file name.
const SPINNER_TEMPLATE: &str = "{spinner:.green} {msg:.bold} {bytes} received";

/// Indicator for a transfer whose size is unknown.
pub fn create_spinner(file_name: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner().with_message(file_name.to_string());
    spinner.set_style(
        ProgressStyle::with_template(SPINNER_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

/// Byte bar for a transfer of `total` bytes, labelled with the file name.
pub fn create_download_bar(total: u64, file_name: &str) -> ProgressBar {
    let bar = ProgressBar::new(total).with_message(file_name.to_string());
    bar.set_style(
        ProgressStyle::with_template(BAR_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_parse() {
        assert!(ProgressStyle::with_template(BAR_TEMPLATE).is_ok());
        assert!(ProgressStyle::with_template(SPINNER_TEMPLATE).is_ok());
    }

    #[test]
    fn test_bar_tracks_total_and_name() {
        let bar = create_download_bar(4096, "report.pdf");
        assert_eq!(bar.length(), Some(4096));
        assert_eq!(bar.message(), "report.pdf");
        bar.finish_and_clear();
    }
}
