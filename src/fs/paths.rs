//! Path and directory management.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::fs::naming::partial_file_name;

/// Final location of a downloaded file.
pub fn local_file_path(download_dir: &Path, file_name: &str) -> PathBuf {
    download_dir.join(file_name)
}

/// Temporary location a download is streamed into before being moved into place.
pub fn partial_file_path(download_dir: &Path, file_name: &str) -> PathBuf {
    download_dir.join(partial_file_name(file_name))
}

/// Ensure a directory exists, creating it and its parents if necessary.
pub async fn ensure_dir(path: &Path) -> Result<()> {
    tokio::fs::create_dir_all(path).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_does_not_change_target() {
        let plain = local_file_path(Path::new("/downloads"), "report.pdf");
        let slashed = local_file_path(Path::new("/downloads/"), "report.pdf");
        assert_eq!(plain, PathBuf::from("/downloads/report.pdf"));
        assert_eq!(slashed, plain);
        assert_eq!(plain.file_name().unwrap(), "report.pdf");
    }

    #[test]
    fn test_partial_path_is_sibling() {
        let partial = partial_file_path(Path::new("out"), "f.zip");
        assert_eq!(partial, PathBuf::from("out/f.zip.part"));
    }

    #[tokio::test]
    async fn test_ensure_dir_is_idempotent() {
        let temp = tempfile::tempdir().unwrap();
        let nested = temp.path().join("a").join("b");

        ensure_dir(&nested).await.unwrap();
        ensure_dir(&nested).await.unwrap();
        assert!(nested.is_dir());
    }
}
