//! Streaming a remote file into the local destination.

use std::fmt::Display;
use std::path::{Path, PathBuf};

use futures::{Stream, StreamExt};
use indicatif::ProgressBar;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::api::{RemoteFile, SharePointApi};
use crate::error::{Error, Result};
use crate::fs::{ensure_dir, local_file_path, partial_file_path};
use crate::output::{create_download_bar, create_spinner};

/// Minimum file size to show progress bar (20 MB).
const PROGRESS_THRESHOLD: u64 = 20 * 1024 * 1024;

/// Download `file` into `download_dir` under `file_name`, replacing any existing file.
pub async fn download_remote_file(
    api: &SharePointApi,
    file: &RemoteFile,
    file_name: &str,
    download_dir: &Path,
    show_progress: bool,
) -> Result<(PathBuf, u64)> {
    ensure_dir(download_dir).await?;

    let response = api.open_file_content(file).await?;
    // Metadata length can differ from the served bytes; only Content-Length is enforced
    let expected_len = response.content_length();
    let display_len = expected_len.or(file.length);

    let progress = if !show_progress {
        None
    } else {
        match display_len {
            Some(len) if len > PROGRESS_THRESHOLD => Some(create_download_bar(len, file_name)),
            Some(_) => None,
            None => Some(create_spinner(file_name)),
        }
    };

    let target = local_file_path(download_dir, file_name);
    let result = write_stream_atomically(
        response.bytes_stream(),
        download_dir,
        file_name,
        expected_len,
        progress.as_ref(),
    )
    .await;

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    let written = result?;
    tracing::info!("Downloaded {} bytes to {}", written, target.display());

    Ok((target, written))
}

/// Stream chunks into a temporary sibling file, then move it over the target.
///
/// On any failure the temporary file is removed and an existing target is left untouched.
pub async fn write_stream_atomically<S, B, E>(
    stream: S,
    download_dir: &Path,
    file_name: &str,
    expected_len: Option<u64>,
    progress: Option<&ProgressBar>,
) -> Result<u64>
where
    S: Stream<Item = std::result::Result<B, E>> + Unpin,
    B: AsRef<[u8]>,
    E: Display,
{
    let partial = partial_file_path(download_dir, file_name);
    let target = local_file_path(download_dir, file_name);

    let written = match write_stream(stream, &partial, progress).await {
        Ok(written) => written,
        Err(e) => {
            discard_partial(&partial).await;
            return Err(e);
        }
    };

    if let Some(expected) = expected_len {
        if written != expected {
            discard_partial(&partial).await;
            return Err(Error::Download(format!(
                "Size mismatch for {}: expected {} bytes, received {}",
                file_name, expected, written
            )));
        }
    }

    if let Err(e) = tokio::fs::rename(&partial, &target).await {
        discard_partial(&partial).await;
        return Err(Error::Io(e));
    }

    Ok(written)
}

async fn write_stream<S, B, E>(
    mut stream: S,
    path: &Path,
    progress: Option<&ProgressBar>,
) -> Result<u64>
where
    S: Stream<Item = std::result::Result<B, E>> + Unpin,
    B: AsRef<[u8]>,
    E: Display,
{
    let mut file = File::create(path).await?;
    let mut downloaded: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| Error::Download(format!("Stream error: {}", e)))?;
        let bytes = chunk.as_ref();
        file.write_all(bytes).await?;
        downloaded += bytes.len() as u64;

        if let Some(pb) = progress {
            pb.set_position(downloaded);
        }
    }

    file.flush().await?;
    file.sync_all().await?;

    Ok(downloaded)
}

async fn discard_partial(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!("Failed to remove partial file {}: {}", path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    type Chunk = std::result::Result<Vec<u8>, String>;

    fn chunks(parts: &[&'static [u8]]) -> impl Stream<Item = Chunk> + Unpin {
        stream::iter(parts.iter().map(|p| Ok(p.to_vec())).collect::<Vec<Chunk>>())
    }

    #[tokio::test]
    async fn test_writes_and_overwrites() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path();

        let parts: &[&'static [u8]] = &[b"hello, ", b"world"];
        let written = write_stream_atomically(chunks(parts), dir, "f.txt", Some(12), None)
            .await
            .unwrap();
        assert_eq!(written, 12);
        assert_eq!(std::fs::read(dir.join("f.txt")).unwrap(), b"hello, world");

        write_stream_atomically(chunks(&[b"second".as_slice()]), dir, "f.txt", None, None)
            .await
            .unwrap();
        assert_eq!(std::fs::read(dir.join("f.txt")).unwrap(), b"second");
        assert!(!dir.join("f.txt.part").exists());
    }

    #[tokio::test]
    async fn test_stream_error_leaves_no_file() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path();

        let failing = stream::iter(vec![
            Ok(b"partial".to_vec()),
            Err("connection reset".to_string()),
        ]);

        let err = write_stream_atomically(failing, dir, "f.txt", None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Download(_)));
        assert!(!dir.join("f.txt").exists());
        assert!(!dir.join("f.txt.part").exists());
    }

    #[tokio::test]
    async fn test_stream_error_keeps_previous_download() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path();
        std::fs::write(dir.join("f.txt"), b"previous").unwrap();

        let failing = stream::iter(vec![Ok(b"new".to_vec()), Err("eof".to_string())]);
        assert!(write_stream_atomically(failing, dir, "f.txt", None, None)
            .await
            .is_err());
        assert_eq!(std::fs::read(dir.join("f.txt")).unwrap(), b"previous");
    }

    #[tokio::test]
    async fn test_size_mismatch_is_rejected() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path();

        let err = write_stream_atomically(
            chunks(&[b"short".as_slice()]),
            dir,
            "f.txt",
            Some(100),
            None,
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("expected 100 bytes"));
        assert!(!dir.join("f.txt").exists());
    }
}
