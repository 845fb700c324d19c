//! Local file name derivation.

use crate::error::{Error, Result};

/// Suffix of the temporary file a download is streamed into.
pub const PARTIAL_SUFFIX: &str = ".part";

/// Validate and sanitize a filename by removing or replacing invalid characters.
///
/// Returns an error if the filename contains path traversal patterns.
pub fn sanitize_filename(name: &str) -> Result<String> {
    if name == "." || name == ".." {
        return Err(Error::InvalidFilename(format!(
            "Path traversal detected: '{}'",
            name
        )));
    }

    if name.contains('/') || name.contains('\\') {
        return Err(Error::InvalidFilename(format!(
            "Path separators not allowed in filename: '{}'",
            name
        )));
    }

    if name.contains('\0') {
        return Err(Error::InvalidFilename(format!(
            "Null bytes not allowed in filename: '{}'",
            name
        )));
    }

    let sanitized: String = name
        .chars()
        .map(|c| match c {
            ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if sanitized.trim().is_empty() {
        return Err(Error::InvalidFilename(
            "Filename cannot be empty or whitespace-only".to_string(),
        ));
    }

    Ok(sanitized)
}

/// Derive the local file name from a server-relative URL: its final segment.
pub fn file_name_from_server_relative_url(server_relative_url: &str) -> Result<String> {
    let last = server_relative_url
        .rsplit('/')
        .next()
        .unwrap_or_default();

    if last.is_empty() {
        return Err(Error::InvalidFilename(format!(
            "No file name in remote path: '{}'",
            server_relative_url
        )));
    }

    sanitize_filename(last)
}

/// Name of the temporary file used while streaming `name`.
pub fn partial_file_name(name: &str) -> String {
    format!("{}{}", name, PARTIAL_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename_valid() {
        assert_eq!(sanitize_filename("normal.txt").unwrap(), "normal.txt");
        assert_eq!(sanitize_filename("file:name.txt").unwrap(), "file_name.txt");
        assert_eq!(
            sanitize_filename("file*with?special.txt").unwrap(),
            "file_with_special.txt"
        );
    }

    #[test]
    fn test_sanitize_filename_rejects_traversal_and_separators() {
        assert!(sanitize_filename("..").is_err());
        assert!(sanitize_filename("path\\to\\file.txt").is_err());
        assert!(sanitize_filename("file\0name.txt").is_err());
        assert!(sanitize_filename("   ").is_err());
    }

    #[test]
    fn test_name_is_final_segment() {
        assert_eq!(
            file_name_from_server_relative_url("/sites/X/Shared Documents/report.pdf").unwrap(),
            "report.pdf"
        );
        assert_eq!(
            file_name_from_server_relative_url("/sites/X/Shared Documents/build 1.2.zip")
                .unwrap(),
            "build 1.2.zip"
        );
        assert_eq!(file_name_from_server_relative_url("f.zip").unwrap(), "f.zip");
    }

    #[test]
    fn test_name_requires_file_segment() {
        assert!(file_name_from_server_relative_url("/sites/X/Shared Documents/").is_err());
        assert!(file_name_from_server_relative_url("").is_err());
    }

    #[test]
    fn test_partial_file_name() {
        assert_eq!(partial_file_name("report.pdf"), "report.pdf.part");
    }
}
