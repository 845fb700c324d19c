//! Configuration validation logic.

use url::Url;

use crate::error::{Error, Result};

/// Check whether a raw configuration value counts as missing.
pub fn is_blank(value: Option<&str>) -> bool {
    value.map(|v| v.trim().is_empty()).unwrap_or(true)
}

/// Validate and normalize the site URL.
///
/// The returned URL always ends with `/` so that relative joins stay inside the site.
pub fn validate_site_url(raw: &str) -> Result<Url> {
    let url = parse_http_url("site_url", raw)?;

    if url.query().is_some() || url.fragment().is_some() {
        return Err(Error::ConfigValidation {
            field: "site_url".to_string(),
            message: format!("Site URL must not carry a query or fragment: {}", raw),
        });
    }

    Ok(with_trailing_slash(url))
}

/// Validate the token authority URL.
pub fn validate_authority_url(raw: &str) -> Result<Url> {
    parse_http_url("authority_url", raw).map(with_trailing_slash)
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

fn parse_http_url(field: &str, raw: &str) -> Result<Url> {
    let raw = raw.trim();
    let url = Url::parse(raw).map_err(|e| Error::ConfigValidation {
        field: field.to_string(),
        message: format!("'{}' is not a valid URL: {}", raw, e),
    })?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(Error::ConfigValidation {
            field: field.to_string(),
            message: format!("Unsupported URL scheme '{}' (expected https)", url.scheme()),
        });
    }

    if url.host_str().map(str::is_empty).unwrap_or(true) {
        return Err(Error::ConfigValidation {
            field: field.to_string(),
            message: format!("URL has no host: {}", raw),
        });
    }

    Ok(url)
}

/// Normalize a server-relative file URL.
///
/// Adds a leading `/` when missing and rejects paths without a file segment
/// or with `.`/`..` segments.
pub fn normalize_server_relative_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();

    let path = if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    };

    if path.ends_with('/') {
        return Err(Error::ConfigValidation {
            field: "file_server_relative_url".to_string(),
            message: format!("Path does not name a file: '{}'", raw),
        });
    }

    if path.split('/').any(|segment| segment == "." || segment == "..") {
        return Err(Error::ConfigValidation {
            field: "file_server_relative_url".to_string(),
            message: format!("Relative segments are not allowed: '{}'", raw),
        });
    }

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_blank() {
        assert!(is_blank(None));
        assert!(is_blank(Some("")));
        assert!(is_blank(Some("   ")));
        assert!(!is_blank(Some(".")));
    }

    #[test]
    fn test_site_url_gets_trailing_slash() {
        let url = validate_site_url("https://contoso.sharepoint.com/sites/Team").unwrap();
        assert_eq!(url.as_str(), "https://contoso.sharepoint.com/sites/Team/");

        let url = validate_site_url("https://contoso.sharepoint.com/sites/Team/").unwrap();
        assert_eq!(url.as_str(), "https://contoso.sharepoint.com/sites/Team/");
    }

    #[test]
    fn test_site_url_invalid() {
        assert!(validate_site_url("contoso.sharepoint.com/sites/Team").is_err());
        assert!(validate_site_url("ftp://contoso.sharepoint.com/").is_err());
        assert!(validate_site_url("https://contoso.sharepoint.com/?x=1").is_err());
    }

    #[test]
    fn test_normalize_server_relative_url() {
        assert_eq!(
            normalize_server_relative_url("/sites/X/Shared Documents/report.pdf").unwrap(),
            "/sites/X/Shared Documents/report.pdf"
        );
        assert_eq!(
            normalize_server_relative_url("sites/X/f.zip").unwrap(),
            "/sites/X/f.zip"
        );
    }

    #[test]
    fn test_normalize_server_relative_url_rejects_folders() {
        assert!(normalize_server_relative_url("/sites/X/Shared Documents/").is_err());
        assert!(normalize_server_relative_url("/").is_err());
        assert!(normalize_server_relative_url("/sites/X/../Y/f.zip").is_err());
    }
}
