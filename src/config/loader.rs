//! Configuration structures and loading logic.

use std::fmt;
use std::path::PathBuf;

use url::Url;

use crate::config::secret::{mask_secret, Secret};
use crate::config::validation::{
    is_blank, normalize_server_relative_url, validate_authority_url, validate_site_url,
};
use crate::error::{Error, Result};

pub const ENV_SITE_URL: &str = "SHAREPOINT_SITE_URL";
pub const ENV_TENANT_ID: &str = "SHAREPOINT_TENANT_ID";
pub const ENV_CLIENT_ID: &str = "SHAREPOINT_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "SHAREPOINT_CLIENT_SECRET";
pub const ENV_FILE_SERVER_RELATIVE_URL: &str = "FILE_SERVER_RELATIVE_URL";
pub const ENV_DOWNLOAD_PATH: &str = "DOWNLOAD_PATH";
pub const ENV_AUTHORITY_URL: &str = "SHAREPOINT_AUTHORITY_URL";
pub const ENV_TIMEOUT_SECS: &str = "SHAREPOINT_TIMEOUT_SECS";

/// Azure Access Control Service endpoint used for SharePoint app-only tokens.
pub const DEFAULT_AUTHORITY_URL: &str = "https://accounts.accesscontrol.windows.net";

/// Default HTTP timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Unvalidated configuration values, as read from flags or the environment.
#[derive(Clone, Default)]
pub struct RawConfig {
    pub site_url: Option<String>,
    pub tenant_id: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub file_server_relative_url: Option<String>,
    pub download_path: Option<String>,
    pub authority_url: Option<String>,
    pub timeout_secs: Option<String>,
    pub show_progress: bool,
}

/// Main configuration structure.
#[derive(Debug, Clone)]
pub struct Config {
    /// Site the session is scoped to, always ending with `/`.
    pub site_url: Url,

    /// Tenant identifier. Only used when realm discovery yields nothing.
    pub tenant_id: Option<String>,

    /// Application (client) identifier.
    pub client_id: String,

    /// Application secret.
    pub client_secret: Secret,

    /// Server-relative path of the file to download, with a leading `/`.
    pub file_server_relative_url: String,

    /// Local directory that receives the file.
    pub download_path: PathBuf,

    /// Optional settings.
    pub options: OptionsConfig,
}

/// Optional settings with defaults.
#[derive(Debug, Clone)]
pub struct OptionsConfig {
    /// Token authority for the client-credential flow.
    pub authority_url: Url,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Whether to draw a progress bar for large downloads.
    pub show_progress: bool,
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            authority_url: Url::parse(DEFAULT_AUTHORITY_URL)
                .expect("default authority URL is valid"),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            show_progress: true,
        }
    }
}

impl RawConfig {
    /// Read raw values from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read raw values through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            site_url: lookup(ENV_SITE_URL),
            tenant_id: lookup(ENV_TENANT_ID),
            client_id: lookup(ENV_CLIENT_ID),
            client_secret: lookup(ENV_CLIENT_SECRET),
            file_server_relative_url: lookup(ENV_FILE_SERVER_RELATIVE_URL),
            download_path: lookup(ENV_DOWNLOAD_PATH),
            authority_url: lookup(ENV_AUTHORITY_URL),
            timeout_secs: lookup(ENV_TIMEOUT_SECS),
            show_progress: true,
        }
    }

    /// Names of required variables that are absent or blank, in declaration order.
    pub fn missing_vars(&self) -> Vec<String> {
        [
            (ENV_SITE_URL, self.site_url.as_deref()),
            (ENV_CLIENT_ID, self.client_id.as_deref()),
            (ENV_CLIENT_SECRET, self.client_secret.as_deref()),
            (ENV_FILE_SERVER_RELATIVE_URL, self.file_server_relative_url.as_deref()),
            (ENV_DOWNLOAD_PATH, self.download_path.as_deref()),
        ]
        .into_iter()
        .filter(|(_, value)| is_blank(*value))
        .map(|(name, _)| name.to_string())
        .collect()
    }
}

impl fmt::Debug for RawConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawConfig")
            .field("site_url", &self.site_url)
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_deref().map(mask_secret))
            .field("file_server_relative_url", &self.file_server_relative_url)
            .field("download_path", &self.download_path)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Build a complete configuration, or report every missing variable at once.
    pub fn from_sources(raw: RawConfig) -> Result<Self> {
        let missing = raw.missing_vars();
        if !missing.is_empty() {
            return Err(Error::MissingConfig(missing));
        }

        let required = |value: Option<String>, name: &str| {
            value
                .map(|v| v.trim().to_string())
                .ok_or_else(|| Error::MissingConfig(vec![name.to_string()]))
        };

        let site_url = validate_site_url(&required(raw.site_url, ENV_SITE_URL)?)?;
        let client_id = required(raw.client_id, ENV_CLIENT_ID)?;
        let client_secret = Secret::new(required(raw.client_secret, ENV_CLIENT_SECRET)?);
        let file_server_relative_url = normalize_server_relative_url(&required(
            raw.file_server_relative_url,
            ENV_FILE_SERVER_RELATIVE_URL,
        )?)?;
        let download_path = PathBuf::from(required(raw.download_path, ENV_DOWNLOAD_PATH)?);

        let tenant_id = raw
            .tenant_id
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        let authority_url = match raw.authority_url.filter(|a| !a.trim().is_empty()) {
            Some(authority) => validate_authority_url(&authority)?,
            None => OptionsConfig::default().authority_url,
        };

        let timeout_secs = match raw.timeout_secs.as_deref().map(str::trim) {
            None | Some("") => DEFAULT_TIMEOUT_SECS,
            Some(value) => match value.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(Error::ConfigValidation {
                        field: "timeout_secs".to_string(),
                        message: format!("Expected a positive number of seconds, got '{}'", value),
                    })
                }
            },
        };

        Ok(Self {
            site_url,
            tenant_id,
            client_id,
            client_secret,
            file_server_relative_url,
            download_path,
            options: OptionsConfig {
                authority_url,
                timeout_secs,
                show_progress: raw.show_progress,
            },
        })
    }

    /// Load configuration from the process environment only.
    pub fn from_env() -> Result<Self> {
        Self::from_sources(RawConfig::from_env())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const REQUIRED: [&str; 5] = [
        ENV_SITE_URL,
        ENV_CLIENT_ID,
        ENV_CLIENT_SECRET,
        ENV_FILE_SERVER_RELATIVE_URL,
        ENV_DOWNLOAD_PATH,
    ];

    fn full_env() -> HashMap<&'static str, String> {
        HashMap::from([
            (ENV_SITE_URL, "https://contoso.sharepoint.com/sites/X".to_string()),
            (ENV_CLIENT_ID, "11111111-2222-3333-4444-555555555555".to_string()),
            (ENV_CLIENT_SECRET, "very-secret-value".to_string()),
            (
                ENV_FILE_SERVER_RELATIVE_URL,
                "/sites/X/Shared Documents/report.pdf".to_string(),
            ),
            (ENV_DOWNLOAD_PATH, ".".to_string()),
        ])
    }

    fn raw_from(env: &HashMap<&'static str, String>) -> RawConfig {
        RawConfig::from_lookup(|name| env.get(name).cloned())
    }

    #[test]
    fn test_complete_config_loads() {
        let config = Config::from_sources(raw_from(&full_env())).unwrap();
        assert_eq!(
            config.site_url.as_str(),
            "https://contoso.sharepoint.com/sites/X/"
        );
        assert_eq!(config.tenant_id, None);
        assert_eq!(config.download_path, PathBuf::from("."));
        assert_eq!(config.options.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(
            config.options.authority_url.as_str(),
            "https://accounts.accesscontrol.windows.net/"
        );
    }

    #[test]
    fn test_every_subset_with_a_missing_variable_fails() {
        // Every non-empty subset of the required variables is removed in turn.
        for mask in 1u32..(1 << REQUIRED.len()) {
            let mut env = full_env();
            let mut removed = Vec::new();
            for (i, name) in REQUIRED.iter().enumerate() {
                if mask & (1 << i) != 0 {
                    env.remove(name);
                    removed.push(name.to_string());
                }
            }

            let err = Config::from_sources(raw_from(&env)).unwrap_err();
            assert_eq!(err.missing_vars(), removed.as_slice(), "mask {:#b}", mask);
        }
    }

    #[test]
    fn test_blank_values_count_as_missing() {
        let mut env = full_env();
        env.insert(ENV_CLIENT_SECRET, "   ".to_string());
        env.insert(ENV_DOWNLOAD_PATH, String::new());

        let err = Config::from_sources(raw_from(&env)).unwrap_err();
        assert_eq!(
            err.missing_vars(),
            &[
                ENV_CLIENT_SECRET.to_string(),
                ENV_DOWNLOAD_PATH.to_string()
            ]
        );
    }

    #[test]
    fn test_tenant_is_optional() {
        let mut env = full_env();
        env.insert(ENV_TENANT_ID, "  ".to_string());
        let config = Config::from_sources(raw_from(&env)).unwrap();
        assert_eq!(config.tenant_id, None);

        env.insert(ENV_TENANT_ID, "contoso-tenant".to_string());
        let config = Config::from_sources(raw_from(&env)).unwrap();
        assert_eq!(config.tenant_id.as_deref(), Some("contoso-tenant"));
    }

    #[test]
    fn test_debug_never_shows_secret() {
        let config = Config::from_sources(raw_from(&full_env())).unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("very-secret-value"));
    }

    #[test]
    fn test_raw_config_debug_hides_secret() {
        let raw = raw_from(&full_env());
        assert!(!format!("{:?}", raw).contains("very-secret-value"));
    }

    #[test]
    fn test_invalid_site_url_is_configuration_error() {
        let mut env = full_env();
        env.insert(ENV_SITE_URL, "not a url".to_string());
        let err = Config::from_sources(raw_from(&env)).unwrap_err();
        assert!(matches!(err, Error::ConfigValidation { .. }));
    }

    #[test]
    fn test_optional_overrides() {
        let mut env = full_env();
        env.insert(ENV_AUTHORITY_URL, "http://127.0.0.1:9000".to_string());
        env.insert(ENV_TIMEOUT_SECS, "30".to_string());
        let config = Config::from_sources(raw_from(&env)).unwrap();
        assert_eq!(config.options.authority_url.as_str(), "http://127.0.0.1:9000/");
        assert_eq!(config.options.timeout_secs, 30);

        env.insert(ENV_TIMEOUT_SECS, "0".to_string());
        assert!(Config::from_sources(raw_from(&env)).is_err());

        env.insert(ENV_TIMEOUT_SECS, "soon".to_string());
        assert!(matches!(
            Config::from_sources(raw_from(&env)).unwrap_err(),
            Error::ConfigValidation { .. }
        ));
    }
}
