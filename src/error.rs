//! Error types for the sharepoint-fetch application.

use thiserror::Error;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Missing required configuration: {}", .0.join(", "))]
    MissingConfig(Vec<String>),

    #[error("Invalid configuration value for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // Authentication errors
    #[error("Authentication failed: {0}")]
    Authentication(String),

    // Remote file errors
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("API error: {0}")]
    Api(String),

    // Download errors
    #[error("Download failed: {0}")]
    Download(String),

    // File system errors
    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // URL parsing errors
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// The two classes of failure the CLI distinguishes when reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Detected locally before any network activity.
    Configuration,
    /// Raised while authenticating, resolving, or transferring.
    Operation,
}

impl Error {
    /// Classify this error for reporting.
    pub fn class(&self) -> ErrorClass {
        match self {
            Error::MissingConfig(_) | Error::ConfigValidation { .. } => ErrorClass::Configuration,
            _ => ErrorClass::Operation,
        }
    }

    /// Names of the missing configuration variables, if this is a missing-config error.
    pub fn missing_vars(&self) -> &[String] {
        match self {
            Error::MissingConfig(vars) => vars,
            _ => &[],
        }
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
}
