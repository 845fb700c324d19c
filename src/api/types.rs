//! API response type definitions.

use std::fmt;

use serde::{Deserialize, Deserializer};

/// Well-known principal id of SharePoint Online in Azure ACS.
pub const SHAREPOINT_PRINCIPAL: &str = "00000003-0000-0ff1-ce00-000000000000";

/// Parameters advertised in a `WWW-Authenticate: Bearer ...` challenge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BearerChallenge {
    /// Tenant identifier the site belongs to.
    pub realm: Option<String>,
    /// Principal id of the resource (SharePoint itself).
    pub client_id: Option<String>,
}

/// Successful token endpoint response.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub token_type: Option<String>,
    pub access_token: AccessToken,
}

/// Token endpoint error body.
#[derive(Debug, Deserialize)]
pub struct TokenErrorResponse {
    pub error: String,
    #[serde(default)]
    pub error_description: Option<String>,
}

/// Bearer token for SharePoint REST calls.
#[derive(Clone, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccessToken(<{} bytes hidden>)", self.0.len())
    }
}

/// File metadata returned by `GetFileByServerRelativeUrl` with `odata=nometadata`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FileMetadata {
    pub name: String,
    pub server_relative_url: String,
    /// SharePoint serializes Int64 values as JSON strings.
    #[serde(default, deserialize_with = "deserialize_length")]
    pub length: Option<u64>,
    #[serde(default)]
    pub exists: Option<bool>,
}

/// OData error envelope (`{"odata.error": {...}}`).
#[derive(Debug, Deserialize)]
pub struct ODataErrorResponse {
    #[serde(rename = "odata.error", alias = "error")]
    pub error: ODataError,
}

#[derive(Debug, Deserialize)]
pub struct ODataError {
    #[serde(default)]
    pub code: Option<String>,
    pub message: ODataMessage,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ODataMessage {
    Localized { value: String },
    Plain(String),
}

impl ODataErrorResponse {
    /// Human-readable message carried by the error.
    pub fn message(&self) -> &str {
        match &self.error.message {
            ODataMessage::Localized { value } => value,
            ODataMessage::Plain(value) => value,
        }
    }
}

/// One file on the remote site, resolved by path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    pub name: String,
    pub server_relative_url: String,
    pub length: Option<u64>,
}

impl From<FileMetadata> for RemoteFile {
    fn from(meta: FileMetadata) -> Self {
        Self {
            name: meta.name,
            server_relative_url: meta.server_relative_url,
            length: meta.length,
        }
    }
}

fn deserialize_length<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Length {
        Number(u64),
        Text(String),
    }

    match Option::<Length>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Length::Number(n)) => Ok(Some(n)),
        Some(Length::Text(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid file length: {}", s))),
    }
}
