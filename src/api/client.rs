//! SharePoint REST client scoped to one site.

use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{header, Client, Response, StatusCode};
use url::Url;

use crate::api::auth::{acquire_app_only_token, is_auth_failure, ClientCredential};
use crate::api::types::{AccessToken, FileMetadata, ODataErrorResponse, RemoteFile};
use crate::config::Config;
use crate::error::{Error, Result};

/// `Accept` header for lean JSON responses.
const ACCEPT_JSON: &str = "application/json;odata=nometadata";

/// Characters left as-is inside the encoded OData path literal.
const PATH_LITERAL: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Authenticated SharePoint session for a single site.
pub struct SharePointApi {
    client: Client,
    site_url: Url,
    token: AccessToken,
}

impl SharePointApi {
    /// Build the HTTP client and authenticate with the configured credential.
    pub async fn connect(config: &Config) -> Result<Self> {
        let client = build_http_client(config.options.timeout_secs)?;

        let credential =
            ClientCredential::new(config.client_id.clone(), config.client_secret.clone());

        let token = acquire_app_only_token(
            &client,
            &config.site_url,
            &config.options.authority_url,
            config.tenant_id.as_deref(),
            &credential,
        )
        .await?;

        Ok(Self::with_token(client, config.site_url.clone(), token))
    }

    /// Create a session from an already obtained token.
    pub fn with_token(client: Client, site_url: Url, token: AccessToken) -> Self {
        Self {
            client,
            site_url,
            token,
        }
    }

    pub fn site_url(&self) -> &Url {
        &self.site_url
    }

    /// Endpoint addressing a file by its server-relative URL.
    ///
    /// `suffix` is appended after the function call, e.g. `/$value`.
    pub fn file_endpoint(&self, server_relative_url: &str, suffix: &str) -> Result<Url> {
        let literal = server_relative_url.replace('\'', "''");
        let encoded = utf8_percent_encode(&literal, PATH_LITERAL);
        let url = format!(
            "{}_api/web/GetFileByServerRelativeUrl('{}'){}",
            self.site_url, encoded, suffix
        );
        Ok(Url::parse(&url)?)
    }

    /// Make an authenticated GET request and map failure statuses.
    async fn get(&self, url: Url, accept: &str, server_relative_url: &str) -> Result<Response> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header(header::AUTHORIZATION, self.token.bearer())
            .header(header::ACCEPT, accept)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Response status: {}", status);

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ODataErrorResponse>(&body)
            .map(|e| e.message().to_string())
            .unwrap_or_else(|_| format!("HTTP {}", status));

        Err(map_status(status, server_relative_url, &detail))
    }

    /// Resolve a file by its server-relative URL.
    pub async fn get_file_by_server_relative_url(
        &self,
        server_relative_url: &str,
    ) -> Result<RemoteFile> {
        let url = self.file_endpoint(server_relative_url, "")?;
        let response = self.get(url, ACCEPT_JSON, server_relative_url).await?;
        let text = response.text().await?;

        let meta: FileMetadata = serde_json::from_str(&text).map_err(|e| {
            Error::Api(format!(
                "Failed to parse file metadata: {} - Response: {}",
                e,
                text.chars().take(300).collect::<String>()
            ))
        })?;

        if meta.exists == Some(false) {
            return Err(Error::FileNotFound(server_relative_url.to_string()));
        }

        Ok(meta.into())
    }

    /// Open a streaming response over the file's content.
    pub async fn open_file_content(&self, file: &RemoteFile) -> Result<Response> {
        let url = self.file_endpoint(&file.server_relative_url, "/$value")?;
        self.get(url, "application/octet-stream", &file.server_relative_url)
            .await
    }
}

/// HTTP client with the crate's user agent and the configured timeout.
pub fn build_http_client(timeout_secs: u64) -> Result<Client> {
    Client::builder()
        .user_agent(concat!("sharepoint-fetch/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| Error::Api(format!("Failed to create HTTP client: {}", e)))
}

fn map_status(status: StatusCode, server_relative_url: &str, detail: &str) -> Error {
    if status == StatusCode::NOT_FOUND {
        Error::FileNotFound(format!("{} ({})", server_relative_url, detail))
    } else if is_auth_failure(status) {
        Error::AccessDenied(format!("{} ({})", server_relative_url, detail))
    } else {
        Error::Api(format!("HTTP {}: {}", status, detail))
    }
}
