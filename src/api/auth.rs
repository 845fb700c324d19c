//! App-only authentication against SharePoint via the ACS client-credential flow.
//!
//! The flow has two steps:
//! 1. An anonymous request to the site returns a `WWW-Authenticate` challenge
//!    naming the tenant realm and SharePoint's principal id.
//! 2. The client id and secret are exchanged at the ACS token endpoint for a
//!    bearer token whose resource is `{principal}/{site host}@{realm}`.

use std::sync::OnceLock;

use regex::Regex;
use reqwest::{header, Client, StatusCode};
use url::Url;

use crate::api::types::{
    AccessToken, BearerChallenge, TokenErrorResponse, TokenResponse, SHAREPOINT_PRINCIPAL,
};
use crate::config::Secret;
use crate::error::{Error, Result};
use crate::output::print_warning;

/// Path requested to obtain the bearer challenge.
const CHALLENGE_PATH: &str = "_vti_bin/client.svc";

/// Application identity for the client-credential flow.
#[derive(Debug, Clone)]
pub struct ClientCredential {
    pub client_id: String,
    pub client_secret: Secret,
}

impl ClientCredential {
    pub fn new(client_id: impl Into<String>, client_secret: Secret) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret,
        }
    }
}

fn challenge_param_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r#"([A-Za-z_]+)="([^"]*)""#).unwrap())
}

/// Parse the parameters of a `Bearer` challenge header.
pub fn parse_bearer_challenge(header_value: &str) -> BearerChallenge {
    let mut challenge = BearerChallenge::default();

    for captures in challenge_param_pattern().captures_iter(header_value) {
        let value = captures[2].trim();
        if value.is_empty() {
            continue;
        }
        match captures[1].to_ascii_lowercase().as_str() {
            "realm" => challenge.realm = Some(value.to_string()),
            "client_id" => challenge.client_id = Some(value.to_string()),
            _ => {}
        }
    }

    challenge
}

/// Host part of the token resource, including a non-default port.
pub fn resource_host(site_url: &Url) -> Result<String> {
    let host = site_url
        .host_str()
        .ok_or_else(|| Error::Authentication(format!("Site URL has no host: {}", site_url)))?;

    Ok(match site_url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

/// Build the ACS resource identifier for a site.
pub fn resource_for(principal: &str, host: &str, realm: &str) -> String {
    format!("{}/{}@{}", principal, host, realm)
}

/// Ask the site for its bearer challenge.
pub async fn discover_challenge(client: &Client, site_url: &Url) -> Result<BearerChallenge> {
    let url = site_url.join(CHALLENGE_PATH)?;
    tracing::debug!("Discovering realm via {}", url);

    let response = client
        .get(url)
        .header(header::AUTHORIZATION, "Bearer")
        .send()
        .await
        .map_err(|e| Error::Authentication(format!("Site unreachable: {}", e)))?;

    let status = response.status();
    tracing::debug!("Challenge response status: {}", status);

    let challenge = response
        .headers()
        .get_all(header::WWW_AUTHENTICATE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.trim_start().to_ascii_lowercase().starts_with("bearer"))
        .map(parse_bearer_challenge)
        .unwrap_or_default();

    if challenge.realm.is_none() {
        tracing::debug!("No realm advertised by the site (HTTP {})", status);
    }

    Ok(challenge)
}

/// Exchange the client credential for an app-only access token.
pub async fn request_token(
    client: &Client,
    authority_url: &Url,
    realm: &str,
    resource: &str,
    credential: &ClientCredential,
) -> Result<AccessToken> {
    let url = authority_url.join(&format!("{}/tokens/OAuth/2", realm))?;
    let principal_id = format!("{}@{}", credential.client_id, realm);

    tracing::debug!("Requesting token from {} for resource {}", url, resource);

    let form = [
        ("grant_type", "client_credentials"),
        ("client_id", principal_id.as_str()),
        ("client_secret", credential.client_secret.expose()),
        ("resource", resource),
    ];

    let response = client
        .post(url)
        .form(&form)
        .send()
        .await
        .map_err(|e| Error::Authentication(format!("Token endpoint unreachable: {}", e)))?;

    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        let detail = serde_json::from_str::<TokenErrorResponse>(&text)
            .map(|e| match e.error_description {
                Some(description) => format!("{}: {}", e.error, description),
                None => e.error,
            })
            .unwrap_or_else(|_| text.chars().take(300).collect());
        return Err(Error::Authentication(format!("HTTP {}: {}", status, detail)));
    }

    let token: TokenResponse = serde_json::from_str(&text)
        .map_err(|e| Error::Authentication(format!("Failed to parse token response: {}", e)))?;

    if token.access_token.is_empty() {
        return Err(Error::Authentication("Token endpoint returned an empty token".into()));
    }

    if let Some(token_type) = token.token_type.as_deref() {
        if !token_type.eq_ignore_ascii_case("bearer") {
            tracing::warn!("Unexpected token type: {}", token_type);
        }
    }

    Ok(token.access_token)
}

/// Run the full app-only flow for a site.
///
/// `tenant_id` is only used when the site does not advertise a realm.
pub async fn acquire_app_only_token(
    client: &Client,
    site_url: &Url,
    authority_url: &Url,
    tenant_id: Option<&str>,
    credential: &ClientCredential,
) -> Result<AccessToken> {
    let challenge = discover_challenge(client, site_url).await?;

    let realm = match (challenge.realm.as_deref(), tenant_id) {
        (Some(realm), Some(tenant)) if !realm.eq_ignore_ascii_case(tenant) => {
            print_warning(&format!(
                "Configured tenant {} differs from site realm {}, using the site realm",
                tenant, realm
            ));
            realm.to_string()
        }
        (Some(realm), _) => realm.to_string(),
        (None, Some(tenant)) => tenant.to_string(),
        (None, None) => {
            return Err(Error::Authentication(format!(
                "Site {} did not advertise a tenant realm; set the tenant id explicitly",
                site_url
            )))
        }
    };

    let principal = challenge
        .client_id
        .as_deref()
        .unwrap_or(SHAREPOINT_PRINCIPAL);
    let resource = resource_for(principal, &resource_host(site_url)?, &realm);

    request_token(client, authority_url, &realm, &resource, credential).await
}

/// Whether a status code means the credential was rejected for this resource.
pub fn is_auth_failure(status: StatusCode) -> bool {
    status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN
}
