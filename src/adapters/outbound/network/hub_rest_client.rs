use crate::ports::outbound::{PagedQuery, ResourceFetcher};
use crate::shared::{HubError, Result};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use tokio::sync::Mutex;

/// Request timeout used when none is configured
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// How many times a request is retried with a fresh token after a 401
const MAX_AUTH_RETRIES: u32 = 2;

const AUTHENTICATE_PATH: &str = "/api/tokens/authenticate";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BearerTokenResponse {
    bearer_token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageResponse {
    #[serde(default)]
    total_count: usize,
    #[serde(default)]
    items: Vec<serde_json::Value>,
}

/// Connection settings for [`HubRestClient`]
#[derive(Debug, Clone)]
pub struct HubConnection {
    pub server_url: String,
    pub api_token: String,
    pub request_timeout: Duration,
}

/// HubRestClient adapter for reading resources from the hub's REST API
///
/// This adapter implements the ResourceFetcher port on top of an async
/// reqwest client. It exchanges the API token for a bearer token on first
/// use and again whenever the hub answers 401.
///
/// # Paging
/// Collections are read with `limit`/`offset` until `totalCount` items have
/// been collected.
pub struct HubRestClient {
    client: reqwest::Client,
    server_url: String,
    api_token: String,
    bearer_token: Mutex<Option<String>>,
}

impl HubRestClient {
    pub fn new(connection: HubConnection) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("hub-integration/{}", version);
        let client = reqwest::Client::builder()
            .timeout(connection.request_timeout)
            .user_agent(user_agent)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            server_url: connection.server_url.trim_end_matches('/').to_string(),
            api_token: connection.api_token,
            bearer_token: Mutex::new(None),
        })
    }

    async fn authenticate(&self) -> Result<String> {
        let url = format!("{}{}", self.server_url, AUTHENTICATE_PATH);
        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, format!("token {}", self.api_token))
            .header(ACCEPT, "application/json")
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", url))?;

        if !response.status().is_success() {
            anyhow::bail!("Hub authentication failed with status code {}", response.status());
        }

        let token: BearerTokenResponse = response
            .json()
            .await
            .context("Unexpected authentication response")?;
        Ok(token.bearer_token)
    }

    /// Returns the cached bearer token, authenticating when there is none or
    /// when `refresh` is set.
    async fn bearer_token(&self, refresh: bool) -> Result<String> {
        let mut cached = self.bearer_token.lock().await;
        match cached.as_ref() {
            Some(token) if !refresh => Ok(token.clone()),
            _ => {
                let token = self.authenticate().await?;
                *cached = Some(token.clone());
                Ok(token)
            }
        }
    }

    async fn get_json(&self, url: &str) -> Result<serde_json::Value> {
        let mut attempt = 0;
        loop {
            let token = self.bearer_token(attempt > 0).await?;
            let response = self
                .client
                .get(url)
                .bearer_auth(&token)
                .header(ACCEPT, "application/json")
                .send()
                .await
                .with_context(|| format!("Failed to reach {}", url))?;

            match response.status() {
                StatusCode::UNAUTHORIZED if attempt < MAX_AUTH_RETRIES => {
                    attempt += 1;
                }
                StatusCode::NOT_FOUND => {
                    return Err(HubError::NotFound {
                        resource: url.to_string(),
                    }
                    .into());
                }
                status if !status.is_success() => {
                    anyhow::bail!("Hub returned status code {} for {}", status, url);
                }
                _ => {
                    return response
                        .json()
                        .await
                        .with_context(|| format!("Invalid JSON from {}", url));
                }
            }
        }
    }
}

/// Appends URL-encoded query parameters to `url`
pub fn build_url(url: &str, parameters: &[(String, String)]) -> String {
    if parameters.is_empty() {
        return url.to_string();
    }
    let query = parameters
        .iter()
        .map(|(name, value)| {
            format!(
                "{}={}",
                urlencoding::encode(name),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&");
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{}{}{}", url, separator, query)
}

fn page_parameters(query: &PagedQuery, offset: usize) -> Vec<(String, String)> {
    let mut parameters = vec![
        ("limit".to_string(), query.page_size.to_string()),
        ("offset".to_string(), offset.to_string()),
    ];
    if let Some(q) = &query.q {
        parameters.push(("q".to_string(), q.clone()));
    }
    parameters.extend(query.parameters.iter().cloned());
    parameters
}

#[async_trait]
impl ResourceFetcher for HubRestClient {
    fn base_url(&self) -> &str {
        &self.server_url
    }

    async fn fetch_one(&self, url: &str) -> Result<serde_json::Value> {
        self.get_json(url).await
    }

    async fn fetch_all(&self, query: &PagedQuery) -> Result<Vec<serde_json::Value>> {
        let mut items = Vec::new();
        loop {
            let url = build_url(&query.url, &page_parameters(query, items.len()));
            let page: PageResponse = serde_json::from_value(self.get_json(&url).await?)
                .with_context(|| format!("Unexpected page from {}", url))?;
            let received = page.items.len();
            items.extend(page.items);
            if received == 0 || items.len() >= page.total_count {
                return Ok(items);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connection() -> HubConnection {
        HubConnection {
            server_url: "https://hub.example.com/".to_string(),
            api_token: "token".to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    #[test]
    fn test_client_creation_trims_trailing_slash() {
        let client = HubRestClient::new(connection()).unwrap();
        assert_eq!(client.base_url(), "https://hub.example.com");
    }

    #[test]
    fn test_build_url_encodes_parameters() {
        let url = build_url(
            "https://hub/api/projects",
            &[("q".to_string(), "name:my project".to_string())],
        );
        assert_eq!(url, "https://hub/api/projects?q=name%3Amy%20project");
    }

    #[test]
    fn test_build_url_appends_to_existing_query() {
        let url = build_url(
            "https://hub/api/notifications?sort=createdAt",
            &[("limit".to_string(), "100".to_string())],
        );
        assert_eq!(url, "https://hub/api/notifications?sort=createdAt&limit=100");
        assert_eq!(build_url("https://hub/api/x", &[]), "https://hub/api/x");
    }

    #[test]
    fn test_page_parameters_order() {
        let query = PagedQuery::new("https://hub/api/codelocations")
            .with_q("name:demo")
            .with_parameter("codeLocationType", "BOM_IMPORT");
        let parameters = page_parameters(&query, 200);
        let names: Vec<&str> = parameters.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["limit", "offset", "q", "codeLocationType"]);
        assert_eq!(parameters[1].1, "200");
    }
}
