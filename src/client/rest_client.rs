//! # REST Work Item Client
//!
//! HTTP client for the work item tracking REST API.
//!
//! - `GET  {org}/_apis/wit/workitems/{id}`
//! - `POST {org}/{project}/_apis/wit/workitems/${type}` with a JSON Patch body
//!
//! Authentication uses a personal access token sent as HTTP basic auth with
//! an empty user name. Requests are never retried.

use async_trait::async_trait;
use reqwest::{header, Client, Response, StatusCode, Url};
use std::time::Duration;
use tracing::{debug, error, info};

use crate::client::traits::WorkItemClient;
use crate::config::BatchConfig;
use crate::constants::{DEFAULT_API_VERSION, JSON_PATCH_CONTENT_TYPE};
use crate::error::{ClientError, ClientResult};
use crate::models::{PatchDocument, WorkItem};

/// Connection settings for [`RestWorkItemClient`]
///
/// # Examples
///
/// ```rust
/// use workitem_batch::client::RestClientConfig;
///
/// let config = RestClientConfig {
///     org_url: "https://dev.azure.com/contoso".to_string(),
///     credential: "pat".to_string(),
///     ..Default::default()
/// };
/// assert_eq!(config.api_version, "7.0");
/// assert_eq!(config.timeout_ms, 30000);
/// ```
#[derive(Clone)]
pub struct RestClientConfig {
    /// Organization URL (e.g., "<https://dev.azure.com/contoso>")
    pub org_url: String,
    /// Personal access token
    pub credential: String,
    /// REST api-version query parameter
    pub api_version: String,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for RestClientConfig {
    fn default() -> Self {
        Self {
            org_url: "https://dev.azure.com/your-organization".to_string(),
            credential: String::new(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout_ms: 30000,
        }
    }
}

impl std::fmt::Debug for RestClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClientConfig")
            .field("org_url", &self.org_url)
            .field("credential", &mask(&self.credential))
            .field("api_version", &self.api_version)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

impl From<&BatchConfig> for RestClientConfig {
    fn from(config: &BatchConfig) -> Self {
        Self {
            org_url: config.org_url.clone(),
            credential: config.credential.clone(),
            api_version: config.api_version.clone(),
            timeout_ms: config.timeout_ms,
        }
    }
}

fn mask(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<unset>"
    } else {
        "***"
    }
}

/// HTTP implementation of [`WorkItemClient`]
#[derive(Clone)]
pub struct RestWorkItemClient {
    client: Client,
    config: RestClientConfig,
    base_url: Url,
}

impl std::fmt::Debug for RestWorkItemClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestWorkItemClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_version", &self.config.api_version)
            .field("timeout_ms", &self.config.timeout_ms)
            .field("auth_configured", &!self.config.credential.is_empty())
            .finish()
    }
}

impl RestWorkItemClient {
    /// Create a client, validating the organization URL
    pub fn new(config: RestClientConfig) -> ClientResult<Self> {
        let base_url = Url::parse(&config.org_url)
            .map_err(|e| ClientError::config_error(format!("Invalid organization URL: {}", e)))?;

        if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
            return Err(ClientError::config_error(format!(
                "Organization URL must be an http(s) URL: {}",
                config.org_url
            )));
        }

        let mut default_headers = header::HeaderMap::new();
        default_headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(format!("workitem-batch/{}", env!("CARGO_PKG_VERSION")))
            .default_headers(default_headers)
            .build()
            .map_err(|e| ClientError::config_error(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            base_url = %base_url,
            timeout_ms = config.timeout_ms,
            auth_configured = !config.credential.is_empty(),
            "Created work item REST client"
        );

        Ok(Self {
            client,
            config,
            base_url,
        })
    }

    /// Build an API URL below the organization URL
    fn endpoint_url(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                ClientError::config_error(format!(
                    "Organization URL cannot be a base: {}",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        url.query_pairs_mut()
            .append_pair("api-version", &self.config.api_version);
        Ok(url)
    }

    fn work_item_url(&self, id: i64) -> ClientResult<Url> {
        let id = id.to_string();
        self.endpoint_url(&["_apis", "wit", "workitems", &id])
    }

    fn create_url(&self, project: &str, work_item_type: &str) -> ClientResult<Url> {
        let type_segment = format!("${work_item_type}");
        self.endpoint_url(&[project, "_apis", "wit", "workitems", &type_segment])
    }

    /// Turn a response into a work item or a classified error
    async fn parse_work_item(response: Response, not_found_id: Option<i64>) -> ClientResult<WorkItem> {
        let status = response.status();

        // The service answers a rejected token with a 203 and a sign-in page
        if status == StatusCode::NON_AUTHORITATIVE_INFORMATION {
            return Err(ClientError::AuthError(
                "service returned a sign-in page; check the personal access token".to_string(),
            ));
        }

        if status.is_success() {
            return response.json::<WorkItem>().await.map_err(|e| {
                ClientError::invalid_response("work_item", format!("Failed to parse response: {}", e))
            });
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        let message = service_message(&body);

        match (status, not_found_id) {
            (StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN, _) => {
                Err(ClientError::AuthError(message))
            }
            (StatusCode::NOT_FOUND, Some(id)) => {
                Err(ClientError::WorkItemNotFound { id, message })
            }
            _ => Err(ClientError::api_error(status.as_u16(), message)),
        }
    }
}

/// Extract the `message` of a service error body, falling back to the raw text
fn service_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                "Unknown error".to_string()
            } else {
                trimmed.to_string()
            }
        })
}

#[async_trait]
impl WorkItemClient for RestWorkItemClient {
    fn endpoint(&self) -> &str {
        &self.config.org_url
    }

    async fn fetch_work_item(&self, id: i64) -> ClientResult<WorkItem> {
        let url = self.work_item_url(id)?;
        debug!(url = %url, work_item_id = id, "Fetching work item");

        let response = self
            .client
            .get(url)
            .basic_auth("", Some(&self.config.credential))
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, work_item_id = id, "Failed to send fetch request");
                ClientError::HttpError(e)
            })?;

        Self::parse_work_item(response, Some(id)).await
    }

    async fn create_work_item(
        &self,
        document: &PatchDocument,
        project: &str,
        work_item_type: &str,
    ) -> ClientResult<WorkItem> {
        let url = self.create_url(project, work_item_type)?;
        let body = serde_json::to_vec(document)?;

        debug!(
            url = %url,
            project = %project,
            work_item_type = %work_item_type,
            operations = document.len(),
            "Creating work item"
        );

        let response = self
            .client
            .post(url)
            .basic_auth("", Some(&self.config.credential))
            .header(header::CONTENT_TYPE, JSON_PATCH_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, project = %project, "Failed to send create request");
                ClientError::HttpError(e)
            })?;

        Self::parse_work_item(response, None).await
    }
}
