use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde_json::json;
use std::time::Duration;

use super::RecordSource;
use crate::config::NotionConfig;
use crate::error::{CatalogError, CatalogResult};
use crate::notion::{ErrorBody, QueryResponse};

/// Largest page the Notion API serves
const MAX_PAGE_SIZE: u32 = 100;

/// Queries one Notion database over HTTP
pub struct NotionFetcher {
    client: Client,
    base_url: String,
    api_version: String,
    token: Option<String>,
    database_id: String,
    page_size: u32,
}

impl NotionFetcher {
    /// Create a fetcher from configuration
    ///
    /// Fails with a configuration error when no database id is set.
    pub fn new(config: &NotionConfig) -> CatalogResult<Self> {
        let database_id = config.require_database_id()?.to_string();
        if config.token.is_none() {
            warn!("No Notion token configured; requests will be unauthenticated");
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(concat!("notion-storefront/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_version: config.api_version.clone(),
            token: config.token.clone(),
            database_id,
            page_size: config.page_size.clamp(1, MAX_PAGE_SIZE),
        })
    }

    fn query_url(&self) -> String {
        format!("{}/v1/databases/{}/query", self.base_url, self.database_id)
    }
}

#[async_trait]
impl RecordSource for NotionFetcher {
    async fn query_page(&self, cursor: Option<&str>) -> CatalogResult<QueryResponse> {
        let mut body = json!({ "page_size": self.page_size });
        if let Some(cursor) = cursor {
            body["start_cursor"] = json!(cursor);
        }
        debug!("Querying {} (cursor: {:?})", self.query_url(), cursor);

        let mut request = self
            .client
            .post(self.query_url())
            .header("Notion-Version", &self.api_version)
            .json(&body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let detail = serde_json::from_str::<ErrorBody>(&text)
                .ok()
                .and_then(|e| match (e.code, e.message) {
                    (Some(code), Some(message)) => Some(format!("{}: {}", code, message)),
                    (None, Some(message)) => Some(message),
                    _ => None,
                })
                .unwrap_or(text);
            return Err(CatalogError::Upstream(format!(
                "Notion query failed with status {}: {}",
                status, detail
            )));
        }

        serde_json::from_str(&text).map_err(|e| {
            CatalogError::Upstream(format!("Malformed query response: {}", e))
        })
    }
}
