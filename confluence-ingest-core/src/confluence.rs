//! reqwest-backed [`WikiClient`] for the Confluence REST v1 API.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info};

use crate::config::IngestConfig;
use crate::contract::{Page, PageSummary, PagedResults, WikiClient};
use crate::error::IngestError;

/// Batch size used when paging through a space listing.
pub const LIST_BATCH_LIMIT: usize = 100;

/// Expansions requested for every page fetch.
pub const PAGE_EXPAND: &str = "space,body.view,version,container";

pub struct ConfluenceClient {
    http: Client,
    /// `{base_url}/rest/api`, without a trailing slash.
    api_root: String,
    user_email: String,
    api_token: String,
    page_limit: Option<usize>,
}

impl ConfluenceClient {
    pub fn new(config: &IngestConfig) -> Self {
        Self::with_http(Client::new(), config)
    }

    pub fn with_http(http: Client, config: &IngestConfig) -> Self {
        let base_url = config.base_url.trim_end_matches('/'); // avoid "//"
        Self {
            http,
            api_root: format!("{base_url}/rest/api"),
            user_email: config.user_email.clone(),
            api_token: config.api_token.clone(),
            page_limit: config.page_limit,
        }
    }

    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, IngestError> {
        debug!(url = %url, ?query, "Requesting Confluence API");
        let resp = self
            .http
            .get(url)
            .query(query)
            .basic_auth(&self.user_email, Some(&self.api_token))
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, url = %url, email = %self.user_email, "Failed to reach Confluence API");
                IngestError::Http(e)
            })?;

        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            error!(
                status = %status,
                url = %url,
                email = %self.user_email,
                "Confluence API returned error. Response body: {text}"
            );
            return Err(IngestError::Remote {
                status: status.as_u16(),
                url: url.to_string(),
                body: text,
            });
        }

        serde_json::from_str(&text).map_err(|e| {
            error!(error = ?e, url = %url, "Failed to parse Confluence response JSON");
            IngestError::Decode {
                url: url.to_string(),
                source: e,
            }
        })
    }
}

#[async_trait]
impl WikiClient for ConfluenceClient {
    async fn list_pages(&self, space_key: &str) -> Result<Vec<PageSummary>, IngestError> {
        let url = format!("{}/content", self.api_root);
        let mut pages: Vec<PageSummary> = Vec::new();
        let mut start = 0;

        loop {
            let query = [
                ("spaceKey", space_key.to_string()),
                ("type", "page".to_string()),
                ("start", start.to_string()),
                ("limit", LIST_BATCH_LIMIT.to_string()),
            ];
            let batch: PagedResults<PageSummary> = self.get_json(&url, &query).await?;
            let size = batch.results.len();
            pages.extend(batch.results);

            if let Some(limit) = self.page_limit {
                if pages.len() >= limit {
                    pages.truncate(limit);
                    break;
                }
            }
            if size == 0 || batch.links.next.is_none() {
                break;
            }
            start += size;
        }

        info!(space = space_key, count = pages.len(), "Listed pages in space");
        Ok(pages)
    }

    async fn get_page(&self, page_id: &str) -> Result<Page, IngestError> {
        let url = format!("{}/content/{}", self.api_root, page_id);
        self.get_json(&url, &[("expand", PAGE_EXPAND.to_string())]).await
    }
}
