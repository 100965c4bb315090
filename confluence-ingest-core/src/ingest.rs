//! Page ingestion: spaces in, document records out.
//!
//! [`PageIngestor::ingest`] walks each requested space, fetches every page
//! listed there and turns it into a [`DocumentRecord`]. Calls to the wiki are
//! awaited one after another, and the first error ends the run; records
//! built before the failure are dropped with it.

use tracing::{error, info};

use crate::config::IngestConfig;
use crate::confluence::ConfluenceClient;
use crate::contract::{Page, WikiClient};
use crate::convert::page_text;
use crate::error::IngestError;
use crate::record::{now_timestamp, DocumentRecord, DEFAULT_DOCUMENT_TYPE, READER_NAME};

pub struct PageIngestor<C> {
    client: C,
    base_url: String,
}

/// Ingestor wired to the live Confluence REST API.
pub type ConfluenceIngestor = PageIngestor<ConfluenceClient>;

impl ConfluenceIngestor {
    pub fn from_config(config: &IngestConfig) -> Self {
        config.trace_loaded();
        PageIngestor::new(ConfluenceClient::new(config), config.base_url.clone())
    }
}

impl<C: WikiClient> PageIngestor<C> {
    /// `base_url` is prefixed verbatim to each page's web path to form its link.
    pub fn new(client: C, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Fetches and converts every page of every space in `spaces`.
    ///
    /// Records come back in space order, then in the order the service lists
    /// pages. `document_type` defaults to [`DEFAULT_DOCUMENT_TYPE`].
    pub async fn ingest(
        &self,
        spaces: &[String],
        document_type: Option<&str>,
    ) -> Result<Vec<DocumentRecord>, IngestError> {
        let doc_type = document_type.unwrap_or(DEFAULT_DOCUMENT_TYPE);
        let mut documents = Vec::new();

        for space in spaces {
            let summaries = self.client.list_pages(space).await.map_err(|e| {
                error!(space = %space, error = %e, "Listing pages failed");
                e
            })?;

            for summary in &summaries {
                info!("Loading page {}, space {}", summary.id, space);
                let page = self.client.get_page(&summary.id).await.map_err(|e| {
                    error!(space = %space, page_id = %summary.id, error = %e, "Fetching page failed");
                    e
                })?;
                info!(page_id = %page.id, title = %page.title, "Creating Document");
                documents.push(self.build_record(&page, doc_type)?);
            }
        }

        info!("Loaded {} documents", documents.len());
        Ok(documents)
    }

    fn build_record(&self, page: &Page, doc_type: &str) -> Result<DocumentRecord, IngestError> {
        Ok(DocumentRecord {
            text: page_text(page)?,
            doc_type: doc_type.to_string(),
            name: page.title.clone(),
            link: format!("{}{}", self.base_url, page.links.webui),
            path: page.space.name.clone(),
            timestamp: now_timestamp(),
            reader: READER_NAME.to_string(),
        })
    }
}
