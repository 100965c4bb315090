//! # contract: the seam between ingestion and the remote wiki service
//!
//! [`WikiClient`] is the only way the ingestor talks to Confluence. The real
//! implementation lives in [`crate::confluence`]; tests swap in the
//! `mockall`-generated `MockWikiClient`.
//!
//! The data types below mirror the Confluence REST v1 JSON closely enough for
//! serde to decode responses directly. Fields the ingestor does not read are
//! left out; anything optional on the wire is `Option` or `#[serde(default)]`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

use crate::error::IngestError;

/// Listing entry for a page: enough to fetch the full page afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSummary {
    pub id: String,
    #[serde(default)]
    pub title: String,
}

/// A page with its rendered body, version and container metadata expanded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub id: String,
    pub title: String,
    pub space: Space,
    #[serde(default)]
    pub body: PageBody,
    #[serde(default)]
    pub version: Option<Version>,
    #[serde(default)]
    pub container: Option<Container>,
    #[serde(rename = "_links")]
    pub links: PageLinks,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Space {
    pub key: String,
    pub name: String,
}

/// Body representations requested through `expand`. Only `view` (rendered
/// HTML) is asked for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageBody {
    #[serde(default)]
    pub view: Option<BodyValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyValue {
    pub value: String,
    #[serde(default)]
    pub representation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub number: u64,
    #[serde(default)]
    pub when: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLinks {
    /// Path of the page in the web UI, relative to the site base URL.
    pub webui: String,
}

/// One batch of a paginated listing.
#[derive(Debug, Deserialize)]
#[serde(bound = "for<'de2> T: Deserialize<'de2>")]
pub struct PagedResults<T> {
    pub results: Vec<T>,
    #[serde(rename = "_links", default)]
    pub links: PagedLinks,
}

#[derive(Debug, Default, Deserialize)]
pub struct PagedLinks {
    #[serde(default)]
    pub next: Option<String>,
}

/// Read-only access to the two wiki operations ingestion needs.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait WikiClient: Send + Sync {
    /// All page summaries in a space, in the order the service returns them.
    async fn list_pages(&self, space_key: &str) -> Result<Vec<PageSummary>, IngestError>;

    /// A single page with body, version, space and container expanded.
    async fn get_page(&self, page_id: &str) -> Result<Page, IngestError>;
}
