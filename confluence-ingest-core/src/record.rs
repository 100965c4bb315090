use chrono::Local;
use serde::{Deserialize, Serialize};

/// Identifier stamped on every record this crate produces.
pub const READER_NAME: &str = "ConfluenceReader";

pub const READER_DESCRIPTION: &str =
    "Downloads all pages from the given Confluence spaces and normalises them into documents.";

/// Document type used when the caller does not supply one.
pub const DEFAULT_DOCUMENT_TYPE: &str = "Wiki";

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Normalised document handed to the downstream indexer, one per wiki page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Page body converted to markdown text.
    pub text: String,
    #[serde(rename = "type")]
    pub doc_type: String,
    /// Page title.
    pub name: String,
    /// Absolute URL of the page in the web UI.
    pub link: String,
    /// Name of the space holding the page.
    pub path: String,
    /// Local time the record was built, `YYYY-MM-DD HH:MM:SS`.
    pub timestamp: String,
    pub reader: String,
}

/// Current local time in [`TIMESTAMP_FORMAT`].
pub fn now_timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}
