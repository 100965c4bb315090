//! Error type shared by every step of an ingestion run.
//!
//! Nothing in this crate retries or swallows an error: each variant is built
//! at the point of failure and handed straight back to the caller.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    /// A required environment variable is unset or blank.
    #[error("{0} environment variable not set")]
    MissingEnv(&'static str),

    /// An optional environment variable is present but unusable.
    #[error("{name} has an invalid value {value:?}: {reason}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        reason: String,
    },

    /// The request never produced a response (DNS, TLS, connection reset...).
    #[error("request to Confluence failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Confluence answered with a non-success status, e.g. rejected credentials.
    #[error("Confluence API returned {status} for {url}: {body}")]
    Remote {
        status: u16,
        url: String,
        body: String,
    },

    /// The response body was not the JSON shape we expect.
    #[error("failed to decode Confluence response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The page body could not be turned into text.
    #[error("failed to convert body of page {page_id}: {reason}")]
    Conversion { page_id: String, reason: String },
}
