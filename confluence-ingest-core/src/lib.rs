#![doc = "confluence-ingest-core: core logic library for confluence-ingest."]

//! Fetches pages from Confluence spaces and normalises each one into a
//! [`record::DocumentRecord`] for a downstream indexer.
//!
//! # Usage
//! Load an [`config::IngestConfig`] once, build a [`ingest::ConfluenceIngestor`]
//! from it and call [`ingest::PageIngestor::ingest`] with the space keys.

pub mod config;
pub mod confluence;
pub mod contract;
pub mod convert;
pub mod error;
pub mod ingest;
pub mod record;

pub use error::IngestError;
pub use ingest::{ConfluenceIngestor, PageIngestor};
pub use record::DocumentRecord;
