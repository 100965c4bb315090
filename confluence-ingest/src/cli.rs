//! CLI glue for confluence-ingest: argument parsing, run-file merging and
//! output. All fetching and conversion lives in `confluence-ingest-core`.
use crate::load_config::{load_config, RunConfig};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use confluence_ingest_core::config::{IngestConfig, REQUIRED_ENV};
use confluence_ingest_core::record::{DocumentRecord, DEFAULT_DOCUMENT_TYPE, READER_DESCRIPTION, READER_NAME};
use confluence_ingest_core::ConfluenceIngestor;
use std::path::PathBuf;

/// CLI for confluence-ingest: turn Confluence spaces into indexable documents.
#[derive(Parser)]
#[clap(
    name = "confluence-ingest",
    version,
    about = "Download Confluence pages and emit them as normalised document records"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ingest every page of the given spaces and write the records as JSON
    Ingest {
        /// Space key to ingest; repeat for several spaces
        #[clap(long = "space")]
        spaces: Vec<String>,
        /// Path to a YAML run file (spaces, document_type, output)
        #[clap(long)]
        config: Option<PathBuf>,
        /// Document type stamped on every record [default: Wiki]
        #[clap(long)]
        document_type: Option<String>,
        /// Write records to this file instead of stdout
        #[clap(long)]
        output: Option<PathBuf>,
    },
    /// Show the reader name, description and required environment variables
    Info,
}

/// What an `ingest` invocation resolved to after merging flags over the run file.
#[derive(Debug, PartialEq, Eq)]
pub struct IngestRequest {
    pub spaces: Vec<String>,
    pub document_type: String,
    pub output: Option<PathBuf>,
}

/// Run-file spaces come first, then `--space` flags. Flags win for scalar options.
pub fn resolve_request(
    file: RunConfig,
    spaces: Vec<String>,
    document_type: Option<String>,
    output: Option<PathBuf>,
) -> IngestRequest {
    let mut all_spaces = file.spaces;
    all_spaces.extend(spaces);
    IngestRequest {
        spaces: all_spaces,
        document_type: document_type
            .or(file.document_type)
            .unwrap_or_else(|| DEFAULT_DOCUMENT_TYPE.to_string()),
        output: output.or(file.output),
    }
}

/// Text printed by the `info` subcommand.
pub fn info_text() -> String {
    format!(
        "{READER_NAME}\n{READER_DESCRIPTION}\nRequired environment: {}\n",
        REQUIRED_ENV.join(", ")
    )
}

fn write_records(records: &[DocumentRecord], output: Option<&PathBuf>) -> Result<()> {
    let json = serde_json::to_string_pretty(records).context("Failed to serialise records")?;
    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write records to {}", path.display()))?;
            tracing::info!(path = %path.display(), count = records.len(), "Wrote records");
        }
        None => println!("{json}"),
    }
    Ok(())
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    // Emit a top-level 'trace_initialised' event at the very start
    tracing::info!("trace_initialised");

    match cli.command {
        Commands::Info => {
            print!("{}", info_text());
            Ok(())
        }
        Commands::Ingest {
            spaces,
            config,
            document_type,
            output,
        } => {
            let file = match config {
                Some(path) => load_config(path)?,
                None => RunConfig::default(),
            };
            let request = resolve_request(file, spaces, document_type, output);
            tracing::info!(command = "ingest", spaces = ?request.spaces, "Starting ingestion");

            let ingest_config =
                IngestConfig::from_env().context("Confluence credentials are not configured")?;
            let ingestor = ConfluenceIngestor::from_config(&ingest_config);

            match ingestor
                .ingest(&request.spaces, Some(&request.document_type))
                .await
            {
                Ok(records) => {
                    write_records(&records, request.output.as_ref())?;
                    eprintln!("Loaded {} documents", records.len());
                    tracing::info!(command = "ingest", count = records.len(), "Ingestion complete");
                    Ok(())
                }
                Err(e) => {
                    tracing::error!(command = "ingest", error = %e, "Ingestion failed");
                    Err(anyhow::Error::new(e).context("Ingestion failed"))
                }
            }
        }
    }
}
