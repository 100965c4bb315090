/// `load_config` module: loads a YAML run file describing which spaces to ingest.
///
/// The run file holds no secrets. Credentials always come from the
/// environment via [`confluence_ingest_core::config::IngestConfig::from_env`].
///
/// ```yaml
/// spaces: [ENG, OPS]
/// document_type: Wiki   # optional
/// output: pages.json    # optional
/// ```
///
/// # Errors
/// All errors in this module use `anyhow::Error` and are surfaced at the CLI boundary.
use anyhow::Result;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
pub struct RunConfig {
    /// Space keys, in the order they are ingested. Absent means none.
    #[serde(default)]
    pub spaces: Vec<String>,
    #[serde(default)]
    pub document_type: Option<String>,
    /// Where to write the JSON records. Absent means stdout.
    #[serde(default)]
    pub output: Option<PathBuf>,
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<RunConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading run configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => {
            info!(config_path = ?path_ref, "Config file read successfully");
            content
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    // An empty file is a valid run file with nothing in it.
    if config_content.trim().is_empty() {
        info!(config_path = ?path_ref, "Config file is empty, using defaults");
        return Ok(RunConfig::default());
    }

    let run: RunConfig = match serde_yaml::from_str(&config_content) {
        Ok(conf) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            conf
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            return Err(anyhow::anyhow!("Failed to parse config YAML {:?}: {e}", path_ref));
        }
    };

    info!(
        spaces = run.spaces.len(),
        document_type = run.document_type.as_deref().unwrap_or("<default>"),
        "Run config loaded"
    );
    Ok(run)
}
