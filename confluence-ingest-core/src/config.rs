use std::fmt;

use tracing::{debug, info};

use crate::error::IngestError;

pub const API_KEY_VAR: &str = "CONFLUENCE_API_KEY";
pub const USER_EMAIL_VAR: &str = "CONFLUENCE_USER_EMAIL";
pub const URL_VAR: &str = "CONFLUENCE_URL";
pub const PAGE_LIMIT_VAR: &str = "CONFLUENCE_PAGE_LIMIT";

/// Environment variables that must be present before an ingestion run can start.
pub const REQUIRED_ENV: [&str; 3] = [API_KEY_VAR, USER_EMAIL_VAR, URL_VAR];

/// Credentials and connection settings for one Confluence site.
///
/// Loaded once at startup and passed into the client, never re-read from the
/// environment afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct IngestConfig {
    pub api_token: String,
    pub user_email: String,
    /// Site root such as `https://acme.atlassian.net/wiki`. Page links are
    /// built by appending the page's web path to this value verbatim.
    pub base_url: String,
    /// Upper bound on pages listed per space. `None` lists everything.
    pub page_limit: Option<usize>,
}

impl IngestConfig {
    pub fn from_env() -> Result<Self, IngestError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key/value source. Blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, IngestError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| -> Result<String, IngestError> {
            match lookup(name).filter(|v| !v.trim().is_empty()) {
                Some(value) => Ok(value),
                None => {
                    tracing::error!(var = name, "Required environment variable not set");
                    Err(IngestError::MissingEnv(name))
                }
            }
        };

        let api_token = required(API_KEY_VAR)?;
        let user_email = required(USER_EMAIL_VAR)?;
        let base_url = required(URL_VAR)?;

        let page_limit = match lookup(PAGE_LIMIT_VAR).filter(|v| !v.trim().is_empty()) {
            None => None,
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(limit) => Some(limit),
                Err(e) => {
                    tracing::error!(var = PAGE_LIMIT_VAR, value = %raw, "Page limit must be a non-negative integer");
                    return Err(IngestError::InvalidEnv {
                        name: PAGE_LIMIT_VAR,
                        value: raw,
                        reason: e.to_string(),
                    });
                }
            },
        };

        Ok(Self {
            api_token,
            user_email,
            base_url,
            page_limit,
        })
    }

    pub fn trace_loaded(&self) {
        info!(
            base_url = %self.base_url,
            user_email = %self.user_email,
            page_limit = ?self.page_limit,
            "Loaded Confluence config"
        );
        debug!(?self, "Confluence config loaded (full debug)");
    }
}

impl fmt::Debug for IngestConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestConfig")
            .field("api_token_len", &self.api_token.len())
            .field("user_email", &self.user_email)
            .field("base_url", &self.base_url)
            .field("page_limit", &self.page_limit)
            .finish()
    }
}
