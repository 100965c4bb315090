//! Integration test against a real Confluence site.
//!
//! Loads `.env` via dotenvy, then checks the Confluence envs are set.
//! Skipped (passes without doing anything) when any of them is missing.
//!
//! Required env vars for this test (see Atlassian docs):
//!   - CONFLUENCE_URL            (e.g. https://your-domain.atlassian.net/wiki)
//!   - CONFLUENCE_USER_EMAIL     (Atlassian account email with Confluence access)
//!   - CONFLUENCE_API_KEY        (API token: https://id.atlassian.com/manage/api-tokens)
//!   - CONFLUENCE_SPACE_KEY      (short code for a space with at least one page, e.g. DEMO)

use confluence_ingest_core::config::IngestConfig;
use confluence_ingest_core::record::READER_NAME;
use confluence_ingest_core::ConfluenceIngestor;

fn required_env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn live_setup() -> Option<(IngestConfig, String)> {
    let _ = dotenvy::dotenv();
    let space_key = required_env_var("CONFLUENCE_SPACE_KEY")?;
    let mut config = IngestConfig::from_env().ok()?;
    // Keep the run short.
    config.page_limit = Some(config.page_limit.unwrap_or(5));
    Some((config, space_key))
}

#[tokio::test]
async fn ingests_pages_from_live_space() {
    let Some((config, space_key)) = live_setup() else {
        eprintln!("[SKIP] Confluence env vars not set; skipping live ingest test");
        return;
    };

    let ingestor = ConfluenceIngestor::from_config(&config);
    let records = ingestor
        .ingest(&[space_key.clone()], None)
        .await
        .expect("live ingest should succeed with valid credentials");

    assert!(
        !records.is_empty(),
        "space {space_key} should contain at least one page"
    );
    assert!(records.len() <= config.page_limit.unwrap_or(usize::MAX));
    for record in &records {
        assert!(!record.name.is_empty(), "page title should not be empty");
        assert!(
            record.link.starts_with(&config.base_url),
            "link {} should start with base url",
            record.link
        );
        assert_eq!(record.reader, READER_NAME);
    }
}

#[tokio::test]
async fn rejected_credentials_surface_as_remote_error() {
    let Some((mut config, space_key)) = live_setup() else {
        eprintln!("[SKIP] Confluence env vars not set; skipping live auth test");
        return;
    };
    config.api_token = "definitely-not-a-valid-token".to_string();

    let ingestor = ConfluenceIngestor::from_config(&config);
    let err = ingestor
        .ingest(&[space_key], None)
        .await
        .expect_err("bad token must fail");

    assert!(
        matches!(err, confluence_ingest_core::IngestError::Remote { status: 401 | 403, .. }),
        "expected 401/403, got {err:?}"
    );
}
