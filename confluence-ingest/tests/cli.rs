use assert_cmd::Command;
use predicates::prelude::*;
use std::fs::write;
use tempfile::{tempdir, TempDir};

const CONFLUENCE_VARS: [&str; 4] = [
    "CONFLUENCE_API_KEY",
    "CONFLUENCE_USER_EMAIL",
    "CONFLUENCE_URL",
    "CONFLUENCE_PAGE_LIMIT",
];

/// Binary command run from an empty temp dir with no Confluence env, so no
/// stray `.env` can supply credentials.
fn isolated_cmd() -> (Command, TempDir) {
    let dir = tempdir().expect("temp dir");
    let mut cmd = Command::cargo_bin("confluence-ingest").expect("Binary exists");
    cmd.current_dir(dir.path());
    for var in CONFLUENCE_VARS {
        cmd.env_remove(var);
    }
    (cmd, dir)
}

#[test]
fn info_prints_reader_metadata() {
    let (mut cmd, _dir) = isolated_cmd();
    cmd.arg("info");
    cmd.assert()
        .success()
        .stdout(
            predicate::str::contains("ConfluenceReader")
                .and(predicate::str::contains("CONFLUENCE_API_KEY"))
                .and(predicate::str::contains("CONFLUENCE_USER_EMAIL"))
                .and(predicate::str::contains("CONFLUENCE_URL")),
        );
}

#[test]
fn ingest_without_credentials_fails_before_any_request() {
    let (mut cmd, _dir) = isolated_cmd();
    cmd.arg("ingest").arg("--space").arg("ENG");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("CONFLUENCE_API_KEY"))
        .stdout(predicate::str::contains("\"reader\"").not());
}

#[test]
fn ingest_reports_the_first_missing_variable() {
    let (mut cmd, _dir) = isolated_cmd();
    cmd.arg("ingest")
        .arg("--space")
        .arg("ENG")
        .env("CONFLUENCE_API_KEY", "token")
        .env("CONFLUENCE_URL", "http://127.0.0.1:9");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("CONFLUENCE_USER_EMAIL"));
}

#[test]
fn ingest_with_unreadable_run_file_fails() {
    let (mut cmd, dir) = isolated_cmd();
    cmd.arg("ingest")
        .arg("--config")
        .arg(dir.path().join("missing.yaml"));
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config file"));
}

#[test]
fn ingest_of_no_spaces_writes_an_empty_list() {
    let (mut cmd, dir) = isolated_cmd();
    let run_file = dir.path().join("run.yaml");
    write(&run_file, "document_type: Wiki\n").expect("write run file");

    // Credentials present but the address is never contacted: no spaces, no calls.
    cmd.arg("ingest")
        .arg("--config")
        .arg(&run_file)
        .env("CONFLUENCE_API_KEY", "token")
        .env("CONFLUENCE_USER_EMAIL", "bot@example.com")
        .env("CONFLUENCE_URL", "http://127.0.0.1:9");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("[]"))
        .stderr(predicate::str::contains("Loaded 0 documents"));
}

use std::sync::{Arc, Mutex};
use tracing_subscriber::prelude::*; // needed for .with()
use tracing_subscriber::{layer::Context, Layer, Registry};

/// Custom Layer to collect emitted event messages.
struct EventCollector {
    events: Arc<Mutex<Vec<String>>>,
}

impl<S> Layer<S> for EventCollector
where
    S: tracing::Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let msg = format!("{:?}", event);
        self.events.lock().unwrap().push(msg);
    }
}

#[tokio::test]
async fn emits_trace_initialised_event() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let collector = EventCollector {
        events: events.clone(),
    };
    let subscriber = Registry::default().with(collector);
    let _guard = tracing::subscriber::set_default(subscriber);

    use confluence_ingest::cli::{run, Cli, Commands};

    let cli = Cli {
        command: Commands::Info,
    };

    run(cli).await.expect("info should succeed");

    let event_msgs = events.lock().unwrap();
    assert!(
        event_msgs.iter().any(|msg| msg.contains("trace_initialised")),
        "Expected a 'trace_initialised' trace event, got: {:?}",
        event_msgs
    );
}
