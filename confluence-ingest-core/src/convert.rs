//! Rendered page HTML to markdown text.
//!
//! Confluence hands back the `view` representation as an HTML fragment. The
//! markdown rules belong to `htmd`, configured the way python's markdownify
//! formats by default: underlined `h1`/`h2`, `*` bullets, fenced code. This
//! module only tidies the converter's output.

use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::LazyLock;

use htmd::options::{BulletListMarker, CodeBlockStyle, HeadingStyle, Options};
use htmd::HtmlToMarkdown;
use regex::Regex;
use tracing::{debug, error};

use crate::contract::Page;
use crate::error::IngestError;

static BLANK_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").expect("static regex"));
static LIST_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:[*+-]|\d+[.)])\s").expect("static regex"));

fn converter() -> HtmlToMarkdown {
    HtmlToMarkdown::builder()
        .skip_tags(vec!["script", "style", "head", "noscript"])
        .options(Options {
            heading_style: HeadingStyle::Setex,
            bullet_list_marker: BulletListMarker::Asterisk,
            code_block_style: CodeBlockStyle::Fenced,
            ..Default::default()
        })
        .build()
}

/// Extracts and converts the rendered body of a fetched page.
///
/// A page without a `view` body, or one the converter cannot handle, is a
/// conversion error.
pub fn page_text(page: &Page) -> Result<String, IngestError> {
    let Some(body) = page.body.view.as_ref() else {
        error!(page_id = %page.id, "Page has no rendered view body");
        return Err(IngestError::Conversion {
            page_id: page.id.clone(),
            reason: "response carries no body.view representation".to_string(),
        });
    };

    match html_to_markdown(&body.value) {
        Ok(text) => {
            debug!(page_id = %page.id, html_len = body.value.len(), text_len = text.len(), "Converted page body");
            Ok(text)
        }
        Err(e) => {
            error!(page_id = %page.id, error = %e, "Failed to convert page body");
            Err(IngestError::Conversion {
                page_id: page.id.clone(),
                reason: e.to_string(),
            })
        }
    }
}

/// Converts an HTML fragment to trimmed markdown.
///
/// Page HTML is remote input, so a panic inside the converter is reported as
/// an error instead of unwinding through the ingestion run.
pub fn html_to_markdown(html: &str) -> io::Result<String> {
    let converted = panic::catch_unwind(AssertUnwindSafe(|| converter().convert(html)))
        .map_err(|_| io::Error::other("markdown converter panicked on page body"))??;
    Ok(tidy(&converted))
}

/// Strips stray indentation outside code fences and list items, drops trailing
/// whitespace, folds blank-line runs and trims the result.
fn tidy(markdown: &str) -> String {
    let mut in_fence = false;
    let mut lines = Vec::new();
    for line in markdown.lines() {
        let is_fence = line.trim_start().starts_with("```");
        if in_fence || is_fence {
            lines.push(line.trim_end());
        } else if LIST_ITEM.is_match(line) {
            lines.push(line.trim_end());
        } else {
            lines.push(line.trim());
        }
        if is_fence {
            in_fence = !in_fence;
        }
    }
    BLANK_RUNS.replace_all(&lines.join("\n"), "\n\n").trim().to_string()
}
