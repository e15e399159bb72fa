//! Post-LLM output sanitization.
//!
//! Turns raw model text into display text: hidden reasoning removed,
//! emphasis markers dropped, markdown heading and bullet prefixes stripped,
//! known section labels restyled as `<strong>` lines, blank runs collapsed.
//! Shared by the HTTP boundary and the client render path.

use std::sync::LazyLock;

use regex::Regex;

use super::thinking::strip_reasoning_blocks;
use super::types::{heading_label, SectionHeading};

static HEADING_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*#{1,6}\s*").expect("valid regex"));

static BULLET_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[-•]\s+").expect("valid regex"));

static BLANK_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

/// Sanitize raw model output for display. Absent input yields `""`.
pub fn sanitize(raw: Option<&str>) -> String {
    raw.map(sanitize_str).unwrap_or_default()
}

/// Sanitize a raw model answer.
///
/// Steps, in order:
/// 1. Strip reasoning blocks (before anything else, so their contents never
///    reach heading detection)
/// 2. CRLF → LF
/// 3. Delete `*` emphasis characters
/// 4. Per line: drop `#` prefix, drop bullet, restyle known headings
/// 5. Collapse 3+ line feeds to one blank line, trim
pub fn sanitize_str(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let text = strip_reasoning_blocks(raw);
    if text.len() != raw.len() {
        tracing::debug!(
            removed_bytes = raw.len() - text.len(),
            "Stripped reasoning blocks from model output"
        );
    }

    let text = normalize_line_endings(&text);
    let text = strip_emphasis(&text);
    // Deleting `*` can join a marker back together (`<*think>`).
    let text = strip_reasoning_blocks(&text);

    let lines = reformat_lines(&text);
    collapse_blank_runs(&lines.join("\n"))
}

/// Sanitize, then turn line feeds into `<br/>` for rich-text display.
pub fn render_display_html(raw: Option<&str>) -> String {
    sanitize(raw).replace('\n', "<br/>")
}

/// Convert every CRLF pair to a single LF.
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n")
}

/// Delete bold and italic asterisks. Nothing is re-inserted.
pub fn strip_emphasis(text: &str) -> String {
    text.replace('*', "")
}

/// Strip heading and bullet prefixes line by line, restyling known section
/// headings as `<strong>` lines framed by blank lines.
fn reformat_lines(text: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();

    for raw_line in text.split('\n') {
        let line = HEADING_PREFIX_RE.replace(raw_line, "");
        let line = BULLET_PREFIX_RE.replace(&line, "").into_owned();

        let label = heading_label(&line);
        if SectionHeading::from_label(label).is_some() {
            if out.last().is_some_and(|prev| !prev.is_empty()) {
                out.push(String::new());
            }
            out.push(format!("<strong>{label}</strong>"));
            out.push(String::new());
            continue;
        }

        out.push(line);
    }

    out
}

/// Collapse runs of three or more line feeds into one blank line, then trim.
pub fn collapse_blank_runs(text: &str) -> String {
    BLANK_RUN_RE.replace_all(text, "\n\n").trim().to_string()
}
