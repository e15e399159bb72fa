//! Hidden-reasoning removal for raw model output.
//!
//! Reasoning models wrap their chain of thought in one of several delimiter
//! conventions:
//! 1. Angle tags: `<think>...</think>`
//! 2. Pipe tags: `<|think|>...<|/think|>`
//! 3. Square tags: `[think]...[/think]`
//! 4. Lookalike brackets: `◁think▷...◁/think▷`, `⟨think⟩...⟨/think⟩`, etc.
//!
//! Each family is removed independently and case-insensitively. A lookalike
//! opener that has no closer loses only its marker; the text after it stays.
//! Stray markers of the other families are dropped the same way.

use std::sync::LazyLock;

use regex::Regex;

/// Opening brackets of the lookalike family (includes plain `<`).
const TRIANGLE_OPEN: &str = "[<\u{25C1}\u{25C0}\u{27E8}\u{3008}\u{2329}\u{2039}\u{276C}]";
/// Closing brackets of the lookalike family (includes plain `>`).
const TRIANGLE_CLOSE: &str = "[>\u{25B7}\u{25B6}\u{27E9}\u{3009}\u{232A}\u{203A}\u{276D}]";

/// Opener-to-nearest-closer spans, one pattern per family.
static PAIRED_BLOCKS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?is)<\s*think\b.*?<\s*/\s*think\s*>").expect("valid regex"),
        Regex::new(r"(?is)<\|\s*think\s*\|>.*?<\|\s*/?\s*think\s*\|>").expect("valid regex"),
        Regex::new(r"(?is)\[\s*think\s*\].*?\[\s*/\s*think\s*\]").expect("valid regex"),
        Regex::new(&format!(
            r"(?is){open}\s*think\s*{close}.*?{open}\s*/\s*think\s*{close}",
            open = TRIANGLE_OPEN,
            close = TRIANGLE_CLOSE,
        ))
        .expect("valid regex"),
    ]
});

static TRIANGLE_OPENER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i){open}\s*think\s*{close}",
        open = TRIANGLE_OPEN,
        close = TRIANGLE_CLOSE,
    ))
    .expect("valid regex")
});

static TRIANGLE_CLOSER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i){open}\s*/\s*think\s*{close}",
        open = TRIANGLE_OPEN,
        close = TRIANGLE_CLOSE,
    ))
    .expect("valid regex")
});

static TRIANGLE_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i){open}\s*/?\s*think\s*{close}",
        open = TRIANGLE_OPEN,
        close = TRIANGLE_CLOSE,
    ))
    .expect("valid regex")
});

/// Single markers left behind once every balanced block is gone.
static ORPHAN_MARKERS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)<\s*/?\s*think\b[^<>\n]*>").expect("valid regex"),
        Regex::new(r"(?i)<\|\s*/?\s*think\s*\|>").expect("valid regex"),
        Regex::new(r"(?i)\[\s*/?\s*think\s*\]").expect("valid regex"),
        TRIANGLE_MARKER.clone(),
    ]
});

/// Remove every recognized reasoning block from `text`.
///
/// Passes repeat until nothing changes, since removing one block can join
/// the fragments around it into a new marker. A pass that changes the text
/// always shortens it, so the loop terminates.
pub fn strip_reasoning_blocks(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let next = strip_pass(&current);
        if next == current {
            return next;
        }
        current = next;
    }
}

/// True if any opening or closing marker of a known family is present.
pub fn contains_reasoning_marker(text: &str) -> bool {
    ORPHAN_MARKERS.iter().any(|re| re.is_match(text))
}

fn strip_pass(text: &str) -> String {
    let mut result = text.to_string();
    for pattern in PAIRED_BLOCKS.iter() {
        result = pattern.replace_all(&result, "").into_owned();
    }
    result = sweep_triangle_blocks(result);
    for pattern in ORPHAN_MARKERS.iter() {
        result = pattern.replace_all(&result, "").into_owned();
    }
    result
}

/// Pair lookalike openers with any lookalike closer after them. Stops at the
/// first opener with no closer; the orphan sweep then drops the leftover
/// markers without touching the text between them.
fn sweep_triangle_blocks(mut text: String) -> String {
    while let Some(opener) = TRIANGLE_OPENER.find(&text) {
        let start = opener.start();
        let Some(closer) = TRIANGLE_CLOSER.find_at(&text, opener.end()) else {
            break;
        };
        let end = closer.end();
        text.replace_range(start..end, "");
    }
    text
}
