//! Text-cleanup primitives shared by the cell-extraction strategies.

use std::sync::LazyLock;

use regex::Regex;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid regex"));

/// Collapses every whitespace run (including non-breaking spaces) into a
/// single ASCII space and trims both ends.
pub(crate) fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Removes anything that looks like a markup tag, keeping the text between.
pub(crate) fn strip_tags(s: &str) -> String {
    TAG_RE.replace_all(s, "").into_owned()
}

/// Decodes named and numeric HTML entities (`&amp;`, `&nbsp;`, `&#223;`, ...).
pub(crate) fn decode_entities(s: &str) -> String {
    html_escape::decode_html_entities(s).into_owned()
}

/// Tag-free, entity-decoded, whitespace-collapsed text of a markup snippet.
pub(crate) fn clean_cell_text(raw: &str) -> String {
    collapse_whitespace(&decode_entities(&strip_tags(raw)))
}

/// Maximum number of characters of raw markup written to a log line.
const LOG_PREVIEW_CHARS: usize = 5000;

/// Shortens `s` for logging, appending `…` when it was cut.
pub(crate) fn log_preview(s: &str) -> String {
    match s.char_indices().nth(LOG_PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}…", &s[..cut]),
        None => s.to_string(),
    }
}
