//! Strategy 3: treat the block as plain text, one cell per line.

use crate::parse_helpers::{decode_entities, strip_tags};

pub(in crate::address) fn plain_text_cells(html: &str) -> Option<Vec<String>> {
    let text = decode_entities(&strip_tags(html));

    let lines: Vec<String> = text
        .lines()
        .flat_map(|line| line.split('\r'))
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    (!lines.is_empty()).then_some(lines)
}
