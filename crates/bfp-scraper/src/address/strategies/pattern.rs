//! Strategy 2: regex scrape of `<td>…</td>` pairs.

use std::sync::LazyLock;

use regex::Regex;

use crate::parse_helpers::clean_cell_text;

static TD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<td\b[^>]*>(.*?)</td>").expect("valid regex"));

/// Inner text of every `<td>` pair, with nested tags stripped and entities
/// decoded. Works on fragments the HTML parser would discard.
pub(in crate::address) fn pattern_cells(html: &str) -> Option<Vec<String>> {
    let cells: Vec<String> = TD_RE
        .captures_iter(html)
        .filter_map(|cap| cap.get(1))
        .map(|inner| clean_cell_text(inner.as_str()))
        .filter(|text| !text.is_empty())
        .collect();

    (!cells.is_empty()).then_some(cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrapes_cells_without_table_context() {
        let html = r#"<td class="brand">TOTAL</td><TD>Total &amp; Shop</TD><td><span>Ring 3</span></td>"#;
        assert_eq!(
            pattern_cells(html).unwrap(),
            vec!["TOTAL", "Total & Shop", "Ring 3"]
        );
    }

    #[test]
    fn cell_contents_may_span_lines() {
        let html = "<td>Am\n   Markt 7</td><td>12345\nDorf</td>";
        assert_eq!(pattern_cells(html).unwrap(), vec!["Am Markt 7", "12345 Dorf"]);
    }

    #[test]
    fn does_not_match_similar_tag_names() {
        assert_eq!(pattern_cells("<tdx>nope</tdx>"), None);
    }

    #[test]
    fn unclosed_cells_yield_none() {
        assert_eq!(pattern_cells("<td>open forever"), None);
    }
}
