//! Strategy 1: parse the block as an HTML fragment and read every `<td>`.

use scraper::{Html, Selector};

use crate::parse_helpers::collapse_whitespace;

/// Text of every table cell in document order, whitespace-collapsed.
///
/// The HTML parser only keeps `<td>` elements that sit inside a table, so
/// bare cell tags yield nothing here and are left to the pattern strategy.
pub(in crate::address) fn markup_cells(html: &str) -> Option<Vec<String>> {
    let selector = Selector::parse("td").ok()?;
    let fragment = Html::parse_fragment(html);

    let cells: Vec<String> = fragment
        .select(&selector)
        .map(|td| collapse_whitespace(&td.text().collect::<String>()))
        .filter(|text| !text.is_empty())
        .collect();

    (!cells.is_empty()).then_some(cells)
}
