//! Cell-extraction strategies for station address markup.
//!
//! Each strategy is a pure function from markup to an ordered list of
//! non-empty text cells. They are tried in priority order and the first that
//! produces at least [`MIN_CELLS`] cells wins.

mod markup;
mod pattern;
mod plain;

pub(super) use markup::markup_cells;
pub(super) use pattern::pattern_cells;
pub(super) use plain::plain_text_cells;

/// Brand and display name are always the first two cells, so fewer than two
/// can never describe a station.
pub(super) const MIN_CELLS: usize = 2;

/// A named cell-extraction strategy.
pub(super) struct CellStrategy {
    pub(super) name: &'static str,
    pub(super) extract: fn(&str) -> Option<Vec<String>>,
}

/// Strategies in priority order: parsed DOM, regex scrape, plain text lines.
pub(super) const STRATEGIES: [CellStrategy; 3] = [
    CellStrategy {
        name: "markup",
        extract: markup_cells,
    },
    CellStrategy {
        name: "pattern",
        extract: pattern_cells,
    },
    CellStrategy {
        name: "plain_text",
        extract: plain_text_cells,
    },
];
