//! Address extraction from station markup.
//!
//! Stations describe themselves with an unlabeled table: brand and display
//! name in the first two cells, then street, then a cell holding the
//! five-digit postal code and locality. Cells are pulled out with the first
//! strategy in [`strategies::STRATEGIES`] that finds enough of them, and the
//! address is then read positionally.

mod strategies;

use std::sync::LazyLock;

use bfp_core::Address;
use regex::Regex;

use crate::parse_helpers::log_preview;
use strategies::{MIN_CELLS, STRATEGIES};

static POSTAL_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[0-9]{5}\b").expect("valid regex"));

static POSTAL_CITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([0-9]{5})\b\s*(.+)$").expect("valid regex"));

/// Ordered, non-empty text cells of an address block.
///
/// Returns an empty vector when no strategy finds at least two cells.
#[must_use]
pub fn extract_cells(block: &str) -> Vec<String> {
    let block = block.trim();
    if block.is_empty() {
        return vec![];
    }

    for strategy in &STRATEGIES {
        if let Some(cells) = (strategy.extract)(block) {
            if cells.len() >= MIN_CELLS {
                tracing::trace!(
                    strategy = strategy.name,
                    cells = cells.len(),
                    "extracted address cells"
                );
                return cells;
            }
        }
    }

    tracing::debug!(
        block = %log_preview(block),
        "no strategy produced enough address cells"
    );
    vec![]
}

/// Parse a station's address block into an [`Address`].
///
/// Returns `None` when fewer than two cells are found, no cell carries a
/// five-digit postal code, or no non-empty cell precedes the postal cell.
#[must_use]
pub fn extract_address(block: &str) -> Option<Address> {
    let cells = extract_cells(block);
    address_from_cells(&cells)
}

fn address_from_cells(cells: &[String]) -> Option<Address> {
    if cells.len() < MIN_CELLS {
        return None;
    }

    let brand = cells[0].trim().to_string();
    let display_name = cells[1].trim().to_string();

    let postal_index = cells
        .iter()
        .position(|cell| POSTAL_CODE_RE.is_match(cell))?;

    let street = cells[..postal_index]
        .iter()
        .rev()
        .map(|cell| cell.trim())
        .find(|cell| !cell.is_empty())?
        .to_string();

    let postal_city = split_postal_city(&cells[postal_index]);

    let display_name = if display_name.is_empty() {
        brand.clone()
    } else {
        display_name
    };

    Some(Address {
        brand,
        display_name,
        street,
        postal_city,
    })
}

/// `"22041 Hamburg"` from a cell such as `"D-22041  Hamburg"`.
///
/// Empty when the code is not followed by a locality.
fn split_postal_city(line: &str) -> String {
    let Some(caps) = POSTAL_CITY_RE.captures(line) else {
        return String::new();
    };
    let code = caps.get(1).map_or("", |m| m.as_str().trim());
    let city = caps.get(2).map_or("", |m| m.as_str().trim());

    if code.is_empty() {
        city.to_string()
    } else {
        format!("{code} {city}").trim().to_string()
    }
}

#[cfg(test)]
#[path = "address_test.rs"]
mod tests;
