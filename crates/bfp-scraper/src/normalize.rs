//! Normalization of raw station prices.

use bfp_core::RawPrice;

/// Normalizes a raw price into a strictly positive `f64`.
///
/// - Numbers are taken as-is.
/// - Text is trimmed, decimal commas become dots, and every character that is
///   not an ASCII digit or `.` is dropped before parsing.
///
/// Returns `None` for empty, unparsable, non-finite, or non-positive values.
///
/// Because the cleanup drops *every* non-digit character, a leading minus is
/// removed too: `"-0.5"` normalizes to `0.5`.
#[must_use]
pub fn normalize_price(raw: &RawPrice) -> Option<f64> {
    let value = match raw {
        RawPrice::Number(n) => *n,
        RawPrice::Text(text) => parse_price_text(text)?,
    };

    (value.is_finite() && value > 0.0).then_some(value)
}

fn parse_price_text(text: &str) -> Option<f64> {
    let cleaned: String = text
        .trim()
        .replace(',', ".")
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    // `str::parse::<f64>` accepts "1." and ".5" but rejects "." and "1.2.3",
    // which is the decimal grammar wanted here.
    cleaned.parse::<f64>().ok()
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
