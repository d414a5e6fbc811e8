//! Parsing of the semi-structured data published by fuel station sources.
//!
//! - [`normalize_price`] turns a raw price (number or free text) into a
//!   positive `f64`.
//! - [`extract_address`] recovers a postal address from the HTML table a
//!   station publishes about itself.
//!
//! Malformed input is never an error here: both return `None`.

pub mod address;
pub mod normalize;

pub(crate) mod parse_helpers;

pub use address::{extract_address, extract_cells};
pub use normalize::normalize_price;
