//! Response shapes of the Distance Matrix API.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct DistanceMatrixResponse {
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub rows: Vec<DistanceMatrixRow>,
}

impl DistanceMatrixResponse {
    /// The element for the first origin/destination pair.
    #[must_use]
    pub fn first_element(&self) -> Option<&DistanceMatrixElement> {
        self.rows.first()?.elements.first()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DistanceMatrixRow {
    #[serde(default)]
    pub elements: Vec<DistanceMatrixElement>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DistanceMatrixElement {
    #[serde(default = "unknown_status")]
    pub status: String,
    pub distance: Option<Measure>,
}

/// The `value` half of a `{ "text": ..., "value": ... }` pair, left untyped
/// so a non-numeric value is reported as a missing distance rather than a
/// deserialization failure.
#[derive(Debug, Clone, Deserialize)]
pub struct Measure {
    pub value: Option<serde_json::Value>,
}

impl Measure {
    /// A JSON number, or a string holding one such as `"4000"`.
    #[must_use]
    pub fn numeric_value(&self) -> Option<f64> {
        match self.value.as_ref()? {
            serde_json::Value::Number(n) => n.as_f64(),
            serde_json::Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            _ => None,
        }
    }
}

fn unknown_status() -> String {
    "UNKNOWN".to_string()
}
