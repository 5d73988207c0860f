// src/schema/types.rs

use serde::{Deserialize, Serialize};

/// One column descriptor of a PX-Web JSON response.
///
/// Only `text` is required; `code` and `type` are present on real responses
/// and help identify a column whose label is unfamiliar.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Eq, Hash)]
pub struct ColumnDescriptor {
    #[serde(default)]
    pub code: Option<String>,
    pub text: String,
    /// `d` (dimension), `t` (time) or `c` (contents/measure).
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

/// One data entry: the dimension keys followed by the measure values.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Eq)]
pub struct Entry {
    pub key: Vec<String>,
    pub values: Vec<String>,
}

/// The whole response body as returned by the statistics API.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Default)]
pub struct RawResult {
    pub columns: Vec<ColumnDescriptor>,
    pub data: Vec<Entry>,
}

impl RawResult {
    /// Decode a response body, tolerating the UTF-8 BOM the API prepends.
    pub fn from_json(body: &str) -> crate::error::Result<Self> {
        let body = body.strip_prefix('\u{feff}').unwrap_or(body);
        serde_json::from_str(body).map_err(|e| {
            crate::error::ForecastError::malformed(format!("response is not a PX-Web result: {e}"))
        })
    }
}

/// One row of the finished forecast table.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct ForecastRow {
    pub region: String,
    pub year: i32,
    pub births: f64,
    /// `None` when the region has no usable base-year value.
    pub change_pct: Option<f64>,
}
