// src/fetch/query.rs
use serde::Serialize;

/// County codes requested from the forecast table.
pub static REGION_VALUES: &[&str] = &[
    "01", "03", "04", "05", "06", "07", "08", "09", "10", "12", "13", "14", "17", "18", "19", "20",
    "21", "22", "23", "24", "25",
];

/// Forecast births.
pub const CONTENTS_CODE: &str = "000004LF";

pub const FIRST_YEAR: i32 = 2024;
pub const LAST_YEAR: i32 = 2035;

/// PX-Web query body.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PxQuery {
    pub query: Vec<QueryItem>,
    pub response: ResponseFormat,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct QueryItem {
    pub code: String,
    pub selection: Selection,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Selection {
    pub filter: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ResponseFormat {
    pub format: String,
}

fn item(code: &str, filter: &str, values: impl IntoIterator<Item = String>) -> QueryItem {
    QueryItem {
        code: code.to_string(),
        selection: Selection {
            filter: filter.to_string(),
            values: values.into_iter().collect(),
        },
    }
}

impl PxQuery {
    /// The one query this program sends: births per county, 2024–2035.
    pub fn births_forecast() -> Self {
        PxQuery {
            query: vec![
                item(
                    "Region",
                    "vs:RegionLän07EjAggr",
                    REGION_VALUES.iter().map(|s| s.to_string()),
                ),
                item("ContentsCode", "item", [CONTENTS_CODE.to_string()]),
                item(
                    "Tid",
                    "item",
                    (FIRST_YEAR..=LAST_YEAR).map(|y| y.to_string()),
                ),
            ],
            response: ResponseFormat {
                format: "json".into(),
            },
        }
    }
}
