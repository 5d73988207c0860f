use crate::error::{ForecastError, Result};
use crate::schema::{ColumnDescriptor, RawResult};
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    /// Column labels, the `text` of each descriptor, in descriptor order.
    pub headers: Vec<String>,
    /// Each entry as `key ++ values`, one String per column.
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Flatten the nested response into labelled rows.
    ///
    /// Row order mirrors entry order; nothing is deduplicated or sorted.
    pub fn from_raw_result(raw: &RawResult) -> Result<Self> {
        if raw.columns.is_empty() {
            return Err(ForecastError::malformed("response has no columns"));
        }
        let width = raw.columns.len();
        let headers: Vec<String> = raw.columns.iter().map(|c| c.text.clone()).collect();

        let mut rows = Vec::with_capacity(raw.data.len());
        for (idx, entry) in raw.data.iter().enumerate() {
            let got = entry.key.len() + entry.values.len();
            if got != width {
                return Err(ForecastError::malformed(format!(
                    "entry {} has {} key + {} value cells, expected {}",
                    idx,
                    entry.key.len(),
                    entry.values.len(),
                    width
                )));
            }
            let mut row = Vec::with_capacity(width);
            row.extend(entry.key.iter().cloned());
            row.extend(entry.values.iter().cloned());
            rows.push(row);
        }

        debug!(columns = width, rows = rows.len(), "flattened raw result");
        Ok(RawTable { headers, rows })
    }
}

/// Which column of a `RawTable` holds region, year and births.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRoles {
    pub region: usize,
    pub year: usize,
    pub births: usize,
}

const REGION_LABELS: &[&str] = &["region"];
const YEAR_LABELS: &[&str] = &["år", "year", "tid"];
const BIRTHS_LABELS: &[&str] = &["födda", "births"];

impl ColumnRoles {
    /// Match by label first, then by PX column type (`d`, `t`, `c`).
    pub fn resolve(columns: &[ColumnDescriptor]) -> Result<Self> {
        Ok(ColumnRoles {
            region: find_role(columns, "region", REGION_LABELS, "d")?,
            year: find_role(columns, "year", YEAR_LABELS, "t")?,
            births: find_role(columns, "births", BIRTHS_LABELS, "c")?,
        })
    }
}

fn find_role(
    columns: &[ColumnDescriptor],
    role: &str,
    labels: &[&str],
    kind: &str,
) -> Result<usize> {
    columns
        .iter()
        .position(|c| {
            let text = c.text.trim().to_lowercase();
            labels.iter().any(|l| *l == text)
        })
        .or_else(|| {
            columns
                .iter()
                .position(|c| c.kind.as_deref().is_some_and(|k| k.eq_ignore_ascii_case(kind)))
        })
        .ok_or_else(|| {
            let seen: Vec<&str> = columns.iter().map(|c| c.text.as_str()).collect();
            ForecastError::malformed(format!("no {} column among {:?}", role, seen))
        })
}
