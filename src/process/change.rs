use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::warn;

use super::convert::round_to;
use crate::error::{ForecastError, Result};
use crate::schema::ForecastRow;

/// Year every change is measured against.
pub const BASE_YEAR: i32 = 2024;

/// A region whose rows could not get a `change_pct`, or got one from an
/// ambiguous base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChangeIssue {
    /// Base-year births is zero; the region's rows carry no change.
    ZeroBase { region: String },
    /// No base-year row; the region's rows carry no change.
    MissingBase { region: String },
    /// Several base-year rows; the first one was used.
    DuplicateBase { region: String, count: usize },
}

impl ChangeIssue {
    pub fn region(&self) -> &str {
        match self {
            ChangeIssue::ZeroBase { region }
            | ChangeIssue::MissingBase { region }
            | ChangeIssue::DuplicateBase { region, .. } => region,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ChangeIssue::ZeroBase { region } => format!(
                "{region}: antalet födda {BASE_YEAR} är 0, förändring kan inte beräknas"
            ),
            ChangeIssue::MissingBase { region } => {
                format!("{region}: värde för basåret {BASE_YEAR} saknas")
            }
            ChangeIssue::DuplicateBase { region, count } => format!(
                "{region}: {count} värden för basåret {BASE_YEAR}, det första används"
            ),
        }
    }
}

/// Percentage change of `value` against `base`, one decimal.
pub fn percent_change(value: f64, base: f64, region: &str) -> Result<f64> {
    if base == 0.0 {
        return Err(ForecastError::DivisionByZero {
            region: region.to_string(),
        });
    }
    Ok(round_to(((value - base) / base) * 100.0, 1))
}

/// Region → births in `base_year`. The first row wins; the extra count of
/// each duplicated region is returned alongside.
fn base_year_index(
    rows: &[ForecastRow],
    base_year: i32,
) -> (HashMap<&str, f64>, HashMap<&str, usize>) {
    let mut index: HashMap<&str, f64> = HashMap::new();
    let mut seen: HashMap<&str, usize> = HashMap::new();
    for row in rows.iter().filter(|r| r.year == base_year) {
        *seen.entry(row.region.as_str()).or_default() += 1;
        index.entry(row.region.as_str()).or_insert(row.births);
    }
    seen.retain(|_, n| *n > 1);
    (index, seen)
}

/// Fill `change_pct` for every row. No row is dropped or reordered.
#[tracing::instrument(level = "debug", skip(rows), fields(rows = rows.len()))]
pub fn apply_change(mut rows: Vec<ForecastRow>, base_year: i32) -> (Vec<ForecastRow>, Vec<ChangeIssue>) {
    let mut issues = Vec::new();
    let mut reported: HashSet<String> = HashSet::new();

    let (index, duplicates) = base_year_index(&rows, base_year);
    let index: HashMap<String, f64> = index.into_iter().map(|(k, v)| (k.to_string(), v)).collect();

    let mut dup_regions: Vec<(String, usize)> = duplicates
        .into_iter()
        .map(|(k, n)| (k.to_string(), n))
        .collect();
    dup_regions.sort();
    for (region, count) in dup_regions {
        warn!(%region, count, "several base-year rows, using the first");
        issues.push(ChangeIssue::DuplicateBase { region, count });
    }

    for row in rows.iter_mut() {
        let Some(&base) = index.get(&row.region) else {
            if reported.insert(row.region.clone()) {
                warn!(region = %row.region, base_year, "no base-year row");
                issues.push(ChangeIssue::MissingBase {
                    region: row.region.clone(),
                });
            }
            row.change_pct = None;
            continue;
        };

        match percent_change(row.births, base, &row.region) {
            Ok(pct) => row.change_pct = Some(pct),
            Err(ForecastError::DivisionByZero { region }) => {
                if reported.insert(region.clone()) {
                    warn!(%region, base_year, "base-year births is zero");
                    issues.push(ChangeIssue::ZeroBase { region });
                }
                row.change_pct = None;
            }
            Err(other) => {
                // percent_change only ever fails on a zero base
                warn!(error = %other, "unexpected change failure");
                row.change_pct = None;
            }
        }
    }

    (rows, issues)
}
