// src/process/mod.rs
pub mod change;
pub mod convert;
pub mod raw_table;
pub mod regions;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::error::Result;
use crate::schema::{ForecastRow, RawResult};
use crate::table::Table;
use change::{apply_change, BASE_YEAR};
use raw_table::{ColumnRoles, RawTable};

/// RawResult → Table: flatten, name regions, parse numbers, add change.
#[tracing::instrument(level = "info", skip_all, fields(entries = raw.data.len()))]
pub fn build_table(raw: &RawResult, fetched_at: DateTime<Utc>) -> Result<Table> {
    let flat = RawTable::from_raw_result(raw)?;
    let roles = ColumnRoles::resolve(&raw.columns)?;
    let rows = typed_rows(&flat, roles)?;

    let (rows, issues) = apply_change(rows, BASE_YEAR);
    info!(
        rows = rows.len(),
        issues = issues.len(),
        "forecast table built"
    );
    Ok(Table::new(rows, issues, fetched_at))
}

fn typed_rows(flat: &RawTable, roles: ColumnRoles) -> Result<Vec<ForecastRow>> {
    let year_col = &flat.headers[roles.year];
    let births_col = &flat.headers[roles.births];

    flat.rows
        .iter()
        .enumerate()
        .map(|(idx, cells)| {
            Ok(ForecastRow {
                region: regions::region_name(&cells[roles.region]).to_string(),
                year: convert::parse_year(&cells[roles.year], year_col, idx)?,
                births: convert::parse_births(&cells[roles.births], births_col, idx)?,
                change_pct: None,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ForecastError;
    use crate::schema::{ColumnDescriptor, Entry};
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    fn init_test_logging() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("info,fodelseprognos::process=debug")),
            )
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    fn raw(columns: &[&str], data: &[(&str, &str, &str)]) -> RawResult {
        RawResult {
            columns: columns
                .iter()
                .map(|t| ColumnDescriptor {
                    code: None,
                    text: t.to_string(),
                    kind: None,
                })
                .collect(),
            data: data
                .iter()
                .map(|(r, y, v)| Entry {
                    key: vec![r.to_string(), y.to_string()],
                    values: vec![v.to_string()],
                })
                .collect(),
        }
    }

    #[test]
    fn stockholm_example() {
        init_test_logging();
        let input = raw(
            &["region", "year", "Födda"],
            &[("01", "2024", "100"), ("01", "2025", "110")],
        );
        let table = build_table(&input, Utc::now()).unwrap();
        assert_eq!(
            table.rows(),
            &[
                ForecastRow {
                    region: "Region Stockholm".into(),
                    year: 2024,
                    births: 100.0,
                    change_pct: Some(0.0),
                },
                ForecastRow {
                    region: "Region Stockholm".into(),
                    year: 2025,
                    births: 110.0,
                    change_pct: Some(10.0),
                },
            ]
        );
        assert!(table.issues().is_empty());
    }

    #[test]
    fn row_count_matches_entries_with_unknown_and_zero_regions() {
        init_test_logging();
        let input = raw(
            &["region", "år", "Födda"],
            &[
                ("01", "2024", "25120.4"),
                ("01", "2025", "25480.6"),
                ("99", "2024", "0"),
                ("99", "2025", "3"),
                ("09", "2025", "470"),
            ],
        );
        let table = build_table(&input, Utc::now()).unwrap();
        assert_eq!(table.len(), input.data.len());
        assert_eq!(table.rows()[0].births, 25120.0);
        assert_eq!(table.rows()[1].births, 25481.0);
        assert_eq!(table.rows()[1].change_pct, Some(1.4));
        assert_eq!(table.rows()[2].region, "99");
        assert_eq!(table.rows()[3].change_pct, None);
        assert_eq!(table.rows()[4].region, "Region Gotland");
        assert_eq!(table.rows()[4].change_pct, None);
        assert_eq!(
            table.regions(),
            vec!["Region Stockholm", "99", "Region Gotland"]
        );
        assert_eq!(table.issues().len(), 2);
    }

    #[test]
    fn bad_year_is_fatal() {
        let input = raw(&["region", "år", "Födda"], &[("01", "tjugo", "1")]);
        match build_table(&input, Utc::now()).unwrap_err() {
            ForecastError::ValueParse { column, row, .. } => {
                assert_eq!(column, "år");
                assert_eq!(row, 0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
