// src/schema/arrow.rs

use arrow::{
    array::{ArrayRef, Float64Builder, Int32Builder, StringBuilder},
    datatypes::{DataType, Field as ArrowField, Schema as ArrowSchema},
    error::ArrowError,
    record_batch::RecordBatch,
};
use std::sync::Arc;

use super::types::ForecastRow;

pub const REGION: &str = "region";
pub const YEAR: &str = "year";
pub const BIRTHS: &str = "births";
pub const CHANGE_PCT: &str = "change_pct";

/// Arrow schema of the forecast table.
///
/// - region     → Utf8
/// - year       → Int32
/// - births     → Float64 (integral-valued)
/// - change_pct → Float64, null where no base-year value was usable
pub fn forecast_schema() -> Arc<ArrowSchema> {
    Arc::new(ArrowSchema::new(vec![
        ArrowField::new(REGION, DataType::Utf8, false),
        ArrowField::new(YEAR, DataType::Int32, false),
        ArrowField::new(BIRTHS, DataType::Float64, false),
        ArrowField::new(CHANGE_PCT, DataType::Float64, true),
    ]))
}

/// Build one RecordBatch from forecast rows, in iteration order.
pub fn rows_to_record_batch<'a, I>(rows: I) -> Result<RecordBatch, ArrowError>
where
    I: IntoIterator<Item = &'a ForecastRow>,
{
    let mut region = StringBuilder::new();
    let mut year = Int32Builder::new();
    let mut births = Float64Builder::new();
    let mut change = Float64Builder::new();

    for row in rows {
        region.append_value(&row.region);
        year.append_value(row.year);
        births.append_value(row.births);
        change.append_option(row.change_pct);
    }

    let columns: Vec<ArrayRef> = vec![
        Arc::new(region.finish()),
        Arc::new(year.finish()),
        Arc::new(births.finish()),
        Arc::new(change.finish()),
    ];
    RecordBatch::try_new(forecast_schema(), columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Array, Float64Array, Int32Array, StringArray};

    #[test]
    fn batch_carries_nulls_for_missing_change() {
        let rows = vec![
            ForecastRow {
                region: "Region Gotland".into(),
                year: 2024,
                births: 480.0,
                change_pct: Some(0.0),
            },
            ForecastRow {
                region: "Region Gotland".into(),
                year: 2025,
                births: 470.0,
                change_pct: None,
            },
        ];
        let batch = rows_to_record_batch(&rows).unwrap();
        assert_eq!(batch.num_rows(), 2);
        assert_eq!(batch.schema(), forecast_schema());

        let regions = batch
            .column(0)
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        assert_eq!(regions.value(1), "Region Gotland");
        let years = batch
            .column(1)
            .as_any()
            .downcast_ref::<Int32Array>()
            .unwrap();
        assert_eq!(years.value(1), 2025);
        let change = batch
            .column(3)
            .as_any()
            .downcast_ref::<Float64Array>()
            .unwrap();
        assert!(change.is_valid(0));
        assert!(change.is_null(1));
    }
}
