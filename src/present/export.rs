// src/present/export.rs

use anyhow::{Context, Result};
use arrow::csv::WriterBuilder;
use parquet::{arrow::ArrowWriter, basic::Compression, file::properties::WriterProperties};

use super::FilteredView;
use crate::schema::{forecast_schema, rows_to_record_batch};

/// The view as CSV with a header line.
pub fn view_to_csv(view: &FilteredView<'_>) -> Result<Vec<u8>> {
    let batch = rows_to_record_batch(view.rows.iter().copied())?;
    let mut writer = WriterBuilder::new().with_header(true).build(Vec::new());
    writer
        .write(&batch)
        .with_context(|| format!("writing CSV for {}", view.region))?;
    Ok(writer.into_inner())
}

/// The view as a single-row-group, snappy-compressed Parquet file.
pub fn view_to_parquet(view: &FilteredView<'_>) -> Result<Vec<u8>> {
    let batch = rows_to_record_batch(view.rows.iter().copied())?;
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();
    let mut writer = ArrowWriter::try_new(Vec::new(), forecast_schema(), Some(props))?;
    writer
        .write(&batch)
        .with_context(|| format!("writing Parquet for {}", view.region))?;
    writer.into_inner().context("finishing Parquet file")
}
