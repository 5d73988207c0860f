// src/table.rs

use arrow::{error::ArrowError, record_batch::RecordBatch};
use chrono::{DateTime, Utc};
use std::collections::HashSet;

use crate::process::change::ChangeIssue;
use crate::schema::{rows_to_record_batch, ForecastRow};

/// The finished forecast table. Built once, never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Table {
    rows: Vec<ForecastRow>,
    issues: Vec<ChangeIssue>,
    fetched_at: DateTime<Utc>,
}

impl Table {
    pub(crate) fn new(
        rows: Vec<ForecastRow>,
        issues: Vec<ChangeIssue>,
        fetched_at: DateTime<Utc>,
    ) -> Self {
        Table {
            rows,
            issues,
            fetched_at,
        }
    }

    pub fn rows(&self) -> &[ForecastRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn issues(&self) -> &[ChangeIssue] {
        &self.issues
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    /// Distinct region names in first-seen order.
    pub fn regions(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .map(|r| r.region.as_str())
            .filter(|r| seen.insert(*r))
            .collect()
    }

    pub fn contains_region(&self, region: &str) -> bool {
        self.rows.iter().any(|r| r.region == region)
    }

    pub fn to_record_batch(&self) -> Result<RecordBatch, ArrowError> {
        rows_to_record_batch(&self.rows)
    }
}
