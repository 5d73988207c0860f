// src/present/mod.rs
pub mod export;
pub mod html;

use serde::Serialize;

use crate::process::change::{ChangeIssue, BASE_YEAR};
use crate::schema::ForecastRow;
use crate::table::Table;

pub const PAGE_TITLE: &str = "SCB Statistik - Prognos över antalet födda per region";
pub const SELECT_LABEL: &str = "Välj region";
pub const X_TITLE: &str = "År";
pub const Y_TITLE: &str = "Förändring i förhållande till basår (%)";

/// Whether the user has picked a region yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Nothing picked; the first region of the table is shown.
    Initial,
    Selected(String),
}

/// Read-only view over the table plus the current selection key.
#[derive(Debug, Clone)]
pub struct Dashboard<'a> {
    table: &'a Table,
    selection: Selection,
}

impl<'a> Dashboard<'a> {
    pub fn new(table: &'a Table) -> Self {
        Dashboard {
            table,
            selection: Selection::Initial,
        }
    }

    /// Initial → Selected, Selected → Selected.
    pub fn select(&mut self, region: impl Into<String>) {
        self.selection = Selection::Selected(region.into());
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn table(&self) -> &'a Table {
        self.table
    }

    /// Region options, in first-seen order.
    pub fn options(&self) -> Vec<&'a str> {
        self.table.regions()
    }

    /// The region being displayed; `None` only for an empty table.
    pub fn selected_region(&self) -> Option<&str> {
        match &self.selection {
            Selection::Selected(region) => Some(region.as_str()),
            Selection::Initial => self.table.regions().first().copied(),
        }
    }

    pub fn view(&self) -> FilteredView<'a> {
        match self.selected_region() {
            Some(region) => FilteredView::new(self.table, region),
            None => FilteredView {
                region: String::new(),
                rows: Vec::new(),
            },
        }
    }

    /// Issues that concern the displayed region.
    pub fn issues(&self) -> Vec<&'a ChangeIssue> {
        let region = self.selected_region();
        self.table
            .issues()
            .iter()
            .filter(|i| Some(i.region()) == region)
            .collect()
    }
}

/// Rows of one region, ascending by year.
#[derive(Debug, Clone, Serialize)]
pub struct FilteredView<'a> {
    pub region: String,
    pub rows: Vec<&'a ForecastRow>,
}

impl<'a> FilteredView<'a> {
    /// An unknown region yields an empty view.
    pub fn new(table: &'a Table, region: &str) -> Self {
        let mut rows: Vec<&ForecastRow> = table
            .rows()
            .iter()
            .filter(|r| r.region == region)
            .collect();
        rows.sort_by_key(|r| r.year);
        FilteredView {
            region: region.to_string(),
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn chart(&self) -> BarChart {
        BarChart {
            title: format!(
                "Förändring i antal födda jämfört med basåret {} i {}",
                BASE_YEAR, self.region
            ),
            x_title: X_TITLE.to_string(),
            y_title: Y_TITLE.to_string(),
            bars: self
                .rows
                .iter()
                .map(|r| Bar {
                    year: r.year,
                    value: r.change_pct,
                })
                .collect(),
        }
    }

    pub fn heading(&self) -> String {
        format!("Data för {}", self.region)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub year: i32,
    pub value: Option<f64>,
}

/// Bar chart of change over time; ticks are exactly the bars' years.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub bars: Vec<Bar>,
}

impl BarChart {
    pub fn ticks(&self) -> Vec<i32> {
        self.bars.iter().map(|b| b.year).collect()
    }

    /// Value range including zero.
    pub fn value_range(&self) -> (f64, f64) {
        self.bars
            .iter()
            .filter_map(|b| b.value)
            .fold((0.0, 0.0), |(lo, hi), v| (f64::min(lo, v), f64::max(hi, v)))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::Utc;

    pub(crate) fn sample_table() -> Table {
        let row = |region: &str, year, births, change_pct| ForecastRow {
            region: region.to_string(),
            year,
            births,
            change_pct,
        };
        Table::new(
            vec![
                row("Region Uppsala", 2026, 4000.0, Some(2.6)),
                row("Region Uppsala", 2024, 3900.0, Some(0.0)),
                row("Region Gotland", 2024, 480.0, Some(0.0)),
                row("Region Uppsala", 2025, 3950.0, Some(1.3)),
                row("Region Gotland", 2025, 460.0, Some(-4.2)),
                row("Noll", 2024, 0.0, None),
                row("Noll", 2025, 2.0, None),
            ],
            vec![ChangeIssue::ZeroBase {
                region: "Noll".into(),
            }],
            Utc::now(),
        )
    }

    #[test]
    fn initial_selects_first_region() {
        let table = sample_table();
        let dash = Dashboard::new(&table);
        assert_eq!(dash.selection(), &Selection::Initial);
        assert_eq!(dash.selected_region(), Some("Region Uppsala"));
        assert_eq!(
            dash.options(),
            vec!["Region Uppsala", "Region Gotland", "Noll"]
        );
    }

    #[test]
    fn view_is_filtered_and_sorted() {
        let table = sample_table();
        let mut dash = Dashboard::new(&table);
        let years: Vec<i32> = dash.view().rows.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2024, 2025, 2026]);

        dash.select("Region Gotland");
        assert_eq!(
            dash.selection(),
            &Selection::Selected("Region Gotland".into())
        );
        let view = dash.view();
        assert_eq!(view.rows.len(), 2);
        assert!(view.rows.iter().all(|r| r.region == "Region Gotland"));
        assert_eq!(view.heading(), "Data för Region Gotland");
    }

    #[test]
    fn absent_region_gives_empty_view() {
        let table = sample_table();
        let mut dash = Dashboard::new(&table);
        dash.select("Region Atlantis");
        let view = dash.view();
        assert!(view.is_empty());
        assert!(view.chart().bars.is_empty());
        assert!(dash.issues().is_empty());
    }

    #[test]
    fn empty_table_selects_nothing() {
        let table = Table::new(Vec::new(), Vec::new(), Utc::now());
        let dash = Dashboard::new(&table);
        assert_eq!(dash.selected_region(), None);
        assert!(dash.view().is_empty());
    }

    #[test]
    fn chart_follows_view() {
        let table = sample_table();
        let mut dash = Dashboard::new(&table);
        dash.select("Region Gotland");
        let chart = dash.view().chart();
        assert_eq!(
            chart.title,
            "Förändring i antal födda jämfört med basåret 2024 i Region Gotland"
        );
        assert_eq!(chart.ticks(), vec![2024, 2025]);
        assert_eq!(chart.bars[1].value, Some(-4.2));
        assert_eq!(chart.value_range(), (-4.2, 0.0));
    }

    #[test]
    fn issues_are_region_scoped() {
        let table = sample_table();
        let mut dash = Dashboard::new(&table);
        assert!(dash.issues().is_empty());
        dash.select("Noll");
        assert_eq!(dash.issues().len(), 1);
        assert!(dash.view().chart().bars.iter().all(|b| b.value.is_none()));
    }
}
