//! Forecast births per Swedish region from Statistics Sweden, with change
//! against base year 2024, served as a small dashboard.

pub mod config;
pub mod error;
pub mod fetch;
pub mod present;
pub mod process;
pub mod schema;
pub mod serve;
pub mod table;

pub use error::{ForecastError, Result};
pub use table::Table;
