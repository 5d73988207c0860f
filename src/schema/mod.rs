pub mod arrow;
pub mod types;

pub use self::arrow::{forecast_schema, rows_to_record_batch};
pub use types::{ColumnDescriptor, Entry, ForecastRow, RawResult};
