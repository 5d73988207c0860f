// src/error.rs

use thiserror::Error;

/// Everything that can go wrong between the POST to the statistics API and a
/// finished `Table`.
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Transport failure or non-success HTTP status.
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The body does not have the `columns` / `data` shape we expect.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// A cell could not be parsed into the type its column requires.
    #[error("cannot parse {value:?} in column `{column}` at row {row}")]
    ValueParse {
        column: String,
        row: usize,
        value: String,
    },

    /// Base-year births is zero, so no relative change exists.
    #[error("base-year value is zero for region `{region}`")]
    DivisionByZero { region: String },
}

impl ForecastError {
    pub(crate) fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        ForecastError::Network {
            url: url.into(),
            source,
        }
    }

    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        ForecastError::MalformedResponse(msg.into())
    }
}

pub type Result<T, E = ForecastError> = std::result::Result<T, E>;
