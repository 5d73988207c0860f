// src/fetch/mod.rs

pub mod query;

use reqwest::Client;
use tracing::{debug, info};
use url::Url;

use crate::error::{ForecastError, Result};
use crate::schema::RawResult;
pub use query::PxQuery;

/// Birth forecast per county, Statistics Sweden.
pub const DEFAULT_API_URL: &str =
    "https://api.scb.se/OV0104/v1/doris/sv/ssd/START/BE/BE0401/BE0401A/BefProgOsiktRegN";

/// POST the query once and decode the body. No retries.
#[tracing::instrument(level = "info", skip(client, url, query), fields(url = %url))]
pub async fn fetch_forecast(client: &Client, url: &Url, query: &PxQuery) -> Result<RawResult> {
    debug!("posting forecast query");
    let body = client
        .post(url.clone())
        .json(query)
        .send()
        .await
        .and_then(|resp| resp.error_for_status())
        .map_err(|e| ForecastError::network(url.as_str(), e))?
        .text()
        .await
        .map_err(|e| ForecastError::network(url.as_str(), e))?;

    info!(bytes = body.len(), "forecast response received");
    let raw = RawResult::from_json(&body)?;
    debug!(columns = raw.columns.len(), entries = raw.data.len(), "decoded");
    Ok(raw)
}
