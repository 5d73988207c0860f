use anyhow::{Context, Result};
use chrono::Utc;
use fodelseprognos::{
    config::Config,
    fetch::{self, PxQuery},
    process, serve,
};
use reqwest::Client;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) config + logging ─────────────────────────────────────────
    let cfg = Config::from_env()?;
    fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(cfg.log_level.parse().unwrap_or(Level::INFO.into())),
        )
        .init();
    info!("startup");

    // ─── 2) fetch once; any failure ends the run before serving ──────
    let client = Client::builder()
        .timeout(cfg.request_timeout)
        .build()
        .context("building HTTP client")?;
    let raw = fetch::fetch_forecast(&client, &cfg.api_url, &PxQuery::births_forecast())
        .await
        .with_context(|| format!("fetching forecast from {}", cfg.api_url))?;

    // ─── 3) transform ───────────────────────────────────────────────
    let table = process::build_table(&raw, Utc::now()).context("building forecast table")?;
    info!(
        rows = table.len(),
        regions = table.regions().len(),
        issues = table.issues().len(),
        "table ready"
    );

    // ─── 4) present ─────────────────────────────────────────────────
    serve::serve(Arc::new(table), cfg.listen).await;
    Ok(())
}
