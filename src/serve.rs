// src/serve.rs

use serde::{Deserialize, Serialize};
use std::{convert::Infallible, net::SocketAddr, sync::Arc};
use tracing::{debug, error, info};
use warp::{
    http::{header, Response, StatusCode},
    reject::Rejection,
    reply::Reply,
    Filter,
};

use crate::present::{
    export::{view_to_csv, view_to_parquet},
    html::render_page,
    BarChart, Dashboard,
};
use crate::process::change::ChangeIssue;
use crate::schema::ForecastRow;
use crate::table::Table;

#[derive(Debug, Default, Deserialize)]
pub struct RegionQuery {
    pub region: Option<String>,
}

#[derive(Serialize)]
struct ViewResponse<'a> {
    region: Option<&'a str>,
    chart: BarChart,
    rows: Vec<&'a ForecastRow>,
    issues: Vec<&'a ChangeIssue>,
}

fn dashboard_for(table: &Table, query: RegionQuery) -> Dashboard<'_> {
    let mut dash = Dashboard::new(table);
    if let Some(region) = query.region {
        dash.select(region);
    }
    dash
}

fn with_table(
    table: Arc<Table>,
) -> impl Filter<Extract = (Arc<Table>,), Error = Infallible> + Clone {
    warp::any().map(move || table.clone())
}

async fn page(table: Arc<Table>, query: RegionQuery) -> Result<impl Reply, Rejection> {
    let dash = dashboard_for(&table, query);
    Ok(warp::reply::html(render_page(&dash)))
}

async fn regions(table: Arc<Table>) -> Result<impl Reply, Rejection> {
    Ok(warp::reply::json(&table.regions()))
}

async fn view(table: Arc<Table>, query: RegionQuery) -> Result<impl Reply, Rejection> {
    let dash = dashboard_for(&table, query);
    let filtered = dash.view();
    Ok(warp::reply::json(&ViewResponse {
        region: dash.selected_region(),
        chart: filtered.chart(),
        rows: filtered.rows,
        issues: dash.issues(),
    }))
}

#[derive(Clone, Copy)]
enum ExportFormat {
    Csv,
    Parquet,
}

async fn export(
    format: ExportFormat,
    table: Arc<Table>,
    query: RegionQuery,
) -> Result<Response<Vec<u8>>, Rejection> {
    let dash = dashboard_for(&table, query);
    let filtered = dash.view();
    let (bytes, content_type, ext) = match format {
        ExportFormat::Csv => (view_to_csv(&filtered), "text/csv; charset=utf-8", "csv"),
        ExportFormat::Parquet => (
            view_to_parquet(&filtered),
            "application/vnd.apache.parquet",
            "parquet",
        ),
    };

    let built = match bytes {
        Ok(bytes) => Response::builder()
            .header(header::CONTENT_TYPE, content_type)
            .header(
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"fodda.{}\"", ext),
            )
            .body(bytes),
        Err(e) => {
            error!(region = %filtered.region, error = ?e, "export failed");
            Response::builder()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .body(b"export failed".to_vec())
        }
    };
    built.map_err(|e| {
        error!(error = %e, "building export response");
        warp::reject()
    })
}

async fn health_check() -> Result<impl Reply, Rejection> {
    Ok(warp::reply::json(&serde_json::json!({
        "status": "healthy",
        "service": "fodelseprognos"
    })))
}

/// All dashboard routes over one shared, immutable table.
pub fn routes(
    table: Arc<Table>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let page_route = warp::path::end()
        .and(warp::get())
        .and(with_table(table.clone()))
        .and(warp::query::<RegionQuery>())
        .and_then(page);

    let regions_route = warp::path!("api" / "regions")
        .and(warp::get())
        .and(with_table(table.clone()))
        .and_then(regions);

    let view_route = warp::path!("api" / "view")
        .and(warp::get())
        .and(with_table(table.clone()))
        .and(warp::query::<RegionQuery>())
        .and_then(view);

    let csv_route = warp::path!("export.csv")
        .and(warp::get())
        .map(|| ExportFormat::Csv)
        .and(with_table(table.clone()))
        .and(warp::query::<RegionQuery>())
        .and_then(export);

    let parquet_route = warp::path!("export.parquet")
        .and(warp::get())
        .map(|| ExportFormat::Parquet)
        .and(with_table(table))
        .and(warp::query::<RegionQuery>())
        .and_then(export);

    let health_route = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .and_then(health_check);

    page_route
        .or(regions_route)
        .or(view_route)
        .or(csv_route)
        .or(parquet_route)
        .or(health_route)
        .with(warp::log::custom(|info| {
            debug!(
                method = %info.method(),
                path = info.path(),
                status = info.status().as_u16(),
                elapsed = ?info.elapsed(),
                "request"
            );
        }))
}

/// Serve the dashboard until the process is stopped.
pub async fn serve(table: Arc<Table>, addr: SocketAddr) {
    info!("dashboard on http://{}", addr);
    warp::serve(routes(table)).run(addr).await;
}
