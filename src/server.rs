//! HTTP surface: routes each request to one query or aggregate operation
//! and maps domain errors to status codes.
//!
//! Error mapping: `NotFound` -> 404, everything else -> 500. Error bodies
//! are `{"detail": "<message>"}` with the domain error's text embedded.

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value as JsonValue};
use tower_http::trace::TraceLayer;

use crate::aggregate::{aggregate, aggregate_with_stats, GwpAggregate, GwpAggregateStats};
use crate::cache::TableCache;
use crate::error::DataError;
use crate::dataset::PROCESS_NAME_COLUMN;
use crate::query::{
    ensure_non_empty, filter_by_column, filter_by_country, search, search_process_names,
    ProcessNameSearch,
};
use crate::types::Table;

/// Shared state handed to every handler: the injected table cache.
#[derive(Clone)]
pub struct AppState {
    cache: Arc<TableCache>,
}

impl AppState {
    /// State backed by a dataset file, loaded lazily on first request.
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            cache: Arc::new(TableCache::new(data_path)),
        }
    }

    /// State backed by an in-memory table (used by tests).
    pub fn with_table(table: Table) -> Self {
        Self {
            cache: Arc::new(TableCache::preloaded(table)),
        }
    }

    async fn table(&self) -> Result<Arc<Table>, ApiError> {
        Ok(self.cache.get().await?)
    }
}

/// Domain error translated to an HTTP response.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl From<DataError> for ApiError {
    fn from(err: DataError) -> Self {
        let status = match err {
            DataError::NotFound { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            detail: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

/// Build the application router over the given state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/data", get(get_all_data))
        .route("/data/country/:country_code", get(get_data_by_country))
        .route("/data/country", get(filter_data))
        .route("/data/search", get(search_data))
        .route("/data/process/:process_name", get(get_data_by_process))
        .route(
            "/data/gwp/aggregate/:country_code",
            get(get_gwp_aggregate_by_country),
        )
        .route("/data/aggregate/:country_code", get(get_aggregate_by_country))
        .route("/data/process_names/search", get(get_process_names))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn home() -> Json<JsonValue> {
    Json(json!({ "message": "Welcome to FastAPI!" }))
}

async fn get_all_data(State(state): State<AppState>) -> Result<Json<JsonValue>, ApiError> {
    let table = state.table().await?;
    Ok(Json(json!({
        "headers": table.columns,
        "data": table.rows_to_json(),
    })))
}

async fn get_data_by_country(
    State(state): State<AppState>,
    Path(country_code): Path<String>,
) -> Result<Json<Vec<JsonValue>>, ApiError> {
    let table = state.table().await?;
    let rows = ensure_non_empty(filter_by_country(&table, &country_code)?)?;
    Ok(Json(rows.rows_to_json()))
}

#[derive(Debug, Deserialize)]
struct CountryCodeParams {
    country_code: String,
}

async fn filter_data(
    State(state): State<AppState>,
    Query(params): Query<CountryCodeParams>,
) -> Result<Json<Vec<JsonValue>>, ApiError> {
    let table = state.table().await?;
    let rows = ensure_non_empty(filter_by_country(&table, &params.country_code)?)?;
    Ok(Json(rows.rows_to_json()))
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    query: String,
}

async fn search_data(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<JsonValue>>, ApiError> {
    let table = state.table().await?;
    let rows = search(&table, &params.query)?;
    Ok(Json(rows.rows_to_json()))
}

async fn get_data_by_process(
    State(state): State<AppState>,
    Path(process_name): Path<String>,
) -> Result<Json<Vec<JsonValue>>, ApiError> {
    let table = state.table().await?;
    let rows = ensure_non_empty(filter_by_column(
        &table,
        PROCESS_NAME_COLUMN,
        &process_name,
    )?)?;
    Ok(Json(rows.rows_to_json()))
}

async fn get_gwp_aggregate_by_country(
    State(state): State<AppState>,
    Path(country_code): Path<String>,
) -> Result<Json<GwpAggregate>, ApiError> {
    let table = state.table().await?;
    Ok(Json(aggregate(&table, &country_code)?))
}

async fn get_aggregate_by_country(
    State(state): State<AppState>,
    Path(country_code): Path<String>,
) -> Result<Json<GwpAggregateStats>, ApiError> {
    let table = state.table().await?;
    Ok(Json(aggregate_with_stats(&table, &country_code)?))
}

#[derive(Debug, Deserialize)]
struct ProcessNamesParams {
    query: Option<String>,
}

async fn get_process_names(
    State(state): State<AppState>,
    Query(params): Query<ProcessNamesParams>,
) -> Result<Json<JsonValue>, ApiError> {
    let table = state.table().await?;
    let body = match search_process_names(&table, params.query.as_deref())? {
        ProcessNameSearch::Matched(names) => json!({ "process_names": names }),
        ProcessNameSearch::NoMatch => json!({ "message": "No Process Name found" }),
    };
    Ok(Json(body))
}
