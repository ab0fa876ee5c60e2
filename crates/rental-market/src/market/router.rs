use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::analysis::{views::MarketReport, MarketAnalyzer};
use super::domain::PropertyRecord;
use super::filter::{apply_filters, available_cities, compute_facets, reset_filters, FilterState};
use super::import::ListingImporter;
use super::pagination::{paginate, Page};
use crate::error::AppError;

const DEFAULT_PER_PAGE: usize = 12;

/// Listing collection served when a request does not carry its own records.
#[derive(Debug, Default, Clone)]
pub struct ListingSnapshot {
    records: Vec<PropertyRecord>,
}

impl ListingSnapshot {
    pub fn new(records: Vec<PropertyRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[PropertyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct FacetsRequest {
    #[serde(default)]
    pub records: Option<Vec<PropertyRecord>>,
}

#[derive(Debug, Deserialize)]
pub struct CitiesRequest {
    #[serde(default)]
    pub records: Option<Vec<PropertyRecord>>,
    #[serde(default)]
    pub states: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct FilterRequest {
    #[serde(default)]
    pub records: Option<Vec<PropertyRecord>>,
    #[serde(default)]
    pub filters: FilterState,
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub per_page: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AnalysisRequest {
    #[serde(default)]
    pub records: Option<Vec<PropertyRecord>>,
    #[serde(default)]
    pub filters: FilterState,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisResponse {
    Ok { report: MarketReport },
    NoData,
}

/// Router builder exposing the filter engine and market analyzer over HTTP.
pub fn market_router(snapshot: Arc<ListingSnapshot>) -> Router {
    Router::new()
        .route("/api/v1/market/facets", post(facets_handler))
        .route("/api/v1/market/cities", post(cities_handler))
        .route("/api/v1/market/filters/default", get(default_filters_handler))
        .route("/api/v1/market/filter", post(filter_handler))
        .route("/api/v1/market/analysis", post(analysis_handler))
        .route(
            "/api/v1/market/listings/analysis",
            get(snapshot_analysis_handler),
        )
        .with_state(snapshot)
}

/// Inline records bypass the loaders, so they are validated here.
fn records_or_snapshot<'a>(
    records: &'a Option<Vec<PropertyRecord>>,
    snapshot: &'a ListingSnapshot,
) -> Result<&'a [PropertyRecord], AppError> {
    match records.as_deref() {
        Some(inline) => {
            ListingImporter::validate(inline)?;
            Ok(inline)
        }
        None => Ok(snapshot.records()),
    }
}

pub(crate) async fn facets_handler(
    State(snapshot): State<Arc<ListingSnapshot>>,
    Json(request): Json<FacetsRequest>,
) -> Result<Response, AppError> {
    let records = records_or_snapshot(&request.records, &snapshot)?;
    Ok((StatusCode::OK, Json(compute_facets(records))).into_response())
}

pub(crate) async fn cities_handler(
    State(snapshot): State<Arc<ListingSnapshot>>,
    Json(request): Json<CitiesRequest>,
) -> Result<Response, AppError> {
    let records = records_or_snapshot(&request.records, &snapshot)?;
    let cities = available_cities(records, &request.states);
    Ok((StatusCode::OK, Json(json!({ "cities": cities }))).into_response())
}

pub(crate) async fn default_filters_handler(
    State(snapshot): State<Arc<ListingSnapshot>>,
) -> Response {
    (StatusCode::OK, Json(reset_filters(snapshot.records()))).into_response()
}

pub(crate) async fn filter_handler(
    State(snapshot): State<Arc<ListingSnapshot>>,
    Json(request): Json<FilterRequest>,
) -> Result<Response, AppError> {
    let records = records_or_snapshot(&request.records, &snapshot)?;
    let filtered = apply_filters(records, &request.filters);
    let page: Page<PropertyRecord> = paginate(
        &filtered,
        request.page.unwrap_or(1),
        request.per_page.unwrap_or(DEFAULT_PER_PAGE),
    );
    Ok((StatusCode::OK, Json(page)).into_response())
}

pub(crate) async fn analysis_handler(
    State(snapshot): State<Arc<ListingSnapshot>>,
    Json(request): Json<AnalysisRequest>,
) -> Result<Response, AppError> {
    let records = records_or_snapshot(&request.records, &snapshot)?;
    let filtered = apply_filters(records, &request.filters);
    Ok((StatusCode::OK, Json(analysis_response(&filtered))).into_response())
}

pub(crate) async fn snapshot_analysis_handler(
    State(snapshot): State<Arc<ListingSnapshot>>,
) -> Response {
    (
        StatusCode::OK,
        Json(analysis_response(snapshot.records())),
    )
        .into_response()
}

pub fn analysis_response(records: &[PropertyRecord]) -> AnalysisResponse {
    if records.is_empty() {
        return AnalysisResponse::NoData;
    }
    AnalysisResponse::Ok {
        report: MarketAnalyzer::analyze(records),
    }
}
