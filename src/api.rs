//! HTTP API layer
//!
//! Thin axum adapters over the analyzer; all domain decisions live in
//! [`crate::analysis`] and errors map onto status codes here.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use uuid::Uuid;

use crate::analysis::BeamAnalyzer;
use crate::catalog::CatalogClient;
use crate::error::AnalysisError;
use crate::models::{AnalysisResult, LoadScenario, SteelSection};

/// Application state
pub struct AppState {
    analyzer: BeamAnalyzer,
}

impl AppState {
    pub fn new(catalog_url: impl Into<String>) -> Self {
        Self {
            analyzer: BeamAnalyzer::new(CatalogClient::new(catalog_url)),
        }
    }
}

/// Build the API router
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_check))
        .route("/sections", get(list_sections_handler))
        .route("/sections/:designation", get(section_handler))
        .route("/analyze", post(analyze_handler))
        .layer(cors)
        .with_state(Arc::new(state))
}

/// Root endpoint
async fn root_handler() -> Json<serde_json::Value> {
    Json(json!({
        "service": "Beam Calc Engine",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "endpoints": [
            "GET /sections - List available sections",
            "GET /sections/:designation - Look up one section",
            "POST /analyze - Perform beam analysis",
            "GET /health - Health check"
        ]
    }))
}

/// Health check endpoint, reports which source is serving the catalog
async fn health_check(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let catalog = state.analyzer.catalog().fetch_sections().await;

    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "catalog_source": catalog.source,
        "available_sections": catalog.sections.len()
    }))
}

/// List every section in the catalog
async fn list_sections_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let catalog = state.analyzer.catalog().fetch_sections().await;

    Json(json!({
        "sections": catalog.sections,
        "count": catalog.sections.len(),
        "source": catalog.source
    }))
}

/// Look up a single section by designation
async fn section_handler(
    State(state): State<Arc<AppState>>,
    Path(designation): Path<String>,
) -> Result<Json<SteelSection>, ApiError> {
    let section = state.analyzer.find_section(&designation).await?;
    Ok(Json(section))
}

/// Run a beam analysis
async fn analyze_handler(
    State(state): State<Arc<AppState>>,
    Json(scenario): Json<LoadScenario>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let request_id = Uuid::new_v4();
    tracing::info!(
        "Analysis request {}: load={} span={}m type={:?} grade={:?} section={:?}",
        request_id,
        scenario.applied_load,
        scenario.span_length,
        scenario.load_type,
        scenario.material_grade,
        scenario.section_designation
    );

    let result = state.analyzer.analyze(&scenario).await?;

    tracing::info!(
        "Analysis request {}: section={} utilization={} adequate={}",
        request_id,
        result.section.section_designation,
        result.stress_utilization,
        result.is_adequate
    );

    Ok(Json(result))
}

/// API error wrapper mapping the analysis taxonomy onto status codes
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] AnalysisError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            AnalysisError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            AnalysisError::SectionNotFound(_) => StatusCode::NOT_FOUND,
            AnalysisError::NoSuitableSection => StatusCode::BAD_REQUEST,
            AnalysisError::DataIntegrity { .. } | AnalysisError::Calculation(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.0.to_string()
        }));

        (status, body).into_response()
    }
}
