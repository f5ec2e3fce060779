use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::middleware::RequestId;
use crate::models::{
    CalculationMode, Catalog, Platform, RecommendationInputs, RoiSummary, ScoredPlatform,
};
use crate::services::RecommendationEngine;

use super::AppState;

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub mode: CalculationMode,
    pub catalog_version: String,
    /// Best feasible entry, or the best overall when nothing is feasible
    pub primary: Option<ScoredPlatform>,
    pub ranked: Vec<ScoredPlatform>,
    pub roi: Option<RoiSummary>,
}

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Returns the whole catalog snapshot
pub async fn get_catalog(State(state): State<AppState>) -> Json<Catalog> {
    Json(state.catalog.as_ref().clone())
}

/// Returns one platform by name
pub async fn get_platform(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<Platform>> {
    state
        .catalog
        .platform(&name)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Platform {}", name)))
}

/// Scores and ranks every catalog option for the submitted constraints
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(inputs): Json<RecommendationInputs>,
) -> AppResult<Json<RecommendationResponse>> {
    tracing::info!(
        request_id = %request_id,
        mode = ?inputs.mode,
        deadline_days = inputs.deadline_days,
        budget_usd = inputs.budget_usd,
        "Processing recommendation request"
    );

    let engine = RecommendationEngine::new(&state.catalog, &state.tables);
    let recommendation = engine.recommend(&inputs)?;
    let primary = recommendation.primary().cloned();

    Ok(Json(RecommendationResponse {
        mode: recommendation.mode,
        catalog_version: state.catalog.version.clone(),
        primary,
        ranked: recommendation.ranked,
        roi: recommendation.roi,
    }))
}
