//! HTTP route handlers for Axum.

use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use tracing::{info, warn};

use crate::analysis::{AnalysisRequest, AnalysisResult};

use super::{
    types::{AnalyzeBody, ApiError, HealthDto},
    AppState,
};

type ApiResult<T> = Result<Json<T>, ApiError>;

pub async fn analyze(
    State(state): State<AppState>,
    body: Result<Json<AnalyzeBody>, JsonRejection>,
) -> ApiResult<AnalysisResult> {
    let Json(body) = body.map_err(|e| ApiError::new(StatusCode::BAD_REQUEST, e.body_text()))?;
    let request = AnalysisRequest::new(&body.topic, &body.keywords)?;

    let Ok(_guard) = state.in_flight.try_lock() else {
        warn!(topic = request.topic(), "rejecting analysis while another is running");
        return Err(ApiError::new(
            StatusCode::CONFLICT,
            "an analysis is already in progress",
        ));
    };

    *state.latest.write().await = None;
    info!(topic = request.topic(), "starting analysis");
    let result = state.analyzer.analyze_request(&request).await?;
    *state.latest.write().await = Some(result.clone());
    Ok(Json(result))
}

pub async fn latest(State(state): State<AppState>) -> ApiResult<AnalysisResult> {
    state
        .latest
        .read()
        .await
        .clone()
        .map(Json)
        .ok_or_else(|| ApiError::new(StatusCode::NOT_FOUND, "no analysis has completed yet"))
}

pub async fn health() -> Json<HealthDto> {
    Json(HealthDto { status: "ok" })
}
