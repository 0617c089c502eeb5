use crate::api::error::ApiError;
use crate::api::AppState;
use crate::core::validator::parse_patient_info;
use crate::domain::model::RecommendationResult;
use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde::Serialize;

/// `POST /recommend`
pub async fn recommend(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<RecommendationResult>, ApiError> {
    let patient = parse_patient_info(&body)?;
    let result = state.recommender.recommend(&patient).await?;
    Ok(Json(result))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub model: String,
    pub strict_catalog: bool,
    pub version: &'static str,
}

/// `GET /health` — liveness only, never calls the completion service.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        model: state.recommender.model().to_string(),
        strict_catalog: state.recommender.strict_catalog(),
        version: env!("CARGO_PKG_VERSION"),
    })
}
