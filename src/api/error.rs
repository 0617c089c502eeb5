use crate::core::validator::ValidationErrors;
use crate::utils::error::RecommendError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Boundary errors and their HTTP mapping: validation → 422, processing → 500.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("Error processing request: {0}")]
    Processing(#[from] RecommendError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => {
                tracing::debug!(count = errors.errors().len(), "Request body failed validation");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(json!({ "detail": errors.errors() })),
                )
                    .into_response()
            }
            ApiError::Processing(ref err) => {
                tracing::error!(kind = err.kind(), error = %err, "❌ Recommendation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "detail": self.to_string() })),
                )
                    .into_response()
            }
        }
    }
}
