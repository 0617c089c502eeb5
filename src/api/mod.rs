//! HTTP boundary: axum router, handlers and error-to-status mapping.

pub mod error;
pub mod handlers;
pub mod router;

use crate::core::recommender::Recommender;
use std::sync::Arc;

/// Shared, read-only state handed to every request task.
#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<Recommender>,
}

impl AppState {
    pub fn new(recommender: Recommender) -> Self {
        Self {
            recommender: Arc::new(recommender),
        }
    }
}

pub use error::ApiError;
pub use router::build_router;
