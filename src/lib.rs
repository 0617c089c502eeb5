pub mod adapters;
pub mod api;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{GeminiClient, GeminiConfig};
pub use api::{build_router, AppState};
pub use config::{AppConfig, CliConfig};
pub use core::recommender::Recommender;
pub use domain::catalog::DepartmentCatalog;
pub use domain::model::{PatientInfo, RecommendationResult};
pub use domain::ports::CompletionService;
pub use utils::error::{RecommendError, Result, TriageError, UpstreamError};
