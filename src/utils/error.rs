use thiserror::Error;

/// 啟動階段的錯誤 (設定載入、綁定埠口)
#[derive(Error, Debug)]
pub enum TriageError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("HTTP client error: {0}")]
    ClientBuildError(#[source] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, TriageError>;

/// Failures talking to the completion service. Every variant is terminal for the request.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// Transport failure; carries the full `source()` chain of the client error.
    #[error("{0}")]
    Http(String),

    #[error("request to completion service timed out")]
    Timeout,

    #[error("completion service rejected credentials ({status}): {message}")]
    Unauthorized { status: u16, message: String },

    #[error("completion service rate limit exceeded: {message}")]
    RateLimited { message: String },

    #[error("completion service returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("malformed completion response: {0}")]
    MalformedResponse(String),

    #[error("completion service returned no text")]
    EmptyCompletion,
}

/// Outcome of a failed recommendation; the HTTP boundary maps every variant to a status.
#[derive(Error, Debug)]
pub enum RecommendError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("'{0}' is not one of the known departments")]
    UnknownDepartment(String),
}

impl RecommendError {
    /// Short machine-readable tag, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            RecommendError::Upstream(e) => match e {
                UpstreamError::Http(_) => "http",
                UpstreamError::Timeout => "timeout",
                UpstreamError::Unauthorized { .. } => "unauthorized",
                UpstreamError::RateLimited { .. } => "rate_limited",
                UpstreamError::Status { .. } => "upstream_status",
                UpstreamError::MalformedResponse(_) => "malformed_response",
                UpstreamError::EmptyCompletion => "empty_completion",
            },
            RecommendError::UnknownDepartment(_) => "unknown_department",
        }
    }
}
