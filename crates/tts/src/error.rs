use axum::{
    Json,
    response::{IntoResponse, Response},
};
use http::StatusCode;
use thiserror::Error;
use voxrelay_core::{ErrorBody, HttpError};

pub type Result<T> = std::result::Result<T, TtsError>;

/// Speech-synthesis errors with their HTTP status codes
#[derive(Debug, Error)]
pub enum TtsError {
    /// No synthesis engine is available
    #[error("TTS service not available")]
    ServiceNotLoaded,

    /// Caller-supplied data violates a precondition
    #[error("{0}")]
    InvalidInput(String),

    /// No artifact exists for the requested id
    #[error("{0}")]
    NotFound(&'static str),

    /// The engine was invoked and failed
    #[error("Synthesis failed: {0}")]
    SynthesisFailed(String),

    /// Internal server error, details are logged but not exposed
    #[error("Internal server error")]
    InternalError,
}

impl HttpError for TtsError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::ServiceNotLoaded => StatusCode::SERVICE_UNAVAILABLE,
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::SynthesisFailed(_) | Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::ServiceNotLoaded => "service_not_loaded",
            Self::InvalidInput(_) => "invalid_request_error",
            Self::NotFound(_) => "not_found_error",
            Self::SynthesisFailed(_) => "synthesis_failed",
            Self::InternalError => "internal_error",
        }
    }

    fn client_message(&self) -> String {
        self.to_string()
    }
}

impl IntoResponse for TtsError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(ErrorBody::from_error(&self))).into_response()
    }
}
