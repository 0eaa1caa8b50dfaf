use axum::{
    Json,
    response::{IntoResponse, Response},
};
use http::StatusCode;
use thiserror::Error;
use voxrelay_core::{ErrorBody, HttpError};

pub type Result<T> = std::result::Result<T, GatewayError>;

/// Errors relaying to the translation service
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Caller-supplied data violates a precondition
    #[error("{0}")]
    InvalidInput(String),

    /// The translation service answered with a non-200 status
    #[error("Translation service error: {status}")]
    Upstream { status: u16 },

    /// The translation service could not be reached or timed out
    #[error("Translation service unavailable: {0}")]
    UpstreamUnavailable(String),
}

impl HttpError for GatewayError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::Upstream { status } => StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
            Self::UpstreamUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::InvalidInput(_) => "invalid_request_error",
            Self::Upstream { .. } => "upstream_error",
            Self::UpstreamUnavailable(_) => "upstream_unavailable",
        }
    }

    fn client_message(&self) -> String {
        self.to_string()
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(ErrorBody::from_error(&self).with_pid())).into_response()
    }
}
