use std::path::PathBuf;

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use http::StatusCode;
use thiserror::Error;
use voxrelay_core::{ErrorBody, HttpError};

pub type Result<T> = std::result::Result<T, SttError>;

/// Speech-to-text errors with their HTTP status codes
#[derive(Debug, Error)]
pub enum SttError {
    /// The speech model is still loading or failed to load
    #[error("Whisper service not available")]
    ModelNotLoaded,

    /// The audio file handed to the model does not exist
    #[error("Audio file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Caller-supplied data violates a precondition
    #[error("{0}")]
    InvalidInput(String),

    /// Upload has an extension outside the allow-list
    #[error("File type not supported")]
    UnsupportedFormat,

    /// Request body exceeds the configured upload limit
    #[error("File too large (max {limit_mb}MB)")]
    PayloadTooLarge { limit_mb: usize },

    /// The model was invoked and failed
    #[error("Transcription failed: {0}")]
    TranscriptionFailed(String),

    /// Internal server error, details are logged but not exposed
    #[error("Internal server error")]
    InternalError,
}

/// Extensions accepted by the lower-level transcription route
pub const SUPPORTED_FORMATS: &[&str] = &["mp3", "wav", "mp4", "m4a", "ogg", "flac", "webm"];

impl HttpError for SttError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::ModelNotLoaded => StatusCode::SERVICE_UNAVAILABLE,
            Self::FileNotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidInput(_) | Self::UnsupportedFormat => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::TranscriptionFailed(_) | Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::ModelNotLoaded => "service_not_loaded",
            Self::FileNotFound(_) => "not_found_error",
            Self::InvalidInput(_) | Self::UnsupportedFormat => "invalid_request_error",
            Self::PayloadTooLarge { .. } => "payload_too_large",
            Self::TranscriptionFailed(_) => "transcription_failed",
            Self::InternalError => "internal_error",
        }
    }

    fn client_message(&self) -> String {
        match self {
            // Temp paths are an implementation detail
            Self::FileNotFound(_) => "Audio file not found".to_owned(),
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for SttError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody::from_error(&self).with_pid();

        let mut value = serde_json::to_value(body).unwrap_or_default();

        match self {
            Self::ModelNotLoaded => {
                value["message"] = "The Whisper model is still loading or failed to initialize".into();
            }
            Self::UnsupportedFormat => {
                value["supported_formats"] = SUPPORTED_FORMATS.into();
            }
            _ => {}
        }

        (status, Json(value)).into_response()
    }
}
