use axum::{
    Json,
    response::{IntoResponse, Response},
};
use http::StatusCode;
use thiserror::Error;
use voxrelay_core::{ErrorBody, HttpError};

pub type Result<T> = std::result::Result<T, TranslationError>;

/// Translation service errors with their HTTP status codes
#[derive(Debug, Error)]
pub enum TranslationError {
    /// The translator never became ready
    #[error("Translation service not available")]
    ServiceNotLoaded,

    /// Caller-supplied data violates a precondition
    #[error("{0}")]
    InvalidInput(String),

    /// The provider failed after every applicable retry
    #[error("Translation failed: {0}")]
    TranslationFailed(String),

    /// The provider failed to detect a language
    #[error("Language detection failed: {0}")]
    DetectionFailed(String),
}

impl HttpError for TranslationError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::ServiceNotLoaded => StatusCode::SERVICE_UNAVAILABLE,
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::TranslationFailed(_) | Self::DetectionFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::ServiceNotLoaded => "service_not_loaded",
            Self::InvalidInput(_) => "invalid_request_error",
            Self::TranslationFailed(_) => "translation_failed",
            Self::DetectionFailed(_) => "detection_failed",
        }
    }

    fn client_message(&self) -> String {
        self.to_string()
    }
}

impl IntoResponse for TranslationError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(ErrorBody::from_error(&self))).into_response()
    }
}

/// Failure of a single call to the upstream provider
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Provider answered 429
    #[error("429 Too Many Requests")]
    RateLimited,

    /// Request never produced a response
    #[error("{message}")]
    Transport { message: String, certificate: bool },

    /// Provider answered with a non-success status
    #[error("Provider API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Provider answered with something we cannot read
    #[error("Malformed provider response: {0}")]
    Malformed(String),
}

impl ProviderError {
    /// Throttling is recognized by status or by the provider's wording
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited) || self.to_string().to_lowercase().contains("too many requests")
    }

    /// TLS trust failure between us and the provider
    pub const fn is_certificate_failure(&self) -> bool {
        matches!(self, Self::Transport { certificate: true, .. })
    }

    /// Classify a `reqwest` error by walking its source chain
    pub fn from_transport(error: &reqwest::Error) -> Self {
        let mut certificate = false;
        let mut message = error.to_string();
        let mut source = std::error::Error::source(error);

        while let Some(cause) = source {
            let text = cause.to_string();
            certificate |= text.to_lowercase().contains("certificate");
            message = format!("{message}: {text}");
            source = cause.source();
        }

        Self::Transport { message, certificate }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limit_by_variant_or_wording() {
        assert!(ProviderError::RateLimited.is_rate_limited());
        assert!(
            ProviderError::Api {
                status: 503,
                message: "Too Many Requests, slow down".to_owned()
            }
            .is_rate_limited()
        );
        assert!(
            !ProviderError::Api {
                status: 500,
                message: "boom".to_owned()
            }
            .is_rate_limited()
        );
    }

    #[test]
    fn certificate_failure_only_for_flagged_transport() {
        let cert = ProviderError::Transport {
            message: "invalid peer certificate: UnknownIssuer".to_owned(),
            certificate: true,
        };
        let refused = ProviderError::Transport {
            message: "connection refused".to_owned(),
            certificate: false,
        };

        assert!(cert.is_certificate_failure());
        assert!(!refused.is_certificate_failure());
        assert!(!ProviderError::RateLimited.is_certificate_failure());
    }

    #[test]
    fn status_mapping() {
        assert_eq!(TranslationError::ServiceNotLoaded.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            TranslationError::InvalidInput("x".to_owned()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            TranslationError::TranslationFailed("x".to_owned()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
