use axum::{
    Json,
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use http::StatusCode;
use thiserror::Error;
use voxrelay_core::{ErrorBody, HttpError};

/// Request body larger than the configured upload limit
#[derive(Debug, Error)]
#[error("File too large (max {limit_mb}MB)")]
pub struct PayloadTooLarge {
    limit_mb: usize,
}

impl PayloadTooLarge {
    pub const fn new(max_bytes: usize) -> Self {
        Self { limit_mb: max_bytes >> 20 }
    }
}

impl HttpError for PayloadTooLarge {
    fn status_code(&self) -> StatusCode {
        StatusCode::PAYLOAD_TOO_LARGE
    }

    fn error_type(&self) -> &str {
        "payload_too_large"
    }

    fn client_message(&self) -> String {
        self.to_string()
    }
}

impl IntoResponse for PayloadTooLarge {
    fn into_response(self) -> Response {
        (self.status_code(), Json(ErrorBody::from_error(&self).with_pid())).into_response()
    }
}

/// Reject requests whose declared length exceeds the upload limit
///
/// Bodies without a `Content-Length` are bounded by `DefaultBodyLimit` as
/// they stream.
pub async fn content_length_guard(max_bytes: usize, req: Request, next: Next) -> Response {
    let declared = req
        .headers()
        .get(http::header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<usize>().ok());

    if let Some(length) = declared
        && length > max_bytes
    {
        tracing::warn!(length, max_bytes, "Rejecting oversized request");
        return PayloadTooLarge::new(max_bytes).into_response();
    }

    next.run(req).await
}
