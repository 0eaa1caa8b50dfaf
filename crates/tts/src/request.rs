use axum::body::Body;
use serde::de::DeserializeOwned;

use crate::error::TtsError;

/// Extractor for JSON request bodies
pub struct ExtractPayload<T>(pub T);

/// Body limit for TTS requests (1 MiB)
const BODY_LIMIT_BYTES: usize = 1 << 20;

impl<S, T: DeserializeOwned> axum::extract::FromRequest<S> for ExtractPayload<T>
where
    S: Send + Sync,
{
    type Rejection = TtsError;

    async fn from_request(request: http::Request<Body>, _state: &S) -> Result<Self, Self::Rejection> {
        let bytes = axum::body::to_bytes(request.into_body(), BODY_LIMIT_BYTES)
            .await
            .map_err(|err| {
                if std::error::Error::source(&err).is_some_and(|source| source.is::<http_body_util::LengthLimitError>()) {
                    TtsError::InvalidInput(format!("Request body is too large, limit is {BODY_LIMIT_BYTES} bytes"))
                } else {
                    TtsError::InvalidInput(format!("Failed to read request body: {err}"))
                }
            })?;

        serde_json::from_slice::<T>(&bytes)
            .map(Self)
            .map_err(|_| TtsError::InvalidInput("Text is required".to_owned()))
    }
}
