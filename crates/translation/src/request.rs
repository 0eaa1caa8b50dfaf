use axum::body::Body;
use serde::de::DeserializeOwned;

use crate::error::TranslationError;

/// Extractor for JSON request bodies
///
/// Any body that is not a JSON object of the expected shape is rejected
/// with a 400 in the service's error format.
pub struct ExtractPayload<T>(pub T);

/// Body limit for translation requests (1 MiB)
const BODY_LIMIT_BYTES: usize = 1 << 20;

impl<S, T: DeserializeOwned> axum::extract::FromRequest<S> for ExtractPayload<T>
where
    S: Send + Sync,
{
    type Rejection = TranslationError;

    async fn from_request(request: http::Request<Body>, _state: &S) -> Result<Self, Self::Rejection> {
        let no_json = || TranslationError::InvalidInput("No JSON data provided".to_owned());

        let is_json = request
            .headers()
            .get(http::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/json"));

        if !is_json {
            return Err(no_json());
        }

        let bytes = axum::body::to_bytes(request.into_body(), BODY_LIMIT_BYTES)
            .await
            .map_err(|e| TranslationError::InvalidInput(format!("Failed to read request body: {e}")))?;

        serde_json::from_slice::<T>(&bytes).map(Self).map_err(|e| {
            tracing::debug!("Rejected request body: {e}");
            no_json()
        })
    }
}
