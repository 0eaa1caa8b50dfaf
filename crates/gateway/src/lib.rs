//! Backend relay to the translation service
//!
//! The backend process never translates on its own. These routes forward
//! the caller's JSON to the sibling translation service and map its answer
//! back, synthesizing a language list when the sibling cannot be reached.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod error;
mod proxy;

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Body,
    extract::State,
    routing::{get, post},
};
use serde::Serialize;
use serde_json::Value;
use voxrelay_core::language::{PROXY_FALLBACK, PROXY_MINIMAL, to_owned_list};

pub use error::{GatewayError, Result};
pub use proxy::TranslationProxy;

/// Build the proxy from configuration
pub fn build_proxy(config: &voxrelay_config::Config) -> anyhow::Result<Arc<TranslationProxy>> {
    let proxy = TranslationProxy::new(&config.backend)?;
    tracing::info!(translation_url = %proxy.base_url(), "translation proxy configured");
    Ok(Arc::new(proxy))
}

/// Create the proxy router mounted on the backend
pub fn endpoint_router() -> Router<Arc<TranslationProxy>> {
    Router::new()
        .route("/api/v1/translate", post(translate))
        .route("/api/v1/translation-languages", get(languages))
        .route("/api/v1/detect-language", post(detect))
}

/// Language list synthesized when the translation service can't answer
#[derive(Debug, Serialize)]
pub struct FallbackLanguages {
    pub success: bool,
    pub languages: Vec<String>,
    pub note: &'static str,
    pub pid: u32,
}

/// Body limit for relayed JSON (1 MiB)
const BODY_LIMIT_BYTES: usize = 1 << 20;

/// JSON object body, rejected with 400 otherwise
struct ExtractJson(Value);

impl<S> axum::extract::FromRequest<S> for ExtractJson
where
    S: Send + Sync,
{
    type Rejection = GatewayError;

    async fn from_request(request: http::Request<Body>, _state: &S) -> std::result::Result<Self, Self::Rejection> {
        let no_json = || GatewayError::InvalidInput("No JSON data provided".to_owned());

        let bytes = axum::body::to_bytes(request.into_body(), BODY_LIMIT_BYTES)
            .await
            .map_err(|_| no_json())?;

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(value @ Value::Object(_)) => Ok(Self(value)),
            _ => Err(no_json()),
        }
    }
}

async fn translate(State(proxy): State<Arc<TranslationProxy>>, ExtractJson(body): ExtractJson) -> Result<Json<Value>> {
    tracing::debug!("Relaying translation request");
    proxy.translate(&body).await.map(Json)
}

async fn detect(State(proxy): State<Arc<TranslationProxy>>, ExtractJson(body): ExtractJson) -> Result<Json<Value>> {
    tracing::debug!("Relaying language detection request");
    proxy.detect(&body).await.map(Json)
}

/// Translation languages; never fails
async fn languages(State(proxy): State<Arc<TranslationProxy>>) -> axum::response::Response {
    use axum::response::IntoResponse;

    match proxy.languages().await {
        Ok(body) if body.get("languages").is_some_and(Value::is_array) => Json(body).into_response(),
        Ok(_) => {
            tracing::warn!("Translation service returned an unexpected language list, using minimal fallback");
            Json(FallbackLanguages {
                success: true,
                languages: to_owned_list(PROXY_MINIMAL),
                note: "Minimal fallback language list due to error",
                pid: voxrelay_core::pid(),
            })
            .into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Translation service unavailable, using fallback language list");
            Json(FallbackLanguages {
                success: true,
                languages: to_owned_list(PROXY_FALLBACK),
                note: "Fallback language list - translation service unavailable",
                pid: voxrelay_core::pid(),
            })
            .into_response()
        }
    }
}
