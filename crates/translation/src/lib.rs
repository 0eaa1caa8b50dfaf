#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

mod error;
mod fallback;
mod http_client;
mod provider;
mod request;
mod retry;
mod service;
mod types;

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

pub use error::{ProviderError, Result, TranslationError};
pub use provider::Translator;
pub use retry::{Backoff, RetryPolicy};
pub use service::{TranslationService, TranslationServiceBuilder};
pub use types::{
    DetectRequest, DetectResponse, DetectionResult, HealthResponse, LanguagesResponse, Provenance, ProviderDetection,
    ProviderTranslation, TranslateRequest, TranslateResponse, TranslationResult,
};
use request::ExtractPayload;

/// Build the translation service from configuration
pub fn build_service(config: &voxrelay_config::Config) -> Arc<TranslationService> {
    Arc::new(TranslationServiceBuilder::new(config).build())
}

/// Create the endpoint router for translation
pub fn endpoint_router() -> Router<Arc<TranslationService>> {
    Router::new()
        .route("/translate", post(translate))
        .route("/languages", get(languages))
        .route("/detect", post(detect))
}

/// Health of the translation process
pub async fn health(State(service): State<Arc<TranslationService>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "translation-service",
        version: env!("CARGO_PKG_VERSION"),
        translator_status: service.translator().state().status_label(),
        pid: voxrelay_core::pid(),
    })
}

async fn translate(
    State(service): State<Arc<TranslationService>>,
    ExtractPayload(request): ExtractPayload<TranslateRequest>,
) -> Result<Json<TranslateResponse>> {
    tracing::info!("Translation request received");

    // Input is checked before availability so bad requests are always 400
    let text = request
        .text
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| TranslationError::InvalidInput("No text provided for translation".to_owned()))?;

    let target_language = request
        .target_language
        .filter(|target| !target.trim().is_empty())
        .ok_or_else(|| TranslationError::InvalidInput("Target language not specified".to_owned()))?;

    let result = service
        .translate(&text, &target_language, request.source_language.as_deref())
        .await?;

    Ok(Json(TranslateResponse { success: true, result }))
}

/// Supported languages; never fails
async fn languages(State(service): State<Arc<TranslationService>>) -> Json<LanguagesResponse> {
    Json(LanguagesResponse {
        success: true,
        languages: service.supported_languages(),
    })
}

async fn detect(
    State(service): State<Arc<TranslationService>>,
    ExtractPayload(request): ExtractPayload<DetectRequest>,
) -> Result<Json<DetectResponse>> {
    let text = request
        .text
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| TranslationError::InvalidInput("No text provided for language detection".to_owned()))?;

    let result = service.detect(&text).await?;

    Ok(Json(DetectResponse { success: true, result }))
}
