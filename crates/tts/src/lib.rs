#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod error;
mod http_client;
mod provider;
mod request;
mod service;
mod store;
mod types;

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use http::{StatusCode, header};

pub use error::{Result, TtsError};
pub use provider::SpeechSynthesizer;
pub use service::{SynthesisService, SynthesisServiceBuilder};
pub use store::ArtifactStore;
pub use types::{
    CleanupResponse, HealthResponse, SpeechAudio, SynthesizeRequest, SynthesizeResponse, VoicesResponse,
};
use request::ExtractPayload;

/// Build the synthesis service from configuration
pub fn build_service(config: &voxrelay_config::Config) -> anyhow::Result<Arc<SynthesisService>> {
    let service = Arc::new(
        SynthesisServiceBuilder::new(config)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to initialize TTS service: {e}"))?,
    );
    Ok(service)
}

/// Create the endpoint router for speech synthesis
pub fn endpoint_router() -> Router<Arc<SynthesisService>> {
    Router::new()
        .route("/voices", get(voices))
        .route("/synthesize", post(synthesize))
        .route("/download/{audio_id}", get(download))
        .route("/cleanup/{audio_id}", delete(cleanup))
}

/// Health of the synthesis process; 503 while no engine is usable
pub async fn health(State(service): State<Arc<SynthesisService>>) -> (StatusCode, Json<HealthResponse>) {
    let available = service.engine().check_ready().is_ready();

    let status = if available {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(HealthResponse {
            status: if available { "healthy" } else { "unhealthy" },
            service: "tts-service",
            tts_available: available,
            pid: voxrelay_core::pid(),
        }),
    )
}

async fn voices(State(service): State<Arc<SynthesisService>>) -> Json<VoicesResponse> {
    Json(VoicesResponse {
        voices: service.voices().to_vec(),
        default: service.default_voice().to_owned(),
    })
}

async fn synthesize(
    State(service): State<Arc<SynthesisService>>,
    ExtractPayload(request): ExtractPayload<SynthesizeRequest>,
) -> Result<Json<SynthesizeResponse>> {
    let text = request
        .text
        .ok_or_else(|| TtsError::InvalidInput("Text is required".to_owned()))?;

    let id = service.synthesize(&text, request.voice.as_deref()).await?;

    Ok(Json(SynthesizeResponse {
        audio_id: id.to_string(),
        message: "Speech synthesized successfully",
        download_url: format!("/download/{id}"),
    }))
}

async fn download(State(service): State<Arc<SynthesisService>>, Path(audio_id): Path<String>) -> Result<Response> {
    let id = store::parse_id(&audio_id)?;

    let (path, format) = service
        .store()
        .find(id)
        .await
        .ok_or(TtsError::NotFound("Audio file not found"))?;

    let audio = tokio::fs::read(&path).await.map_err(|e| {
        tracing::error!("Failed to read artifact {}: {e}", path.display());
        TtsError::InternalError
    })?;

    let disposition = format!("attachment; filename=\"{id}.{}\"", format.extension());

    Ok((
        [
            (header::CONTENT_TYPE, format.mime_type().to_owned()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        audio,
    )
        .into_response())
}

async fn cleanup(
    State(service): State<Arc<SynthesisService>>,
    Path(audio_id): Path<String>,
) -> Result<Json<CleanupResponse>> {
    let id = store::parse_id(&audio_id).map_err(|_| TtsError::NotFound("File not found"))?;

    if service.store().remove(id).await? {
        Ok(Json(CleanupResponse { message: "Cleaned up" }))
    } else {
        Err(TtsError::NotFound("File not found"))
    }
}
