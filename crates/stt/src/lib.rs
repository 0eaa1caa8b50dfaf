#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

mod error;
mod http_client;
mod provider;
mod request;
mod service;
mod types;

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use voxrelay_core::{Availability, CapabilityState, language};

pub use error::{Result, SUPPORTED_FORMATS, SttError};
pub use provider::SpeechModel;
pub use request::{AudioUpload, UploadForm, secure_filename};
pub use service::{SpeechService, SpeechServiceBuilder};
pub use types::{
    HealthResponse, LanguagesResponse, ModelInfo, ModelInfoResponse, Segment, Task, TranscribeResponse, Transcript,
    TranscriptionResult,
};
use request::ExtractUpload;

/// Build the speech service from configuration
///
/// # Errors
///
/// Returns an error if the upload directory or the model client cannot be created
pub fn build_service(config: &voxrelay_config::Config) -> anyhow::Result<Arc<SpeechService>> {
    let service = Arc::new(
        SpeechServiceBuilder::new(config)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to initialize speech-to-text service: {e}"))?,
    );
    Ok(service)
}

/// Create the endpoint router for speech-to-text
pub fn endpoint_router() -> Router<Arc<SpeechService>> {
    Router::new()
        .route("/api/v1/transcribe", post(transcribe))
        .route("/api/transcribe", post(transcribe_strict))
        .route("/api/v1/languages", get(languages))
        .route("/api/v1/model-info", get(model_info))
}

/// Health of the backend process
pub async fn health(State(service): State<Arc<SpeechService>>) -> Json<HealthResponse> {
    let whisper_model = service.model().state().status_label();

    tracing::debug!(whisper_model, "Health check requested");

    Json(HealthResponse {
        status: "healthy",
        timestamp: jiff::Timestamp::now().to_string(),
        service: "whisper-voice-to-text",
        whisper_model,
        version: env!("CARGO_PKG_VERSION"),
        pid: voxrelay_core::pid(),
    })
}

/// Transcribe an upload, answering with a mock result while the model is unavailable
async fn transcribe(
    State(service): State<Arc<SpeechService>>,
    ExtractUpload(form): ExtractUpload,
) -> Result<Json<TranscribeResponse>> {
    let audio = form.require_audio()?;

    tracing::info!(filename = %audio.filename, language = ?form.language, task = %form.task, "Transcribe request");

    if !service.model().check_ready().is_ready() {
        let (result, note) = service.mock_result(&audio.filename, form.language.as_deref());

        tracing::info!(%note, "Using mock transcription");

        return Ok(Json(TranscribeResponse {
            success: true,
            result,
            filename: audio.filename.clone(),
            note: Some(note),
            pid: voxrelay_core::pid(),
        }));
    }

    let result = service
        .transcribe(audio.path(), form.language.as_deref(), &form.task)
        .await?;

    Ok(Json(TranscribeResponse {
        success: true,
        result,
        filename: audio.secure_filename(),
        note: None,
        pid: voxrelay_core::pid(),
    }))
}

/// Transcribe an upload, failing with 503 while the model is unavailable
async fn transcribe_strict(
    State(service): State<Arc<SpeechService>>,
    ExtractUpload(form): ExtractUpload,
) -> Result<Json<TranscribeResponse>> {
    if !service.model().check_ready().is_ready() {
        return Err(SttError::ModelNotLoaded);
    }

    let audio = form.require_audio()?;

    if !audio
        .extension()
        .is_some_and(|ext| SUPPORTED_FORMATS.contains(&ext.as_str()))
    {
        return Err(SttError::UnsupportedFormat);
    }

    let result = service
        .transcribe(audio.path(), form.language.as_deref(), &form.task)
        .await?;

    Ok(Json(TranscribeResponse {
        success: true,
        result,
        filename: audio.secure_filename(),
        note: None,
        pid: voxrelay_core::pid(),
    }))
}

/// Languages the speech model understands; never fails
async fn languages(State(service): State<Arc<SpeechService>>) -> Json<LanguagesResponse> {
    let languages = match service.model().check_ready() {
        Availability::Ready(model) => {
            let languages = model.supported_languages();
            if languages.is_empty() {
                language::to_owned_list(language::SPEECH_MINIMAL)
            } else {
                languages
            }
        }
        Availability::Loading | Availability::Unavailable { .. } => language::to_owned_list(language::SPEECH_FALLBACK),
    };

    tracing::info!("Languages requested - returning {} languages", languages.len());

    Json(LanguagesResponse {
        success: true,
        languages,
        pid: voxrelay_core::pid(),
    })
}

/// Model size and load status; never fails
async fn model_info(State(service): State<Arc<SpeechService>>) -> Json<ModelInfoResponse> {
    let state = service.model().state();

    let model_info = match service.model().check_ready() {
        Availability::Ready(model) => ModelInfo {
            model_size: service.model_size().to_owned(),
            status: state.status_label(),
            device: Some(model.device().to_owned()),
            provider: Some(model.name().to_owned()),
            message: None,
        },
        Availability::Loading | Availability::Unavailable { .. } => ModelInfo {
            model_size: service.model_size().to_owned(),
            status: state.status_label(),
            device: None,
            provider: None,
            message: Some(
                if matches!(state, CapabilityState::Failed) {
                    "Whisper model not available - using mock mode"
                } else {
                    "Whisper model loading..."
                }
                .to_owned(),
            ),
        },
    };

    tracing::info!(status = model_info.status, "Model info requested");

    Json(ModelInfoResponse {
        success: true,
        model_info,
        pid: voxrelay_core::pid(),
    })
}
