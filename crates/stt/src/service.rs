use std::path::{Path, PathBuf};
use std::sync::Arc;

use voxrelay_config::{SttConfig, SttProviderType};
use voxrelay_core::{Availability, Capability, CapabilityKind, CapabilityState};

use crate::{
    error::SttError,
    provider::{SpeechModel, whisper::WhisperModel},
    types::{Segment, Task, TranscriptionResult},
};

/// Speech-to-text service state shared by every request
pub struct SpeechService {
    model: Capability<dyn SpeechModel>,
    candidate: Option<Arc<dyn SpeechModel>>,
    upload_dir: PathBuf,
    max_upload_bytes: usize,
}

impl SpeechService {
    /// Create a service around an optional model; nothing is loaded yet
    pub fn new(
        model_size: impl Into<String>,
        candidate: Option<Arc<dyn SpeechModel>>,
        upload_dir: PathBuf,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            model: Capability::new(CapabilityKind::SpeechToText, model_size),
            candidate,
            upload_dir,
            max_upload_bytes,
        }
    }

    /// Run the capability loader
    ///
    /// Without a configured model the capability fails and the service
    /// answers uploads with mock transcriptions.
    pub async fn load_model(&self) -> CapabilityState {
        let candidate = self.candidate.clone();

        self.model
            .load(|| async move {
                let model = candidate.ok_or_else(|| "no speech-to-text provider configured".to_owned())?;
                model.probe().await.map_err(|e| e.to_string())?;
                Ok::<_, String>(model)
            })
            .await
    }

    pub fn model(&self) -> &Capability<dyn SpeechModel> {
        &self.model
    }

    pub fn model_size(&self) -> &str {
        self.model.variant()
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }

    /// Transcribe an audio file with the loaded model
    ///
    /// No retries: a failed invocation is surfaced immediately.
    pub async fn transcribe(
        &self,
        audio: &Path,
        language: Option<&str>,
        task: &str,
    ) -> crate::Result<TranscriptionResult> {
        let Availability::Ready(model) = self.model.check_ready() else {
            return Err(SttError::ModelNotLoaded);
        };

        if !tokio::fs::try_exists(audio).await.unwrap_or(false) {
            return Err(SttError::FileNotFound(audio.to_path_buf()));
        }

        let task: Task = task.parse()?;

        tracing::info!(path = %audio.display(), ?language, ?task, "Transcribing audio");

        let transcript = model.transcribe(audio, language, task).await?;

        let result = TranscriptionResult {
            text: transcript.text.trim().to_owned(),
            language: transcript.language.unwrap_or_else(|| "unknown".to_owned()),
            model_size: self.model_size().to_owned(),
            segments: transcript
                .segments
                .into_iter()
                .map(|segment| Segment {
                    text: segment.text.trim().to_owned(),
                    ..segment
                })
                .collect(),
        };

        tracing::info!(language = %result.language, segments = result.segments.len(), "Transcription completed");

        Ok(result)
    }

    /// Placeholder result handed out while the model is unavailable
    pub fn mock_result(&self, filename: &str, language: Option<&str>) -> (TranscriptionResult, String) {
        let status = match self.model.state() {
            CapabilityState::Loading | CapabilityState::Unloaded => "loading",
            CapabilityState::Ready | CapabilityState::Failed => "not loaded",
        };

        let text = format!(
            "Mock transcription for \"{filename}\"\n\nFile received successfully, the upload pipeline works.\n\n\
             Whisper model status: {status}. Real transcriptions are returned once the model is loaded."
        );

        let result = TranscriptionResult {
            text,
            language: language.unwrap_or("en").to_owned(),
            model_size: "mock".to_owned(),
            segments: vec![Segment {
                start: 0.0,
                end: 3.0,
                text: format!("Mock transcription for \"{filename}\""),
            }],
        };

        (result, format!("Mock response - Whisper model {status}"))
    }
}

/// Builder for constructing the speech service from configuration
pub struct SpeechServiceBuilder<'a> {
    config: &'a voxrelay_config::Config,
}

impl<'a> SpeechServiceBuilder<'a> {
    pub const fn new(config: &'a voxrelay_config::Config) -> Self {
        Self { config }
    }

    pub fn build(self) -> crate::Result<SpeechService> {
        let stt = &self.config.stt;
        let upload_dir = stt.upload_dir();

        std::fs::create_dir_all(&upload_dir).map_err(|e| {
            tracing::error!("Failed to create upload directory {}: {e}", upload_dir.display());
            SttError::InternalError
        })?;

        let candidate = build_model(stt)?;

        if candidate.is_none() {
            tracing::warn!("No speech-to-text provider configured, transcriptions will be mocked");
        }

        Ok(SpeechService::new(
            stt.model_size.clone(),
            candidate,
            upload_dir,
            self.config.server.max_upload_bytes,
        ))
    }
}

fn build_model(stt: &SttConfig) -> crate::Result<Option<Arc<dyn SpeechModel>>> {
    let Some(provider) = &stt.provider else {
        return Ok(None);
    };

    let model: Arc<dyn SpeechModel> = match provider.provider_type {
        SttProviderType::Whisper => Arc::new(
            WhisperModel::new(
                &provider.base_url,
                provider.api_key.clone(),
                stt.model_size.clone(),
                provider.timeout,
                stt.probe_timeout,
            )
            .map_err(|e| {
                tracing::error!("Failed to build Whisper client: {e}");
                SttError::InternalError
            })?,
        ),
    };

    Ok(Some(model))
}
