use std::sync::Arc;

use uuid::Uuid;
use voxrelay_config::TtsProviderType;
use voxrelay_core::{Availability, Capability, CapabilityKind, CapabilityState};

use crate::{
    error::TtsError,
    provider::{SpeechSynthesizer, openai_tts::OpenAiTtsProvider},
    store::ArtifactStore,
};

/// Speech-synthesis service state shared by every request
pub struct SynthesisService {
    engine: Capability<dyn SpeechSynthesizer>,
    candidate: Option<Arc<dyn SpeechSynthesizer>>,
    store: ArtifactStore,
    voices: Vec<String>,
    default_voice: String,
}

impl SynthesisService {
    pub fn new(
        candidate: Option<Arc<dyn SpeechSynthesizer>>,
        store: ArtifactStore,
        voices: Vec<String>,
        default_voice: String,
    ) -> Self {
        let variant = candidate.as_ref().map_or("none", |engine| engine.name()).to_owned();

        Self {
            engine: Capability::new(CapabilityKind::SpeechSynthesis, variant),
            candidate,
            store,
            voices,
            default_voice,
        }
    }

    /// Run the capability loader
    pub async fn load_engine(&self) -> CapabilityState {
        let candidate = self.candidate.clone();

        self.engine
            .load(|| async move {
                let engine = candidate.ok_or_else(|| "no speech-synthesis provider configured".to_owned())?;
                engine.probe().await.map_err(|e| e.to_string())?;
                Ok::<_, String>(engine)
            })
            .await
    }

    pub fn engine(&self) -> &Capability<dyn SpeechSynthesizer> {
        &self.engine
    }

    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    pub fn voices(&self) -> &[String] {
        &self.voices
    }

    pub fn default_voice(&self) -> &str {
        &self.default_voice
    }

    /// Synthesize `text` and store the audio, returning the artifact id
    pub async fn synthesize(&self, text: &str, voice: Option<&str>) -> crate::Result<Uuid> {
        if text.trim().is_empty() {
            return Err(TtsError::InvalidInput("Text cannot be empty".to_owned()));
        }

        let voice = voice.unwrap_or(&self.default_voice);
        if !self.voices.iter().any(|v| v == voice) {
            return Err(TtsError::InvalidInput(format!("Unknown voice '{voice}'")));
        }

        let Availability::Ready(engine) = self.engine.check_ready() else {
            return Err(TtsError::ServiceNotLoaded);
        };

        let preview: String = text.chars().take(50).collect();
        tracing::info!(voice, "Synthesizing: {preview}...");

        let speech = engine.synthesize(text, voice).await?;
        self.store.save(&speech.audio, speech.format).await
    }
}

/// Builder for constructing the synthesis service from configuration
pub struct SynthesisServiceBuilder<'a> {
    config: &'a voxrelay_config::Config,
}

impl<'a> SynthesisServiceBuilder<'a> {
    pub const fn new(config: &'a voxrelay_config::Config) -> Self {
        Self { config }
    }

    pub fn build(self) -> crate::Result<SynthesisService> {
        let tts = &self.config.tts;
        let output_dir = tts.output_dir();

        std::fs::create_dir_all(&output_dir).map_err(|e| {
            tracing::error!("Failed to create output directory {}: {e}", output_dir.display());
            TtsError::InternalError
        })?;

        let candidate: Option<Arc<dyn SpeechSynthesizer>> = match &tts.provider {
            Some(provider) => match provider.provider_type {
                TtsProviderType::OpenaiTts => Some(Arc::new(
                    OpenAiTtsProvider::new(
                        &provider.base_url,
                        provider.api_key.clone(),
                        provider.model.clone(),
                        provider.response_format,
                        provider.timeout,
                    )
                    .map_err(|e| {
                        tracing::error!("Failed to build TTS client: {e}");
                        TtsError::InternalError
                    })?,
                )),
            },
            None => {
                tracing::warn!("No speech-synthesis provider configured, service will report unhealthy");
                None
            }
        };

        let default_voice = tts.provider.as_ref().map_or_else(
            || tts.voices.first().cloned().unwrap_or_default(),
            |provider| provider.default_voice.clone(),
        );

        Ok(SynthesisService::new(
            candidate,
            ArtifactStore::new(output_dir),
            tts.voices.clone(),
            default_voice,
        ))
    }
}
