use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use url::Url;
use voxrelay_core::language::{SPEECH_LANGUAGES, to_owned_list};

use crate::{
    error::SttError,
    http_client::http_client,
    types::{Segment, Task, Transcript},
};

use super::SpeechModel;

/// Whisper behind an OpenAI-compatible transcription API
pub(crate) struct WhisperModel {
    client: Client,
    base_url: String,
    api_key: Option<SecretString>,
    model: String,
    probe_timeout: Duration,
}

impl WhisperModel {
    pub fn new(
        base_url: &Url,
        api_key: Option<SecretString>,
        model: String,
        timeout: Duration,
        probe_timeout: Duration,
    ) -> reqwest::Result<Self> {
        Ok(Self {
            client: http_client(timeout)?,
            base_url: base_url.as_str().trim_end_matches('/').to_owned(),
            api_key,
            model,
            probe_timeout,
        })
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) if !key.expose_secret().is_empty() => request.bearer_auth(key.expose_secret()),
            _ => request,
        }
    }
}

#[derive(serde::Deserialize)]
struct VerboseTranscription {
    text: String,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    segments: Vec<Segment>,
}

#[async_trait]
impl SpeechModel for WhisperModel {
    async fn probe(&self) -> crate::error::Result<()> {
        let url = format!("{}/models", self.base_url);

        let response = self
            .authorize(self.client.get(&url))
            .timeout(self.probe_timeout)
            .send()
            .await
            .map_err(|e| SttError::TranscriptionFailed(format!("Whisper backend unreachable: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SttError::TranscriptionFailed(format!(
                "Whisper backend probe returned {status}"
            )));
        }

        Ok(())
    }

    async fn transcribe(&self, audio: &Path, language: Option<&str>, task: Task) -> crate::error::Result<Transcript> {
        let endpoint = match task {
            Task::Transcribe => "transcriptions",
            Task::Translate => "translations",
        };
        let url = format!("{}/audio/{endpoint}", self.base_url);

        let bytes = tokio::fs::read(audio).await.map_err(|e| {
            tracing::error!("Failed to read upload {}: {e}", audio.display());
            SttError::InternalError
        })?;

        let file_name = audio
            .file_name()
            .map_or_else(|| "audio".to_owned(), |name| name.to_string_lossy().into_owned());

        tracing::debug!(
            bytes = bytes.len(),
            model = %self.model,
            ?task,
            "Whisper transcription request"
        );

        let mut form = reqwest::multipart::Form::new()
            .part("file", reqwest::multipart::Part::bytes(bytes).file_name(file_name))
            .text("model", self.model.clone())
            .text("response_format", "verbose_json");

        // The translations endpoint always produces English
        if let (Some(language), Task::Transcribe) = (language, task) {
            form = form.text("language", language.to_owned());
        }

        let response = self
            .authorize(self.client.post(&url))
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Whisper request failed: {e}");
                SttError::TranscriptionFailed(format!("Failed to send request to Whisper: {e}"))
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());

            tracing::error!("Whisper API error ({status}): {error_text}");

            return Err(SttError::TranscriptionFailed(format!(
                "Whisper API error ({status}): {error_text}"
            )));
        }

        let result: VerboseTranscription = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Whisper response: {e}");
            SttError::TranscriptionFailed("Malformed response from Whisper".to_owned())
        })?;

        Ok(Transcript {
            text: result.text,
            language: result.language,
            segments: result.segments,
        })
    }

    fn supported_languages(&self) -> Vec<String> {
        to_owned_list(SPEECH_LANGUAGES)
    }

    fn device(&self) -> &str {
        "remote"
    }

    fn name(&self) -> &str {
        "whisper"
    }
}
