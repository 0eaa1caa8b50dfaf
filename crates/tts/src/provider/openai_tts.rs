use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use url::Url;
use voxrelay_config::AudioFormat;

use crate::{error::TtsError, http_client::http_client, types::SpeechAudio};

use super::SpeechSynthesizer;

/// `OpenAI`-compatible speech endpoint
pub(crate) struct OpenAiTtsProvider {
    client: Client,
    base_url: String,
    api_key: Option<SecretString>,
    model: String,
    format: AudioFormat,
}

impl OpenAiTtsProvider {
    pub fn new(
        base_url: &Url,
        api_key: Option<SecretString>,
        model: String,
        format: AudioFormat,
        timeout: Duration,
    ) -> reqwest::Result<Self> {
        Ok(Self {
            client: http_client(timeout)?,
            base_url: base_url.as_str().trim_end_matches('/').to_owned(),
            api_key,
            model,
            format,
        })
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) if !key.expose_secret().is_empty() => request.bearer_auth(key.expose_secret()),
            _ => request,
        }
    }
}

#[derive(serde::Serialize)]
struct OpenAiTtsRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    response_format: &'a str,
}

#[async_trait]
impl SpeechSynthesizer for OpenAiTtsProvider {
    async fn probe(&self) -> crate::error::Result<()> {
        let url = format!("{}/models", self.base_url);

        let response = self
            .authorize(self.client.get(&url))
            .send()
            .await
            .map_err(|e| TtsError::SynthesisFailed(format!("TTS backend unreachable: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TtsError::SynthesisFailed(format!("TTS backend probe returned {status}")));
        }

        Ok(())
    }

    async fn synthesize(&self, text: &str, voice: &str) -> crate::error::Result<SpeechAudio> {
        let url = format!("{}/audio/speech", self.base_url);

        tracing::debug!(
            "OpenAI TTS request: model={}, voice={voice}, input_len={}",
            self.model,
            text.len(),
        );

        let body = OpenAiTtsRequest {
            model: &self.model,
            input: text,
            voice,
            response_format: self.format.extension(),
        };

        let response = self
            .authorize(self.client.post(&url))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("OpenAI TTS request failed: {e}");
                TtsError::SynthesisFailed(format!("Failed to send request to TTS backend: {e}"))
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());

            tracing::error!("OpenAI TTS API error ({status}): {error_text}");

            return Err(TtsError::SynthesisFailed(format!("TTS API error ({status}): {error_text}")));
        }

        let audio = response.bytes().await.map_err(|e| {
            tracing::error!("Failed to read OpenAI TTS response body: {e}");
            TtsError::InternalError
        })?;

        if audio.is_empty() {
            return Err(TtsError::SynthesisFailed("TTS backend returned no audio".to_owned()));
        }

        tracing::debug!("OpenAI TTS synthesis complete, {} bytes", audio.len());

        Ok(SpeechAudio {
            audio: audio.to_vec(),
            format: self.format,
        })
    }

    fn name(&self) -> &str {
        "openai_tts"
    }
}
