use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Speech-to-text configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SttConfig {
    /// Model size reported by health and model-info (`tiny`, `base`, `small`, ...)
    #[serde(default = "default_model_size")]
    pub model_size: String,
    /// Directory for temporary uploads; the system temp dir when unset
    #[serde(default)]
    pub upload_dir: Option<PathBuf>,
    /// How long the startup probe may take before the model is marked failed
    #[serde(default = "default_probe_timeout", with = "crate::duration")]
    pub probe_timeout: Duration,
    /// Transcription backend; without one the service runs in mock mode
    #[serde(default)]
    pub provider: Option<SttProviderConfig>,
}

impl Default for SttConfig {
    fn default() -> Self {
        Self {
            model_size: default_model_size(),
            upload_dir: None,
            probe_timeout: default_probe_timeout(),
            provider: None,
        }
    }
}

impl SttConfig {
    /// Effective upload directory
    pub fn upload_dir(&self) -> PathBuf {
        self.upload_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

/// Transcription backend
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SttProviderConfig {
    /// Provider type
    #[serde(rename = "type")]
    pub provider_type: SttProviderType,
    /// Base URL of an OpenAI-compatible transcription API
    pub base_url: Url,
    /// API key
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Per-request timeout
    #[serde(default = "default_transcribe_timeout", with = "crate::duration")]
    pub timeout: Duration,
}

/// Supported STT providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SttProviderType {
    /// Whisper behind an OpenAI-compatible `/audio/transcriptions` endpoint
    Whisper,
}

fn default_model_size() -> String {
    "small".to_owned()
}

const fn default_probe_timeout() -> Duration {
    Duration::from_secs(10)
}

const fn default_transcribe_timeout() -> Duration {
    Duration::from_secs(300)
}
