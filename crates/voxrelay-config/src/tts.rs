use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Speech-synthesis service configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TtsConfig {
    #[serde(default = "default_listen_address")]
    pub listen_address: SocketAddr,
    /// Where synthesized artifacts are written; the system temp dir when unset
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    /// Voices advertised by `/voices`
    #[serde(default = "default_voices")]
    pub voices: Vec<String>,
    /// Synthesis engine; without one the service reports itself unhealthy
    #[serde(default)]
    pub provider: Option<TtsProviderConfig>,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            listen_address: default_listen_address(),
            output_dir: None,
            voices: default_voices(),
            provider: None,
        }
    }
}

impl TtsConfig {
    /// Effective artifact directory
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

/// Synthesis engine
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TtsProviderConfig {
    /// Provider type
    #[serde(rename = "type")]
    pub provider_type: TtsProviderType,
    /// Base URL of an OpenAI-compatible speech API
    pub base_url: Url,
    /// API key
    #[serde(default)]
    pub api_key: Option<SecretString>,
    #[serde(default = "default_model")]
    pub model: String,
    /// Voice used when a request names none
    #[serde(default = "default_voice")]
    pub default_voice: String,
    #[serde(default)]
    pub response_format: AudioFormat,
    /// Per-request timeout
    #[serde(default = "default_timeout", with = "crate::duration")]
    pub timeout: Duration,
}

/// Supported TTS providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TtsProviderType {
    /// `OpenAI`-compatible `/audio/speech`
    OpenaiTts,
}

/// Encoding of synthesized audio
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    #[default]
    Mp3,
    Wav,
}

impl AudioFormat {
    /// File extension, also the wire value
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
        }
    }

    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
            Self::Wav => "audio/wav",
        }
    }
}

fn default_listen_address() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 7000))
}

fn default_voices() -> Vec<String> {
    ["alloy", "echo", "fable", "onyx", "nova", "shimmer"].map(str::to_owned).to_vec()
}

fn default_model() -> String {
    "tts-1".to_owned()
}

fn default_voice() -> String {
    "alloy".to_owned()
}

const fn default_timeout() -> Duration {
    Duration::from_secs(60)
}
