//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use voxrelay_config::{
    AudioFormat, Config, RetryConfig, SttProviderConfig, SttProviderType, TtsProviderConfig, TtsProviderType,
};

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with minimal defaults
    ///
    /// Retries back off in milliseconds so throttling tests stay fast.
    pub fn new() -> Self {
        let mut config = Config::default();
        let local = SocketAddr::from(([127, 0, 0, 1], 0));

        config.backend.listen_address = local;
        config.translation.listen_address = local;
        config.tts.listen_address = local;
        config.translation.retry = RetryConfig {
            max_attempts: 3,
            base_delay: Duration::from_millis(10),
        };

        Self { config }
    }

    /// Point the speech-to-text capability at a mock Whisper backend
    pub fn with_whisper(mut self, base_url: &str) -> Self {
        self.config.stt.provider = Some(SttProviderConfig {
            provider_type: SttProviderType::Whisper,
            base_url: base_url.parse().expect("valid URL"),
            api_key: None,
            timeout: Duration::from_secs(10),
        });
        self
    }

    /// Spool uploads into `dir`
    pub fn with_upload_dir(mut self, dir: &Path) -> Self {
        self.config.stt.upload_dir = Some(dir.to_path_buf());
        self
    }

    /// Base URL of the translation service the backend relays to
    pub fn with_translation_url(mut self, url: &str) -> Self {
        self.config.backend.translation_url = url.parse().expect("valid URL");
        self
    }

    /// Point the translation provider at a mock Google endpoint
    pub fn with_google(mut self, base_url: &str) -> Self {
        self.config.translation.provider.base_url = base_url.parse().expect("valid URL");
        self
    }

    /// Override the retry policy
    pub fn with_retry(mut self, max_attempts: u32, base_delay: Duration) -> Self {
        self.config.translation.retry = RetryConfig {
            max_attempts,
            base_delay,
        };
        self
    }

    /// Point the speech-synthesis capability at a mock TTS backend
    pub fn with_tts(mut self, base_url: &str) -> Self {
        self.config.tts.provider = Some(TtsProviderConfig {
            provider_type: TtsProviderType::OpenaiTts,
            base_url: base_url.parse().expect("valid URL"),
            api_key: None,
            model: "tts-1".to_owned(),
            default_voice: "alloy".to_owned(),
            response_format: AudioFormat::Mp3,
            timeout: Duration::from_secs(10),
        });
        self
    }

    /// Store synthesized audio in `dir`
    pub fn with_output_dir(mut self, dir: &Path) -> Self {
        self.config.tts.output_dir = Some(dir.to_path_buf());
        self
    }

    /// Set the request body limit
    pub fn with_max_upload_bytes(mut self, bytes: usize) -> Self {
        self.config.server.max_upload_bytes = bytes;
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
