use std::path::Path;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::from_toml(&raw)
    }

    /// Parse configuration from TOML text, with placeholder expansion
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing or validation fails
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error describing the first violated rule
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_server()?;
        self.validate_translation()?;
        self.validate_tts()?;
        Ok(())
    }

    fn validate_server(&self) -> anyhow::Result<()> {
        if self.server.max_upload_bytes == 0 {
            anyhow::bail!("server.max_upload_bytes must be greater than 0");
        }

        if let Some(ref tls) = self.server.tls
            && tls.enabled
            && (tls.certificate.as_os_str().is_empty() || tls.private_key.as_os_str().is_empty())
        {
            anyhow::bail!("server.tls requires both certificate and private_key when enabled");
        }

        if !self.server.health.path.starts_with('/') {
            anyhow::bail!("server.health.path must start with '/'");
        }

        Ok(())
    }

    fn validate_translation(&self) -> anyhow::Result<()> {
        if self.translation.retry.max_attempts == 0 {
            anyhow::bail!("translation.retry.max_attempts must be at least 1");
        }

        Ok(())
    }

    fn validate_tts(&self) -> anyhow::Result<()> {
        if self.tts.voices.is_empty() {
            anyhow::bail!("tts.voices must list at least one voice");
        }

        if let Some(ref provider) = self.tts.provider
            && !self.tts.voices.contains(&provider.default_voice)
        {
            anyhow::bail!(
                "tts.provider.default_voice '{}' is not one of the configured voices",
                provider.default_voice
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::net::SocketAddr;
    use std::time::Duration;

    use crate::{AnyOrList, AudioFormat, Config, LogFormat, SttProviderType};

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::from_toml("").unwrap();

        assert_eq!(config.server.max_upload_bytes, 50 * 1024 * 1024);
        assert!(config.server.tls.is_none());
        assert_eq!(config.backend.listen_address, SocketAddr::from(([0, 0, 0, 0], 5000)));
        assert_eq!(config.backend.translation_url.as_str(), "http://translation-service:6000/");
        assert_eq!(config.backend.translate_timeout, Duration::from_secs(30));
        assert_eq!(config.backend.languages_timeout, Duration::from_secs(10));
        assert_eq!(config.translation.listen_address.port(), 6000);
        assert_eq!(config.translation.retry.max_attempts, 3);
        assert_eq!(config.translation.retry.base_delay, Duration::from_secs(1));
        assert!(!config.translation.provider.transport.accept_invalid_certs);
        assert_eq!(config.tts.listen_address.port(), 7000);
        assert_eq!(config.stt.model_size, "small");
        assert!(config.stt.provider.is_none());
        assert_eq!(config.telemetry.format, LogFormat::Text);
    }

    #[test]
    fn full_config_parses() {
        let config = Config::from_toml(
            r#"
            [server]
            max_upload_bytes = 1048576

            [server.cors]
            origins = ["http://localhost:3000"]

            [telemetry]
            log_filter = "debug"
            format = "json"

            [backend]
            listen_address = "127.0.0.1:5001"
            translation_url = "http://127.0.0.1:6001"
            translate_timeout = "5s"

            [stt]
            model_size = "base"
            probe_timeout = "2s"

            [stt.provider]
            type = "whisper"
            base_url = "http://127.0.0.1:9000/v1"

            [translation.provider]
            base_url = "http://127.0.0.1:9100"

            [translation.provider.transport]
            accept_invalid_certs = true

            [translation.retry]
            max_attempts = 5
            base_delay = "100ms"

            [tts]
            voices = ["nova"]

            [tts.provider]
            type = "openai_tts"
            base_url = "http://127.0.0.1:9200/v1"
            default_voice = "nova"
            response_format = "wav"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.max_upload_bytes, 1_048_576);
        let cors = config.server.cors.unwrap();
        assert_eq!(cors.origins, AnyOrList::List(vec!["http://localhost:3000".into()]));
        assert_eq!(config.telemetry.format, LogFormat::Json);
        assert_eq!(config.backend.translate_timeout, Duration::from_secs(5));
        assert_eq!(config.stt.provider.unwrap().provider_type, SttProviderType::Whisper);
        assert!(config.translation.provider.transport.accept_invalid_certs);
        assert_eq!(config.translation.retry.max_attempts, 5);
        assert_eq!(config.translation.retry.base_delay, Duration::from_millis(100));
        assert_eq!(config.tts.provider.unwrap().response_format, AudioFormat::Wav);
    }

    #[test]
    fn env_placeholders_are_expanded() {
        temp_env::with_vars(
            [
                ("WHISPER_MODEL_SIZE", Some("medium")),
                ("TRANSLATION_SERVICE_URL", Some("http://10.0.0.2:6000")),
                ("BACKEND_PORT", None),
            ],
            || {
                let config = Config::from_toml(
                    r#"
                    [backend]
                    listen_address = "0.0.0.0:{{ env.BACKEND_PORT | default("5000") }}"
                    translation_url = "{{ env.TRANSLATION_SERVICE_URL }}"

                    [stt]
                    model_size = "{{ env.WHISPER_MODEL_SIZE | default("small") }}"
                    "#,
                )
                .unwrap();

                assert_eq!(config.stt.model_size, "medium");
                assert_eq!(config.backend.listen_address.port(), 5000);
                assert_eq!(config.backend.translation_url.host_str(), Some("10.0.0.2"));
            },
        );
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = Config::from_toml("[backend]\nlisten = \"0.0.0.0:5000\"\n").unwrap_err();
        assert!(err.to_string().contains("failed to parse config"));
    }

    #[test]
    fn rejects_zero_retry_attempts() {
        let err = Config::from_toml("[translation.retry]\nmax_attempts = 0\n").unwrap_err();
        assert!(err.to_string().contains("max_attempts"));
    }

    #[test]
    fn rejects_zero_upload_limit() {
        let err = Config::from_toml("[server]\nmax_upload_bytes = 0\n").unwrap_err();
        assert!(err.to_string().contains("max_upload_bytes"));
    }

    #[test]
    fn rejects_bad_duration() {
        let err = Config::from_toml("[backend]\ntranslate_timeout = \"soon\"\n").unwrap_err();
        assert!(err.to_string().contains("failed to parse config"));
    }

    #[test]
    fn rejects_bad_url() {
        let err = Config::from_toml("[backend]\ntranslation_url = \"not a url\"\n").unwrap_err();
        assert!(err.to_string().contains("failed to parse config"));
    }

    #[test]
    fn rejects_enabled_tls_without_paths() {
        let err = Config::from_toml("[server.tls]\ncertificate = \"\"\nprivate_key = \"key.pem\"\n").unwrap_err();
        assert!(err.to_string().contains("server.tls"));
    }

    #[test]
    fn disabled_tls_may_omit_paths() {
        let config =
            Config::from_toml("[server.tls]\nenabled = false\ncertificate = \"\"\nprivate_key = \"\"\n").unwrap();
        assert!(!config.server.tls.unwrap().is_usable());
    }

    #[test]
    fn rejects_unknown_default_voice() {
        let err = Config::from_toml(
            r#"
            [tts]
            voices = ["alloy"]

            [tts.provider]
            type = "openai_tts"
            base_url = "http://127.0.0.1:9200"
            default_voice = "nova"
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("default_voice"));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[stt]\nmodel_size = \"tiny\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.stt.model_size, "tiny");
    }

    #[test]
    fn shipped_config_parses_with_env_defaults() {
        let unset = [
            "MAX_UPLOAD_BYTES",
            "ENABLE_SSL",
            "SSL_CERT_PATH",
            "SSL_KEY_PATH",
            "LOG_FILTER",
            "BACKEND_PORT",
            "TRANSLATION_SERVICE_URL",
            "WHISPER_MODEL_SIZE",
            "WHISPER_URL",
            "TRANSLATION_PORT",
            "TTS_PORT",
            "TTS_URL",
            "TTS_API_KEY",
        ]
        .map(|name| (name, None::<&str>));

        temp_env::with_vars(unset, || {
            let config = Config::from_toml(include_str!("../../../voxrelay.toml")).unwrap();

            assert_eq!(config.server.max_upload_bytes, 50 * 1024 * 1024);
            assert!(config.server.tls.as_ref().is_some_and(|tls| !tls.enabled));
            assert_eq!(config.backend.listen_address.port(), 5000);
            assert_eq!(config.stt.model_size, "small");
            assert!(config.tts.provider.is_some());
        });
    }

    #[test]
    fn shipped_config_follows_environment() {
        temp_env::with_vars(
            [
                ("BACKEND_PORT", Some("5500")),
                ("WHISPER_MODEL_SIZE", Some("base")),
                ("TRANSLATION_SERVICE_URL", Some("http://127.0.0.1:6000")),
            ],
            || {
                let config = Config::from_toml(include_str!("../../../voxrelay.toml")).unwrap();

                assert_eq!(config.backend.listen_address.port(), 5500);
                assert_eq!(config.stt.model_size, "base");
                assert_eq!(config.backend.translation_url.as_str(), "http://127.0.0.1:6000/");
            },
        );
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = Config::load(std::path::Path::new("/nonexistent/voxrelay.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }
}
