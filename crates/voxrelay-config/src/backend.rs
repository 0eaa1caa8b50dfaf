use std::net::SocketAddr;
use std::time::Duration;

use serde::Deserialize;
use url::Url;

/// Backend process: hosts speech-to-text and proxies to the translation service
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BackendConfig {
    #[serde(default = "default_listen_address")]
    pub listen_address: SocketAddr,
    /// Base URL of the sibling translation service
    #[serde(default = "default_translation_url")]
    pub translation_url: Url,
    /// Timeout for relayed translate calls
    #[serde(default = "default_translate_timeout", with = "crate::duration")]
    pub translate_timeout: Duration,
    /// Timeout for relayed language listings
    #[serde(default = "default_short_timeout", with = "crate::duration")]
    pub languages_timeout: Duration,
    /// Timeout for relayed language detection
    #[serde(default = "default_short_timeout", with = "crate::duration")]
    pub detect_timeout: Duration,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            listen_address: default_listen_address(),
            translation_url: default_translation_url(),
            translate_timeout: default_translate_timeout(),
            languages_timeout: default_short_timeout(),
            detect_timeout: default_short_timeout(),
        }
    }
}

fn default_listen_address() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 5000))
}

fn default_translation_url() -> Url {
    Url::parse("http://translation-service:6000").expect("must be a valid URL")
}

const fn default_translate_timeout() -> Duration {
    Duration::from_secs(30)
}

const fn default_short_timeout() -> Duration {
    Duration::from_secs(10)
}
