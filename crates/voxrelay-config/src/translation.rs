use std::net::SocketAddr;
use std::time::Duration;

use serde::Deserialize;
use url::Url;

/// Translation service configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TranslationConfig {
    #[serde(default = "default_listen_address")]
    pub listen_address: SocketAddr,
    #[serde(default)]
    pub provider: TranslationProviderConfig,
    #[serde(default)]
    pub retry: RetryConfig,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            listen_address: default_listen_address(),
            provider: TranslationProviderConfig::default(),
            retry: RetryConfig::default(),
        }
    }
}

/// Upstream translation provider
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TranslationProviderConfig {
    /// Provider type
    #[serde(rename = "type", default)]
    pub provider_type: TranslationProviderType,
    #[serde(default = "default_provider_url")]
    pub base_url: Url,
    /// Per-request timeout
    #[serde(default = "default_provider_timeout", with = "crate::duration")]
    pub timeout: Duration,
    #[serde(default)]
    pub transport: TransportConfig,
}

impl Default for TranslationProviderConfig {
    fn default() -> Self {
        Self {
            provider_type: TranslationProviderType::default(),
            base_url: default_provider_url(),
            timeout: default_provider_timeout(),
            transport: TransportConfig::default(),
        }
    }
}

/// Supported translation providers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranslationProviderType {
    /// Google's public web translation endpoint
    #[default]
    Google,
}

/// TLS settings applied to the provider client only
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransportConfig {
    /// Skip certificate verification for this one client
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

/// Retry policy for rate-limited provider calls
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetryConfig {
    /// Total attempts, including the first
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles for each later one
    #[serde(default = "default_base_delay", with = "crate::duration")]
    pub base_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay: default_base_delay(),
        }
    }
}

fn default_listen_address() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 6000))
}

fn default_provider_url() -> Url {
    Url::parse("https://translate.googleapis.com").expect("must be a valid URL")
}

const fn default_provider_timeout() -> Duration {
    Duration::from_secs(10)
}

const fn default_max_attempts() -> u32 {
    3
}

const fn default_base_delay() -> Duration {
    Duration::from_secs(1)
}
