#![allow(clippy::must_use_candidate)]

pub mod backend;
pub mod cors;
mod duration;
mod env;
pub mod health;
mod loader;
pub mod server;
pub mod stt;
pub mod telemetry;
pub mod tls;
pub mod translation;
pub mod tts;

use serde::Deserialize;

pub use backend::*;
pub use cors::*;
pub use health::*;
pub use server::*;
pub use stt::*;
pub use telemetry::*;
pub use tls::*;
pub use translation::*;
pub use tts::*;

/// Top-level voxrelay configuration
///
/// One file configures every service; each process reads the shared
/// `server` and `telemetry` sections plus the section for its own role.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Settings shared by every service process
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    /// Backend (speech-to-text host and translation proxy)
    #[serde(default)]
    pub backend: BackendConfig,
    /// Speech-to-text capability
    #[serde(default)]
    pub stt: SttConfig,
    /// Translation service
    #[serde(default)]
    pub translation: TranslationConfig,
    /// Speech-synthesis service
    #[serde(default)]
    pub tts: TtsConfig,
}
