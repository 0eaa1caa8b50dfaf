use serde::{Deserialize, Serialize};
use voxrelay_config::AudioFormat;

/// Body of `POST /synthesize`
#[derive(Debug, Default, Deserialize)]
pub struct SynthesizeRequest {
    #[serde(default)]
    pub text: Option<String>,
    /// Voice to use; the configured default when absent
    #[serde(default)]
    pub voice: Option<String>,
}

/// Encoded audio produced by an engine
#[derive(Debug)]
pub struct SpeechAudio {
    pub audio: Vec<u8>,
    pub format: AudioFormat,
}

#[derive(Debug, Serialize)]
pub struct SynthesizeResponse {
    pub audio_id: String,
    pub message: &'static str,
    pub download_url: String,
}

#[derive(Debug, Serialize)]
pub struct VoicesResponse {
    pub voices: Vec<String>,
    pub default: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub tts_available: bool,
    pub pid: u32,
}

#[derive(Debug, Serialize)]
pub struct CleanupResponse {
    pub message: &'static str,
}
