use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SttError;

/// What the model should produce from the audio
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Task {
    /// Text in the spoken language
    #[default]
    Transcribe,
    /// English text regardless of the spoken language
    Translate,
}

impl FromStr for Task {
    type Err = SttError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "transcribe" => Ok(Self::Transcribe),
            "translate" => Ok(Self::Translate),
            _ => Err(SttError::InvalidInput(
                "Task must be either \"transcribe\" or \"translate\"".to_owned(),
            )),
        }
    }
}

/// One timed span of transcribed text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

/// Raw model output before it is stamped with service metadata
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    pub text: String,
    pub language: Option<String>,
    /// In the order the model produced them
    pub segments: Vec<Segment>,
}

/// Transcription result returned to callers
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptionResult {
    pub text: String,
    pub language: String,
    pub model_size: String,
    pub segments: Vec<Segment>,
}

#[derive(Debug, Serialize)]
pub struct TranscribeResponse {
    pub success: bool,
    pub result: TranscriptionResult,
    pub filename: String,
    /// Set when the result is a placeholder
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub pid: u32,
}

#[derive(Debug, Serialize)]
pub struct LanguagesResponse {
    pub success: bool,
    pub languages: Vec<String>,
    pub pid: u32,
}

#[derive(Debug, Serialize)]
pub struct ModelInfo {
    pub model_size: String,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ModelInfoResponse {
    pub success: bool,
    pub model_info: ModelInfo,
    pub pid: u32,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    pub service: &'static str,
    pub whisper_model: &'static str,
    pub version: &'static str,
    pub pid: u32,
}
