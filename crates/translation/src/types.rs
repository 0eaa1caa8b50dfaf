use serde::{Deserialize, Serialize};

/// Body of `POST /translate`
///
/// Fields are optional here so missing values become 400 responses with a
/// specific message rather than a deserialization rejection.
#[derive(Debug, Default, Deserialize)]
pub struct TranslateRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub target_language: Option<String>,
    #[serde(default)]
    pub source_language: Option<String>,
}

/// Body of `POST /detect`
#[derive(Debug, Default, Deserialize)]
pub struct DetectRequest {
    #[serde(default)]
    pub text: Option<String>,
}

/// Where a translation came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// Genuine output of the Google provider
    GoogleTranslate,
    /// Locally synthesized because the provider was unreachable over TLS
    MockTranslatorSslFallback,
}

impl Provenance {
    pub const fn is_fallback(self) -> bool {
        matches!(self, Self::MockTranslatorSslFallback)
    }
}

/// What a provider returns for one translation
#[derive(Debug, Clone)]
pub struct ProviderTranslation {
    pub text: String,
    /// Source language the provider detected or was given
    pub source_language: String,
    pub confidence: Option<f64>,
}

/// What a provider returns for one detection
#[derive(Debug, Clone)]
pub struct ProviderDetection {
    pub language: String,
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TranslationResult {
    pub original_text: String,
    pub translated_text: String,
    pub source_language: String,
    pub target_language: String,
    pub source_language_name: String,
    pub target_language_name: String,
    pub confidence: Option<f64>,
    #[serde(rename = "service")]
    pub provenance: Provenance,
}

#[derive(Debug, Clone, Serialize)]
pub struct DetectionResult {
    pub language: String,
    pub language_name: String,
    pub confidence: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct TranslateResponse {
    pub success: bool,
    pub result: TranslationResult,
}

#[derive(Debug, Serialize)]
pub struct DetectResponse {
    pub success: bool,
    pub result: DetectionResult,
}

#[derive(Debug, Serialize)]
pub struct LanguagesResponse {
    pub success: bool,
    pub languages: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub translator_status: &'static str,
    pub pid: u32,
}
