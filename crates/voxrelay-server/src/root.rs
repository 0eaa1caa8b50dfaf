use std::collections::BTreeMap;

use axum::Json;
use serde::Serialize;

/// Service description served at `GET /`
#[derive(Debug, Clone, Serialize)]
pub struct RootResponse {
    pub service: &'static str,
    pub version: &'static str,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pid: Option<u32>,
    pub endpoints: BTreeMap<&'static str, String>,
}

impl RootResponse {
    fn new(service: &'static str, health_path: Option<&str>) -> Self {
        let mut endpoints = BTreeMap::new();
        if let Some(path) = health_path {
            endpoints.insert("health", path.to_owned());
        }

        Self {
            service,
            version: env!("CARGO_PKG_VERSION"),
            status: "running",
            pid: None,
            endpoints,
        }
    }

    fn endpoint(mut self, name: &'static str, path: &str) -> Self {
        self.endpoints.insert(name, path.to_owned());
        self
    }

    pub fn backend(health_path: Option<&str>) -> Self {
        let mut root = Self::new("Whisper Voice-to-Text API", health_path)
            .endpoint("transcribe", "/api/v1/transcribe")
            .endpoint("translate", "/api/v1/translate")
            .endpoint("languages", "/api/v1/languages")
            .endpoint("translation_languages", "/api/v1/translation-languages")
            .endpoint("detect_language", "/api/v1/detect-language")
            .endpoint("model_info", "/api/v1/model-info");
        root.pid = Some(voxrelay_core::pid());
        root
    }

    pub fn translation(health_path: Option<&str>) -> Self {
        Self::new("Google Translation API", health_path)
            .endpoint("translate", "/translate")
            .endpoint("languages", "/languages")
            .endpoint("detect", "/detect")
    }

    pub fn tts(health_path: Option<&str>) -> Self {
        Self::new("Text-to-Speech API", health_path)
            .endpoint("voices", "/voices")
            .endpoint("synthesize", "/synthesize")
            .endpoint("download", "/download/{audio_id}")
            .endpoint("cleanup", "/cleanup/{audio_id}")
    }
}

/// Handler returning a fixed description
pub fn handler(root: RootResponse) -> axum::routing::MethodRouter {
    axum::routing::get(move || {
        let root = root.clone();
        async move { Json(root) }
    })
}
