//! Mock Whisper backend speaking the OpenAI transcription API

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Json, Router, routing};
use tokio_util::sync::CancellationToken;

pub struct MockWhisper {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockWhisperState>,
}

struct MockWhisperState {
    probe_count: AtomicU32,
    transcription_count: AtomicU32,
    translation_count: AtomicU32,
    /// Answer the model probe with 503
    probe_fails: bool,
    /// Answer transcriptions with 500
    transcription_fails: bool,
}

impl MockWhisper {
    /// Start a healthy mock
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_inner(false, false).await
    }

    /// Start a mock whose model probe fails, so loading fails
    pub async fn start_unavailable() -> anyhow::Result<Self> {
        Self::start_inner(true, false).await
    }

    /// Start a mock that loads but fails every transcription
    pub async fn start_failing() -> anyhow::Result<Self> {
        Self::start_inner(false, true).await
    }

    async fn start_inner(probe_fails: bool, transcription_fails: bool) -> anyhow::Result<Self> {
        let state = Arc::new(MockWhisperState {
            probe_count: AtomicU32::new(0),
            transcription_count: AtomicU32::new(0),
            translation_count: AtomicU32::new(0),
            probe_fails,
            transcription_fails,
        });

        let app = Router::new()
            .route("/v1/models", routing::get(handle_models))
            .route("/v1/audio/transcriptions", routing::post(handle_transcriptions))
            .route("/v1/audio/translations", routing::post(handle_translations))
            .with_state(Arc::clone(&state));

        let (addr, shutdown) = super::spawn_mock(app).await?;

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL including `/v1`
    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    pub fn probe_count(&self) -> u32 {
        self.state.probe_count.load(Ordering::Relaxed)
    }

    pub fn transcription_count(&self) -> u32 {
        self.state.transcription_count.load(Ordering::Relaxed)
    }

    pub fn translation_count(&self) -> u32 {
        self.state.translation_count.load(Ordering::Relaxed)
    }
}

impl Drop for MockWhisper {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_models(State(state): State<Arc<MockWhisperState>>) -> impl IntoResponse {
    state.probe_count.fetch_add(1, Ordering::Relaxed);

    if state.probe_fails {
        return (StatusCode::SERVICE_UNAVAILABLE, Json(serde_json::json!({"error": "model not loaded"})));
    }

    (
        StatusCode::OK,
        Json(serde_json::json!({"object": "list", "data": [{"id": "whisper-1", "object": "model"}]})),
    )
}

async fn handle_transcriptions(State(state): State<Arc<MockWhisperState>>, multipart: Multipart) -> impl IntoResponse {
    state.transcription_count.fetch_add(1, Ordering::Relaxed);
    respond(&state, multipart).await
}

async fn handle_translations(State(state): State<Arc<MockWhisperState>>, multipart: Multipart) -> impl IntoResponse {
    state.translation_count.fetch_add(1, Ordering::Relaxed);
    respond(&state, multipart).await
}

async fn respond(state: &MockWhisperState, mut multipart: Multipart) -> (StatusCode, Json<serde_json::Value>) {
    if state.transcription_fails {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({"error": "decoder crashed"})),
        );
    }

    let mut language = None;
    let mut has_file = false;

    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("file") => has_file = !field.bytes().await.unwrap_or_default().is_empty(),
            Some("language") => language = field.text().await.ok(),
            _ => {}
        }
    }

    if !has_file {
        return (StatusCode::BAD_REQUEST, Json(serde_json::json!({"error": "missing file"})));
    }

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "task": "transcribe",
            "language": language.unwrap_or_else(|| "en".to_owned()),
            "duration": 4.2,
            "text": " Hello world. How are you?",
            "segments": [
                {"id": 0, "start": 0.0, "end": 2.0, "text": " Hello world."},
                {"id": 1, "start": 2.0, "end": 4.2, "text": " How are you?"}
            ]
        })),
    )
}
