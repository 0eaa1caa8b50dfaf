//! Mock OpenAI-compatible speech synthesis backend

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use tokio_util::sync::CancellationToken;

/// Bytes returned for every synthesis request
pub const FAKE_AUDIO: &[u8] = b"ID3\x04\x00fake-mp3-frames";

pub struct MockTts {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockTtsState>,
}

struct MockTtsState {
    speech_count: AtomicU32,
    probe_fails: bool,
}

impl MockTts {
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_inner(false).await
    }

    /// Start a mock whose model probe fails, so loading fails
    pub async fn start_unavailable() -> anyhow::Result<Self> {
        Self::start_inner(true).await
    }

    async fn start_inner(probe_fails: bool) -> anyhow::Result<Self> {
        let state = Arc::new(MockTtsState {
            speech_count: AtomicU32::new(0),
            probe_fails,
        });

        let app = Router::new()
            .route("/v1/models", routing::get(handle_models))
            .route("/v1/audio/speech", routing::post(handle_speech))
            .with_state(Arc::clone(&state));

        let (addr, shutdown) = super::spawn_mock(app).await?;

        Ok(Self { addr, shutdown, state })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    pub fn speech_count(&self) -> u32 {
        self.state.speech_count.load(Ordering::Relaxed)
    }
}

impl Drop for MockTts {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_models(State(state): State<Arc<MockTtsState>>) -> StatusCode {
    if state.probe_fails {
        StatusCode::UNAUTHORIZED
    } else {
        StatusCode::OK
    }
}

async fn handle_speech(State(state): State<Arc<MockTtsState>>, Json(body): Json<serde_json::Value>) -> Response {
    state.speech_count.fetch_add(1, Ordering::Relaxed);

    if body["input"].as_str().is_none_or(str::is_empty) {
        return (StatusCode::BAD_REQUEST, "input required").into_response();
    }

    ([(header::CONTENT_TYPE, "audio/mpeg")], FAKE_AUDIO).into_response()
}
