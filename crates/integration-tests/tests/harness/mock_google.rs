//! Mock of Google's public web translation endpoint

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use axum_server::tls_rustls::RustlsConfig;
use tokio_util::sync::CancellationToken;

/// How the mock answers translation calls
#[derive(Debug, Clone, Copy)]
pub enum GoogleMode {
    /// Translate every request
    Ok,
    /// Answer 429 to the first `n` requests, then translate
    RateLimitedFor(u32),
    /// Answer 429 to every request
    AlwaysRateLimited,
    /// Answer 500 to every request
    ServerError,
}

pub struct MockGoogle {
    addr: SocketAddr,
    scheme: &'static str,
    shutdown: CancellationToken,
    state: Arc<MockGoogleState>,
}

struct MockGoogleState {
    request_count: AtomicU32,
    mode: GoogleMode,
}

impl MockGoogle {
    pub async fn start(mode: GoogleMode) -> anyhow::Result<Self> {
        let state = MockGoogleState::new(mode);
        let (addr, shutdown) = super::spawn_mock(router(&state)).await?;

        Ok(Self {
            addr,
            scheme: "http",
            shutdown,
            state,
        })
    }

    /// Serve over HTTPS with a freshly generated self-signed certificate
    ///
    /// Clients that verify certificates fail the handshake.
    pub async fn start_self_signed(mode: GoogleMode) -> anyhow::Result<Self> {
        let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

        let rcgen::CertifiedKey { cert, key_pair } =
            rcgen::generate_simple_self_signed(vec!["127.0.0.1".to_owned(), "localhost".to_owned()])?;
        let tls = RustlsConfig::from_pem(cert.pem().into_bytes(), key_pair.serialize_pem().into_bytes()).await?;

        let state = MockGoogleState::new(mode);
        let app = router(&state);
        let handle = axum_server::Handle::new();
        let shutdown = CancellationToken::new();

        tokio::spawn({
            let handle = handle.clone();
            async move {
                axum_server::bind_rustls(SocketAddr::from(([127, 0, 0, 1], 0)), tls)
                    .handle(handle)
                    .serve(app.into_make_service())
                    .await
                    .ok();
            }
        });

        tokio::spawn({
            let handle = handle.clone();
            let shutdown = shutdown.clone();
            async move {
                shutdown.cancelled().await;
                handle.shutdown();
            }
        });

        let addr = handle
            .listening()
            .await
            .ok_or_else(|| anyhow::anyhow!("self-signed mock failed to bind"))?;

        Ok(Self {
            addr,
            scheme: "https",
            shutdown,
            state,
        })
    }

    pub fn base_url(&self) -> String {
        format!("{}://{}/", self.scheme, self.addr)
    }

    /// Number of translation calls received
    pub fn request_count(&self) -> u32 {
        self.state.request_count.load(Ordering::Relaxed)
    }
}

impl MockGoogleState {
    fn new(mode: GoogleMode) -> Arc<Self> {
        Arc::new(Self {
            request_count: AtomicU32::new(0),
            mode,
        })
    }
}

fn router(state: &Arc<MockGoogleState>) -> Router {
    Router::new()
        .route("/translate_a/single", routing::get(handle_single))
        .with_state(Arc::clone(state))
}

impl Drop for MockGoogle {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// Canned translations keyed by (text, target)
fn canned(text: &str, target: &str) -> String {
    match (text, target) {
        ("Hello world", "es") => "Hola mundo".to_owned(),
        ("Hello world", "zh-cn") => "你好世界".to_owned(),
        ("Bonjour", "en") => "Hello".to_owned(),
        _ => format!("{text} ({target})"),
    }
}

fn detected(text: &str) -> &'static str {
    if text.starts_with("Bonjour") { "fr" } else { "en" }
}

async fn handle_single(
    State(state): State<Arc<MockGoogleState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let seen = state.request_count.fetch_add(1, Ordering::Relaxed);

    let throttled = match state.mode {
        GoogleMode::Ok => false,
        GoogleMode::RateLimitedFor(n) => seen < n,
        GoogleMode::AlwaysRateLimited => true,
        GoogleMode::ServerError => {
            return (StatusCode::INTERNAL_SERVER_ERROR, "backend error").into_response();
        }
    };

    if throttled {
        return (StatusCode::TOO_MANY_REQUESTS, "Too Many Requests").into_response();
    }

    let text = params.get("q").map_or("", String::as_str);
    let target = params.get("tl").map_or("en", String::as_str);
    let source = match params.get("sl").map(String::as_str) {
        Some("auto") | None => detected(text),
        Some(code) => code,
    };

    Json(serde_json::json!([
        [[canned(text, target), text, null, null, 10]],
        null,
        source,
        null,
        null,
        null,
        0.97
    ]))
    .into_response()
}
