#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod cors;
mod limit;
mod root;

use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use axum::{Router, extract::DefaultBodyLimit, routing::get};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use voxrelay_config::{Config, TlsConfig};

pub use limit::PayloadTooLarge;
pub use root::RootResponse;

/// Which voxrelay process to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    /// Speech-to-text plus the translation proxy
    Backend,
    /// Translation with retry and degradation
    Translation,
    /// Speech synthesis and artifact downloads
    Tts,
}

impl Service {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Backend => "backend",
            Self::Translation => "translation",
            Self::Tts => "tts",
        }
    }

    /// Configured bind address for this service
    pub const fn listen_address(self, config: &Config) -> SocketAddr {
        match self {
            Self::Backend => config.backend.listen_address,
            Self::Translation => config.translation.listen_address,
            Self::Tts => config.tts.listen_address,
        }
    }
}

impl std::fmt::Display for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

type Loader = Pin<Box<dyn Future<Output = ()> + Send>>;

/// How long in-flight requests get to finish over TLS once shutdown starts
const TLS_GRACE_PERIOD: Duration = Duration::from_secs(10);

/// Assembled service process with its routes, middleware and capability loaders
pub struct Server {
    service: Service,
    router: Router,
    listen_address: SocketAddr,
    tls: Option<TlsConfig>,
    loaders: Vec<Loader>,
}

impl Server {
    /// Build one service process from configuration
    ///
    /// Capabilities are not loaded here; their loaders start once the
    /// listener is bound.
    pub fn new(config: &Config, service: Service) -> anyhow::Result<Self> {
        let health_path = config.server.health.route();

        let mut loaders: Vec<Loader> = Vec::new();

        let mut app = match service {
            Service::Backend => {
                let stt_state = stt::build_service(config)?;
                let proxy = gateway::build_proxy(config)?;

                let loader_state = Arc::clone(&stt_state);
                loaders.push(Box::pin(async move {
                    loader_state.load_model().await;
                }));

                let mut app = Router::new()
                    .route("/", root::handler(RootResponse::backend(health_path)))
                    .merge(stt::endpoint_router().with_state(Arc::clone(&stt_state)))
                    .merge(gateway::endpoint_router().with_state(proxy));

                if let Some(path) = health_path {
                    app = app.route(path, get(stt::health).with_state(stt_state));
                }

                app
            }
            Service::Translation => {
                let state = translation::build_service(config);

                let loader_state = Arc::clone(&state);
                loaders.push(Box::pin(async move {
                    loader_state.load_translator().await;
                }));

                let mut app = Router::new()
                    .route("/", root::handler(RootResponse::translation(health_path)))
                    .merge(translation::endpoint_router().with_state(Arc::clone(&state)));

                if let Some(path) = health_path {
                    app = app.route(path, get(translation::health).with_state(state));
                }

                app
            }
            Service::Tts => {
                let state = tts::build_service(config)?;

                let loader_state = Arc::clone(&state);
                loaders.push(Box::pin(async move {
                    loader_state.load_engine().await;
                }));

                let mut app = Router::new()
                    .route("/", root::handler(RootResponse::tts(health_path)))
                    .merge(tts::endpoint_router().with_state(Arc::clone(&state)));

                if let Some(path) = health_path {
                    app = app.route(path, get(tts::health).with_state(state));
                }

                app
            }
        };

        // Apply middleware layers (innermost first)
        let max_upload_bytes = config.server.max_upload_bytes;

        app = app.layer(DefaultBodyLimit::max(max_upload_bytes));

        app = app.layer(axum::middleware::from_fn(move |req, next| {
            limit::content_length_guard(max_upload_bytes, req, next)
        }));

        app = app.layer(TraceLayer::new_for_http());

        let cors_config = config.server.cors.clone().unwrap_or_default();
        app = app.layer(cors::cors_layer(&cors_config));

        Ok(Self {
            service,
            router: app,
            listen_address: service.listen_address(config),
            tls: config.server.tls.clone(),
            loaders,
        })
    }

    /// Override the configured listen address
    #[must_use]
    pub fn with_listen_address(mut self, listen_address: SocketAddr) -> Self {
        self.listen_address = listen_address;
        self
    }

    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Capability loaders are dropped, so every capability stays unloaded.
    /// Useful for testing the gate in its initial state.
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Bind the configured address and serve until `shutdown` fires
    ///
    /// Serves HTTPS when TLS is enabled and both PEM files exist. Enabled
    /// TLS with missing files logs a warning and serves plain HTTP.
    pub async fn serve(mut self, shutdown: CancellationToken) -> anyhow::Result<()> {
        let tls = match self.tls.take() {
            Some(tls) if tls.is_usable() => Some(tls),
            Some(tls) if tls.enabled => {
                tracing::warn!(
                    certificate = %tls.certificate.display(),
                    private_key = %tls.private_key.display(),
                    "TLS certificates not found, falling back to HTTP"
                );
                None
            }
            _ => None,
        };

        match tls {
            Some(tls) => self.serve_tls(&tls, shutdown).await,
            None => {
                let listener = TcpListener::bind(self.listen_address).await?;
                self.serve_on(listener, shutdown).await
            }
        }
    }

    /// Serve plain HTTP on an already bound listener until `shutdown` fires
    pub async fn serve_on(self, listener: TcpListener, shutdown: CancellationToken) -> anyhow::Result<()> {
        let local_addr = listener.local_addr()?;
        tracing::info!(service = %self.service, %local_addr, "server listening");

        spawn_loaders(self.loaders);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }

    async fn serve_tls(self, tls: &TlsConfig, shutdown: CancellationToken) -> anyhow::Result<()> {
        let rustls = axum_server::tls_rustls::RustlsConfig::from_pem_file(&tls.certificate, &tls.private_key).await?;

        let handle = axum_server::Handle::new();
        let shutdown_handle = handle.clone();

        tokio::spawn(async move {
            shutdown.cancelled().await;
            tracing::info!("graceful shutdown initiated");
            shutdown_handle.graceful_shutdown(Some(TLS_GRACE_PERIOD));
        });

        tracing::info!(service = %self.service, local_addr = %self.listen_address, "server listening (https)");

        spawn_loaders(self.loaders);

        axum_server::bind_rustls(self.listen_address, rustls)
            .handle(handle)
            .serve(self.router.into_make_service())
            .await?;

        Ok(())
    }
}

/// Start every capability loader in the background
fn spawn_loaders(loaders: Vec<Loader>) {
    for loader in loaders {
        tokio::spawn(loader);
    }
}
