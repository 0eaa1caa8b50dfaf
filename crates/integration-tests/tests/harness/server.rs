//! Test server wrapper that starts one voxrelay service on a random port

use std::net::SocketAddr;
use std::time::Duration;

use serde_json::Value;
use tokio_util::sync::CancellationToken;
use voxrelay_config::Config;
use voxrelay_server::{Server, Service};

/// A running test server instance
pub struct TestServer {
    addr: SocketAddr,
    shutdown: CancellationToken,
    client: reqwest::Client,
}

impl TestServer {
    /// Start a service and run its capability loaders
    ///
    /// Binds to port 0 for automatic port assignment
    pub async fn start(config: Config, service: Service) -> anyhow::Result<Self> {
        let server = Server::new(&config, service)?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        // Bind the listener here so we know the actual port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        tokio::spawn(async move {
            server.serve_on(listener, shutdown_clone).await.ok();
        });

        Ok(Self {
            addr,
            shutdown,
            client: reqwest::Client::new(),
        })
    }

    /// Start a service whose capability loaders never run
    pub async fn start_unloaded(config: Config, service: Service) -> anyhow::Result<Self> {
        let router = Server::new(&config, service)?.into_router();
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self {
            addr,
            shutdown,
            client: reqwest::Client::new(),
        })
    }

    /// URL of `path` on the running test server
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// Base URL, for pointing another service at this one
    pub fn base_url(&self) -> String {
        format!("http://{}/", self.addr)
    }

    /// Get a reference to the HTTP client
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Poll `/health` until `field` equals `expected`
    ///
    /// Panics after five seconds.
    pub async fn wait_for_health(&self, field: &str, expected: Value) {
        for _ in 0..100 {
            if let Ok(response) = self.client.get(self.url("/health")).send().await
                && let Ok(body) = response.json::<Value>().await
                && body[field] == expected
            {
                return;
            }

            tokio::time::sleep(Duration::from_millis(50)).await;
        }

        panic!("health field `{field}` never became {expected}");
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
