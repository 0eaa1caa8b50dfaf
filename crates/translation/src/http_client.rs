use std::time::Duration;

use axum::http;
use reqwest::Client;
use voxrelay_config::TransportConfig;

/// HTTP client for the translation provider
///
/// Certificate relaxation, when configured, applies to this client only.
pub(crate) fn http_client(timeout: Duration, transport: TransportConfig) -> reqwest::Result<Client> {
    let mut headers = http::HeaderMap::new();
    headers.insert(http::header::CONNECTION, http::HeaderValue::from_static("keep-alive"));

    if transport.accept_invalid_certs {
        tracing::warn!("Certificate verification disabled for the translation provider client");
    }

    Client::builder()
        .timeout(timeout)
        .pool_idle_timeout(Some(Duration::from_secs(5)))
        .tcp_nodelay(true)
        .tcp_keepalive(Some(Duration::from_secs(60)))
        .default_headers(headers)
        .danger_accept_invalid_certs(transport.accept_invalid_certs)
        .build()
}
