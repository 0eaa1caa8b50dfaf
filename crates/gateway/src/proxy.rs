use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde_json::Value;
use voxrelay_config::BackendConfig;

use crate::error::GatewayError;

/// Single-hop relay from the backend to the translation service
///
/// Never retries; the translation service applies its own retry policy.
pub struct TranslationProxy {
    client: Client,
    base_url: String,
    translate_timeout: Duration,
    languages_timeout: Duration,
    detect_timeout: Duration,
}

impl TranslationProxy {
    pub fn new(config: &BackendConfig) -> reqwest::Result<Self> {
        let client = Client::builder()
            .pool_idle_timeout(Some(Duration::from_secs(5)))
            .tcp_nodelay(true)
            .build()?;

        Ok(Self {
            client,
            base_url: config.translation_url.as_str().trim_end_matches('/').to_owned(),
            translate_timeout: config.translate_timeout,
            languages_timeout: config.languages_timeout,
            detect_timeout: config.detect_timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    /// Relay `POST /translate`
    pub async fn translate(&self, body: &Value) -> crate::Result<Value> {
        self.forward_json("translate", body, self.translate_timeout).await
    }

    /// Relay `POST /detect`
    pub async fn detect(&self, body: &Value) -> crate::Result<Value> {
        self.forward_json("detect", body, self.detect_timeout).await
    }

    /// Relay `GET /languages`
    pub async fn languages(&self) -> crate::Result<Value> {
        let url = self.endpoint("languages");
        let request = self.client.get(url).timeout(self.languages_timeout);
        Self::send(request).await
    }

    async fn forward_json(&self, path: &str, body: &Value, timeout: Duration) -> crate::Result<Value> {
        let url = self.endpoint(path);
        let request = self.client.post(url).json(body).timeout(timeout);
        Self::send(request).await
    }

    async fn send(request: reqwest::RequestBuilder) -> crate::Result<Value> {
        let response = request.send().await.map_err(|e| {
            tracing::error!("Failed to connect to translation service: {e}");
            GatewayError::UpstreamUnavailable(e.to_string())
        })?;

        let status = response.status();

        if status != StatusCode::OK {
            tracing::error!("Translation service error: {status}");
            return Err(GatewayError::Upstream {
                status: status.as_u16(),
            });
        }

        response.json().await.map_err(|e| {
            tracing::error!("Unreadable translation service response: {e}");
            GatewayError::UpstreamUnavailable(e.to_string())
        })
    }
}
