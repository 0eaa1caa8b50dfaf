use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use voxrelay_config::TranslationProviderConfig;
use voxrelay_core::language::{TRANSLATION_LANGUAGES, to_owned_list};

use crate::{
    error::ProviderError,
    http_client::http_client,
    types::{Provenance, ProviderDetection, ProviderTranslation},
};

use super::Translator;

/// Google's public web translation endpoint (`client=gtx`)
pub(crate) struct GoogleTranslator {
    client: Client,
    endpoint: String,
}

impl GoogleTranslator {
    pub fn new(config: &TranslationProviderConfig) -> Result<Self, String> {
        let client = http_client(config.timeout, config.transport)
            .map_err(|e| format!("failed to build translation client: {e}"))?;

        let endpoint = format!("{}/translate_a/single", config.base_url.as_str().trim_end_matches('/'));

        Ok(Self { client, endpoint })
    }

    async fn call(&self, text: &str, target: &str, source: &str) -> Result<Value, ProviderError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", source),
                ("tl", target),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| {
                let error = ProviderError::from_transport(&e);
                tracing::error!(provider = "google", "Translation request failed: {error}");
                error
            })?;

        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimited);
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());

            tracing::error!(provider = "google", "Translation API error ({status}): {message}");

            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))
    }
}

/// Translated text is the concatenation of `body[0][*][0]`
fn parse_translation(body: &Value) -> Result<ProviderTranslation, ProviderError> {
    let sentences = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| ProviderError::Malformed("missing sentence list".to_owned()))?;

    let text: String = sentences
        .iter()
        .filter_map(|sentence| sentence.get(0).and_then(Value::as_str))
        .collect();

    if text.trim().is_empty() {
        return Err(ProviderError::Malformed("empty translation".to_owned()));
    }

    let source_language = body
        .get(2)
        .and_then(Value::as_str)
        .ok_or_else(|| ProviderError::Malformed("missing source language".to_owned()))?
        .to_lowercase();

    Ok(ProviderTranslation {
        text,
        source_language,
        confidence: body.get(6).and_then(Value::as_f64),
    })
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(
        &self,
        text: &str,
        target: &str,
        source: Option<&str>,
    ) -> Result<ProviderTranslation, ProviderError> {
        let body = self.call(text, target, source.unwrap_or("auto")).await?;
        parse_translation(&body)
    }

    async fn detect(&self, text: &str) -> Result<ProviderDetection, ProviderError> {
        let body = self.call(text, "en", "auto").await?;
        let translation = parse_translation(&body)?;

        Ok(ProviderDetection {
            language: translation.source_language,
            confidence: translation.confidence,
        })
    }

    fn supported_languages(&self) -> Vec<String> {
        to_owned_list(TRANSLATION_LANGUAGES)
    }

    fn provenance(&self) -> Provenance {
        Provenance::GoogleTranslate
    }
}
