use std::sync::Arc;

use voxrelay_config::TranslationProviderType;
use voxrelay_core::{
    Availability, Capability, CapabilityKind, CapabilityState,
    language::{self, display_name, normalize},
};

use crate::{
    error::{ProviderError, TranslationError},
    fallback,
    provider::{Translator, google::GoogleTranslator},
    retry::RetryPolicy,
    types::{DetectionResult, TranslationResult},
};

/// Translation service state shared by every request
///
/// Owns the translator capability and the retry policy applied to
/// every provider call on the translate path.
pub struct TranslationService {
    translator: Capability<dyn Translator>,
    candidate: Result<Arc<dyn Translator>, String>,
    retry: RetryPolicy<ProviderError>,
}

impl TranslationService {
    /// Create a service around a translator that has not been published yet
    pub fn new(
        provider_name: impl Into<String>,
        candidate: Result<Arc<dyn Translator>, String>,
        retry: RetryPolicy<ProviderError>,
    ) -> Self {
        Self {
            translator: Capability::new(CapabilityKind::Translation, provider_name),
            candidate,
            retry,
        }
    }

    /// Run the capability loader
    pub async fn load_translator(&self) -> CapabilityState {
        let candidate = self.candidate.clone();
        self.translator.load(|| async move { candidate }).await
    }

    pub fn translator(&self) -> &Capability<dyn Translator> {
        &self.translator
    }

    /// Translate with retries on throttling and fallback on TLS failure
    ///
    /// Fails with `ServiceNotLoaded` before touching the input when the
    /// translator is not ready.
    pub async fn translate(
        &self,
        text: &str,
        target_language: &str,
        source_language: Option<&str>,
    ) -> crate::Result<TranslationResult> {
        let Availability::Ready(translator) = self.translator.check_ready() else {
            return Err(TranslationError::ServiceNotLoaded);
        };

        if text.trim().is_empty() {
            return Err(TranslationError::InvalidInput(
                "No text provided for translation".to_owned(),
            ));
        }

        if target_language.trim().is_empty() {
            return Err(TranslationError::InvalidInput("Target language not specified".to_owned()));
        }

        let target = normalize(target_language);
        let source = source_language.map(normalize).filter(|code| !code.is_empty());

        tracing::info!(
            target_language = %target,
            source_language = source.as_deref().unwrap_or("auto-detect"),
            "Translating text"
        );

        let outcome = self
            .retry
            .execute(|_| translator.translate(text, &target, source.as_deref()))
            .await;

        match outcome {
            Ok(translation) => {
                tracing::info!(
                    "Translation completed successfully. {} -> {target}",
                    translation.source_language
                );

                Ok(TranslationResult {
                    original_text: text.to_owned(),
                    translated_text: translation.text,
                    source_language_name: display_name(&translation.source_language),
                    source_language: translation.source_language,
                    target_language_name: display_name(&target),
                    target_language: target,
                    confidence: translation.confidence,
                    provenance: translator.provenance(),
                })
            }
            Err(error) if error.is_certificate_failure() => {
                tracing::warn!(error = %error, "Certificate failure talking to the provider, using fallback translation");
                Ok(fallback::translate(text, &target, source.as_deref()))
            }
            Err(error) => {
                tracing::error!(error = %error, "Translation failed");
                Err(TranslationError::TranslationFailed(error.to_string()))
            }
        }
    }

    /// Detect the language of `text`
    pub async fn detect(&self, text: &str) -> crate::Result<DetectionResult> {
        let Availability::Ready(translator) = self.translator.check_ready() else {
            return Err(TranslationError::ServiceNotLoaded);
        };

        if text.trim().is_empty() {
            return Err(TranslationError::InvalidInput(
                "No text provided for language detection".to_owned(),
            ));
        }

        tracing::info!("Detecting language of provided text");

        let detection = translator.detect(text).await.map_err(|e| {
            tracing::error!(error = %e, "Language detection failed");
            TranslationError::DetectionFailed(e.to_string())
        })?;

        tracing::info!(language = %detection.language, confidence = ?detection.confidence, "Language detected");

        Ok(DetectionResult {
            language_name: display_name(&detection.language),
            language: detection.language,
            confidence: detection.confidence,
        })
    }

    /// Supported language codes; always non-empty
    pub fn supported_languages(&self) -> Vec<String> {
        let languages = match self.translator.check_ready() {
            Availability::Ready(translator) => translator.supported_languages(),
            Availability::Loading | Availability::Unavailable { .. } => language::named_languages(),
        };

        if languages.is_empty() {
            language::to_owned_list(language::TRANSLATION_FALLBACK)
        } else {
            languages
        }
    }
}

/// Builder for constructing the translation service from configuration
pub struct TranslationServiceBuilder<'a> {
    config: &'a voxrelay_config::Config,
}

impl<'a> TranslationServiceBuilder<'a> {
    pub const fn new(config: &'a voxrelay_config::Config) -> Self {
        Self { config }
    }

    pub fn build(self) -> TranslationService {
        let translation = &self.config.translation;
        let provider = &translation.provider;

        let (name, candidate): (&str, Result<Arc<dyn Translator>, String>) = match provider.provider_type {
            TranslationProviderType::Google => (
                "google",
                GoogleTranslator::new(provider).map(|t| Arc::new(t) as Arc<dyn Translator>),
            ),
        };

        tracing::debug!(
            provider = name,
            max_attempts = translation.retry.max_attempts,
            "Translation service initialized"
        );

        TranslationService::new(
            name,
            candidate,
            RetryPolicy::from_config(&translation.retry, ProviderError::is_rate_limited),
        )
    }
}
