pub(crate) mod google;

use async_trait::async_trait;

use crate::{
    error::ProviderError,
    types::{Provenance, ProviderDetection, ProviderTranslation},
};

/// Upstream translation provider
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` into `target`; `source` of `None` means auto-detect
    async fn translate(
        &self,
        text: &str,
        target: &str,
        source: Option<&str>,
    ) -> Result<ProviderTranslation, ProviderError>;

    /// Detect the language of `text`
    async fn detect(&self, text: &str) -> Result<ProviderDetection, ProviderError>;

    /// Language codes the provider accepts
    fn supported_languages(&self) -> Vec<String>;

    /// Tag stamped on results this provider produced
    fn provenance(&self) -> Provenance;
}
