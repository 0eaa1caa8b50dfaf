pub mod openai_tts;

use async_trait::async_trait;

use crate::types::SpeechAudio;

/// Trait for speech-synthesis engines
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Check that the engine can serve requests; called once by the loader
    async fn probe(&self) -> crate::error::Result<()>;

    /// Synthesize `text` with `voice`
    async fn synthesize(&self, text: &str, voice: &str) -> crate::error::Result<SpeechAudio>;

    /// Get the provider name
    fn name(&self) -> &str;
}
