pub(crate) mod whisper;

use std::path::Path;

use async_trait::async_trait;

use crate::types::{Task, Transcript};

/// A speech model that turns an audio file into text
#[async_trait]
pub trait SpeechModel: Send + Sync {
    /// Check that the model can serve requests; called once by the loader
    async fn probe(&self) -> crate::error::Result<()>;

    /// Transcribe the audio file at `audio`
    async fn transcribe(&self, audio: &Path, language: Option<&str>, task: Task) -> crate::error::Result<Transcript>;

    /// Language codes the model understands
    fn supported_languages(&self) -> Vec<String>;

    /// Where inference runs, reported by model-info
    fn device(&self) -> &str;

    /// Get the provider name
    fn name(&self) -> &str;
}
