use async_trait::async_trait;
use market::{DexPool, Signal};

use crate::gemini::errors::AiError;
use crate::gemini::types::{AspectRatio, ImageRef, PostDraft};

/// Remote text/image generation used by the desks.
///
/// Every operation may take arbitrary time and fails with
/// [`AiError::NotConfigured`] when no credential is present.
#[async_trait]
pub trait GenerativeApi: Send + Sync {
    async fn summarize_signals(&self, signals: &[Signal]) -> Result<String, AiError>;

    /// `deep_mode` selects the long-form prompt and drops the fast-inference hint.
    async fn summarize_pools(&self, pools: &[DexPool], deep_mode: bool) -> Result<String, AiError>;

    async fn generate_post(&self) -> Result<PostDraft, AiError>;

    async fn generate_image(
        &self,
        prompt: &str,
        aspect_ratio: AspectRatio,
    ) -> Result<ImageRef, AiError>;
}
