use anyhow::Result;
use async_trait::async_trait;

use pawtoon_imaging::ImageBuffer;

/// External generative model: renders a stylized image from a prompt and a
/// source photo.
#[async_trait]
pub trait StyleTransfer: Send + Sync {
    /// Returns `None` both when the model's reply carries no image payload
    /// and when the call itself fails. Absence is a normal outcome handled
    /// by the orchestrator's fallback policy, so a single variant's failure
    /// never aborts the whole request.
    async fn generate(&self, prompt: &str, source: &ImageBuffer) -> Option<ImageBuffer>;
}

/// External foreground extraction: returns the subject on a transparent
/// background.
#[async_trait]
pub trait BackgroundRemoval: Send + Sync {
    /// There is no defined fallback for a corrupted or unsupported image,
    /// so failures propagate and are fatal for the variant being processed.
    async fn remove_background(&self, image: ImageBuffer) -> Result<ImageBuffer>;
}

/// External image store: accepts image bytes, returns a durable public URL.
#[async_trait]
pub trait ImageHost: Send + Sync {
    async fn upload(&self, image: &ImageBuffer) -> Result<String>;
}
