use std::fmt;

use thiserror::Error;

/// Request-level error taxonomy.
///
/// Per-variant failures are not represented here: they are carried as
/// [`VariantError`] values to the orchestrator's collection point and only
/// become a request-level error when every variant has failed.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The caller's input was rejected before any external call was made.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Both style-transfer calls produced no image.
    #[error("image generation failed")]
    Generation,

    /// At least one image was generated but every variant pipeline failed.
    #[error("no variants could be processed")]
    AllVariantsFailed,
}

/// The stage at which a single variant's pipeline failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantStage {
    BackgroundRemoval,
    PreviewUpload,
    HighresUpload,
}

impl fmt::Display for VariantStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VariantStage::BackgroundRemoval => "background_removal",
            VariantStage::PreviewUpload => "preview_upload",
            VariantStage::HighresUpload => "highres_upload",
        };
        f.write_str(name)
    }
}

/// Failure of one variant's pipeline.
///
/// Logged once where results are collected; never surfaced to the caller
/// except as an omission from the result list.
#[derive(Debug, Error)]
#[error("variant {ordinal} failed at {stage}: {source}")]
pub struct VariantError {
    pub ordinal: u8,
    pub stage: VariantStage,
    #[source]
    pub source: anyhow::Error,
}

impl VariantError {
    pub fn new(ordinal: u8, stage: VariantStage, source: anyhow::Error) -> Self {
        Self {
            ordinal,
            stage,
            source,
        }
    }
}
