//! Per-variant pipeline: background removal, two resize tiers, two uploads.
//!
//! Each step can fail independently; a failure is fatal for this variant
//! only and is reported as a typed value for the orchestrator to log.

use pawtoon_core::{BackgroundRemoval, ImageHost, VariantError, VariantResult, VariantStage};
use pawtoon_imaging::{scaled_dimensions, ImageBuffer, HIGHRES_LONG_SIDE, PREVIEW_LONG_SIDE};

/// Run one style-transferred image through the full post-processing chain.
pub async fn process_variant(
    ordinal: u8,
    image: ImageBuffer,
    background: &dyn BackgroundRemoval,
    host: &dyn ImageHost,
) -> Result<VariantResult, VariantError> {
    let cut_out = background
        .remove_background(image)
        .await
        .map_err(|e| VariantError::new(ordinal, VariantStage::BackgroundRemoval, e))?;

    // Both tiers resize from the cut-out; deriving one tier from the other
    // would compound interpolation error.
    let (preview_w, preview_h) =
        scaled_dimensions(cut_out.width(), cut_out.height(), PREVIEW_LONG_SIDE);
    let preview = cut_out.resized(preview_w, preview_h);

    let (highres_w, highres_h) =
        scaled_dimensions(cut_out.width(), cut_out.height(), HIGHRES_LONG_SIDE);
    let highres = cut_out.resized(highres_w, highres_h);

    let preview_url = host
        .upload(&preview)
        .await
        .map_err(|e| VariantError::new(ordinal, VariantStage::PreviewUpload, e))?;
    let highres_url = host
        .upload(&highres)
        .await
        .map_err(|e| VariantError::new(ordinal, VariantStage::HighresUpload, e))?;

    Ok(VariantResult {
        variation: ordinal,
        preview_url,
        highres_url,
        preview_size: (preview_w, preview_h).into(),
        highres_size: (highres_w, highres_h).into(),
    })
}
