//! Generation orchestrator.
//!
//! Top-level flow for one request: ingest and validate, request both style
//! variants, apply the one-absent fallback policy, run the per-variant
//! pipelines, and assemble the aggregate response.

use std::sync::Arc;

use tracing::{info, warn};

use crate::ingest::Ingestor;
use crate::variant::process_variant;
use pawtoon_core::{
    BackgroundRemoval, GenerateError, GenerationRequest, GenerationResponse, ImageHost,
    StyleTransfer, StyleVariant, VariantResult,
};
use pawtoon_imaging::ImageBuffer;

/// Orchestrates one generation request end to end.
///
/// All three external capabilities are injected, so tests drive the full
/// flow with fakes and production wires in the real clients.
pub struct Generator {
    style: Arc<dyn StyleTransfer>,
    background: Arc<dyn BackgroundRemoval>,
    host: Arc<dyn ImageHost>,
    ingestor: Ingestor,
}

impl Generator {
    pub fn new(
        style: Arc<dyn StyleTransfer>,
        background: Arc<dyn BackgroundRemoval>,
        host: Arc<dyn ImageHost>,
        ingestor: Ingestor,
    ) -> Self {
        Self {
            style,
            background,
            host,
            ingestor,
        }
    }

    pub async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, GenerateError> {
        let source = self.ingestor.ingest(request.source).await?;
        info!(
            width = source.width(),
            height = source.height(),
            "Source image ingested"
        );

        let [first, second] = StyleVariant::all();
        let (image1, image2) = tokio::join!(
            self.style.generate(first.prompt, &source),
            self.style.generate(second.prompt, &source),
        );

        let (image1, image2) = match (image1, image2) {
            // Abort before any downstream work happens.
            (None, None) => return Err(GenerateError::Generation),
            (Some(a), Some(b)) => (a, b),
            // Fallback policy: the failed ordinal's slot is filled with a
            // copy of the surviving image, so both renditions still run.
            (Some(a), None) => {
                warn!(
                    ordinal = second.ordinal,
                    "Style transfer produced no image; reusing the surviving variant"
                );
                (a.clone(), a)
            }
            (None, Some(b)) => {
                warn!(
                    ordinal = first.ordinal,
                    "Style transfer produced no image; reusing the surviving variant"
                );
                (b.clone(), b)
            }
        };

        let images = self.run_pipelines(first.ordinal, image1, second.ordinal, image2).await;
        if images.is_empty() {
            return Err(GenerateError::AllVariantsFailed);
        }

        Ok(GenerationResponse {
            success: true,
            client_ref: request.client_ref,
            images,
        })
    }

    /// Run both variant pipelines concurrently and collect the survivors in
    /// ordinal order, logging each dropped variant exactly once.
    async fn run_pipelines(
        &self,
        ordinal1: u8,
        image1: ImageBuffer,
        ordinal2: u8,
        image2: ImageBuffer,
    ) -> Vec<VariantResult> {
        let (outcome1, outcome2) = tokio::join!(
            process_variant(ordinal1, image1, self.background.as_ref(), self.host.as_ref()),
            process_variant(ordinal2, image2, self.background.as_ref(), self.host.as_ref()),
        );

        let mut images = Vec::with_capacity(2);
        for outcome in [outcome1, outcome2] {
            match outcome {
                Ok(result) => images.push(result),
                Err(err) => warn!(
                    ordinal = err.ordinal,
                    stage = %err.stage,
                    error = %err.source,
                    "Variant dropped"
                ),
            }
        }
        images
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{
        png_bytes, test_image, test_ingestor, FakeBackgroundRemoval, FakeHost, FakeStyle,
    };
    use bytes::Bytes;
    use pawtoon_core::SourceInput;

    fn request(width: u32, height: u32) -> GenerationRequest {
        GenerationRequest::new(SourceInput::UploadedBytes {
            bytes: Bytes::from(png_bytes(width, height)),
            content_type: "image/png".into(),
        })
    }

    fn generator(
        style: Arc<FakeStyle>,
        background: Arc<FakeBackgroundRemoval>,
        host: Arc<FakeHost>,
    ) -> Generator {
        Generator::new(style, background, host, test_ingestor())
    }

    #[tokio::test]
    async fn full_success_produces_two_variants() {
        let style = Arc::new(FakeStyle::replying(
            Some(test_image(400, 600)),
            Some(test_image(400, 600)),
        ));
        let background = Arc::new(FakeBackgroundRemoval::passthrough());
        let host = Arc::new(FakeHost::ok());

        let mut req = request(400, 600);
        req.client_ref = Some("order-77".into());

        let response = generator(style.clone(), background.clone(), host.clone())
            .generate(req)
            .await
            .unwrap();

        assert!(response.success);
        assert_eq!(response.client_ref.as_deref(), Some("order-77"));
        assert_eq!(response.images.len(), 2);
        assert_eq!(response.images[0].variation, 1);
        assert_eq!(response.images[1].variation, 2);
        for image in &response.images {
            // 400x600 preserves the 2:3 ratio at both tiers.
            assert_eq!(image.preview_size.height, 768);
            assert_eq!(image.preview_size.width, 512);
            assert_eq!(image.highres_size.height, 2400);
            assert_eq!(image.highres_size.width, 1600);
        }
        assert_eq!(style.calls(), 2);
        assert_eq!(background.calls(), 2);
        // 2 variants x 2 tiers
        assert_eq!(host.calls(), 4);
    }

    #[tokio::test]
    async fn one_absent_variant_is_backfilled() {
        let style = Arc::new(FakeStyle::replying(Some(test_image(400, 600)), None));
        let background = Arc::new(FakeBackgroundRemoval::passthrough());
        let host = Arc::new(FakeHost::ok());

        let response = generator(style, background.clone(), host.clone())
            .generate(request(400, 600))
            .await
            .unwrap();

        // Duplicate policy: the failed slot reuses the surviving image, so
        // the response still carries both ordinals.
        assert_eq!(response.images.len(), 2);
        assert_eq!(response.images[0].variation, 1);
        assert_eq!(response.images[1].variation, 2);
        assert_eq!(background.calls(), 2);
        assert_eq!(host.calls(), 4);
    }

    #[tokio::test]
    async fn both_absent_aborts_before_downstream_work() {
        let style = Arc::new(FakeStyle::replying(None, None));
        let background = Arc::new(FakeBackgroundRemoval::passthrough());
        let host = Arc::new(FakeHost::ok());

        let err = generator(style.clone(), background.clone(), host.clone())
            .generate(request(400, 600))
            .await
            .unwrap_err();

        assert!(matches!(err, GenerateError::Generation));
        assert_eq!(style.calls(), 2);
        assert_eq!(background.calls(), 0);
        assert_eq!(host.calls(), 0);
    }

    #[tokio::test]
    async fn upload_failure_drops_only_that_variant() {
        // Variant 1 renders 400x600 (highres 1600x2400), variant 2 renders
        // 600x400 (highres 2400x1600); fail exactly variant 1's highres.
        let style = Arc::new(FakeStyle::replying(
            Some(test_image(400, 600)),
            Some(test_image(600, 400)),
        ));
        let background = Arc::new(FakeBackgroundRemoval::passthrough());
        let host = Arc::new(FakeHost::failing_for((1600, 2400)));

        let response = generator(style, background, host)
            .generate(request(400, 600))
            .await
            .unwrap();

        assert!(response.success);
        assert_eq!(response.images.len(), 1);
        assert_eq!(response.images[0].variation, 2);
    }

    #[tokio::test]
    async fn removal_failure_for_all_variants_is_total_failure() {
        let style = Arc::new(FakeStyle::replying(
            Some(test_image(400, 600)),
            Some(test_image(400, 600)),
        ));
        let background = Arc::new(FakeBackgroundRemoval::failing());
        let host = Arc::new(FakeHost::ok());

        let err = generator(style, background, host.clone())
            .generate(request(400, 600))
            .await
            .unwrap_err();

        assert!(matches!(err, GenerateError::AllVariantsFailed));
        assert_eq!(host.calls(), 0);
    }

    #[tokio::test]
    async fn invalid_input_aborts_before_any_external_call() {
        let style = Arc::new(FakeStyle::replying(None, None));
        let background = Arc::new(FakeBackgroundRemoval::passthrough());
        let host = Arc::new(FakeHost::ok());

        let req = GenerationRequest::new(SourceInput::UploadedBytes {
            bytes: Bytes::new(),
            content_type: "image/png".into(),
        });
        let err = generator(style.clone(), background.clone(), host.clone())
            .generate(req)
            .await
            .unwrap_err();

        assert!(matches!(err, GenerateError::InvalidInput(_)));
        assert_eq!(style.calls(), 0);
        assert_eq!(background.calls(), 0);
        assert_eq!(host.calls(), 0);
    }
}
