//! In-memory image buffers.
//!
//! Every pipeline stage consumes one `ImageBuffer` and produces a new one;
//! a buffer is never mutated in place once it has been handed on.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat};
use thiserror::Error;

/// Errors from decoding or encoding raster data.
#[derive(Debug, Error)]
pub enum ImagingError {
    #[error("failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("failed to encode image: {0}")]
    Encode(#[source] image::ImageError),
}

/// A decoded raster image flowing through the pipeline.
#[derive(Debug, Clone)]
pub struct ImageBuffer {
    image: DynamicImage,
}

impl ImageBuffer {
    /// Decode from any supported container format (JPEG, PNG, WebP, ...).
    pub fn decode(bytes: &[u8]) -> Result<Self, ImagingError> {
        let image = image::load_from_memory(bytes).map_err(ImagingError::Decode)?;
        Ok(Self { image })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Whether the pixels carry an alpha channel (true for cut-outs).
    pub fn has_alpha(&self) -> bool {
        self.image.color().has_alpha()
    }

    /// Produce a resized copy at exactly `width` x `height`.
    ///
    /// Callers compute the dimensions with [`crate::resize::scaled_dimensions`];
    /// this method does no aspect-ratio bookkeeping of its own.
    pub fn resized(&self, width: u32, height: u32) -> Self {
        let image = self
            .image
            .resize_exact(width, height, image::imageops::FilterType::CatmullRom);
        Self { image }
    }

    /// Serialize to lossless PNG bytes for upload or onward transfer.
    pub fn to_png(&self) -> Result<Vec<u8>, ImagingError> {
        let mut out = Cursor::new(Vec::new());
        self.image
            .write_to(&mut out, ImageFormat::Png)
            .map_err(ImagingError::Encode)?;
        Ok(out.into_inner())
    }
}

impl From<DynamicImage> for ImageBuffer {
    fn from(image: DynamicImage) -> Self {
        Self { image }
    }
}
