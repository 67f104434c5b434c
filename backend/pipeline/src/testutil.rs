//! Test doubles for the capability seams.
//!
//! Counting fakes let orchestrator tests assert not just the response shape
//! but that no downstream work happens after an early abort.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use image::{DynamicImage, Rgba, RgbaImage};

use crate::ingest::Ingestor;
use pawtoon_core::{BackgroundRemoval, ImageHost, StyleTransfer, StyleVariant};
use pawtoon_imaging::ImageBuffer;

pub(crate) fn test_image(width: u32, height: u32) -> ImageBuffer {
    let img = RgbaImage::from_pixel(width, height, Rgba([200, 160, 40, 255]));
    ImageBuffer::from(DynamicImage::ImageRgba8(img))
}

pub(crate) fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    test_image(width, height).to_png().unwrap()
}

pub(crate) fn test_ingestor() -> Ingestor {
    Ingestor::new(Duration::from_secs(5)).unwrap()
}

/// Scripted style transfer: one reply per variant, matched by prompt since
/// the two calls run concurrently.
pub(crate) struct FakeStyle {
    pub first: Option<ImageBuffer>,
    pub second: Option<ImageBuffer>,
    calls: AtomicUsize,
}

impl FakeStyle {
    pub fn replying(first: Option<ImageBuffer>, second: Option<ImageBuffer>) -> Self {
        Self {
            first,
            second,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StyleTransfer for FakeStyle {
    async fn generate(&self, prompt: &str, _source: &ImageBuffer) -> Option<ImageBuffer> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if prompt == StyleVariant::all()[0].prompt {
            self.first.clone()
        } else {
            self.second.clone()
        }
    }
}

/// Pass-through or always-failing background removal.
pub(crate) struct FakeBackgroundRemoval {
    fail: bool,
    calls: AtomicUsize,
}

impl FakeBackgroundRemoval {
    pub fn passthrough() -> Self {
        Self {
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BackgroundRemoval for FakeBackgroundRemoval {
    async fn remove_background(&self, image: ImageBuffer) -> Result<ImageBuffer> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            anyhow::bail!("segmentation model rejected the image");
        }
        Ok(image)
    }
}

/// Image host that mints URLs embedding the uploaded dimensions, and can be
/// scripted to fail for one specific rendition size.
pub(crate) struct FakeHost {
    fail_for: Option<(u32, u32)>,
    calls: AtomicUsize,
}

impl FakeHost {
    pub fn ok() -> Self {
        Self {
            fail_for: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing_for(dimensions: (u32, u32)) -> Self {
        Self {
            fail_for: Some(dimensions),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageHost for FakeHost {
    async fn upload(&self, image: &ImageBuffer) -> Result<String> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        let dims = (image.width(), image.height());
        if self.fail_for == Some(dims) {
            anyhow::bail!("host returned 503");
        }
        Ok(format!(
            "https://img.test/{}x{}/{n}.png",
            image.width(),
            image.height()
        ))
    }
}
