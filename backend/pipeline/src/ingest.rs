//! Input ingestion: three source forms, one decoded image.
//!
//! Every rejection here is a client-input outcome raised before any
//! external capability is called.

use std::time::Duration;

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::Client;
use tracing::debug;

use pawtoon_core::{GenerateError, SourceInput};
use pawtoon_imaging::{is_image_mime, sniff_image_mime, ImageBuffer};

/// Hard cap on uploaded payloads.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Minimum width and height of a usable source photo.
pub const MIN_DIMENSION: u32 = 100;

/// Normalises a [`SourceInput`] into one validated [`ImageBuffer`].
pub struct Ingestor {
    http_client: Client,
}

impl Ingestor {
    /// `fetch_timeout` bounds the remote-URL fetch, the one ingestion path
    /// that leaves the process.
    pub fn new(fetch_timeout: Duration) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(fetch_timeout)
            .user_agent("Pawtoon/0.1")
            .build()
            .context("failed to build ingestion HTTP client")?;
        Ok(Self { http_client })
    }

    pub async fn ingest(&self, source: SourceInput) -> Result<ImageBuffer, GenerateError> {
        let buffer = match source {
            SourceInput::UploadedBytes {
                bytes,
                content_type,
            } => self.from_upload(&bytes, &content_type)?,
            SourceInput::RemoteUrl(url) => self.from_url(&url).await?,
            SourceInput::Base64Payload(payload) => self.from_base64(&payload)?,
        };

        if buffer.width() < MIN_DIMENSION || buffer.height() < MIN_DIMENSION {
            return Err(GenerateError::InvalidInput(format!(
                "image is {}x{}, minimum is {MIN_DIMENSION}x{MIN_DIMENSION}",
                buffer.width(),
                buffer.height()
            )));
        }
        Ok(buffer)
    }

    fn from_upload(&self, bytes: &[u8], content_type: &str) -> Result<ImageBuffer, GenerateError> {
        if bytes.is_empty() {
            return Err(GenerateError::InvalidInput("uploaded file is empty".into()));
        }
        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(GenerateError::InvalidInput(format!(
                "uploaded file exceeds {MAX_UPLOAD_BYTES} bytes"
            )));
        }
        if !is_image_mime(content_type) {
            return Err(GenerateError::InvalidInput(format!(
                "unsupported content type: {content_type}"
            )));
        }
        debug!(
            declared = content_type,
            sniffed = sniff_image_mime(bytes),
            "Decoding uploaded file"
        );
        decode(bytes)
    }

    async fn from_url(&self, url: &str) -> Result<ImageBuffer, GenerateError> {
        let res = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| GenerateError::InvalidInput(format!("could not fetch image URL: {e}")))?;

        let status = res.status();
        if !status.is_success() {
            return Err(GenerateError::InvalidInput(format!(
                "image URL returned {status}"
            )));
        }
        let bytes = res.bytes().await.map_err(|e| {
            GenerateError::InvalidInput(format!("could not read image URL body: {e}"))
        })?;
        decode(&bytes)
    }

    fn from_base64(&self, payload: &str) -> Result<ImageBuffer, GenerateError> {
        // Strip an optional data-URL prefix ("data:image/png;base64,").
        let raw = match payload.find(',') {
            Some(idx) if payload.starts_with("data:") => &payload[idx + 1..],
            _ => payload,
        };
        let bytes = BASE64
            .decode(raw.trim())
            .map_err(|e| GenerateError::InvalidInput(format!("invalid base64 payload: {e}")))?;
        decode(&bytes)
    }
}

fn decode(bytes: &[u8]) -> Result<ImageBuffer, GenerateError> {
    ImageBuffer::decode(bytes).map_err(|e| GenerateError::InvalidInput(e.to_string()))
}
