//! Image-host adapter for the imgBB upload API.
//!
//! Serializes the buffer to lossless PNG, submits it as a base64 form field
//! under a globally-unique name, and returns the hosted URL. Transport
//! errors and service-reported rejections both fail loudly.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::Client;
use serde::Deserialize;
use uuid::Uuid;

use pawtoon_core::ImageHost;
use pawtoon_imaging::ImageBuffer;
use pawtoon_logging::redact_sensitive_data;

const DEFAULT_UPLOAD_URL: &str = "https://api.imgbb.com/1/upload";

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct ImgbbConfig {
    pub api_key: String,
    pub upload_url: String,
    pub timeout: Duration,
}

impl ImgbbConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            upload_url: DEFAULT_UPLOAD_URL.into(),
            timeout: Duration::from_secs(30),
        }
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct UploadResponse {
    #[serde(default)]
    success: bool,
    data: Option<UploadData>,
    error: Option<UploadError>,
}

#[derive(Deserialize)]
struct UploadData {
    url: String,
}

#[derive(Deserialize)]
struct UploadError {
    message: Option<String>,
}

fn hosted_url(response: UploadResponse) -> Result<String> {
    if response.success {
        if let Some(data) = response.data {
            return Ok(data.url);
        }
    }
    let detail = response
        .error
        .and_then(|e| e.message)
        .unwrap_or_else(|| "no error detail".into());
    anyhow::bail!("image host rejected upload: {detail}")
}

/// Globally-unique name for one uploaded rendition.
fn upload_name() -> String {
    format!("generated_{}", Uuid::new_v4())
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

pub struct ImgbbClient {
    config: ImgbbConfig,
    http_client: Client,
}

impl ImgbbClient {
    pub fn new(config: ImgbbConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("failed to build imgBB HTTP client")?;
        Ok(Self {
            config,
            http_client,
        })
    }
}

#[async_trait]
impl ImageHost for ImgbbClient {
    async fn upload(&self, image: &ImageBuffer) -> Result<String> {
        let png = image.to_png()?;
        let encoded = BASE64.encode(&png);
        let name = upload_name();

        let form = [
            ("key", self.config.api_key.as_str()),
            ("image", encoded.as_str()),
            ("name", name.as_str()),
        ];
        let res = self
            .http_client
            .post(&self.config.upload_url)
            .form(&form)
            .send()
            .await
            .context("image host transport failure")?;

        let status = res.status();
        if !status.is_success() {
            let detail = res.text().await.unwrap_or_default();
            anyhow::bail!(
                "image host returned {}: {}",
                status,
                redact_sensitive_data(&detail)
            );
        }

        let parsed: UploadResponse = res
            .json()
            .await
            .context("image host returned malformed JSON")?;
        hosted_url(parsed)
    }
}
