//! Background-removal adapter for a rembg-compatible server.
//!
//! POSTs the PNG-encoded image to the server's `/api/remove` endpoint and
//! decodes the returned cut-out. There is no fallback for a failed removal:
//! errors propagate and the variant being processed is dropped upstream.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{header, Client};

use pawtoon_core::BackgroundRemoval;
use pawtoon_imaging::ImageBuffer;

const DEFAULT_ENDPOINT: &str = "http://localhost:7000";

#[derive(Clone)]
pub struct RembgConfig {
    /// Base URL of the rembg server (e.g. `http://localhost:7000`).
    pub endpoint: String,
    pub timeout: Duration,
}

impl RembgConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl Default for RembgConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

pub struct RembgClient {
    config: RembgConfig,
    http_client: Client,
}

impl RembgClient {
    pub fn new(config: RembgConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("failed to build rembg HTTP client")?;
        Ok(Self {
            config,
            http_client,
        })
    }

    fn remove_url(&self) -> String {
        format!("{}/api/remove", self.config.endpoint.trim_end_matches('/'))
    }
}

#[async_trait]
impl BackgroundRemoval for RembgClient {
    async fn remove_background(&self, image: ImageBuffer) -> Result<ImageBuffer> {
        let png = image.to_png()?;

        let res = self
            .http_client
            .post(self.remove_url())
            .header(header::CONTENT_TYPE, "image/png")
            .body(png)
            .send()
            .await
            .context("background removal transport failure")?;

        let status = res.status();
        if !status.is_success() {
            let detail = res.text().await.unwrap_or_default();
            anyhow::bail!("background removal returned {status}: {detail}");
        }

        let bytes = res
            .bytes()
            .await
            .context("failed to read background removal reply")?;
        let cut_out = ImageBuffer::decode(&bytes)
            .context("background removal returned an undecodable image")?;
        Ok(cut_out)
    }
}
