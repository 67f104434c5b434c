//! Gemini style-transfer adapter.
//!
//! Calls `models/{model}:generateContent` with a text part plus an inline
//! PNG part and extracts the first inline image payload from the reply.
//! "No image in the reply" is a normal outcome, not an error; transport and
//! service failures are logged here and reported the same way, so one
//! variant's failure never aborts the whole request.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::warn;

use pawtoon_core::StyleTransfer;
use pawtoon_imaging::ImageBuffer;
use pawtoon_logging::redact_sensitive_data;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.5-flash-image";

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.into(),
            base_url: DEFAULT_BASE_URL.into(),
            timeout: Duration::from_secs(30),
        }
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

/// An inline binary payload: base64 data plus its MIME type.
///
/// The API emits camelCase field names; snake_case is accepted on requests,
/// so one struct serves both directions.
#[derive(Debug, Serialize, Deserialize)]
struct InlineData {
    #[serde(rename = "mimeType", alias = "mime_type")]
    mime_type: String,
    data: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default, rename = "inlineData", alias = "inline_data")]
    inline_data: Option<InlineData>,
}

/// The first inline image payload in the reply, if any.
///
/// Replies can interleave text and image parts; only the image matters here.
fn first_inline_image(response: &GenerateContentResponse) -> Option<&InlineData> {
    response
        .candidates
        .iter()
        .filter_map(|c| c.content.as_ref())
        .flat_map(|c| c.parts.iter())
        .find_map(|p| p.inline_data.as_ref())
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

pub struct GeminiClient {
    config: GeminiConfig,
    http_client: Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("failed to build Gemini HTTP client")?;
        Ok(Self {
            config,
            http_client,
        })
    }

    async fn request_image(&self, prompt: &str, source: &ImageBuffer) -> Result<Option<ImageBuffer>> {
        let png = source.to_png()?;
        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![
                    RequestPart {
                        text: Some(prompt),
                        inline_data: None,
                    },
                    RequestPart {
                        text: None,
                        inline_data: Some(InlineData {
                            mime_type: "image/png".into(),
                            data: BASE64.encode(&png),
                        }),
                    },
                ],
            }],
        };

        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        );
        let res = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .context("generateContent transport failure")?;

        let status = res.status();
        if !status.is_success() {
            let detail = res.text().await.unwrap_or_default();
            anyhow::bail!(
                "generateContent returned {}: {}",
                status,
                redact_sensitive_data(&detail)
            );
        }

        let parsed: GenerateContentResponse = res
            .json()
            .await
            .context("generateContent returned malformed JSON")?;
        let Some(inline) = first_inline_image(&parsed) else {
            return Ok(None);
        };

        let bytes = BASE64
            .decode(&inline.data)
            .context("inline image payload is not valid base64")?;
        let image = ImageBuffer::decode(&bytes)
            .with_context(|| format!("undecodable {} payload", inline.mime_type))?;
        Ok(Some(image))
    }
}

#[async_trait]
impl StyleTransfer for GeminiClient {
    async fn generate(&self, prompt: &str, source: &ImageBuffer) -> Option<ImageBuffer> {
        match self.request_image(prompt, source).await {
            Ok(Some(image)) => Some(image),
            Ok(None) => {
                warn!(model = %self.config.model, "Style transfer reply carried no image payload");
                None
            }
            Err(err) => {
                warn!(
                    model = %self.config.model,
                    error = %redact_sensitive_data(&format!("{err:#}")),
                    "Style transfer call failed"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_first_inline_image() {
        let raw = r#"{
            "candidates": [{
                "content": {
                    "parts": [
                        {"text": "here is your cartoon"},
                        {"inlineData": {"mimeType": "image/png", "data": "aGVsbG8="}}
                    ]
                }
            }]
        }"#;
        let parsed: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        let inline = first_inline_image(&parsed).unwrap();
        assert_eq!(inline.mime_type, "image/png");
        assert_eq!(inline.data, "aGVsbG8=");
    }

    #[test]
    fn accepts_snake_case_fields() {
        let raw = r#"{
            "candidates": [{
                "content": {
                    "parts": [{"inline_data": {"mime_type": "image/jpeg", "data": "eA=="}}]
                }
            }]
        }"#;
        let parsed: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(first_inline_image(&parsed).unwrap().mime_type, "image/jpeg");
    }

    #[test]
    fn text_only_reply_is_absent() {
        let raw = r#"{
            "candidates": [{
                "content": {"parts": [{"text": "I cannot draw that"}]}
            }]
        }"#;
        let parsed: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert!(first_inline_image(&parsed).is_none());
    }

    #[test]
    fn empty_reply_is_absent() {
        let parsed: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(first_inline_image(&parsed).is_none());
    }

    #[test]
    fn request_body_serializes_both_parts() {
        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![
                    RequestPart {
                        text: Some("cartoonify"),
                        inline_data: None,
                    },
                    RequestPart {
                        text: None,
                        inline_data: Some(InlineData {
                            mime_type: "image/png".into(),
                            data: "cGl4ZWxz".into(),
                        }),
                    },
                ],
            }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "cartoonify");
        assert_eq!(
            json["contents"][0]["parts"][1]["inline_data"]["mimeType"],
            "image/png"
        );
    }
}
