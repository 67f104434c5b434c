use std::fmt;

use bytes::Bytes;
use serde::{Serialize, Serializer};

/// One of the three accepted ways to supply the source photo.
///
/// Exactly one variant is populated per request; ingestion converts each to
/// a single decoded image.
#[derive(Debug, Clone)]
pub enum SourceInput {
    /// Raw bytes from a multipart upload, with the declared content type.
    UploadedBytes { bytes: Bytes, content_type: String },
    /// Publicly fetchable image URL.
    RemoteUrl(String),
    /// Base64 payload, optionally carrying a `data:...,` prefix.
    Base64Payload(String),
}

/// A generation request: one source image plus pass-through metadata.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub source: SourceInput,
    /// Caller-supplied identifier. Echoed verbatim in the response, never
    /// validated and never used to alter processing.
    pub client_ref: Option<String>,
}

impl GenerationRequest {
    pub fn new(source: SourceInput) -> Self {
        Self {
            source,
            client_ref: None,
        }
    }
}

/// One of the requested stylistic renderings.
///
/// Prompts are server-defined. Accepting caller prompts would hand the
/// generative model to anonymous callers, so there is no override path.
#[derive(Debug, Clone, Copy)]
pub struct StyleVariant {
    pub ordinal: u8,
    pub prompt: &'static str,
}

const PROMPT_CLEAN_CARTOON: &str = "Create a clean Pixar-style cartoon illustration \
of the pet in the uploaded photo. Keep the full body, original pose, markings, \
proportions, and aspect ratio. Use soft shading and vibrant but natural colors. \
Remove the entire background and output a fully transparent PNG with clean edges.";

const PROMPT_GLOSSY_CHARACTER: &str = "Transform the uploaded pet photo into a bright \
Pixar-inspired character. Keep all body parts visible, maintain the pose, markings, \
and original aspect ratio. Use glossy highlights and 3D depth while staying natural. \
Return a transparent PNG with a perfect cut-out.";

impl StyleVariant {
    /// The fixed set of styles requested for every photo.
    pub fn all() -> [StyleVariant; 2] {
        [
            StyleVariant {
                ordinal: 1,
                prompt: PROMPT_CLEAN_CARTOON,
            },
            StyleVariant {
                ordinal: 2,
                prompt: PROMPT_GLOSSY_CHARACTER,
            },
        ]
    }
}

/// Pixel dimensions, serialized as `"WxH"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl From<(u32, u32)> for Dimensions {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl Serialize for Dimensions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// Successful output for one variant: hosted URLs for both tiers.
///
/// A missing entry for an ordinal means that variant failed and was dropped.
#[derive(Debug, Clone, Serialize)]
pub struct VariantResult {
    pub variation: u8,
    pub preview_url: String,
    pub highres_url: String,
    pub preview_size: Dimensions,
    pub highres_size: Dimensions,
}

/// Aggregate response for one generation request.
///
/// `images` is ordered by ordinal and may be shorter than the requested
/// variant count under partial failure; an empty list is never serialized
/// as a success.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_ref: Option<String>,
    pub images: Vec<VariantResult>,
}
