//! Generation API routes.
//!
//! Three ingestion forms funnel into the same orchestrator: a multipart
//! file upload, a remote URL, and a base64 payload. An optional
//! `client_ref` field is echoed verbatim in the response and never
//! interpreted.

use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use bytes::Bytes;
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use crate::server::GatewayState;
use pawtoon_core::{GenerateError, GenerationRequest, GenerationResponse, SourceInput};

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

/// JSON body for `POST /api/generate/url`.
#[derive(Deserialize)]
pub struct UrlRequest {
    pub url: String,
    #[serde(default)]
    pub client_ref: Option<String>,
}

/// JSON body for `POST /api/generate/base64`.
#[derive(Deserialize)]
pub struct Base64Request {
    pub image: String,
    #[serde(default)]
    pub client_ref: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Handler for `POST /api/generate` — multipart form with a `file` field.
pub async fn generate_upload(
    State(state): State<GatewayState>,
    mut multipart: Multipart,
) -> Result<Json<GenerationResponse>, ApiError> {
    let mut file: Option<(Bytes, String)> = None;
    let mut client_ref: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await.map_err(bad_multipart)?;
                file = Some((bytes, content_type));
            }
            Some("client_ref") => {
                client_ref = Some(field.text().await.map_err(bad_multipart)?);
            }
            // Unknown fields are ignored.
            _ => {}
        }
    }

    let Some((bytes, content_type)) = file else {
        return Err(ApiError(GenerateError::InvalidInput(
            "missing `file` field".into(),
        )));
    };

    let mut request = GenerationRequest::new(SourceInput::UploadedBytes {
        bytes,
        content_type,
    });
    request.client_ref = client_ref;
    run(state, request).await
}

/// Handler for `POST /api/generate/url`.
pub async fn generate_from_url(
    State(state): State<GatewayState>,
    Json(body): Json<UrlRequest>,
) -> Result<Json<GenerationResponse>, ApiError> {
    let mut request = GenerationRequest::new(SourceInput::RemoteUrl(body.url));
    request.client_ref = body.client_ref;
    run(state, request).await
}

/// Handler for `POST /api/generate/base64`.
pub async fn generate_from_base64(
    State(state): State<GatewayState>,
    Json(body): Json<Base64Request>,
) -> Result<Json<GenerationResponse>, ApiError> {
    let mut request = GenerationRequest::new(SourceInput::Base64Payload(body.image));
    request.client_ref = body.client_ref;
    run(state, request).await
}

async fn run(
    state: GatewayState,
    request: GenerationRequest,
) -> Result<Json<GenerationResponse>, ApiError> {
    state.generator.generate(request).await.map(Json).map_err(ApiError)
}

fn bad_multipart(err: MultipartError) -> ApiError {
    ApiError(GenerateError::InvalidInput(format!(
        "malformed multipart body: {err}"
    )))
}

// ---------------------------------------------------------------------------
// Error mapping
// ---------------------------------------------------------------------------

/// Wraps the pipeline error taxonomy for HTTP responses.
pub struct ApiError(pub GenerateError);

fn status_for(err: &GenerateError) -> StatusCode {
    match err {
        GenerateError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        GenerateError::Generation | GenerateError::AllVariantsFailed => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        if status.is_server_error() {
            error!(error = %self.0, "Generation request failed");
        }
        let body = Json(json!({ "success": false, "error": self.0.to_string() }));
        (status, body).into_response()
    }
}
