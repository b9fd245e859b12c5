//! Detection API handler
//!
//! POST /api/detect: accept one uploaded file, relay it to the
//! analysis vendor, return the normalized verdict. The upload lives in
//! memory for the duration of the request and is never written to
//! disk.

use axum::{
    extract::{Multipart, State},
    routing::post,
    Json, Router,
};
use tracing::{debug, error};

use crate::error::{ApiError, ApiResult};
use crate::services::verdict::Detection;
use crate::AppState;

/// Multipart form field carrying the uploaded file
const UPLOAD_FIELD: &str = "file";

/// One uploaded file, held in memory for one request
struct Upload {
    bytes: Vec<u8>,
    filename: String,
    mime_type: String,
}

/// POST /api/detect
///
/// Validation order: upload presence first (400), then credential
/// presence (500, vendor never contacted). Failure responses carry a
/// generic message only; detail goes to the log and the diagnostic
/// last-error slot.
pub async fn detect(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<Detection>> {
    let upload = read_upload(&mut multipart)
        .await?
        .ok_or(ApiError::MissingUpload)?;

    let credentials = state
        .config
        .credentials()
        .ok_or(ApiError::MissingCredentials)?;

    debug!(
        "Analyzing upload {:?} ({}, {} bytes)",
        upload.filename,
        upload.mime_type,
        upload.bytes.len()
    );

    match state
        .analyzer
        .analyze(&credentials, upload.bytes, &upload.filename, &upload.mime_type)
        .await
    {
        Ok(detection) => Ok(Json(detection)),
        Err(e) => {
            error!("Error processing detection request: {}", e);
            *state.last_error.write().await = Some(e.to_string());
            Err(ApiError::Analysis(e))
        }
    }
}

/// Pull the `file` field out of the multipart body, if present
///
/// Other fields are skipped. Read errors (including bodies over the
/// transport size cap) reject the request without touching the vendor.
async fn read_upload(multipart: &mut Multipart) -> ApiResult<Option<Upload>> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return Ok(None),
            Err(e) => {
                error!("Unreadable multipart body: {}", e);
                return Err(ApiError::BadRequest(e.to_string()));
            }
        };

        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or("upload").to_string();
        let mime_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = match field.bytes().await {
            Ok(bytes) => bytes.to_vec(),
            Err(e) => {
                error!("Unreadable upload field: {}", e);
                return Err(ApiError::BadRequest(e.to_string()));
            }
        };

        return Ok(Some(Upload {
            bytes,
            filename,
            mime_type,
        }));
    }
}

/// Build detection routes
pub fn detect_routes() -> Router<AppState> {
    Router::new().route("/api/detect", post(detect))
}
