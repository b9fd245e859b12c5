//! Sightengine API client
//!
//! Relays an uploaded media file to the vendor's check endpoint and
//! hands the raw payload to the interpreter. One best-effort attempt
//! per call: no retry, no backoff, no client-side rate limiting, no
//! timeout beyond transport defaults.

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error};

use crate::config::Credentials;
use crate::services::verdict::{self, Detection};

/// Multipart field carrying the media payload on the vendor side
const MEDIA_FIELD: &str = "media";

/// Sightengine client errors
///
/// Variant detail is for the operational log only; callers surface a
/// generic failure message to the end user.
#[derive(Debug, Error)]
pub enum SightengineError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Vendor reported failure: {0}")]
    VendorFailure(String),
}

/// Sightengine API client
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Debug, Clone)]
pub struct SightengineClient {
    http_client: reqwest::Client,
    endpoint_url: String,
    models: String,
}

impl SightengineClient {
    pub fn new(endpoint_url: String, models: String) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            endpoint_url,
            models,
        }
    }

    /// Analyze an uploaded media file
    ///
    /// Builds the vendor's multipart upload (binary payload plus model
    /// list and credentials), performs a single awaited POST, and
    /// normalizes the response. Any transport, credential, or
    /// response-shape problem maps to a [`SightengineError`].
    pub async fn analyze(
        &self,
        credentials: &Credentials,
        bytes: Vec<u8>,
        filename: &str,
        mime_type: &str,
    ) -> Result<Detection, SightengineError> {
        let media = reqwest::multipart::Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(mime_type)
            .map_err(|e| SightengineError::Parse(format!("invalid MIME type {mime_type:?}: {e}")))?;

        let form = reqwest::multipart::Form::new()
            .part(MEDIA_FIELD, media)
            .text("models", self.models.clone())
            .text("api_user", credentials.user.clone())
            .text("api_secret", credentials.secret.clone());

        debug!("Sending analysis request to {} (models: {})", self.endpoint_url, self.models);

        let response = self
            .http_client
            .post(&self.endpoint_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                error!("Sightengine request failed: {}", e);
                SightengineError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Sightengine API error: HTTP {}: {}", status, body);
            return Err(SightengineError::Api(status.as_u16(), body));
        }

        let payload: Value = response.json().await.map_err(|e| {
            error!("Sightengine response was not valid JSON: {}", e);
            SightengineError::Parse(e.to_string())
        })?;
        debug!("Sightengine response payload: {}", payload);

        Self::process_payload(payload)
    }

    /// Check the vendor status field, then interpret the payload
    ///
    /// Split out from the transport so the acceptance gate is
    /// unit-testable.
    pub fn process_payload(payload: Value) -> Result<Detection, SightengineError> {
        match payload.get("status").and_then(Value::as_str) {
            Some("success") => Ok(verdict::interpret(&payload)),
            _ => {
                error!("Sightengine reported failure: {}", payload);
                Err(SightengineError::VendorFailure(payload.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_status_yields_detection() {
        let payload = json!({ "status": "success", "type": { "ai_generated": 0.85 } });
        let detection = SightengineClient::process_payload(payload).unwrap();
        assert!(detection.is_ai_generated);
        assert_eq!(detection.confidence, 85.0);
        assert_eq!(detection.status, "success");
    }

    #[test]
    fn failure_status_is_rejected() {
        let result = SightengineClient::process_payload(json!({ "status": "failure" }));
        assert!(matches!(result, Err(SightengineError::VendorFailure(_))));
    }

    #[test]
    fn missing_status_is_rejected() {
        let result = SightengineClient::process_payload(json!({ "type": { "ai_generated": 0.85 } }));
        assert!(matches!(result, Err(SightengineError::VendorFailure(_))));
    }

    #[test]
    fn non_string_status_is_rejected() {
        let result = SightengineClient::process_payload(json!({ "status": 1 }));
        assert!(matches!(result, Err(SightengineError::VendorFailure(_))));
    }
}
