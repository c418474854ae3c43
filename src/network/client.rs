//! Removal service client - one multipart POST per submission, one GET for liveness

use std::time::Instant;

use chrono::Utc;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::constants::{FALLBACK_CONTENT_TYPE, HEALTH_PATH, REMOVE_BACKGROUND_PATH, UPLOAD_FIELD};
use crate::error::ServiceError;
use crate::models::{RemovalResult, ServiceStatus, SourceFile};
use crate::preview::probe_dimensions;

/// Error body produced by the service on non-success statuses
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

/// HTTP client bound to one service base URL
#[derive(Clone, Debug)]
pub struct RemovalClient {
    http: reqwest::Client,
    base_url: String,
}

impl RemovalClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        RemovalClient {
            http: create_client(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Upload the file and return the cutout. No retries.
    pub async fn submit(
        &self,
        file: &SourceFile,
        bytes: Vec<u8>,
    ) -> Result<RemovalResult, ServiceError> {
        let url = self.endpoint(REMOVE_BACKGROUND_PATH);
        let start = Instant::now();

        let part = upload_part(file, bytes);
        let form = Form::new().part(UPLOAD_FIELD, part);

        let resp = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.bytes().await.unwrap_or_default();
            return Err(rejection(status.as_u16(), &body));
        }

        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("image/png")
            .to_string();

        let body = resp.bytes().await.map_err(|e| ServiceError::InvalidResponse {
            reason: format!("error reading body: {}", e),
        })?;
        if body.is_empty() {
            return Err(ServiceError::InvalidResponse {
                reason: "empty body".to_string(),
            });
        }

        Ok(RemovalResult {
            dimensions: probe_dimensions(&body),
            bytes: body.to_vec(),
            content_type,
            time_ms: start.elapsed().as_millis() as u64,
            received_at: Utc::now(),
        })
    }

    /// Probe the liveness endpoint
    pub async fn health(&self) -> Result<ServiceStatus, ServiceError> {
        let resp = self
            .http
            .get(self.endpoint(HEALTH_PATH))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        resp.json::<ServiceStatus>()
            .await
            .map_err(|e| ServiceError::InvalidResponse {
                reason: format!("status body is not JSON: {}", e),
            })
    }

    fn transport_error(&self, e: reqwest::Error) -> ServiceError {
        let reason = if e.is_connect() {
            format!("connection failed: {}", e)
        } else if e.is_timeout() {
            format!("timed out: {}", e)
        } else {
            format!("request failed: {}", e)
        };
        ServiceError::Unreachable {
            url: self.base_url.clone(),
            reason,
        }
    }
}

/// The file part of the upload, typed with the declared MIME type. A type
/// that cannot go into a header is sent as `application/octet-stream`.
fn upload_part(file: &SourceFile, bytes: Vec<u8>) -> Part {
    let content_type = HeaderValue::from_str(&file.mime).unwrap_or_else(|_| {
        tracing::warn!(mime = ?file.mime, "Unusable content type, uploading as octet-stream");
        HeaderValue::from_static(FALLBACK_CONTENT_TYPE)
    });
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, content_type);

    Part::bytes(bytes).file_name(file.name.clone()).headers(headers)
}

/// Classify a non-success response by its body
fn rejection(status: u16, body: &[u8]) -> ServiceError {
    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(ErrorBody { detail }) => {
            let detail = match detail {
                Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s),
                _ => None,
            };
            ServiceError::RequestRejected { status, detail }
        }
        Err(e) => ServiceError::InvalidResponse {
            reason: format!("status {} with unparseable body: {}", status, e),
        },
    }
}

/// Create an HTTP client. Timeouts are left to the transport defaults.
pub fn create_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}
