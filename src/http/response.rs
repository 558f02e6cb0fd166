//! Error responses.
//!
//! # Responsibilities
//! - Map dispatch failures to HTTP status codes
//! - Render a small JSON body (`{"message": ...}`)
//!
//! # Design Decisions
//! - Upstream connection failures result in 502 Bad Gateway
//! - Upstream timeouts result in 504 Gateway Timeout
//! - A streamed body that outgrows the limit mid-forward is still a 413
//! - Missing files, directories and rejected paths all look like 404

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Request body too large")]
    PayloadTooLarge,

    #[error("Upstream request failed: {0}")]
    BadGateway(String),

    #[error("Upstream timed out after {0}s")]
    GatewayTimeout(u64),
}

impl SiteError {
    pub fn status(&self) -> StatusCode {
        match self {
            SiteError::NotFound(_) => StatusCode::NOT_FOUND,
            SiteError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            SiteError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            SiteError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            SiteError::GatewayTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl IntoResponse for SiteError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({
            "message": self.to_string()
        }));

        let mut response = (status, body).into_response();
        if status == StatusCode::METHOD_NOT_ALLOWED {
            response
                .headers_mut()
                .insert(header::ALLOW, HeaderValue::from_static("GET, HEAD"));
        }
        response
    }
}
