use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;
use tracing::info;

use crate::discovery::DiscoveryError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
    #[error("Invalid request body")]
    InvalidPayload(String),
    #[error("Request body exceeds {0} bytes")]
    PayloadTooLarge(usize),
    #[error("Internal Server Error")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Discovery(err) => err.status_code(),
            ApiError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Discovery(err) => err.code(),
            ApiError::InvalidPayload(_) => "INVALID_PAYLOAD",
            ApiError::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// `<h1>{status} Error</h1><p>{message}</p>`
    pub fn html_body(&self) -> String {
        format!(
            "<h1>{} Error</h1><p>{}</p>",
            self.status_code().as_u16(),
            self
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            ApiError::InvalidPayload(detail) | ApiError::Internal(detail) => {
                info!(status = status.as_u16(), code = self.code(), detail = %detail, "Request failed");
            }
            _ => info!(status = status.as_u16(), code = self.code(), "Request failed"),
        }

        (status, Html(self.html_body())).into_response()
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(value: serde_json::Error) -> Self {
        ApiError::InvalidPayload(value.to_string())
    }
}
