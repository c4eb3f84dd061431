//! Error types for vt-server and their HTTP responses

use crate::auth::AuthError;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use std::any::Any;
use thiserror::Error;
use vt_core::{CoreError, ErrorKind};

/// Detail returned for unknown or expired artifact ids
pub const NOT_FOUND_DETAIL: &str = "File not found or expired.";

/// Detail returned when the file to process is no longer stored
pub const PROCESS_NOT_FOUND_DETAIL: &str = "File not found. Please upload it again.";

/// Detail returned for any failure not attributable to the request
pub const UNEXPECTED_DETAIL: &str = "An unexpected error occurred.";

/// Request-level error
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A001: Authenticator refused the request
    #[error("[A001] Unauthorized: {0}")]
    Unauthorized(#[from] AuthError),

    /// A002: Malformed request body or form
    #[error("[A002] Bad request: {0}")]
    BadRequest(String),

    /// A003: Request body rejected before reaching the service
    #[error("[A003] Request body exceeds the {limit} byte limit")]
    BodyTooLarge { limit: usize },

    /// A004: Resource missing, with the detail shown to the client
    #[error("[A004] {detail}")]
    NotFound { detail: &'static str },
}

#[derive(Serialize)]
struct ErrorBody {
    status: &'static str,
    detail: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Core(err) => match err.kind() {
                ErrorKind::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
                ErrorKind::EmptyOrInvalidInput
                | ErrorKind::ParseError
                | ErrorKind::UnknownColumn
                | ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::Unexpected => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::BodyTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    /// Message placed in the `detail` field of the response body
    pub fn detail(&self) -> String {
        match self {
            ApiError::Core(err) => match err.kind() {
                ErrorKind::NotFound => NOT_FOUND_DETAIL.to_string(),
                ErrorKind::Unexpected => UNEXPECTED_DETAIL.to_string(),
                _ => err.to_string(),
            },
            ApiError::NotFound { detail } => (*detail).to_string(),
            other => other.to_string(),
        }
    }

    /// Replace the detail of a not-found error, leaving other errors as is
    pub fn with_not_found_detail(self, detail: &'static str) -> Self {
        match self {
            ApiError::Core(CoreError::NotFound { .. }) => ApiError::NotFound { detail },
            other => other,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("Request failed: {}", self);
        } else {
            log::debug!("Request rejected ({}): {}", status, self);
        }

        let body = ErrorBody {
            status: "error",
            detail: self.detail(),
        };
        let mut response = (status, Json(body)).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

/// Response for a handler that panicked
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    log::error!("Handler panicked: {}", message);

    let body = ErrorBody {
        status: "error",
        detail: UNEXPECTED_DETAIL.to_string(),
    };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
