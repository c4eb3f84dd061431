//! Request handlers

use crate::error::{ApiError, PROCESS_NOT_FOUND_DETAIL};
use crate::state::AppState;
use crate::MULTIPART_OVERHEAD;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, Path, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use vt_core::service::DEFAULT_FILENAME;
use vt_core::{CleaningOperations, CoreError, ProcessSummary, UploadSummary};

/// Multipart field carrying the uploaded file
const FILE_FIELD: &str = "file";

/// Success envelope around a service summary
#[derive(Serialize)]
pub(crate) struct Success<T> {
    status: &'static str,
    message: &'static str,
    #[serde(flatten)]
    data: T,
}

impl<T> Success<T> {
    fn new(message: &'static str, data: T) -> Self {
        Self {
            status: "success",
            message,
            data,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProcessRequest {
    file_id: String,
    #[serde(default)]
    operations: CleaningOperations,
}

pub(crate) async fn upload(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Success<UploadSummary>>, ApiError> {
    let mut multipart = multipart.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let limit = state.service.max_upload_bytes() + MULTIPART_OVERHEAD;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or(DEFAULT_FILENAME).to_string();
        let raw = field.bytes().await.map_err(|e| multipart_error(e, limit))?;

        let summary = state.service.upload(&raw, &filename)?;
        return Ok(Json(Success::new("File uploaded successfully", summary)));
    }

    Err(ApiError::BadRequest(format!(
        "missing multipart field '{}'",
        FILE_FIELD
    )))
}

fn multipart_error(err: MultipartError, limit: usize) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::BodyTooLarge { limit }
    } else {
        ApiError::BadRequest(err.body_text())
    }
}

pub(crate) async fn process(
    State(state): State<Arc<AppState>>,
    request: Result<Json<ProcessRequest>, JsonRejection>,
) -> Result<Json<Success<ProcessSummary>>, ApiError> {
    let Json(request) = request.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let summary = state
        .service
        .process(&request.file_id, &request.operations)
        .map_err(|e| ApiError::from(e).with_not_found_detail(PROCESS_NOT_FOUND_DETAIL))?;
    Ok(Json(Success::new("File processed successfully", summary)))
}

pub(crate) async fn download(
    State(state): State<Arc<AppState>>,
    Path(file_id): Path<String>,
) -> Result<Response, ApiError> {
    let download = state.service.download(&file_id)?;
    let disposition = HeaderValue::from_bytes(download.content_disposition().as_bytes())
        .map_err(|e| CoreError::Internal(format!("invalid Content-Disposition: {}", e)))?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("text/csv")),
            (header::CONTENT_DISPOSITION, disposition),
            (header::CONTENT_LENGTH, HeaderValue::from(download.bytes.len())),
        ],
        download.bytes,
    )
        .into_response())
}

pub(crate) async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "artifacts": state.service.store().len(),
    }))
}

pub(crate) async fn not_found() -> ApiError {
    ApiError::NotFound { detail: "Not found." }
}
