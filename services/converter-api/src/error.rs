//! HTTP error responses.

use axum::{
    extract::multipart::MultipartError,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use overlay_common::ConvertError;
use serde::Serialize;
use thiserror::Error;

/// Errors returned by the conversion endpoint.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No KML file provided")]
    MissingKml,

    #[error("Invalid multipart request: {0}")]
    Multipart(String),

    #[error(transparent)]
    Convert(#[from] ConvertError),

    #[error("Conversion task failed: {0}")]
    Task(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingKml | ApiError::Multipart(_) => StatusCode::BAD_REQUEST,
            ApiError::Convert(e) => StatusCode::from_u16(e.http_status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            ApiError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        ApiError::Multipart(err.body_text())
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error_response(
            self.status_code(),
            ErrorBody {
                error: self.to_string(),
            },
        )
    }
}

fn error_response(status: StatusCode, body: ErrorBody) -> Response {
    let json = serde_json::to_string(&body).unwrap_or_default();
    (status, [(header::CONTENT_TYPE, "application/json")], json).into_response()
}
