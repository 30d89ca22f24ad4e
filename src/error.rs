// src/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

/// Global Application Error Enum.
/// Centralizes error handling and mapping to HTTP responses.
///
/// `Validation` and `StoreFailure` both answer 422 on the wire; they stay
/// separate variants so the logs can tell bad input from storage trouble.
#[derive(Debug)]
pub enum AppError {
    // 404 Not Found
    NotFound(String),

    // 422 Unprocessable: well-formed input that cannot be applied to current data
    Validation(String),

    // 422 Unprocessable: the store refused or failed the operation
    StoreFailure(String),

    // 400 Bad Request
    BadRequest(String),

    // 405 Method Not Allowed
    MethodNotAllowed,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}

/// Implements `IntoResponse` for `AppError`.
/// Converts the error into a JSON response with appropriate HTTP status code.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(detail) => {
                tracing::debug!("not found: {}", detail);
                (StatusCode::NOT_FOUND, "resource not found")
            }
            AppError::Validation(detail) => {
                tracing::warn!("validation rejected: {}", detail);
                (StatusCode::UNPROCESSABLE_ENTITY, "unprocessable")
            }
            AppError::StoreFailure(detail) => {
                tracing::error!("store failure: {}", detail);
                (StatusCode::UNPROCESSABLE_ENTITY, "unprocessable")
            }
            AppError::BadRequest(detail) => {
                tracing::warn!("bad request: {}", detail);
                (StatusCode::BAD_REQUEST, "bad_request")
            }
            AppError::MethodNotAllowed => (StatusCode::METHOD_NOT_ALLOWED, "method_not_allowed"),
        };
        let body = Json(json!({
            "success": false,
            "error": status.as_u16(),
            "message": message,
        }));

        (status, body).into_response()
    }
}

/// Converts `sqlx::Error` into `AppError`.
/// Allows using the `?` operator on store calls.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound(err.to_string()),
            _ => AppError::StoreFailure(err.to_string()),
        }
    }
}
