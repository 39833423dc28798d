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
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    // 500 Internal Server Error
    InternalServerError(String),

    // 400 Bad Request (authoring validation, bad navigation target)
    BadRequest(String),

    // 404 Not Found (unknown quiz, session, draft or result)
    NotFound(String),

    // 409 Conflict (e.g., answering a submitted session)
    Conflict(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InternalServerError(msg) => write!(f, "internal error: {}", msg),
            AppError::BadRequest(msg) => write!(f, "bad request: {}", msg),
            AppError::NotFound(msg) => write!(f, "not found: {}", msg),
            AppError::Conflict(msg) => write!(f, "conflict: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Implements `IntoResponse` for `AppError`.
/// Converts the error into a JSON response with appropriate HTTP status code.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
        };
        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Converts `sqlx::Error` into `AppError::InternalServerError`.
/// Allows using `?` operator on storage queries.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::InternalServerError(err.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        AppError::InternalServerError(err.to_string())
    }
}

/// Stored values are written by this service, so a decode failure means
/// the store is corrupt rather than the client being wrong.
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InternalServerError(format!("corrupt stored value: {}", err))
    }
}

/// Form fields in the order they are shown; the first failing one is reported.
const FIELD_ORDER: &[&str] = &[
    "text",
    "options",
    "title",
    "description",
    "category",
    "duration",
];

/// Struct-level (schema) errors come after every field.
const SCHEMA_KEY: &str = "__all__";

fn field_rank(field: &str) -> (usize, &str) {
    let rank = match FIELD_ORDER.iter().position(|f| *f == field) {
        Some(pos) => pos,
        None if field == SCHEMA_KEY => FIELD_ORDER.len() + 1,
        None => FIELD_ORDER.len(),
    };
    (rank, field)
}

/// Flattens validator output into the first user-facing message.
impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|(a, _), (b, _)| field_rank(a).cmp(&field_rank(b)));
        let message = fields
            .iter()
            .flat_map(|(_, errs)| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| errors.to_string());
        AppError::BadRequest(message)
    }
}
