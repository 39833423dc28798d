// src/handlers/results.rs

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::{error::AppError, services::results::ResultViewer};

/// Shows the latest result recorded for a quiz.
pub async fn get_result(
    State(results): State<ResultViewer>,
    Path(quiz_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(results.view(quiz_id).await?))
}
