// src/handlers/session.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use crate::{
    error::AppError,
    models::session::{AnswerRequest, JumpRequest, StartSessionRequest, SubmitResponse},
    services::session::{Navigation, SessionManager},
};

/// Resolves the quiz and starts its countdown.
///
/// Fails with 404 when the quiz is not listed or has no questions on record.
pub async fn start_session(
    State(sessions): State<Arc<SessionManager>>,
    Json(req): Json<StartSessionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let view = sessions.open(req.quiz_id).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

pub async fn get_session(
    State(sessions): State<Arc<SessionManager>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(sessions.view(id).await?))
}

/// Records (or overwrites) the answer to one question.
pub async fn record_answer(
    State(sessions): State<Arc<SessionManager>>,
    Path(id): Path<Uuid>,
    Json(req): Json<AnswerRequest>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(sessions.answer(id, req.question_id, req.option).await?))
}

pub async fn next_question(
    State(sessions): State<Arc<SessionManager>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(sessions.navigate(id, Navigation::Next).await?))
}

pub async fn previous_question(
    State(sessions): State<Arc<SessionManager>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(sessions.navigate(id, Navigation::Previous).await?))
}

pub async fn jump_to_question(
    State(sessions): State<Arc<SessionManager>>,
    Path(id): Path<Uuid>,
    Json(req): Json<JumpRequest>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(sessions.navigate(id, Navigation::Jump(req.index)).await?))
}

/// Submits the session and points the client at the results view.
///
/// Submitting again, or after the timer ran out, returns the result that
/// was already recorded.
pub async fn submit_session(
    State(sessions): State<Arc<SessionManager>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let result = sessions.submit(id).await?;
    let results_path = format!("/results/{}", result.quiz_id);

    Ok(Json(SubmitResponse {
        session_id: id,
        result,
        results_path,
    }))
}
