// src/handlers/draft.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppError,
    handlers::quiz::CATALOG_PATH,
    models::{
        draft::PublishResponse,
        question::QuestionDraft,
        quiz::QuizMeta,
    },
    services::authoring::{DraftBoard, Publisher},
};

/// Opens an empty draft with the default metadata.
pub async fn create_draft(
    State(drafts): State<Arc<DraftBoard>>,
) -> Result<impl IntoResponse, AppError> {
    let (id, draft) = drafts.open()?;
    tracing::debug!("Opened draft {}", id);

    Ok((StatusCode::CREATED, Json(draft.view(id))))
}

pub async fn get_draft(
    State(drafts): State<Arc<DraftBoard>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let draft = drafts.get(id)?;
    Ok(Json(draft.view(id)))
}

/// Replaces the quiz-level metadata.
pub async fn update_meta(
    State(drafts): State<Arc<DraftBoard>>,
    Path(id): Path<Uuid>,
    Json(meta): Json<QuizMeta>,
) -> Result<impl IntoResponse, AppError> {
    meta.validate()?;

    let (_, draft) = drafts.update(id, |d| {
        d.meta = meta;
        Ok(())
    })?;
    Ok(Json(draft.view(id)))
}

/// Replaces the in-progress question. Nothing is validated until it is added.
pub async fn update_question(
    State(drafts): State<Arc<DraftBoard>>,
    Path(id): Path<Uuid>,
    Json(question): Json<QuestionDraft>,
) -> Result<impl IntoResponse, AppError> {
    let (_, draft) = drafts.update(id, |d| {
        d.current = question;
        Ok(())
    })?;
    Ok(Json(draft.view(id)))
}

/// Commits the in-progress question to the draft.
pub async fn add_question(
    State(drafts): State<Arc<DraftBoard>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let (_, draft) = drafts.update(id, |d| d.add_question().map(|_| ()))?;
    Ok((StatusCode::CREATED, Json(draft.view(id))))
}

pub async fn remove_question(
    State(drafts): State<Arc<DraftBoard>>,
    Path((id, index)): Path<(Uuid, usize)>,
) -> Result<impl IntoResponse, AppError> {
    let (_, draft) = drafts.update(id, |d| d.remove_question(index))?;
    Ok(Json(draft.view(id)))
}

/// Publishes the draft into the catalog and closes it.
///
/// A draft that fails validation stays open so it can be fixed.
pub async fn publish_draft(
    State(drafts): State<Arc<DraftBoard>>,
    State(publisher): State<Publisher>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let draft = drafts.get(id)?;
    let record = publisher.publish(&draft).await?;
    drafts.discard(id)?;

    Ok((
        StatusCode::CREATED,
        Json(PublishResponse {
            quiz: record.summary,
            redirect: CATALOG_PATH.to_string(),
        }),
    ))
}
