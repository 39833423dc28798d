// src/models/draft.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{
    question::{Question, QuestionDraft},
    quiz::{QuizMeta, QuizSummary},
};

/// DTO describing an authoring draft.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftView {
    pub id: Uuid,
    pub meta: QuizMeta,
    pub current_question: QuestionDraft,
    pub questions: Vec<Question>,
}

/// DTO for creating and publishing a quiz in one request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuizRequest {
    #[serde(flatten)]
    pub meta: QuizMeta,
    pub questions: Vec<QuestionDraft>,
}

/// DTO returned after publishing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishResponse {
    pub quiz: QuizSummary,
    /// The catalog view the client returns to.
    pub redirect: String,
}
