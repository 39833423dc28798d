// src/models/result.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::question::Question;

/// Question id → selected option.
pub type AnswerMap = BTreeMap<i64, String>;

/// What ended a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitTrigger {
    #[default]
    Manual,
    Timeout,
}

/// Persisted outcome of one submitted session.
/// Stored under `quizResults_<quizId>`; a later attempt overwrites it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecord {
    pub quiz_id: i64,
    pub quiz_title: String,
    pub score: usize,
    pub total_questions: usize,
    pub percentage: u32,
    pub answers: AnswerMap,

    /// Snapshot of the questions, for review.
    pub questions: Vec<Question>,

    #[serde(rename = "timeSpent")]
    pub time_spent_seconds: u32,

    #[serde(default)]
    pub trigger: SubmitTrigger,

    #[serde(default)]
    pub submitted_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Score colour bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Good,
    Fair,
    Poor,
}

impl Severity {
    pub fn color(self) -> &'static str {
        match self {
            Severity::Good => "#4caf50",
            Severity::Fair => "#ff9800",
            Severity::Poor => "#f44336",
        }
    }
}

/// One row of the answer review.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewItem {
    /// 1-based display number.
    pub number: usize,
    pub question_id: i64,
    pub question: String,
    pub user_answer: Option<String>,
    pub correct_answer: String,
    pub is_correct: bool,
}

/// DTO for the results view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultView {
    pub quiz_id: i64,
    pub quiz_title: String,
    pub score: usize,
    pub incorrect: usize,
    pub total_questions: usize,
    pub percentage: u32,
    pub severity: Severity,
    pub color: &'static str,
    pub message: &'static str,
    pub time_spent_seconds: u32,
    pub time_spent_label: String,
    pub trigger: SubmitTrigger,
    pub submitted_at: Option<chrono::DateTime<chrono::Utc>>,
    pub review: Vec<ReviewItem>,
}
