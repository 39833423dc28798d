// src/models/session.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{
    question::PublicQuestion,
    quiz::QuizSummary,
    result::{AnswerMap, ResultRecord},
};

/// Lifecycle of a quiz attempt.
///
/// `Loading` is wire-only. Clients show it while `POST /api/sessions` is in
/// flight; the server resolves the quiz before registering a session and
/// never reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Loading,
    InProgress,
    Submitted,
}

/// DTO for opening a session.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartSessionRequest {
    pub quiz_id: i64,
}

/// DTO for answering the question with `question_id`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRequest {
    pub question_id: i64,
    pub option: String,
}

/// DTO for jumping straight to a question.
#[derive(Debug, Deserialize)]
pub struct JumpRequest {
    pub index: usize,
}

/// Snapshot of a session for the quiz-taking view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub session_id: Uuid,
    pub status: SessionStatus,
    pub quiz: QuizSummary,
    pub questions: Vec<PublicQuestion>,
    pub current_index: usize,
    pub current_question: Option<PublicQuestion>,
    pub answers: AnswerMap,

    /// Per-question answered flags, in question order.
    pub answered: Vec<bool>,

    pub remaining_seconds: u32,

    /// `m:ss`
    pub clock: String,

    /// Under a minute left.
    pub time_warning: bool,

    /// `(current_index + 1) / len × 100`
    pub progress: f64,

    /// Where the client goes once the session is over.
    pub results_path: Option<String>,
}

/// DTO returned by the submit endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub session_id: Uuid,
    pub result: ResultRecord,
    pub results_path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_names() {
        let names: Vec<String> = [
            SessionStatus::Loading,
            SessionStatus::InProgress,
            SessionStatus::Submitted,
        ]
        .iter()
        .map(|s| serde_json::to_string(s).unwrap())
        .collect();
        assert_eq!(names, vec!["\"loading\"", "\"in_progress\"", "\"submitted\""]);

        let parsed: SessionStatus = serde_json::from_str("\"loading\"").unwrap();
        assert_eq!(parsed, SessionStatus::Loading);
    }
}
