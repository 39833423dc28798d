//! Result records: persistence and the read-only results view.

use std::sync::Arc;

use crate::{
    error::AppError,
    models::result::{ResultRecord, ResultView, ReviewItem, Severity},
    storage::{KeyValueStore, keys, load_json, save_json},
};

pub async fn save_result(store: &dyn KeyValueStore, record: &ResultRecord) -> Result<(), AppError> {
    save_json(store, &keys::result(record.quiz_id), record).await
}

pub async fn load_result(
    store: &dyn KeyValueStore,
    quiz_id: i64,
) -> Result<Option<ResultRecord>, AppError> {
    load_json(store, &keys::result(quiz_id)).await
}

pub fn severity(percentage: u32) -> Severity {
    match percentage {
        p if p >= 80 => Severity::Good,
        p if p >= 60 => Severity::Fair,
        _ => Severity::Poor,
    }
}

pub fn tier_message(percentage: u32) -> &'static str {
    match percentage {
        p if p >= 90 => "Outstanding!",
        p if p >= 80 => "Excellent!",
        p if p >= 70 => "Good Job!",
        p if p >= 60 => "Not Bad!",
        _ => "Keep Practicing!",
    }
}

/// `{m}m {s}s`
pub fn format_time_spent(seconds: u32) -> String {
    format!("{}m {}s", seconds / 60, seconds % 60)
}

pub fn review(record: &ResultRecord) -> Vec<ReviewItem> {
    record
        .questions
        .iter()
        .enumerate()
        .map(|(idx, q)| {
            let user_answer = record.answers.get(&q.id).cloned();
            ReviewItem {
                number: idx + 1,
                question_id: q.id,
                question: q.text.clone(),
                is_correct: q.is_correct(user_answer.as_deref()),
                user_answer,
                correct_answer: q.correct_answer.clone(),
            }
        })
        .collect()
}

pub fn build_view(record: &ResultRecord) -> ResultView {
    let severity = severity(record.percentage);
    ResultView {
        quiz_id: record.quiz_id,
        quiz_title: record.quiz_title.clone(),
        score: record.score,
        incorrect: record.total_questions.saturating_sub(record.score),
        total_questions: record.total_questions,
        percentage: record.percentage,
        severity,
        color: severity.color(),
        message: tier_message(record.percentage),
        time_spent_seconds: record.time_spent_seconds,
        time_spent_label: format_time_spent(record.time_spent_seconds),
        trigger: record.trigger,
        submitted_at: record.submitted_at,
        review: review(record),
    }
}

#[derive(Clone)]
pub struct ResultViewer {
    store: Arc<dyn KeyValueStore>,
}

impl ResultViewer {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub async fn view(&self, quiz_id: i64) -> Result<ResultView, AppError> {
        let record = load_result(self.store.as_ref(), quiz_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No results for quiz {}", quiz_id)))?;
        Ok(build_view(&record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{
            question::Question,
            result::{AnswerMap, SubmitTrigger},
        },
        storage::MemoryStore,
    };

    fn record(percentage: u32) -> ResultRecord {
        let questions = vec![
            Question {
                id: 1,
                text: "First".to_string(),
                options: vec!["A".to_string(), "B".to_string()],
                correct_answer: "A".to_string(),
            },
            Question {
                id: 2,
                text: "Second".to_string(),
                options: vec!["A".to_string(), "B".to_string()],
                correct_answer: "B".to_string(),
            },
        ];
        let mut answers = AnswerMap::new();
        answers.insert(1, "A".to_string());
        ResultRecord {
            quiz_id: 3,
            quiz_title: "Two".to_string(),
            score: 1,
            total_questions: 2,
            percentage,
            answers,
            questions,
            time_spent_seconds: 125,
            trigger: SubmitTrigger::Manual,
            submitted_at: None,
        }
    }

    #[test]
    fn test_severity_thresholds() {
        assert_eq!(severity(100), Severity::Good);
        assert_eq!(severity(80), Severity::Good);
        assert_eq!(severity(79), Severity::Fair);
        assert_eq!(severity(60), Severity::Fair);
        assert_eq!(severity(59), Severity::Poor);
        assert_eq!(severity(0), Severity::Poor);
    }

    #[test]
    fn test_tier_messages() {
        assert_eq!(tier_message(90), "Outstanding!");
        assert_eq!(tier_message(89), "Excellent!");
        assert_eq!(tier_message(80), "Excellent!");
        assert_eq!(tier_message(70), "Good Job!");
        assert_eq!(tier_message(60), "Not Bad!");
        assert_eq!(tier_message(59), "Keep Practicing!");
    }

    #[test]
    fn test_review_marks_unanswered_as_incorrect() {
        let items = review(&record(50));
        assert_eq!(items.len(), 2);
        assert!(items[0].is_correct);
        assert_eq!(items[0].number, 1);
        assert!(!items[1].is_correct);
        assert!(items[1].user_answer.is_none());
        assert_eq!(items[1].correct_answer, "B");
    }

    #[test]
    fn test_build_view() {
        let view = build_view(&record(50));
        assert_eq!(view.incorrect, 1);
        assert_eq!(view.severity, Severity::Poor);
        assert_eq!(view.color, "#f44336");
        assert_eq!(view.message, "Keep Practicing!");
        assert_eq!(view.time_spent_label, "2m 5s");
    }

    #[tokio::test]
    async fn test_viewer_reads_latest_and_reports_missing() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let viewer = ResultViewer::new(store.clone());
        assert!(matches!(viewer.view(3).await, Err(AppError::NotFound(_))));

        save_result(store.as_ref(), &record(50)).await.unwrap();
        save_result(store.as_ref(), &record(100)).await.unwrap();

        let view = viewer.view(3).await.unwrap();
        assert_eq!(view.percentage, 100);
        assert_eq!(view.message, "Outstanding!");
    }
}
