// src/models/quiz.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::question::Question;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Badge color for catalog cards.
    pub fn color(self) -> &'static str {
        match self {
            Difficulty::Easy => "#4caf50",
            Difficulty::Medium => "#ff9800",
            Difficulty::Hard => "#f44336",
        }
    }
}

/// Catalog entry: quiz metadata without its questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSummary {
    pub id: i64,
    pub title: String,
    pub description: String,

    /// Free text; `known_categories()` lists the authoring choices.
    pub category: String,

    /// Always equals the number of questions in the matching full record.
    pub question_count: usize,

    /// Time limit in minutes.
    pub duration: u32,

    pub difficulty: Difficulty,
}

/// A quiz summary together with its ordered question list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizRecord {
    #[serde(flatten)]
    pub summary: QuizSummary,
    pub questions: Vec<Question>,
}

impl QuizRecord {
    pub fn id(&self) -> i64 {
        self.summary.id
    }

    /// Total allotted time in seconds.
    pub fn time_limit_seconds(&self) -> u32 {
        self.summary.duration.saturating_mul(60)
    }
}

/// Quiz-level metadata edited on an authoring draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct QuizMeta {
    #[validate(length(max = 200, message = "Title must be at most 200 characters"))]
    pub title: String,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: String,

    #[validate(length(min = 1, max = 50, message = "Please choose a category"))]
    pub category: String,

    #[validate(range(min = 1, max = 600, message = "Duration must be between 1 and 600 minutes"))]
    pub duration: u32,

    pub difficulty: Difficulty,
}

impl Default for QuizMeta {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            category: "General".to_string(),
            duration: crate::config::DEFAULT_DURATION_MINUTES,
            difficulty: Difficulty::Easy,
        }
    }
}

/// Query parameters for listing the catalog.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub q: Option<String>,
    pub category: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_colors() {
        assert_eq!(Difficulty::Easy.color(), "#4caf50");
        assert_eq!(Difficulty::Medium.color(), "#ff9800");
        assert_eq!(Difficulty::Hard.color(), "#f44336");
        assert_eq!(Difficulty::default().color(), Difficulty::Easy.color());
    }

    #[test]
    fn test_full_record_is_flat_on_the_wire() {
        let record = QuizRecord {
            summary: QuizSummary {
                id: 9,
                title: "T".into(),
                description: "D".into(),
                category: "Other".into(),
                question_count: 0,
                duration: 3,
                difficulty: Difficulty::Hard,
            },
            questions: vec![],
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["id"], 9);
        assert_eq!(value["questionCount"], 0);
        assert_eq!(value["difficulty"], "Hard");
        assert!(value["questions"].is_array());

        let back: QuizRecord = serde_json::from_value(value).unwrap();
        assert_eq!(back, record);
        assert_eq!(back.time_limit_seconds(), 180);
    }

    #[test]
    fn test_meta_defaults_and_bounds() {
        let meta = QuizMeta::default();
        assert_eq!(meta.category, "General");
        assert_eq!(meta.duration, 10);
        assert!(meta.validate().is_ok());

        let zero = QuizMeta {
            duration: 0,
            ..QuizMeta::default()
        };
        assert!(zero.validate().is_err());
    }
}
