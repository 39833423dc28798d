// src/models/question.rs

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::config::OPTIONS_PER_QUESTION;

/// A multiple-choice question as stored inside a full quiz record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Dense, 1-based position within its quiz.
    pub id: i64,

    /// The text content of the question.
    #[serde(rename = "question")]
    pub text: String,

    /// Answer choices in display order. Authored questions always carry
    /// exactly four; seed data may carry any number.
    pub options: Vec<String>,

    /// Must equal one of `options`.
    pub correct_answer: String,
}

impl Question {
    pub fn is_correct(&self, answer: Option<&str>) -> bool {
        answer == Some(self.correct_answer.as_str())
    }
}

/// DTO for sending a question to a quiz taker (excludes the correct answer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicQuestion {
    pub id: i64,
    #[serde(rename = "question")]
    pub text: String,
    pub options: Vec<String>,
}

impl From<&Question> for PublicQuestion {
    fn from(q: &Question) -> Self {
        Self {
            id: q.id,
            text: q.text.clone(),
            options: q.options.clone(),
        }
    }
}

/// The single in-progress question of an authoring draft.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_correct_answer"))]
pub struct QuestionDraft {
    #[serde(rename = "question", default)]
    #[validate(custom(function = validate_not_blank, message = "Please enter a question"))]
    pub text: String,

    #[serde(default)]
    #[validate(custom(function = validate_options_filled))]
    pub options: [String; OPTIONS_PER_QUESTION],

    #[serde(default)]
    pub correct_answer: String,
}

impl QuestionDraft {
    /// Converts a validated draft into a stored question with the given id.
    pub fn into_question(self, id: i64) -> Question {
        Question {
            id,
            text: self.text,
            options: self.options.into_iter().collect(),
            correct_answer: self.correct_answer,
        }
    }
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

fn validate_options_filled(options: &[String]) -> Result<(), ValidationError> {
    if options.iter().any(|opt| opt.trim().is_empty()) {
        return Err(ValidationError::new("options_must_be_filled")
            .with_message(Cow::Borrowed("Please fill all options")));
    }
    Ok(())
}

fn validate_correct_answer(draft: &QuestionDraft) -> Result<(), ValidationError> {
    if draft.correct_answer.trim().is_empty() {
        return Err(ValidationError::new("correct_answer_missing")
            .with_message(Cow::Borrowed("Please select the correct answer")));
    }
    if !draft.options.contains(&draft.correct_answer) {
        return Err(ValidationError::new("correct_answer_not_an_option")
            .with_message(Cow::Borrowed("The correct answer must be one of the options")));
    }
    Ok(())
}
