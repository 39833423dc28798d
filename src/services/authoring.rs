//! Quiz authoring: an editable draft that is validated question by
//! question and then published into the catalog and the record store.

use std::collections::HashMap;
use std::sync::Mutex;

use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        draft::DraftView,
        question::{Question, QuestionDraft},
        quiz::{QuizMeta, QuizRecord, QuizSummary},
    },
    services::{
        catalog::{self, Catalog},
        records::AuthoredRecords,
    },
    utils::html::clean_html,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuizDraft {
    pub meta: QuizMeta,
    pub current: QuestionDraft,
    questions: Vec<Question>,
}

impl QuizDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Commits the in-progress question. On any validation failure the
    /// pending list is left untouched.
    pub fn add_question(&mut self) -> Result<&Question, AppError> {
        self.current.validate()?;

        let id = self.questions.len() as i64 + 1;
        let draft = std::mem::take(&mut self.current);
        self.questions.push(draft.into_question(id));
        Ok(&self.questions[self.questions.len() - 1])
    }

    /// Removes the question at `index` and renumbers the rest from 1.
    pub fn remove_question(&mut self, index: usize) -> Result<Question, AppError> {
        if index >= self.questions.len() {
            return Err(AppError::BadRequest(format!(
                "No question at position {}",
                index
            )));
        }

        let removed = self.questions.remove(index);
        for (q, id) in self.questions.iter_mut().zip(1..) {
            q.id = id;
        }
        Ok(removed)
    }

    /// Checks everything `publish` requires without touching storage.
    pub fn validate_for_publish(&self) -> Result<(), AppError> {
        self.meta.validate()?;
        if self.meta.title.trim().is_empty() {
            return Err(AppError::BadRequest("Please enter a quiz title".to_string()));
        }
        if self.questions.is_empty() {
            return Err(AppError::BadRequest(
                "Please add at least one question".to_string(),
            ));
        }
        Ok(())
    }

    /// Builds the full record that will be stored under `id`.
    fn to_record(&self, id: i64) -> QuizRecord {
        QuizRecord {
            summary: QuizSummary {
                id,
                title: clean_html(self.meta.title.trim()),
                description: clean_html(&self.meta.description),
                category: self.meta.category.clone(),
                question_count: self.questions.len(),
                duration: self.meta.duration,
                difficulty: self.meta.difficulty,
            },
            questions: self.questions.clone(),
        }
    }

    pub fn view(&self, id: Uuid) -> DraftView {
        DraftView {
            id,
            meta: self.meta.clone(),
            current_question: self.current.clone(),
            questions: self.questions.clone(),
        }
    }
}

/// Writes validated drafts into storage.
#[derive(Clone)]
pub struct Publisher {
    catalog: Catalog,
    records: AuthoredRecords,
}

impl Publisher {
    /// Publishes into `catalog`, keeping full records in the same store.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            records: AuthoredRecords::new(catalog.store()),
            catalog,
        }
    }

    /// Assigns the next catalog id, stores the full record, then lists the
    /// summary. Nothing is written if validation fails.
    ///
    /// The catalog write lock is held from id allocation to the append, so
    /// concurrent publishes get distinct ids.
    pub async fn publish(&self, draft: &QuizDraft) -> Result<QuizRecord, AppError> {
        draft.validate_for_publish()?;

        let writer = self.catalog.writer().await;
        // Listing seeds the defaults first, so authored ids never collide with them.
        let existing = writer.list().await?;
        let record = draft.to_record(catalog::next_id(&existing));

        self.records.insert(&record).await?;
        writer.append(record.summary.clone()).await?;
        drop(writer);

        tracing::info!(
            "Published quiz {} '{}' with {} questions",
            record.id(),
            record.summary.title,
            record.questions.len()
        );
        Ok(record)
    }

    /// Runs each question through a fresh draft, then publishes it.
    pub async fn create(
        &self,
        meta: QuizMeta,
        questions: Vec<QuestionDraft>,
    ) -> Result<QuizRecord, AppError> {
        let mut draft = QuizDraft {
            meta,
            ..QuizDraft::default()
        };
        for (idx, question) in questions.into_iter().enumerate() {
            draft.current = question;
            draft.add_question().map_err(|e| match e {
                AppError::BadRequest(msg) => {
                    AppError::BadRequest(format!("Question {}: {}", idx + 1, msg))
                }
                other => other,
            })?;
        }
        self.publish(&draft).await
    }
}

/// Open authoring drafts, keyed by id. Drafts are not persisted.
#[derive(Debug, Default)]
pub struct DraftBoard {
    drafts: Mutex<HashMap<Uuid, QuizDraft>>,
}

impl DraftBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&self) -> Result<(Uuid, QuizDraft), AppError> {
        let id = Uuid::new_v4();
        let draft = QuizDraft::new();
        self.lock()?.insert(id, draft.clone());
        Ok((id, draft))
    }

    /// Applies `f` to the draft and returns its outcome alongside the
    /// updated draft.
    pub fn update<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut QuizDraft) -> Result<T, AppError>,
    ) -> Result<(T, QuizDraft), AppError> {
        let mut drafts = self.lock()?;
        let draft = drafts
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Draft {} not found", id)))?;
        let out = f(draft)?;
        Ok((out, draft.clone()))
    }

    pub fn get(&self, id: Uuid) -> Result<QuizDraft, AppError> {
        self.update(id, |_| Ok(())).map(|(_, draft)| draft)
    }

    pub fn discard(&self, id: Uuid) -> Result<(), AppError> {
        self.lock()?.remove(&id);
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<Uuid, QuizDraft>>, AppError> {
        self.drafts
            .lock()
            .map_err(|_| AppError::InternalServerError("draft board lock poisoned".to_string()))
    }
}
