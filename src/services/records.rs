//! Full quiz records and the resolution of a quiz id to one.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    error::AppError,
    models::quiz::QuizRecord,
    services::{catalog::Catalog, seed},
    storage::{KeyValueStore, keys, load_json, save_json},
};

/// One place a full record may come from.
#[async_trait]
pub trait RecordSource: Send + Sync {
    fn name(&self) -> &'static str;

    async fn lookup(&self, quiz_id: i64) -> Result<Option<QuizRecord>, AppError>;
}

/// Records written by the authoring flow, under `allQuizzesData`.
#[derive(Clone)]
pub struct AuthoredRecords {
    store: Arc<dyn KeyValueStore>,
}

impl AuthoredRecords {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    async fn load_all(&self) -> Result<BTreeMap<String, QuizRecord>, AppError> {
        Ok(load_json(self.store.as_ref(), keys::FULL_RECORDS)
            .await?
            .unwrap_or_default())
    }

    pub async fn insert(&self, record: &QuizRecord) -> Result<(), AppError> {
        let mut all = self.load_all().await?;
        all.insert(record.id().to_string(), record.clone());
        save_json(self.store.as_ref(), keys::FULL_RECORDS, &all).await
    }
}

#[async_trait]
impl RecordSource for AuthoredRecords {
    fn name(&self) -> &'static str {
        "authored"
    }

    async fn lookup(&self, quiz_id: i64) -> Result<Option<QuizRecord>, AppError> {
        Ok(self.load_all().await?.remove(&quiz_id.to_string()))
    }
}

/// The fixed seed table.
pub struct BuiltinRecords;

#[async_trait]
impl RecordSource for BuiltinRecords {
    fn name(&self) -> &'static str {
        "builtin"
    }

    async fn lookup(&self, quiz_id: i64) -> Result<Option<QuizRecord>, AppError> {
        Ok(seed::builtin_record(quiz_id))
    }
}

/// Resolves a quiz id: the id must be listed (stored or built-in catalog),
/// then the sources are tried in order and the first hit wins.
pub struct QuizResolver {
    catalog: Catalog,
    sources: Vec<Box<dyn RecordSource>>,
}

impl QuizResolver {
    /// Authored records take precedence over built-in ones.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_sources(
            Catalog::new(store.clone()),
            vec![
                Box::new(AuthoredRecords::new(store)) as Box<dyn RecordSource>,
                Box::new(BuiltinRecords),
            ],
        )
    }

    pub fn with_sources(catalog: Catalog, sources: Vec<Box<dyn RecordSource>>) -> Self {
        Self { catalog, sources }
    }

    pub async fn resolve(&self, quiz_id: i64) -> Result<QuizRecord, AppError> {
        if self.catalog.find(quiz_id).await?.is_none() {
            tracing::warn!("Quiz {} is not in the catalog", quiz_id);
            return Err(AppError::NotFound(format!("Quiz {} not found", quiz_id)));
        }

        for source in &self.sources {
            if let Some(record) = source.lookup(quiz_id).await? {
                tracing::debug!("Quiz {} resolved from {} records", quiz_id, source.name());
                return Ok(record);
            }
        }

        tracing::warn!("Quiz {} is listed but has no full record", quiz_id);
        Err(AppError::NotFound(format!(
            "Questions for quiz {} not found",
            quiz_id
        )))
    }
}
