//! src/storage/mod.rs
//!
//! The persistence port. Every component reads and writes through
//! `KeyValueStore`, a flat string-to-string namespace with last-write-wins
//! semantics. Values are JSON documents.

pub mod memory;
pub mod sqlite;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};

use crate::error::AppError;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Well-known keys of the flat namespace.
pub mod keys {
    /// Ordered list of quiz summaries.
    pub const CATALOG: &str = "quizzes";

    /// Map of quiz id (as string) to full authored record.
    pub const FULL_RECORDS: &str = "allQuizzesData";

    /// Most recent result for a quiz.
    pub fn result(quiz_id: i64) -> String {
        format!("quizResults_{}", quiz_id)
    }
}

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), AppError>;

    async fn remove(&self, key: &str) -> Result<(), AppError>;
}

/// Reads and decodes a JSON value. `None` when the key is absent.
pub async fn load_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, AppError> {
    match store.get(key).await? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Encodes a value as JSON and writes it under `key`.
pub async fn save_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), AppError> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw).await
}
