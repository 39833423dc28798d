use std::time::Duration;

use async_trait::async_trait;
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};

use super::KeyValueStore;
use crate::error::AppError;

/// SQLite-backed store: one row per key in `kv_entries`.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    pub async fn run_migrations(&self) -> Result<(), AppError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM kv_entries WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to read key '{}': {:?}", key, e);
                AppError::from(e)
            })?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO kv_entries (key, value)
            VALUES (?, ?)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = CURRENT_TIMESTAMP
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to write key '{}': {:?}", key, e);
            AppError::from(e)
        })?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM kv_entries WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_store() -> SqliteStore {
        // A single connection keeps every query on the same in-memory database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to open in-memory sqlite");
        let store = SqliteStore::new(pool);
        store.run_migrations().await.expect("Failed to migrate");
        store
    }

    #[tokio::test]
    async fn test_upsert_and_remove() {
        let store = memory_store().await;

        assert!(store.get("quizzes").await.unwrap().is_none());

        store.set("quizzes", "[]").await.unwrap();
        store.set("quizzes", "[1]").await.unwrap();
        assert_eq!(store.get("quizzes").await.unwrap().as_deref(), Some("[1]"));

        store.remove("quizzes").await.unwrap();
        assert!(store.get("quizzes").await.unwrap().is_none());
    }
}
