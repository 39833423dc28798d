//! Quiz catalog: the list of summaries, seeded on first access.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use crate::{
    error::AppError,
    models::quiz::QuizSummary,
    services::seed,
    storage::{KeyValueStore, keys, load_json, save_json},
};

/// Category value that disables category filtering.
pub const ALL_CATEGORIES: &str = "all";

/// Category choices offered when authoring.
pub const KNOWN_CATEGORIES: [&str; 6] = [
    "General",
    "Programming",
    "Science",
    "History",
    "Mathematics",
    "Other",
];

/// Catalog handle. Clones share one write lock, so seeding and appends
/// from any clone are serialized.
#[derive(Clone)]
pub struct Catalog {
    store: Arc<dyn KeyValueStore>,
    writes: Arc<Mutex<()>>,
}

impl Catalog {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            writes: Arc::new(Mutex::new(())),
        }
    }

    pub fn store(&self) -> Arc<dyn KeyValueStore> {
        self.store.clone()
    }

    /// Returns the catalog, seeding and persisting the defaults on first use.
    pub async fn list(&self) -> Result<Vec<QuizSummary>, AppError> {
        if let Some(quizzes) = self.stored().await? {
            return Ok(quizzes);
        }
        self.writer().await.list().await
    }

    /// The persisted catalog as-is; `None` if it was never written.
    pub async fn stored(&self) -> Result<Option<Vec<QuizSummary>>, AppError> {
        load_json(self.store.as_ref(), keys::CATALOG).await
    }

    /// Looks a summary up in the stored catalog, then in the built-in one.
    /// Never seeds.
    pub async fn find(&self, id: i64) -> Result<Option<QuizSummary>, AppError> {
        let stored = self
            .stored()
            .await?
            .and_then(|quizzes| quizzes.into_iter().find(|q| q.id == id));
        Ok(stored.or_else(|| seed::builtin_summary(id)))
    }

    pub async fn append(&self, summary: QuizSummary) -> Result<(), AppError> {
        self.writer().await.append(summary).await
    }

    /// Takes the write lock. Everything done through the returned writer
    /// happens without other catalog writes in between.
    pub async fn writer(&self) -> CatalogWriter<'_> {
        CatalogWriter {
            store: self.store.as_ref(),
            _guard: self.writes.lock().await,
        }
    }
}

pub struct CatalogWriter<'a> {
    store: &'a dyn KeyValueStore,
    _guard: MutexGuard<'a, ()>,
}

impl CatalogWriter<'_> {
    /// Same as `Catalog::list`, under the held lock.
    pub async fn list(&self) -> Result<Vec<QuizSummary>, AppError> {
        if let Some(quizzes) = load_json(self.store, keys::CATALOG).await? {
            return Ok(quizzes);
        }

        let defaults = seed::default_catalog();
        save_json(self.store, keys::CATALOG, &defaults).await?;
        tracing::info!("Seeded catalog with {} default quizzes", defaults.len());
        Ok(defaults)
    }

    pub async fn append(&self, summary: QuizSummary) -> Result<(), AppError> {
        let mut quizzes = self.list().await?;
        quizzes.push(summary);
        save_json(self.store, keys::CATALOG, &quizzes).await
    }
}

/// Next catalog-wide id: one past the largest, or 1 for an empty catalog.
pub fn next_id(quizzes: &[QuizSummary]) -> i64 {
    quizzes.iter().map(|q| q.id).max().map_or(1, |max| max + 1)
}

/// Case-insensitive substring match of `term` on title or description,
/// intersected with an exact category match (`"all"` matches any).
pub fn filter(quizzes: &[QuizSummary], term: &str, category: &str) -> Vec<QuizSummary> {
    let needle = term.to_lowercase();
    quizzes
        .iter()
        .filter(|q| category == ALL_CATEGORIES || q.category == category)
        .filter(|q| {
            needle.is_empty()
                || q.title.to_lowercase().contains(&needle)
                || q.description.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

pub fn known_categories() -> &'static [&'static str] {
    &KNOWN_CATEGORIES
}

/// `"all"` followed by each category present, in first-seen order.
pub fn categories(quizzes: &[QuizSummary]) -> Vec<String> {
    let mut out = vec![ALL_CATEGORIES.to_string()];
    for q in quizzes {
        if !out.contains(&q.category) {
            out.push(q.category.clone());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::quiz::Difficulty, storage::MemoryStore};

    fn summary(id: i64, title: &str, description: &str, category: &str) -> QuizSummary {
        QuizSummary {
            id,
            title: title.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            question_count: 1,
            duration: 5,
            difficulty: Difficulty::Easy,
        }
    }

    fn sample() -> Vec<QuizSummary> {
        vec![
            summary(1, "JavaScript Fundamentals", "A quiz on JavaScript basics", "Programming"),
            summary(2, "History Quiz", "Dates and empires", "History"),
        ]
    }

    #[test]
    fn test_filter_by_term_matches_title_or_description() {
        let quizzes = sample();
        let hits = filter(&quizzes, "QUIZ", ALL_CATEGORIES);
        assert_eq!(hits.len(), 2);

        let hits = filter(&quizzes, "empires", ALL_CATEGORIES);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "History Quiz");
    }

    #[test]
    fn test_filter_by_category_only() {
        let quizzes = sample();
        let hits = filter(&quizzes, "", "History");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "History Quiz");
    }

    #[test]
    fn test_filter_intersects_term_and_category() {
        let quizzes = sample();
        assert!(filter(&quizzes, "javascript", "History").is_empty());
        assert!(filter(&quizzes, "", "Cooking").is_empty());
        // Input untouched.
        assert_eq!(quizzes.len(), 2);
    }

    #[test]
    fn test_next_id() {
        assert_eq!(next_id(&[]), 1);
        let quizzes = vec![summary(3, "a", "", "x"), summary(10, "b", "", "x")];
        assert_eq!(next_id(&quizzes), 11);
    }

    #[test]
    fn test_categories_in_first_seen_order() {
        let mut quizzes = sample();
        quizzes.push(summary(3, "More code", "", "Programming"));
        assert_eq!(categories(&quizzes), vec!["all", "Programming", "History"]);
    }

    #[tokio::test]
    async fn test_list_seeds_once_and_persists() {
        let store = Arc::new(MemoryStore::new());
        let catalog = Catalog::new(store.clone());

        assert!(catalog.stored().await.unwrap().is_none());
        let first = catalog.list().await.unwrap();
        assert_eq!(first.len(), 6);
        assert!(store.get(keys::CATALOG).await.unwrap().is_some());

        catalog.append(summary(7, "Mine", "", "Other")).await.unwrap();
        let second = catalog.list().await.unwrap();
        assert_eq!(second.len(), 7);
        assert_eq!(second[6].id, 7);
    }

    #[tokio::test]
    async fn test_find_falls_back_to_builtin_without_seeding() {
        let store = Arc::new(MemoryStore::new());
        let catalog = Catalog::new(store.clone());

        let found = catalog.find(5).await.unwrap().unwrap();
        assert_eq!(found.title, "History Quiz");
        assert!(catalog.find(42).await.unwrap().is_none());
        assert!(store.is_empty().await);
    }
}
