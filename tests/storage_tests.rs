// tests/storage_tests.rs

use std::sync::Arc;

use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use quiz_system::{
    config::Config,
    routes,
    state::AppState,
    storage::{KeyValueStore, SqliteStore, keys},
};
use serde_json::{Value, json};
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

async fn sqlite_store() -> Arc<dyn KeyValueStore> {
    // One connection, so every query sees the same in-memory database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory sqlite");

    let store = SqliteStore::new(pool);
    store.run_migrations().await.expect("Failed to migrate database");
    Arc::new(store)
}

async fn call(app: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn catalog_is_persisted_on_first_listing() {
    // Arrange
    let store = sqlite_store().await;
    let app = routes::create_router(AppState::new(store.clone(), &Config::default()));
    assert!(store.get(keys::CATALOG).await.unwrap().is_none());

    // Act
    let (status, body) = call(app, get("/api/quizzes")).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 6);
    let stored: Value = serde_json::from_str(&store.get(keys::CATALOG).await.unwrap().unwrap())
        .unwrap();
    assert_eq!(stored, body);
}

#[tokio::test]
async fn published_quiz_and_result_survive_a_restart() {
    // Arrange
    let store = sqlite_store().await;
    let app = routes::create_router(AppState::new(store.clone(), &Config::default()));

    let (status, created) = call(
        app.clone(),
        post_json(
            "/api/quizzes",
            json!({
                "title": "Primes",
                "category": "Mathematics",
                "duration": 2,
                "questions": [{
                    "question": "Smallest prime?",
                    "options": ["0", "1", "2", "3"],
                    "correctAnswer": "2"
                }]
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let quiz_id = created["quiz"]["id"].as_i64().unwrap();
    assert_eq!(quiz_id, 7);

    let (_, session) = call(
        app.clone(),
        post_json("/api/sessions", json!({ "quizId": quiz_id })),
    )
    .await;
    let session_id = session["sessionId"].as_str().unwrap().to_string();

    let answer = Request::builder()
        .method("PUT")
        .uri(format!("/api/sessions/{}/answers", session_id))
        .header("content-type", "application/json")
        .body(Body::from(json!({ "questionId": 1, "option": "2" }).to_string()))
        .unwrap();
    let (status, _) = call(app.clone(), answer).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = call(
        app,
        post_json(&format!("/api/sessions/{}/submit", session_id), json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Act: a fresh app on the same database
    let restarted = routes::create_router(AppState::new(store, &Config::default()));
    let (list_status, list) = call(restarted.clone(), get("/api/quizzes?q=primes")).await;
    let (result_status, result) =
        call(restarted, get(&format!("/api/results/{}", quiz_id))).await;

    // Assert
    assert_eq!(list_status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["questionCount"], 1);

    assert_eq!(result_status, StatusCode::OK);
    assert_eq!(result["percentage"], 100);
    assert_eq!(result["severity"], "good");
    assert_eq!(result["color"], "#4caf50");
    assert_eq!(result["message"], "Outstanding!");
}

#[tokio::test]
async fn corrupt_catalog_is_a_server_error() {
    // Arrange
    let store = sqlite_store().await;
    store.set(keys::CATALOG, "not json").await.unwrap();
    let app = routes::create_router(AppState::new(store, &Config::default()));

    // Act
    let (status, body) = call(app, get("/api/quizzes")).await;

    // Assert
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal Server Error");
}
