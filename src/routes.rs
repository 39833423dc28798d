// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{delete, get, post, put},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{draft, quiz, results, session},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (quizzes, drafts, sessions, results).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (store-backed services and config).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        HeaderValue::from_static("http://localhost:3000"),
        HeaderValue::from_static("http://127.0.0.1:3000"),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    let quiz_routes = Router::new()
        .route("/", get(quiz::list_quizzes).post(quiz::create_quiz))
        .route("/categories", get(quiz::list_categories));

    let draft_routes = Router::new()
        .route("/", post(draft::create_draft))
        .route("/{id}", get(draft::get_draft).put(draft::update_meta))
        .route("/{id}/question", put(draft::update_question))
        .route("/{id}/questions", post(draft::add_question))
        .route("/{id}/questions/{index}", delete(draft::remove_question))
        .route("/{id}/publish", post(draft::publish_draft));

    let session_routes = Router::new()
        .route("/", post(session::start_session))
        .route("/{id}", get(session::get_session))
        .route("/{id}/answers", put(session::record_answer))
        .route("/{id}/next", post(session::next_question))
        .route("/{id}/previous", post(session::previous_question))
        .route("/{id}/jump", post(session::jump_to_question))
        .route("/{id}/submit", post(session::submit_session));

    let result_routes = Router::new().route("/{quiz_id}", get(results::get_result));

    Router::new()
        .nest("/api/quizzes", quiz_routes)
        .nest("/api/drafts", draft_routes)
        .nest("/api/sessions", session_routes)
        .nest("/api/results", result_routes)
        // Global Middleware (applied from outside in)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
