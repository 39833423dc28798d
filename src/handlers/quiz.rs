// src/handlers/quiz.rs

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;

use crate::{
    error::AppError,
    models::{
        draft::{CreateQuizRequest, PublishResponse},
        quiz::ListParams,
    },
    services::{
        authoring::Publisher,
        catalog::{ALL_CATEGORIES, Catalog, categories, filter, known_categories},
    },
};

/// Path of the catalog view clients return to after publishing.
pub const CATALOG_PATH: &str = "/quizzes";

/// Lists the catalog, seeding the defaults on first access.
///
/// * `q`: case-insensitive match on title or description.
/// * `category`: exact match; `all` or absent disables the filter.
pub async fn list_quizzes(
    State(catalog): State<Catalog>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let quizzes = catalog.list().await?;

    let term = params.q.as_deref().unwrap_or("");
    let category = params.category.as_deref().unwrap_or(ALL_CATEGORIES);

    Ok(Json(filter(&quizzes, term, category)))
}

/// Category selector values: what the catalog holds, and what authors may pick.
pub async fn list_categories(
    State(catalog): State<Catalog>,
) -> Result<impl IntoResponse, AppError> {
    let quizzes = catalog.list().await?;

    Ok(Json(json!({
        "present": categories(&quizzes),
        "known": known_categories(),
    })))
}

/// Authors and publishes a quiz in one request.
pub async fn create_quiz(
    State(publisher): State<Publisher>,
    Json(req): Json<CreateQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    let record = publisher.create(req.meta, req.questions).await?;

    Ok((
        StatusCode::CREATED,
        Json(PublishResponse {
            quiz: record.summary,
            redirect: CATALOG_PATH.to_string(),
        }),
    ))
}
