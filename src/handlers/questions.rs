// src/handlers/questions.rs

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use validator::Validate;

use crate::{
    error::AppError,
    models::question::{CreateQuestionRequest, SearchRequest},
    pagination::{QUESTIONS_PER_PAGE, paginate},
    store::Store,
};

/// Query parameters for paginated listings.
#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub page: Option<u32>,
}

impl PageParams {
    pub fn page(&self) -> usize {
        self.page.unwrap_or(1) as usize
    }
}

/// Lists a page of questions together with the category catalog.
///
/// An empty page is reported as NotFound: page 1 of an empty store and page
/// 500 of a full one are indistinguishable on purpose.
pub async fn list_questions(
    State(store): State<Store>,
    Query(params): Query<PageParams>,
) -> Result<impl IntoResponse, AppError> {
    let questions = store.list_all().await?;
    let page = paginate(&questions, params.page(), QUESTIONS_PER_PAGE);

    if page.is_empty() {
        return Err(AppError::NotFound(format!(
            "no questions on page {}",
            params.page()
        )));
    }

    let categories = store.list_categories().await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "questions": page,
        "total_questions": questions.len(),
        "categories": categories,
    })))
}

/// Creates a question and returns the refreshed listing.
///
/// The category must resolve through the catalog; questions reference
/// categories by id only.
pub async fn create_question(
    State(store): State<Store>,
    Query(params): Query<PageParams>,
    payload: Result<Json<CreateQuestionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload.map_err(|e| AppError::Validation(e.to_string()))?;

    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::Validation(validation_errors.to_string()));
    }

    if store.find_category(payload.category).await?.is_none() {
        return Err(AppError::Validation(format!(
            "unknown category id {}",
            payload.category
        )));
    }

    let id = store.insert(&payload).await?;
    tracing::info!("created question {}", id);

    let questions = store.list_all().await?;
    let page = paginate(&questions, params.page(), QUESTIONS_PER_PAGE);

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "success": true,
            "created": id,
            "questions": page,
            "total_questions": questions.len(),
        })),
    ))
}

/// Deletes a question by id and returns the refreshed listing.
pub async fn delete_question(
    State(store): State<Store>,
    Path(id): Path<i64>,
    Query(params): Query<PageParams>,
) -> Result<impl IntoResponse, AppError> {
    store
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("question {} does not exist", id)))?;

    if !store.delete(id).await? {
        // Raced with another deleter
        return Err(AppError::NotFound(format!("question {} does not exist", id)));
    }
    tracing::info!("deleted question {}", id);

    let questions = store.list_all().await?;
    let page = paginate(&questions, params.page(), QUESTIONS_PER_PAGE);

    Ok(Json(serde_json::json!({
        "success": true,
        "deleted": id,
        "questions": page,
        "total_questions": questions.len(),
    })))
}

/// Searches question text for a case-insensitive substring.
/// Zero matches is a client error, unlike the listing's empty-page policy.
pub async fn search_questions(
    State(store): State<Store>,
    Query(params): Query<PageParams>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload.map_err(|e| AppError::Validation(e.to_string()))?;

    let questions = store.search(&payload.search_term).await?;

    if questions.is_empty() {
        return Err(AppError::Validation(format!(
            "no questions match '{}'",
            payload.search_term
        )));
    }

    let page = paginate(&questions, params.page(), QUESTIONS_PER_PAGE);

    Ok(Json(serde_json::json!({
        "success": true,
        "questions": page,
        "total_questions": questions.len(),
    })))
}
