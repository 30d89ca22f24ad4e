// src/handlers/categories.rs

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};

use crate::{
    error::AppError,
    handlers::questions::PageParams,
    pagination::{QUESTIONS_PER_PAGE, paginate},
    store::Store,
};

/// Lists every category as an `{id: display name}` map.
/// Built fresh from the store on each call; never fails on an empty catalog.
pub async fn get_categories(State(store): State<Store>) -> Result<impl IntoResponse, AppError> {
    let categories = store.list_categories().await?;

    let mut formatted_categories = HashMap::new();
    for category in categories {
        formatted_categories.insert(category.id.to_string(), category.category_type);
    }

    Ok(Json(serde_json::json!({
        "success": true,
        "categories": formatted_categories,
    })))
}

/// Lists the questions whose category display name matches `key`
/// (case-insensitive, partial: "Prog" matches "Programming").
///
/// Zero matches — unknown category included — is a client error, unlike the
/// main listing's empty-page policy.
pub async fn questions_by_category(
    State(store): State<Store>,
    Path(key): Path<String>,
    Query(params): Query<PageParams>,
) -> Result<impl IntoResponse, AppError> {
    let questions = store.list_by_category(&key).await?;

    if questions.is_empty() {
        return Err(AppError::Validation(format!(
            "no questions in category '{}'",
            key
        )));
    }

    let page = paginate(&questions, params.page(), QUESTIONS_PER_PAGE);

    Ok(Json(serde_json::json!({
        "success": true,
        "questions": page,
        "total_questions": questions.len(),
    })))
}
