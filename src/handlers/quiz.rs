// src/handlers/quiz.rs

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};

use crate::{error::AppError, models::question::PlayRequest, store::Store};

/// Draws one random question the quiz session has not seen yet.
///
/// The caller carries the session state: the ids served so far plus the
/// category scope (0 = any category). An exhausted pool answers with
/// `"question": null` so clients can end the quiz; an unknown category id is
/// rejected instead. The two outcomes are distinguishable by status code.
pub async fn play(
    State(store): State<Store>,
    payload: Result<Json<PlayRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    // A bare POST means "any category, nothing excluded"
    let req = payload.map(|Json(req)| req).unwrap_or_default();

    let scope = match req.quiz_category.id {
        0 => None,
        id => {
            store
                .find_category(id)
                .await?
                .ok_or_else(|| AppError::Validation(format!("unknown quiz category {}", id)))?;
            Some(id)
        }
    };

    let question = store.draw_unseen(scope, &req.previous_questions).await?;

    if question.is_none() {
        tracing::debug!("quiz pool exhausted for scope {:?}", scope);
    }

    Ok(Json(serde_json::json!({
        "success": true,
        "question": question,
    })))
}
