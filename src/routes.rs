// src/routes.rs

use axum::{
    Router,
    http::Method,
    routing::{delete, get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    error::AppError,
    handlers::{categories, questions, quiz},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (categories, questions, quizzes).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (Store + Config).
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any);

    let category_routes = Router::new()
        .route("/", get(categories::get_categories))
        .route("/{key}/questions", get(categories::questions_by_category));

    let question_routes = Router::new()
        .route(
            "/",
            get(questions::list_questions).post(questions::create_question),
        )
        .route("/{id}", delete(questions::delete_question))
        .route("/search", post(questions::search_questions));

    let quiz_routes = Router::new().route("/", post(quiz::play));

    Router::new()
        .nest("/api/categories", category_routes)
        .nest("/api/questions", question_routes)
        .nest("/api/quizzes", quiz_routes)
        // Unmatched paths and wrong methods still answer the structured body
        .fallback(fallback_not_found)
        .method_not_allowed_fallback(fallback_method_not_allowed)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn fallback_not_found() -> AppError {
    AppError::NotFound("no such route".to_string())
}

async fn fallback_method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
