// tests/quiz_tests.rs

use std::collections::HashSet;

use sqlx::sqlite::SqlitePoolOptions;
use trivia_backend::config::Config;
use trivia_backend::models::question::CreateQuestionRequest;
use trivia_backend::routes;
use trivia_backend::state::AppState;
use trivia_backend::store::Store;

/// A store over a fresh in-memory database with migrations applied.
async fn fresh_store() -> Store {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory SQLite");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate database");

    Store::new(pool)
}

async fn spawn_app() -> (String, Store) {
    let store = fresh_store().await;

    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        rust_log: "error".to_string(),
    };

    let state = AppState {
        store: store.clone(),
        config,
    };

    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (address, store)
}

async fn seed_questions(store: &Store, count: usize, category: i64) -> Vec<i64> {
    let mut ids = Vec::new();
    for i in 0..count {
        let req = CreateQuestionRequest {
            question: format!("Question {}", i),
            answer: format!("Answer {}", i),
            category,
            difficulty: (i % 5 + 1) as i64,
        };
        ids.push(store.insert(&req).await.expect("Failed to seed question"));
    }
    ids
}

#[tokio::test]
async fn draw_never_repeats_until_pool_is_exhausted() {
    let store = fresh_store().await;
    seed_questions(&store, 1000, 1).await;

    let mut seen = HashSet::new();
    let mut previous: Vec<i64> = Vec::new();

    for _ in 0..1000 {
        let question = store
            .draw_unseen(None, &previous)
            .await
            .unwrap()
            .expect("pool exhausted too early");
        assert!(seen.insert(question.id), "question {} drawn twice", question.id);
        previous.push(question.id);
    }

    // The 1001st draw finds nothing left; it must signal, not fail.
    assert!(store.draw_unseen(None, &previous).await.unwrap().is_none());
}

#[tokio::test]
async fn draw_stays_inside_the_requested_scope() {
    let store = fresh_store().await;
    let science = seed_questions(&store, 10, 1).await;
    seed_questions(&store, 10, 2).await;

    let mut previous: Vec<i64> = Vec::new();
    for _ in 0..10 {
        let question = store
            .draw_unseen(Some(1), &previous)
            .await
            .unwrap()
            .expect("scoped pool exhausted too early");
        assert_eq!(question.category, 1);
        assert!(science.contains(&question.id));
        previous.push(question.id);
    }

    // Scope 1 is drained even though scope 2 still has questions
    assert!(store.draw_unseen(Some(1), &previous).await.unwrap().is_none());
    assert!(store.draw_unseen(Some(2), &previous).await.unwrap().is_some());
    assert_eq!(store.list_by_category_id(2).await.unwrap().len(), 10);
}

#[tokio::test]
async fn draw_on_empty_store_signals_exhaustion() {
    let store = fresh_store().await;

    assert!(store.draw_unseen(None, &[]).await.unwrap().is_none());
    assert!(store.draw_unseen(Some(1), &[]).await.unwrap().is_none());
}

#[tokio::test]
async fn play_draws_unseen_then_signals_exhaustion() {
    let (address, store) = spawn_app().await;
    seed_questions(&store, 5, 1).await;
    let client = reqwest::Client::new();

    let mut previous: Vec<i64> = Vec::new();
    for _ in 0..5 {
        let response = client
            .post(format!("{}/api/quizzes", address))
            .json(&serde_json::json!({
                "previous_questions": previous,
                "quiz_category": {"id": 0}
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status().as_u16(), 200);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["success"], true);
        let id = body["question"]["id"].as_i64().expect("question expected");
        assert!(!previous.contains(&id), "question {} served twice", id);
        previous.push(id);
    }

    // Exhausted pool: terminal signal, not an error
    let response = client
        .post(format!("{}/api/quizzes", address))
        .json(&serde_json::json!({
            "previous_questions": previous,
            "quiz_category": {"id": 0}
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert!(body["question"].is_null());
}

#[tokio::test]
async fn play_with_unknown_category_is_422() {
    let (address, store) = spawn_app().await;
    seed_questions(&store, 3, 1).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/quizzes", address))
        .json(&serde_json::json!({
            "previous_questions": [],
            "quiz_category": {"id": 99}
        }))
        .send()
        .await
        .expect("Failed to execute request");

    // Invalid scope is distinguishable from an exhausted pool (which is a 200)
    assert_eq!(response.status().as_u16(), 422);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], 422);
    assert_eq!(body["message"], "unprocessable");
}

#[tokio::test]
async fn play_scoped_draw_only_serves_that_category() {
    let (address, store) = spawn_app().await;
    seed_questions(&store, 3, 1).await;
    seed_questions(&store, 3, 2).await;
    let client = reqwest::Client::new();

    let mut previous: Vec<i64> = Vec::new();
    for _ in 0..3 {
        let body: serde_json::Value = client
            .post(format!("{}/api/quizzes", address))
            .json(&serde_json::json!({
                "previous_questions": previous,
                "quiz_category": {"id": 2}
            }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(body["question"]["category"], 2);
        previous.push(body["question"]["id"].as_i64().unwrap());
    }

    let body: serde_json::Value = client
        .post(format!("{}/api/quizzes", address))
        .json(&serde_json::json!({
            "previous_questions": previous,
            "quiz_category": {"id": 2}
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(body["question"].is_null());
}

#[tokio::test]
async fn bare_play_request_draws_from_full_corpus() {
    let (address, store) = spawn_app().await;
    seed_questions(&store, 1, 1).await;
    let client = reqwest::Client::new();

    // No body at all: any category, nothing excluded
    let response = client
        .post(format!("{}/api/quizzes", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert!(body["question"]["id"].as_i64().is_some());
}
