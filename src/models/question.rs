// src/models/question.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

/// Represents the 'questions' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,

    /// The text of the question itself.
    pub question: String,

    /// The accepted answer text.
    pub answer: String,

    /// Category id; the display name lives in the category catalog.
    pub category: i64,

    /// Difficulty rating, conventionally 1 (easy) to 5 (hard).
    /// The range is a convention, not a constraint.
    pub difficulty: i64,
}

/// DTO for creating a new question.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuestionRequest {
    #[validate(length(min = 1, max = 1000))]
    pub question: String,
    #[validate(length(min = 1, max = 1000))]
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

/// DTO for the free-text question search.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub search_term: String,
}

/// Category scope declared by a quiz draw request. Id 0 means "any category".
#[derive(Debug, Default, Deserialize)]
pub struct QuizCategory {
    #[serde(default)]
    pub id: i64,
}

/// DTO for drawing the next quiz question.
///
/// Every field defaults on the wire: a bare POST draws from the full corpus
/// with nothing excluded.
#[derive(Debug, Default, Deserialize)]
pub struct PlayRequest {
    #[serde(default)]
    pub previous_questions: Vec<i64>,
    #[serde(default)]
    pub quiz_category: QuizCategory,
}
