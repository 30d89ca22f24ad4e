// src/store.rs

use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::models::{
    category::Category,
    question::{CreateQuestionRequest, Question},
};

/// Data-access layer for questions and categories.
///
/// Wraps the connection pool so every operation goes through one explicitly
/// passed handle. SQLite serializes writers at this boundary; reads run
/// freely and observe the latest committed state.
#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All questions in insertion (id) order.
    pub async fn list_all(&self) -> sqlx::Result<Vec<Question>> {
        sqlx::query_as::<_, Question>(
            "SELECT id, question, answer, category, difficulty FROM questions ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
    }

    /// Questions whose text contains `term` as a case-insensitive substring.
    /// An empty term matches everything.
    pub async fn search(&self, term: &str) -> sqlx::Result<Vec<Question>> {
        sqlx::query_as::<_, Question>(
            "SELECT id, question, answer, category, difficulty FROM questions \
             WHERE question LIKE '%' || ? || '%' ORDER BY id",
        )
        .bind(term)
        .fetch_all(&self.pool)
        .await
    }

    /// Questions whose category display name contains `key`,
    /// case-insensitively ("Prog" matches "Programming").
    pub async fn list_by_category(&self, key: &str) -> sqlx::Result<Vec<Question>> {
        sqlx::query_as::<_, Question>(
            "SELECT q.id, q.question, q.answer, q.category, q.difficulty \
             FROM questions q JOIN categories c ON q.category = c.id \
             WHERE c.type LIKE '%' || ? || '%' ORDER BY q.id",
        )
        .bind(key)
        .fetch_all(&self.pool)
        .await
    }

    /// Questions belonging to the exact category id.
    pub async fn list_by_category_id(&self, category_id: i64) -> sqlx::Result<Vec<Question>> {
        sqlx::query_as::<_, Question>(
            "SELECT id, question, answer, category, difficulty FROM questions \
             WHERE category = ? ORDER BY id",
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn find_by_id(&self, id: i64) -> sqlx::Result<Option<Question>> {
        sqlx::query_as::<_, Question>(
            "SELECT id, question, answer, category, difficulty FROM questions WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Inserts a question and returns its store-assigned id.
    ///
    /// The schema rejects empty question/answer text, so a refused insert
    /// leaves no partial row behind. Ids are never reassigned after deletion
    /// (AUTOINCREMENT).
    pub async fn insert(&self, req: &CreateQuestionRequest) -> sqlx::Result<i64> {
        sqlx::query_scalar::<_, i64>(
            "INSERT INTO questions (question, answer, category, difficulty) \
             VALUES (?, ?, ?, ?) RETURNING id",
        )
        .bind(&req.question)
        .bind(&req.answer)
        .bind(req.category)
        .bind(req.difficulty)
        .fetch_one(&self.pool)
        .await
    }

    /// Deletes a question; reports whether a row was actually removed.
    pub async fn delete(&self, id: i64) -> sqlx::Result<bool> {
        let result = sqlx::query("DELETE FROM questions WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// All categories in id order, read fresh on every call.
    pub async fn list_categories(&self) -> sqlx::Result<Vec<Category>> {
        sqlx::query_as::<_, Category>("SELECT id, type FROM categories ORDER BY id")
            .fetch_all(&self.pool)
            .await
    }

    pub async fn find_category(&self, id: i64) -> sqlx::Result<Option<Category>> {
        sqlx::query_as::<_, Category>("SELECT id, type FROM categories WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Draws one question uniformly at random from the candidate pool:
    /// the questions inside `scope` (all of them when `None`) minus the
    /// `excluded` ids. Returns `None` once the pool is exhausted.
    pub async fn draw_unseen(
        &self,
        scope: Option<i64>,
        excluded: &[i64],
    ) -> sqlx::Result<Option<Question>> {
        let mut builder = QueryBuilder::<Sqlite>::new(
            "SELECT id, question, answer, category, difficulty FROM questions WHERE 1 = 1",
        );

        if let Some(category_id) = scope {
            builder.push(" AND category = ");
            builder.push_bind(category_id);
        }

        // NOT IN () is not valid SQL; skip the clause when nothing is excluded
        if !excluded.is_empty() {
            builder.push(" AND id NOT IN (");
            let mut separated = builder.separated(",");
            for id in excluded {
                separated.push_bind(*id);
            }
            separated.push_unseparated(")");
        }

        builder.push(" ORDER BY RANDOM() LIMIT 1");

        builder
            .build_query_as::<Question>()
            .fetch_optional(&self.pool)
            .await
    }
}
