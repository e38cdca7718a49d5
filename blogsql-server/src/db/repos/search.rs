//! Search repository - range filter and case-insensitive text search

use sqlx::PgPool;

use super::DbError;
use crate::models::{AgeRange, PostMatch, SearchTerm, UserSummary, SEARCH_LIMIT};

/// Search repository
pub struct SearchRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> SearchRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Users with `min <= age <= max`, oldest first.
    pub async fn users_by_age(&self, range: AgeRange) -> Result<Vec<UserSummary>, DbError> {
        let users = sqlx::query_as::<_, UserSummary>(
            r#"
            SELECT id, name, email, age
            FROM users
            WHERE age >= $1 AND age <= $2
            ORDER BY age DESC
            "#,
        )
        .bind(range.min())
        .bind(range.max())
        .fetch_all(self.pool)
        .await?;

        Ok(users)
    }

    /// Top posts whose title or content contains the term, by views.
    pub async fn posts(&self, term: &SearchTerm) -> Result<Vec<PostMatch>, DbError> {
        let posts = sqlx::query_as::<_, PostMatch>(
            r#"
            SELECT id, title, content, views
            FROM posts
            WHERE title ILIKE $1 OR content ILIKE $1
            ORDER BY views DESC
            LIMIT $2
            "#,
        )
        .bind(term.pattern())
        .bind(SEARCH_LIMIT)
        .fetch_all(self.pool)
        .await?;

        Ok(posts)
    }
}
