//! Post repository - partial update and delete

use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::{PgPool, Postgres};

use super::DbError;
use crate::models::{ColumnValue, Post, PostUpdate};

/// Post repository
pub struct PostRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> PostRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Apply a partial update, returning the updated row if the id exists.
    ///
    /// Values are bound in placeholder order, followed by the id.
    pub async fn update(&self, id: i32, update: &PostUpdate) -> Result<Option<Post>, DbError> {
        let sql = update.sql();
        let query = update
            .assignments()
            .iter()
            .fold(sqlx::query_as::<_, Post>(&sql), |q, a| bind_value(q, &a.value));

        let post = query.bind(id).fetch_optional(self.pool).await?;
        Ok(post)
    }

    /// Existence check used before delete so a missing row reports 404.
    pub async fn exists(&self, id: i32) -> Result<bool, DbError> {
        let row: Option<(i32,)> = sqlx::query_as("SELECT id FROM posts WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(row.is_some())
    }

    /// Delete a post by id. Returns the number of rows removed.
    pub async fn delete(&self, id: i32) -> Result<u64, DbError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

fn bind_value<'q>(
    query: QueryAs<'q, Postgres, Post, PgArguments>,
    value: &ColumnValue,
) -> QueryAs<'q, Postgres, Post, PgArguments> {
    match value {
        ColumnValue::Text(s) => query.bind(s.clone()),
        ColumnValue::Bool(b) => query.bind(*b),
    }
}
