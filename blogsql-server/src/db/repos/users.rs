//! User repository
//!
//! - active: status filter, ordered by name
//! - get: single row by id
//! - create: INSERT ... RETURNING, unique email enforced by the database

use sqlx::PgPool;

use super::DbError;
use crate::models::{NewUser, User, UserSummary, DEFAULT_STATUS};

/// User repository
pub struct UserRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Users whose status is `active`, name ascending.
    pub async fn active(&self) -> Result<Vec<UserSummary>, DbError> {
        let users = sqlx::query_as::<_, UserSummary>(
            r#"
            SELECT id, name, email, age
            FROM users
            WHERE status = $1
            ORDER BY name ASC
            "#,
        )
        .bind(DEFAULT_STATUS)
        .fetch_all(self.pool)
        .await?;

        Ok(users)
    }

    /// Get a single user by id.
    pub async fn get(&self, id: i32) -> Result<Option<User>, DbError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, name, age, status, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Insert a user and return the stored row.
    ///
    /// A duplicate email surfaces as [`DbError::UniqueViolation`]; no
    /// check-then-insert.
    pub async fn create(&self, user: &NewUser) -> Result<User, DbError> {
        let created = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, name, age, status)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, name, age, status, created_at
            "#,
        )
        .bind(&user.email)
        .bind(&user.name)
        .bind(user.age)
        .bind(&user.status)
        .fetch_one(self.pool)
        .await?;

        Ok(created)
    }
}
