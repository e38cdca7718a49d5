//! Persistence seam used by the HTTP handlers
//!
//! Handlers only see [`BlogStore`]; production wires in [`PgStore`], tests
//! substitute an in-memory fake.

use async_trait::async_trait;
use sqlx::PgPool;

use super::repos::{DbError, PostRepo, RelationRepo, SearchRepo, UserRepo};
use crate::models::{
    AgeRange, NewUser, Post, PostDetails, PostMatch, PostUpdate, PostWithAuthor, SearchTerm, User,
    UserActivity, UserSummary,
};

/// Every query the API issues, one method per statement.
#[async_trait]
pub trait BlogStore: Send + Sync + 'static {
    /// Round-trip check for `/health`.
    async fn ping(&self) -> Result<(), DbError>;

    async fn active_users(&self) -> Result<Vec<UserSummary>, DbError>;

    async fn find_user(&self, id: i32) -> Result<Option<User>, DbError>;

    async fn insert_user(&self, user: &NewUser) -> Result<User, DbError>;

    async fn update_post(&self, id: i32, update: &PostUpdate) -> Result<Option<Post>, DbError>;

    async fn post_exists(&self, id: i32) -> Result<bool, DbError>;

    async fn delete_post(&self, id: i32) -> Result<u64, DbError>;

    async fn users_by_age(&self, range: AgeRange) -> Result<Vec<UserSummary>, DbError>;

    async fn search_posts(&self, term: &SearchTerm) -> Result<Vec<PostMatch>, DbError>;

    async fn published_posts_with_author(&self) -> Result<Vec<PostWithAuthor>, DbError>;

    async fn user_activity(&self, id: i32) -> Result<Option<UserActivity>, DbError>;

    async fn post_details(&self, id: i32) -> Result<Option<PostDetails>, DbError>;
}

/// Postgres-backed store over a shared pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl BlogStore for PgStore {
    async fn ping(&self) -> Result<(), DbError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn active_users(&self) -> Result<Vec<UserSummary>, DbError> {
        UserRepo::new(&self.pool).active().await
    }

    async fn find_user(&self, id: i32) -> Result<Option<User>, DbError> {
        UserRepo::new(&self.pool).get(id).await
    }

    async fn insert_user(&self, user: &NewUser) -> Result<User, DbError> {
        UserRepo::new(&self.pool).create(user).await
    }

    async fn update_post(&self, id: i32, update: &PostUpdate) -> Result<Option<Post>, DbError> {
        PostRepo::new(&self.pool).update(id, update).await
    }

    async fn post_exists(&self, id: i32) -> Result<bool, DbError> {
        PostRepo::new(&self.pool).exists(id).await
    }

    async fn delete_post(&self, id: i32) -> Result<u64, DbError> {
        PostRepo::new(&self.pool).delete(id).await
    }

    async fn users_by_age(&self, range: AgeRange) -> Result<Vec<UserSummary>, DbError> {
        SearchRepo::new(&self.pool).users_by_age(range).await
    }

    async fn search_posts(&self, term: &SearchTerm) -> Result<Vec<PostMatch>, DbError> {
        SearchRepo::new(&self.pool).posts(term).await
    }

    async fn published_posts_with_author(&self) -> Result<Vec<PostWithAuthor>, DbError> {
        RelationRepo::new(&self.pool).published_posts_with_author().await
    }

    async fn user_activity(&self, id: i32) -> Result<Option<UserActivity>, DbError> {
        RelationRepo::new(&self.pool).user_activity(id).await
    }

    async fn post_details(&self, id: i32) -> Result<Option<PostDetails>, DbError> {
        RelationRepo::new(&self.pool).post_details(id).await
    }
}
