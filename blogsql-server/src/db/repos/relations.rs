//! Relation repository - joins and nested aggregation
//!
//! Aggregates are built in SQL with `json_agg` so each endpoint is a
//! single round trip. `COALESCE(..., '[]')` with `FILTER (WHERE child.id IS
//! NOT NULL)` keeps empty LEFT JOINs from producing `[null]`.

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};

use super::DbError;
use crate::models::{
    Author, CommentBrief, CommentDetail, PostBrief, PostDetails, PostWithAuthor, UserActivity,
};

/// Relation repository
pub struct RelationRepo<'a> {
    pool: &'a PgPool,
}

#[derive(FromRow)]
struct UserActivityRow {
    id: i32,
    name: String,
    email: String,
    age: Option<i32>,
    status: String,
    created_at: DateTime<Utc>,
    posts: Json<Vec<PostBrief>>,
    comments: Json<Vec<CommentBrief>>,
}

impl From<UserActivityRow> for UserActivity {
    fn from(r: UserActivityRow) -> Self {
        let mut activity = Self {
            id: r.id,
            name: r.name,
            email: r.email,
            age: r.age,
            status: r.status,
            created_at: r.created_at,
            posts: r.posts.0,
            comments: r.comments.0,
        };
        activity.sort_children();
        activity
    }
}

#[derive(FromRow)]
struct PostDetailsRow {
    id: i32,
    title: String,
    content: Option<String>,
    views: i32,
    published: bool,
    created_at: DateTime<Utc>,
    author: Json<Author>,
    comments: Json<Vec<CommentDetail>>,
}

impl From<PostDetailsRow> for PostDetails {
    fn from(r: PostDetailsRow) -> Self {
        Self {
            id: r.id,
            title: r.title,
            content: r.content,
            views: r.views,
            published: r.published,
            created_at: r.created_at,
            author: r.author.0,
            comments: r.comments.0,
        }
    }
}

impl<'a> RelationRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Published posts joined with their author, newest first.
    pub async fn published_posts_with_author(&self) -> Result<Vec<PostWithAuthor>, DbError> {
        let posts = sqlx::query_as::<_, PostWithAuthor>(
            r#"
            SELECT
                p.id,
                p.title,
                p.content,
                p.views,
                p.created_at,
                u.name AS author_name,
                u.email AS author_email
            FROM posts p
            INNER JOIN users u ON p.user_id = u.id
            WHERE p.published = true
            ORDER BY p.created_at DESC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(posts)
    }

    /// User with all of their posts and comments.
    ///
    /// Both LEFT JOINs hang off the user, so the row set is the cross
    /// product of posts and comments; `DISTINCT` collapses the repeats.
    pub async fn user_activity(&self, id: i32) -> Result<Option<UserActivity>, DbError> {
        let row = sqlx::query_as::<_, UserActivityRow>(
            r#"
            SELECT
                u.id,
                u.name,
                u.email,
                u.age,
                u.status,
                u.created_at,
                COALESCE(json_agg(DISTINCT jsonb_build_object(
                    'id', p.id,
                    'title', p.title,
                    'views', p.views,
                    'published', p.published
                )) FILTER (WHERE p.id IS NOT NULL), '[]') AS posts,
                COALESCE(json_agg(DISTINCT jsonb_build_object(
                    'id', c.id,
                    'content', c.content,
                    'post_id', c.post_id,
                    'created_at', c.created_at
                )) FILTER (WHERE c.id IS NOT NULL), '[]') AS comments
            FROM users u
            LEFT JOIN posts p ON u.id = p.user_id
            LEFT JOIN comments c ON u.id = c.user_id
            WHERE u.id = $1
            GROUP BY u.id, u.name, u.email, u.age, u.status, u.created_at
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(UserActivity::from))
    }

    /// Post with its author and every comment, each carrying its own author.
    pub async fn post_details(&self, id: i32) -> Result<Option<PostDetails>, DbError> {
        let row = sqlx::query_as::<_, PostDetailsRow>(
            r#"
            SELECT
                p.id,
                p.title,
                p.content,
                p.views,
                p.published,
                p.created_at,
                json_build_object(
                    'id', u.id,
                    'name', u.name,
                    'email', u.email
                ) AS author,
                COALESCE(json_agg(
                    json_build_object(
                        'id', c.id,
                        'content', c.content,
                        'created_at', c.created_at,
                        'author', json_build_object('id', cu.id, 'name', cu.name)
                    ) ORDER BY c.id
                ) FILTER (WHERE c.id IS NOT NULL), '[]') AS comments
            FROM posts p
            INNER JOIN users u ON p.user_id = u.id
            LEFT JOIN comments c ON p.id = c.post_id
            LEFT JOIN users cu ON c.user_id = cu.id
            WHERE p.id = $1
            GROUP BY p.id, p.title, p.content, p.views, p.published, p.created_at, u.id, u.name, u.email
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(PostDetails::from))
    }
}
