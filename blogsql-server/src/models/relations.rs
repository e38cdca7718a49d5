//! Nested aggregates returned by the `/relations` endpoints
//!
//! Child collections are always present; a parent with no children
//! serializes `[]`, never `null`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user's post inside [`UserActivity`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostBrief {
    pub id: i32,
    pub title: String,
    pub views: i32,
    pub published: bool,
}

/// A user's comment inside [`UserActivity`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentBrief {
    pub id: i32,
    pub content: String,
    pub post_id: i32,
    pub created_at: DateTime<Utc>,
}

/// User with every post they wrote and every comment they left
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserActivity {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub age: Option<i32>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub posts: Vec<PostBrief>,
    pub comments: Vec<CommentBrief>,
}

impl UserActivity {
    /// Order both collections by id so output is stable across runs.
    pub fn sort_children(&mut self) {
        self.posts.sort_by_key(|p| p.id);
        self.comments.sort_by_key(|c| c.id);
    }
}

/// Post author
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub id: i32,
    pub name: String,
    pub email: String,
}

/// Comment author (no email)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentAuthor {
    pub id: i32,
    pub name: String,
}

/// Comment with its own author embedded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentDetail {
    pub id: i32,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub author: CommentAuthor,
}

/// Post with its author and all comments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostDetails {
    pub id: i32,
    pub title: String,
    pub content: Option<String>,
    pub views: i32,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub author: Author,
    pub comments: Vec<CommentDetail>,
}
