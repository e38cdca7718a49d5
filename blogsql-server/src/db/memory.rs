//! In-memory [`BlogStore`] for handler tests
//!
//! Mirrors the SQL semantics of the Postgres repositories closely enough to
//! exercise every endpoint, and counts store calls so tests can assert that
//! rejected requests never reached persistence.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};

use super::repos::DbError;
use super::store::BlogStore;
use crate::models::{
    AgeRange, Author, ColumnValue, Comment, CommentAuthor, CommentBrief, CommentDetail, NewUser,
    Post, PostBrief, PostDetails, PostMatch, PostUpdate, PostWithAuthor, SearchTerm, User,
    UserActivity, UserSummary, DEFAULT_STATUS, SEARCH_LIMIT,
};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    posts: Vec<Post>,
    comments: Vec<Comment>,
    next_id: i32,
    tick: i64,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    /// Strictly increasing timestamps so ordering by time is deterministic.
    fn now(&mut self) -> DateTime<Utc> {
        self.tick += 1;
        epoch() + Duration::seconds(self.tick)
    }
}

fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().unwrap_or_default()
}

/// Fake store backed by vectors
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    calls: AtomicUsize,
    broken: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose every call fails like a dropped connection.
    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Self::default()
        }
    }

    /// Number of store methods invoked so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn users(&self) -> Vec<User> {
        self.lock().users.clone()
    }

    pub fn posts(&self) -> Vec<Post> {
        self.lock().posts.clone()
    }

    pub fn add_user(&self, name: &str, email: &str, age: Option<i32>, status: &str) -> User {
        let mut t = self.lock();
        let user = User {
            id: t.next_id(),
            email: email.to_owned(),
            name: name.to_owned(),
            age,
            status: status.to_owned(),
            created_at: t.now(),
        };
        t.users.push(user.clone());
        user
    }

    pub fn add_post(&self, user_id: i32, title: &str, content: &str, views: i32, published: bool) -> Post {
        let mut t = self.lock();
        let created_at = t.now();
        let post = Post {
            id: t.next_id(),
            user_id,
            title: title.to_owned(),
            content: Some(content.to_owned()),
            views,
            published,
            created_at,
            updated_at: created_at,
        };
        t.posts.push(post.clone());
        post
    }

    pub fn add_comment(&self, post_id: i32, user_id: i32, content: &str) -> Comment {
        let mut t = self.lock();
        let comment = Comment {
            id: t.next_id(),
            post_id,
            user_id,
            content: content.to_owned(),
            created_at: t.now(),
        };
        t.comments.push(comment.clone());
        comment
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Count the call and fail it if the store is broken.
    fn enter(&self) -> Result<std::sync::MutexGuard<'_, Tables>, DbError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.broken {
            return Err(DbError::from(sqlx::Error::Protocol("connection reset".into())));
        }
        Ok(self.lock())
    }
}

fn not_null(column: &str) -> DbError {
    DbError::from(sqlx::Error::Protocol(format!(
        "null value in column \"{}\" of relation \"posts\" violates not-null constraint",
        column
    )))
}

#[async_trait]
impl BlogStore for MemoryStore {
    async fn ping(&self) -> Result<(), DbError> {
        self.enter().map(|_| ())
    }

    async fn active_users(&self) -> Result<Vec<UserSummary>, DbError> {
        let t = self.enter()?;
        let mut users: Vec<UserSummary> = t
            .users
            .iter()
            .filter(|u| u.status == DEFAULT_STATUS)
            .map(UserSummary::from)
            .collect();
        users.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(users)
    }

    async fn find_user(&self, id: i32) -> Result<Option<User>, DbError> {
        let t = self.enter()?;
        Ok(t.users.iter().find(|u| u.id == id).cloned())
    }

    async fn insert_user(&self, user: &NewUser) -> Result<User, DbError> {
        let mut t = self.enter()?;
        if t.users.iter().any(|u| u.email == user.email) {
            return Err(DbError::UniqueViolation {
                constraint: Some("users_email_key".into()),
                message: "duplicate key value violates unique constraint \"users_email_key\"".into(),
            });
        }
        let created = User {
            id: t.next_id(),
            email: user.email.clone(),
            name: user.name.clone(),
            age: user.age,
            status: user.status.clone(),
            created_at: t.now(),
        };
        t.users.push(created.clone());
        Ok(created)
    }

    async fn update_post(&self, id: i32, update: &PostUpdate) -> Result<Option<Post>, DbError> {
        let mut t = self.enter()?;
        let now = t.now();
        let Some(post) = t.posts.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };

        // Statement semantics: a constraint failure leaves the row untouched
        let mut next = post.clone();
        for assignment in update.assignments() {
            match (assignment.column, &assignment.value) {
                ("title", ColumnValue::Text(Some(v))) => next.title = v.clone(),
                ("content", ColumnValue::Text(v)) => next.content = v.clone(),
                ("published", ColumnValue::Bool(Some(v))) => next.published = *v,
                (column @ ("title" | "published"), _) => return Err(not_null(column)),
                (column, _) => {
                    return Err(DbError::from(sqlx::Error::ColumnNotFound(column.to_owned())))
                }
            }
        }
        next.updated_at = now;
        *post = next.clone();
        Ok(Some(next))
    }

    async fn post_exists(&self, id: i32) -> Result<bool, DbError> {
        let t = self.enter()?;
        Ok(t.posts.iter().any(|p| p.id == id))
    }

    async fn delete_post(&self, id: i32) -> Result<u64, DbError> {
        let mut t = self.enter()?;
        let before = t.posts.len();
        t.posts.retain(|p| p.id != id);
        let removed = (before - t.posts.len()) as u64;
        // ON DELETE CASCADE
        t.comments.retain(|c| c.post_id != id);
        Ok(removed)
    }

    async fn users_by_age(&self, range: AgeRange) -> Result<Vec<UserSummary>, DbError> {
        let t = self.enter()?;
        let mut users: Vec<UserSummary> = t
            .users
            .iter()
            .filter(|u| u.age.is_some_and(|age| range.contains(age)))
            .map(UserSummary::from)
            .collect();
        users.sort_by(|a, b| b.age.cmp(&a.age));
        Ok(users)
    }

    async fn search_posts(&self, term: &SearchTerm) -> Result<Vec<PostMatch>, DbError> {
        let t = self.enter()?;
        let needle = term.needle().to_lowercase();
        let contains = |s: &str| s.to_lowercase().contains(&needle);

        let mut hits: Vec<PostMatch> = t
            .posts
            .iter()
            .filter(|p| contains(&p.title) || p.content.as_deref().is_some_and(|c| contains(c)))
            .map(|p| PostMatch {
                id: p.id,
                title: p.title.clone(),
                content: p.content.clone(),
                views: p.views,
            })
            .collect();
        hits.sort_by(|a, b| b.views.cmp(&a.views));
        hits.truncate(SEARCH_LIMIT as usize);
        Ok(hits)
    }

    async fn published_posts_with_author(&self) -> Result<Vec<PostWithAuthor>, DbError> {
        let t = self.enter()?;
        let mut posts: Vec<PostWithAuthor> = t
            .posts
            .iter()
            .filter(|p| p.published)
            .filter_map(|p| {
                let author = t.users.iter().find(|u| u.id == p.user_id)?;
                Some(PostWithAuthor {
                    id: p.id,
                    title: p.title.clone(),
                    content: p.content.clone(),
                    views: p.views,
                    created_at: p.created_at,
                    author_name: author.name.clone(),
                    author_email: author.email.clone(),
                })
            })
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    async fn user_activity(&self, id: i32) -> Result<Option<UserActivity>, DbError> {
        let t = self.enter()?;
        let Some(user) = t.users.iter().find(|u| u.id == id) else {
            return Ok(None);
        };

        let mut activity = UserActivity {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            age: user.age,
            status: user.status.clone(),
            created_at: user.created_at,
            posts: t
                .posts
                .iter()
                .filter(|p| p.user_id == id)
                .map(|p| PostBrief {
                    id: p.id,
                    title: p.title.clone(),
                    views: p.views,
                    published: p.published,
                })
                .collect(),
            comments: t
                .comments
                .iter()
                .filter(|c| c.user_id == id)
                .map(|c| CommentBrief {
                    id: c.id,
                    content: c.content.clone(),
                    post_id: c.post_id,
                    created_at: c.created_at,
                })
                .collect(),
        };
        activity.sort_children();
        Ok(Some(activity))
    }

    async fn post_details(&self, id: i32) -> Result<Option<PostDetails>, DbError> {
        let t = self.enter()?;
        let Some(post) = t.posts.iter().find(|p| p.id == id) else {
            return Ok(None);
        };
        // INNER JOIN on the author
        let Some(author) = t.users.iter().find(|u| u.id == post.user_id) else {
            return Ok(None);
        };

        let mut comments: Vec<CommentDetail> = t
            .comments
            .iter()
            .filter(|c| c.post_id == id)
            .filter_map(|c| {
                let commenter = t.users.iter().find(|u| u.id == c.user_id)?;
                Some(CommentDetail {
                    id: c.id,
                    content: c.content.clone(),
                    created_at: c.created_at,
                    author: CommentAuthor {
                        id: commenter.id,
                        name: commenter.name.clone(),
                    },
                })
            })
            .collect();
        comments.sort_by_key(|c| c.id);

        Ok(Some(PostDetails {
            id: post.id,
            title: post.title.clone(),
            content: post.content.clone(),
            views: post.views,
            published: post.published,
            created_at: post.created_at,
            author: Author {
                id: author.id,
                name: author.name.clone(),
                email: author.email.clone(),
            },
            comments,
        }))
    }
}
