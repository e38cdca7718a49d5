//! Post rows and the partial-update statement builder

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

use super::ValidationError;

/// Columns returned for a full post record
pub const POST_COLUMNS: &str = "id, user_id, title, content, views, published, created_at, updated_at";

/// Full post record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub content: Option<String>,
    pub views: i32,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Text search hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct PostMatch {
    pub id: i32,
    pub title: String,
    pub content: Option<String>,
    pub views: i32,
}

/// Published post flattened with its author's name and email
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct PostWithAuthor {
    pub id: i32,
    pub title: String,
    pub content: Option<String>,
    pub views: i32,
    pub created_at: DateTime<Utc>,
    pub author_name: String,
    pub author_email: String,
}

/// Body of `PUT /posts/{id}`.
///
/// Outer `None` means the key was absent; `Some(None)` is an explicit
/// `null`, which is written to the column as NULL. Keys other than these
/// three are dropped during deserialization and can never reach the
/// generated statement.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostChanges {
    #[serde(default, deserialize_with = "present")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub content: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub published: Option<Option<bool>>,
}

/// Marks a key as provided, keeping `null` distinguishable from absence.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Value bound to one `SET` placeholder; `None` binds a typed NULL
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValue {
    Text(Option<String>),
    Bool(Option<bool>),
}

/// One `column = $n` clause
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub column: &'static str,
    pub placeholder: usize,
    pub value: ColumnValue,
}

/// `UPDATE posts SET ...` built from the provided fields only
#[derive(Debug, Clone, PartialEq)]
pub struct PostUpdate {
    assignments: Vec<Assignment>,
}

impl PostUpdate {
    /// Build the update from a request body.
    ///
    /// Fields are visited in the fixed order title, content, published.
    /// An explicit `null` counts as provided. Returns [`ValidationError::NoFieldsToUpdate`] when none is present.
    pub fn from_changes(changes: PostChanges) -> Result<Self, ValidationError> {
        let mut update = Self {
            assignments: Vec::with_capacity(3),
        };

        if let Some(title) = changes.title {
            update.push("title", ColumnValue::Text(title));
        }
        if let Some(content) = changes.content {
            update.push("content", ColumnValue::Text(content));
        }
        if let Some(published) = changes.published {
            update.push("published", ColumnValue::Bool(published));
        }

        if update.assignments.is_empty() {
            return Err(ValidationError::NoFieldsToUpdate);
        }
        Ok(update)
    }

    fn push(&mut self, column: &'static str, value: ColumnValue) {
        let placeholder = self.assignments.len() + 1;
        self.assignments.push(Assignment {
            column,
            placeholder,
            value,
        });
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    /// Placeholder index bound to the post id in the `WHERE` clause.
    pub fn id_placeholder(&self) -> usize {
        self.assignments.len() + 1
    }

    /// Render the statement text. `updated_at` is always refreshed.
    pub fn sql(&self) -> String {
        let mut sets: Vec<String> = self
            .assignments
            .iter()
            .map(|a| format!("{} = ${}", a.column, a.placeholder))
            .collect();
        sets.push("updated_at = NOW()".to_owned());

        format!(
            "UPDATE posts SET {} WHERE id = ${} RETURNING {}",
            sets.join(", "),
            self.id_placeholder(),
            POST_COLUMNS
        )
    }
}
