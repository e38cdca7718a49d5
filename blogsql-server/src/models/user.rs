//! User rows and the create-user input

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::ValidationError;

/// Status assigned when a new user does not specify one
pub const DEFAULT_STATUS: &str = "active";

/// Full user record (`SELECT id, email, ... FROM users`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub age: Option<i32>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Projection used by the list endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct UserSummary {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub age: Option<i32>,
}

impl From<&User> for UserSummary {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            name: u.name.clone(),
            email: u.email.clone(),
            age: u.age,
        }
    }
}

/// Body of `POST /users`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateUserRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub age: Option<i32>,
    pub status: Option<String>,
}

/// Validated insert payload
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub age: Option<i32>,
    pub status: String,
}

impl TryFrom<CreateUserRequest> for NewUser {
    type Error = ValidationError;

    /// Email and name must both be present and non-empty. A missing or
    /// empty status falls back to [`DEFAULT_STATUS`]; an age of 0 is
    /// stored as NULL.
    fn try_from(req: CreateUserRequest) -> Result<Self, Self::Error> {
        let required = ValidationError::MissingFields {
            fields: "Email and name",
        };

        let email = req.email.filter(|e| !e.is_empty()).ok_or(required.clone())?;
        let name = req.name.filter(|n| !n.is_empty()).ok_or(required)?;
        let status = req
            .status
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_STATUS.to_owned());

        Ok(Self {
            email,
            name,
            age: req.age.filter(|age| *age != 0),
            status,
        })
    }
}
