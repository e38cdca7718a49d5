//! Repository implementations for database access
//!
//! Each repository borrows the shared pool and issues exactly one
//! parameterized statement per method. Values are always bound, never
//! interpolated into SQL text.

pub mod users;
pub mod posts;
pub mod search;
pub mod relations;

pub use users::UserRepo;
pub use posts::PostRepo;
pub use search::SearchRepo;
pub use relations::RelationRepo;

/// SQLSTATE for `unique_violation`
pub const UNIQUE_VIOLATION: &str = "23505";

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(sqlx::Error),

    #[error("unique constraint violated: {message}")]
    UniqueViolation {
        constraint: Option<String>,
        message: String,
    },
}

impl DbError {
    /// Description surfaced to clients for unclassified failures.
    ///
    /// Server-reported errors yield the server's own message; everything
    /// else falls back to the driver's display text.
    pub fn description(&self) -> String {
        match self {
            Self::Sqlx(sqlx::Error::Database(e)) => e.message().to_owned(),
            Self::Sqlx(e) => e.to_string(),
            Self::UniqueViolation { message, .. } => message.clone(),
        }
    }

    /// SQLSTATE code, when the server reported one.
    pub fn code(&self) -> Option<String> {
        match self {
            Self::Sqlx(sqlx::Error::Database(e)) => e.code().map(|c| c.into_owned()),
            Self::UniqueViolation { .. } => Some(UNIQUE_VIOLATION.to_owned()),
            Self::Sqlx(_) => None,
        }
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            if db.code().as_deref() == Some(UNIQUE_VIOLATION) {
                return Self::UniqueViolation {
                    constraint: db.constraint().map(str::to_owned),
                    message: db.message().to_owned(),
                };
            }
        }
        Self::Sqlx(err)
    }
}
