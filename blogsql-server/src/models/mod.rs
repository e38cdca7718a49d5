//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod user;
pub mod post;
pub mod comment;
pub mod search;
pub mod relations;

pub use validation::{parse_id, ValidationError};
pub use user::{CreateUserRequest, NewUser, User, UserSummary, DEFAULT_STATUS};
pub use post::{Assignment, ColumnValue, Post, PostChanges, PostMatch, PostUpdate, PostWithAuthor};
pub use comment::Comment;
pub use search::{AgeRange, AgeRangeParams, SearchParams, SearchTerm, SEARCH_LIMIT};
pub use relations::{
    Author, CommentAuthor, CommentBrief, CommentDetail, PostBrief, PostDetails, UserActivity,
};
