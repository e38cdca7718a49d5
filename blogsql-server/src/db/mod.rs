//! Database layer - connection pool, repositories, and the store seam
//!
//! # Design Principles
//!
//! - One shared pool, created at startup and injected into handlers
//! - One parameterized statement per operation (delete adds an existence check)
//! - Rely on DB constraints, handle conflicts - no check-then-insert
//! - Aggregation happens in SQL, not in process

pub mod pool;
pub mod repos;
pub mod schema;
pub mod store;

#[cfg(test)]
pub(crate) mod memory;

pub use pool::{create_pool, DatabaseSettings};
pub use repos::DbError;
pub use store::{BlogStore, PgStore};
