//! # Waypost Infrastructure
//!
//! Concrete implementations of the ports defined in `waypost-core`.
//! This crate contains the post, comment and media stores.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL stores via SeaORM

pub mod database;
pub mod media;
pub mod memory;

// Re-exports - In-Memory
pub use database::DatabaseConnections;
pub use media::LocalMediaStore;
pub use memory::{InMemoryBookmarkStore, InMemoryCommentStore, InMemoryPostStore};

// Re-exports - PostgreSQL
#[cfg(feature = "postgres")]
pub use database::{PostgresBookmarkStore, PostgresCommentStore, PostgresPostStore};
