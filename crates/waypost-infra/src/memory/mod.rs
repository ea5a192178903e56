//! In-memory stores - used when no database is configured, and in tests.
//!
//! Data is lost on process restart.

mod bookmarks;
mod comments;
mod posts;
mod seed;

pub use bookmarks::InMemoryBookmarkStore;
pub use comments::InMemoryCommentStore;
pub use posts::InMemoryPostStore;
pub use seed::demo_posts;
