//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod media;
mod repository;

pub use media::{MediaError, MediaStore};
pub use repository::{BaseRepository, BookmarkStore, CommentStore, PostStore};
