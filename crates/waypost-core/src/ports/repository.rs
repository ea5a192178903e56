use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{BlogPost, Comment, PostUpdate};
use crate::error::RepoError;
use crate::query::{PostFilter, SortBy, Window};

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    ///
    /// Post stores keep the stored counters of an existing post; counters
    /// only move through the increment operations.
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Persistence for blog posts, read by the listing query engine.
#[async_trait]
pub trait PostStore: BaseRepository<BlogPost, Uuid> {
    /// Posts matching `filter`, ordered by `sort`, restricted to `window`.
    async fn find_matching(
        &self,
        filter: &PostFilter,
        sort: SortBy,
        window: Window,
    ) -> Result<Vec<BlogPost>, RepoError>;

    /// Number of posts matching `filter`.
    async fn count(&self, filter: &PostFilter) -> Result<u64, RepoError>;

    /// Atomically add one like. Returns `RepoError::NotFound` for unknown ids.
    async fn increment_likes(&self, id: Uuid) -> Result<BlogPost, RepoError>;

    /// Atomically add one view. Returns `RepoError::NotFound` for unknown ids.
    async fn increment_views(&self, id: Uuid) -> Result<BlogPost, RepoError>;

    /// Apply `update` to the authoring fields only, leaving `likes`, `views`
    /// and `comment_count` as the store holds them.
    async fn update(&self, id: Uuid, update: PostUpdate) -> Result<BlogPost, RepoError>;

    /// Record the current number of comments on a post.
    async fn set_comment_count(&self, id: Uuid, count: u64) -> Result<(), RepoError>;
}

/// Comment repository. `find_by_id`, `save` and `delete` come from
/// [`BaseRepository`].
#[async_trait]
pub trait CommentStore: BaseRepository<Comment, Uuid> {
    async fn add(&self, comment: Comment) -> Result<Comment, RepoError>;

    /// Comments on a post, newest first.
    async fn list_for_post(&self, post_id: Uuid, window: Window) -> Result<Vec<Comment>, RepoError>;

    async fn count_for_post(&self, post_id: Uuid) -> Result<u64, RepoError>;
}

/// Reader bookmarks on posts.
#[async_trait]
pub trait BookmarkStore: Send + Sync {
    /// Flip the bookmark of `user` on `post_id`. Returns `true` when the
    /// post is now bookmarked.
    async fn toggle(&self, post_id: Uuid, user: &str) -> Result<bool, RepoError>;
}
