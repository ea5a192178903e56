use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use waypost_core::domain::{BlogPost, PostUpdate};
use waypost_core::error::RepoError;
use waypost_core::ports::{BaseRepository, PostStore};
use waypost_core::query::{PostFilter, SortBy, Window};

/// In-memory post store using a HashMap with async RwLock.
///
/// Filtering and ordering go through [`PostFilter::matches`] and
/// [`SortBy::compare`], so results agree with the SQL store.
pub struct InMemoryPostStore {
    posts: RwLock<HashMap<Uuid, BlogPost>>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(HashMap::new()),
        }
    }

    /// Create a store pre-filled with the given posts.
    pub fn with_posts(posts: impl IntoIterator<Item = BlogPost>) -> Self {
        Self {
            posts: RwLock::new(posts.into_iter().map(|p| (p.id, p)).collect()),
        }
    }

    /// Mutate one post in place under the write lock.
    async fn bump<F>(&self, id: Uuid, bump: F) -> Result<BlogPost, RepoError>
    where
        F: FnOnce(&mut BlogPost) + Send,
    {
        // Single write lock: concurrent increments never lose updates
        let mut posts = self.posts.write().await;
        let post = posts.get_mut(&id).ok_or(RepoError::NotFound)?;
        bump(post);
        Ok(post.clone())
    }
}

impl Default for InMemoryPostStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<BlogPost, Uuid> for InMemoryPostStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<BlogPost>, RepoError> {
        Ok(self.posts.read().await.get(&id).cloned())
    }

    async fn save(&self, mut entity: BlogPost) -> Result<BlogPost, RepoError> {
        let mut posts = self.posts.write().await;
        if let Some(stored) = posts.get(&entity.id) {
            entity.likes = stored.likes;
            entity.views = stored.views;
            entity.comment_count = stored.comment_count;
        }
        posts.insert(entity.id, entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut posts = self.posts.write().await;
        posts.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn find_matching(
        &self,
        filter: &PostFilter,
        sort: SortBy,
        window: Window,
    ) -> Result<Vec<BlogPost>, RepoError> {
        let posts = self.posts.read().await;
        let mut matched: Vec<&BlogPost> = posts.values().filter(|p| filter.matches(p)).collect();
        matched.sort_by(|a, b| sort.compare(a, b));

        Ok(window.slice(matched).into_iter().cloned().collect())
    }

    async fn count(&self, filter: &PostFilter) -> Result<u64, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.values().filter(|p| filter.matches(p)).count() as u64)
    }

    async fn increment_likes(&self, id: Uuid) -> Result<BlogPost, RepoError> {
        self.bump(id, |post| post.likes = post.likes.saturating_add(1))
            .await
    }

    async fn increment_views(&self, id: Uuid) -> Result<BlogPost, RepoError> {
        self.bump(id, |post| post.views = post.views.saturating_add(1))
            .await
    }

    async fn update(&self, id: Uuid, update: PostUpdate) -> Result<BlogPost, RepoError> {
        self.bump(id, |post| post.apply(update)).await
    }

    async fn set_comment_count(&self, id: Uuid, count: u64) -> Result<(), RepoError> {
        self.bump(id, |post| post.comment_count = count).await?;
        Ok(())
    }
}
