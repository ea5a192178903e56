use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use waypost_core::error::RepoError;
use waypost_core::ports::BookmarkStore;

/// In-memory bookmarks, keyed by post.
pub struct InMemoryBookmarkStore {
    marks: RwLock<HashMap<Uuid, HashSet<String>>>,
}

impl InMemoryBookmarkStore {
    pub fn new() -> Self {
        Self {
            marks: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryBookmarkStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookmarkStore for InMemoryBookmarkStore {
    async fn toggle(&self, post_id: Uuid, user: &str) -> Result<bool, RepoError> {
        let mut marks = self.marks.write().await;
        let users = marks.entry(post_id).or_default();
        if users.remove(user) {
            Ok(false)
        } else {
            users.insert(user.to_string());
            Ok(true)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_toggle_flips_per_user() {
        let store = InMemoryBookmarkStore::new();
        let post_id = Uuid::new_v4();

        assert!(store.toggle(post_id, "ana").await.unwrap());
        assert!(store.toggle(post_id, "ben").await.unwrap());
        assert!(!store.toggle(post_id, "ana").await.unwrap());
        assert!(store.toggle(post_id, "ana").await.unwrap());
        assert!(store.toggle(Uuid::new_v4(), "ana").await.unwrap());
    }
}
