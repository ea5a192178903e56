use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use waypost_core::domain::Comment;
use waypost_core::error::RepoError;
use waypost_core::ports::{BaseRepository, CommentStore};
use waypost_core::query::Window;

/// In-memory comment store.
pub struct InMemoryCommentStore {
    comments: RwLock<Vec<Comment>>,
}

impl InMemoryCommentStore {
    pub fn new() -> Self {
        Self {
            comments: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryCommentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Comment, Uuid> for InMemoryCommentStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, RepoError> {
        Ok(self.comments.read().await.iter().find(|c| c.id == id).cloned())
    }

    async fn save(&self, entity: Comment) -> Result<Comment, RepoError> {
        let mut comments = self.comments.write().await;
        match comments.iter_mut().find(|c| c.id == entity.id) {
            Some(stored) => *stored = entity.clone(),
            None => comments.push(entity.clone()),
        }
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut comments = self.comments.write().await;
        let before = comments.len();
        comments.retain(|c| c.id != id);
        if comments.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl CommentStore for InMemoryCommentStore {
    async fn add(&self, comment: Comment) -> Result<Comment, RepoError> {
        self.comments.write().await.push(comment.clone());
        Ok(comment)
    }

    async fn list_for_post(&self, post_id: Uuid, window: Window) -> Result<Vec<Comment>, RepoError> {
        let comments = self.comments.read().await;
        let mut matched: Vec<&Comment> = comments.iter().filter(|c| c.post_id == post_id).collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));

        Ok(window.slice(matched).into_iter().cloned().collect())
    }

    async fn count_for_post(&self, post_id: Uuid) -> Result<u64, RepoError> {
        let comments = self.comments.read().await;
        Ok(comments.iter().filter(|c| c.post_id == post_id).count() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use waypost_core::domain::{CommentUpdate, NewComment};

    #[tokio::test]
    async fn test_comments_are_scoped_and_newest_first() {
        let store = InMemoryCommentStore::new();
        let post_id = Uuid::new_v4();

        let mut older = Comment::new(
            post_id,
            NewComment {
                user: "ana".to_string(),
                content: "first".to_string(),
            },
        );
        older.created_at -= Duration::minutes(5);
        store.add(older).await.unwrap();
        store
            .add(Comment::new(
                post_id,
                NewComment {
                    user: "ben".to_string(),
                    content: "second".to_string(),
                },
            ))
            .await
            .unwrap();
        store
            .add(Comment::new(
                Uuid::new_v4(),
                NewComment {
                    user: "cy".to_string(),
                    content: "elsewhere".to_string(),
                },
            ))
            .await
            .unwrap();

        assert_eq!(store.count_for_post(post_id).await.unwrap(), 2);
        let listed = store
            .list_for_post(post_id, Window::for_page(1, 10))
            .await
            .unwrap();
        let contents: Vec<&str> = listed.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(contents, vec!["second", "first"]);
    }

    #[tokio::test]
    async fn test_edit_and_delete() {
        let store = InMemoryCommentStore::new();
        let post_id = Uuid::new_v4();
        let mut comment = store
            .add(Comment::new(
                post_id,
                NewComment {
                    user: "ana".to_string(),
                    content: "first".to_string(),
                },
            ))
            .await
            .unwrap();

        comment.apply(CommentUpdate {
            content: "edited".to_string(),
        });
        store.save(comment.clone()).await.unwrap();
        let stored = store.find_by_id(comment.id).await.unwrap().unwrap();
        assert_eq!(stored.content, "edited");
        assert_eq!(store.count_for_post(post_id).await.unwrap(), 1);

        store.delete(comment.id).await.unwrap();
        assert_eq!(store.count_for_post(post_id).await.unwrap(), 0);
        assert!(matches!(
            store.delete(comment.id).await,
            Err(RepoError::NotFound)
        ));
    }
}
