use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::domain::{BlogPost, Comment};
use crate::error::DomainError;
use crate::ports::{CommentStore, PostStore};

use super::filter::PostFilter;
use super::list_query::ListQuery;
use super::pagination::{Pagination, Window};

/// One page of posts plus its pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListResult {
    pub items: Vec<BlogPost>,
    pub pagination: Pagination,
}

/// One page of comments on a post.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentPage {
    pub items: Vec<Comment>,
    pub pagination: Pagination,
}

/// Turns listing requests into deterministic pages.
///
/// Holds only a handle to the store; every call works from whatever the
/// store returns at that moment and keeps no state between calls.
#[derive(Clone)]
pub struct QueryEngine {
    store: Arc<dyn PostStore>,
}

impl QueryEngine {
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self { store }
    }

    /// List posts. Store failures surface as `StoreUnavailable`; nothing
    /// partial is returned.
    pub async fn list(&self, query: &ListQuery) -> Result<ListResult, DomainError> {
        let filter = PostFilter::from_query(query);

        let total = self.store.count(&filter).await?;
        let pagination = Pagination::new(total, query.page, query.limit);
        let window = Window::for_page(query.page, query.limit);

        if window.is_past(total) {
            tracing::debug!(
                total,
                page = query.page,
                pages = pagination.pages,
                "Requested page is past the end"
            );
            return Ok(ListResult {
                items: Vec::new(),
                pagination,
            });
        }

        let items = self
            .store
            .find_matching(&filter, query.sort_by, window)
            .await?;

        tracing::debug!(
            total,
            page = query.page,
            returned = items.len(),
            sort = %query.sort_by,
            "Listed posts"
        );

        Ok(ListResult { items, pagination })
    }

    /// List comments on a post with the same page arithmetic as posts.
    pub async fn comments(
        &self,
        comments: &dyn CommentStore,
        post_id: Uuid,
        page: u64,
        limit: u64,
    ) -> Result<CommentPage, DomainError> {
        let total = comments.count_for_post(post_id).await?;
        let pagination = Pagination::new(total, page, limit);
        let window = Window::for_page(page, limit);

        let items = if window.is_past(total) {
            Vec::new()
        } else {
            comments.list_for_post(post_id, window).await?
        };

        Ok(CommentPage { items, pagination })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewPost, PostUpdate};
    use crate::error::RepoError;
    use crate::ports::BaseRepository;
    use crate::query::SortBy;
    use async_trait::async_trait;
    use chrono::{Duration, TimeZone, Utc};
    use std::sync::Mutex;

    /// Vec-backed store evaluating the filter in process.
    struct VecStore {
        posts: Mutex<Vec<BlogPost>>,
        find_calls: Mutex<usize>,
    }

    impl VecStore {
        fn new(posts: Vec<BlogPost>) -> Self {
            Self {
                posts: Mutex::new(posts),
                find_calls: Mutex::new(0),
            }
        }
    }

    #[async_trait]
    impl BaseRepository<BlogPost, Uuid> for VecStore {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<BlogPost>, RepoError> {
            Ok(self.posts.lock().unwrap().iter().find(|p| p.id == id).cloned())
        }

        async fn save(&self, entity: BlogPost) -> Result<BlogPost, RepoError> {
            self.posts.lock().unwrap().push(entity.clone());
            Ok(entity)
        }

        async fn delete(&self, _id: Uuid) -> Result<(), RepoError> {
            Ok(())
        }
    }

    #[async_trait]
    impl PostStore for VecStore {
        async fn find_matching(
            &self,
            filter: &PostFilter,
            sort: SortBy,
            window: Window,
        ) -> Result<Vec<BlogPost>, RepoError> {
            *self.find_calls.lock().unwrap() += 1;
            let mut matched: Vec<BlogPost> = self
                .posts
                .lock()
                .unwrap()
                .iter()
                .filter(|p| filter.matches(p))
                .cloned()
                .collect();
            matched.sort_by(|a, b| sort.compare(a, b));
            Ok(window.slice(matched))
        }

        async fn count(&self, filter: &PostFilter) -> Result<u64, RepoError> {
            Ok(self
                .posts
                .lock()
                .unwrap()
                .iter()
                .filter(|p| filter.matches(p))
                .count() as u64)
        }

        async fn increment_likes(&self, _id: Uuid) -> Result<BlogPost, RepoError> {
            Err(RepoError::NotFound)
        }

        async fn increment_views(&self, _id: Uuid) -> Result<BlogPost, RepoError> {
            Err(RepoError::NotFound)
        }

        async fn update(&self, id: Uuid, update: PostUpdate) -> Result<BlogPost, RepoError> {
            let mut posts = self.posts.lock().unwrap();
            let post = posts
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or(RepoError::NotFound)?;
            post.apply(update);
            Ok(post.clone())
        }

        async fn set_comment_count(&self, _id: Uuid, _count: u64) -> Result<(), RepoError> {
            Ok(())
        }
    }

    /// Store whose backend is down.
    struct DownStore;

    #[async_trait]
    impl BaseRepository<BlogPost, Uuid> for DownStore {
        async fn find_by_id(&self, _id: Uuid) -> Result<Option<BlogPost>, RepoError> {
            Err(RepoError::Connection("refused".to_string()))
        }

        async fn save(&self, _entity: BlogPost) -> Result<BlogPost, RepoError> {
            Err(RepoError::Connection("refused".to_string()))
        }

        async fn delete(&self, _id: Uuid) -> Result<(), RepoError> {
            Err(RepoError::Connection("refused".to_string()))
        }
    }

    #[async_trait]
    impl PostStore for DownStore {
        async fn find_matching(
            &self,
            _filter: &PostFilter,
            _sort: SortBy,
            _window: Window,
        ) -> Result<Vec<BlogPost>, RepoError> {
            Err(RepoError::Connection("refused".to_string()))
        }

        async fn count(&self, _filter: &PostFilter) -> Result<u64, RepoError> {
            Err(RepoError::Connection("refused".to_string()))
        }

        async fn increment_likes(&self, _id: Uuid) -> Result<BlogPost, RepoError> {
            Err(RepoError::Connection("refused".to_string()))
        }

        async fn increment_views(&self, _id: Uuid) -> Result<BlogPost, RepoError> {
            Err(RepoError::Connection("refused".to_string()))
        }

        async fn update(&self, _id: Uuid, _update: PostUpdate) -> Result<BlogPost, RepoError> {
            Err(RepoError::Connection("refused".to_string()))
        }

        async fn set_comment_count(&self, _id: Uuid, _count: u64) -> Result<(), RepoError> {
            Err(RepoError::Connection("refused".to_string()))
        }
    }

    fn post(n: u128, title: &str, category: &str, minutes: i64, likes: u64) -> BlogPost {
        let mut post = BlogPost::new(NewPost {
            title: title.to_string(),
            summary: format!("{title} summary"),
            content: "content".to_string(),
            author: "Jane Smith".to_string(),
            category: category.to_string(),
            ..Default::default()
        });
        post.id = Uuid::from_u128(n);
        post.created_at = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()
            + Duration::minutes(minutes);
        post.likes = likes;
        post
    }

    fn alps_and_wok() -> Vec<BlogPost> {
        vec![
            post(1, "Alps", "travel", 0, 5),
            post(2, "Wok", "food", 10, 10),
        ]
    }

    fn many(n: u128) -> Vec<BlogPost> {
        let categories = ["travel", "food", "tech"];
        (1..=n)
            .map(|i| {
                let mut p = post(
                    i,
                    &format!("Post {i:02}"),
                    categories[(i % 3) as usize],
                    (i as i64 * 7) % 11,
                    (i as u64) % 4,
                );
                p.views = (i as u64 * 5) % 3;
                p
            })
            .collect()
    }

    fn ids(result: &ListResult) -> Vec<u128> {
        result.items.iter().map(|p| p.id.as_u128()).collect()
    }

    #[tokio::test]
    async fn test_most_liked_scenario() {
        let engine = QueryEngine::new(Arc::new(VecStore::new(alps_and_wok())));
        let query = ListQuery::default().with_sort(SortBy::MostLiked);

        let result = engine.list(&query).await.unwrap();

        assert_eq!(ids(&result), vec![2, 1]);
        assert_eq!(
            result.pagination,
            Pagination {
                total: 2,
                page: 1,
                pages: 1
            }
        );
    }

    #[tokio::test]
    async fn test_category_scenario() {
        let engine = QueryEngine::new(Arc::new(VecStore::new(alps_and_wok())));
        let result = engine
            .list(&ListQuery::default().with_category("food"))
            .await
            .unwrap();

        assert_eq!(ids(&result), vec![2]);
        assert_eq!(result.pagination.total, 1);
    }

    #[tokio::test]
    async fn test_page_past_end_is_empty_without_store_read() {
        let store = Arc::new(VecStore::new(alps_and_wok()));
        let engine = QueryEngine::new(store.clone());

        let result = engine
            .list(&ListQuery::default().with_page(5))
            .await
            .unwrap();

        assert!(result.items.is_empty());
        assert_eq!(
            result.pagination,
            Pagination {
                total: 2,
                page: 5,
                pages: 1
            }
        );
        assert_eq!(*store.find_calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unmatched_search_yields_single_empty_page() {
        let engine = QueryEngine::new(Arc::new(VecStore::new(alps_and_wok())));
        let result = engine
            .list(&ListQuery::default().with_search("zanzibar"))
            .await
            .unwrap();

        assert!(result.items.is_empty());
        assert_eq!(result.pagination.total, 0);
        assert_eq!(result.pagination.pages, 1);
    }

    #[tokio::test]
    async fn test_pages_partition_the_full_ordering() {
        let posts = many(23);
        let engine = QueryEngine::new(Arc::new(VecStore::new(posts.clone())));

        for sort in [
            SortBy::Latest,
            SortBy::Oldest,
            SortBy::Popular,
            SortBy::MostLiked,
            SortBy::TitleAsc,
            SortBy::TitleDesc,
        ] {
            for limit in [1u64, 4, 10, 23, 50] {
                let base = ListQuery::default().with_sort(sort).with_limit(limit);
                let first = engine.list(&base).await.unwrap();

                let mut seen = Vec::new();
                for page in 1..=first.pagination.pages {
                    let result = engine.list(&base.clone().with_page(page)).await.unwrap();
                    seen.extend(ids(&result));
                }

                let mut expected = posts.clone();
                expected.sort_by(|a, b| sort.compare(a, b));
                let expected: Vec<u128> = expected.iter().map(|p| p.id.as_u128()).collect();

                assert_eq!(seen, expected, "sort {sort} limit {limit}");
            }
        }
    }

    #[tokio::test]
    async fn test_latest_and_oldest_are_reversed() {
        let posts: Vec<BlogPost> = (1..=9)
            .map(|i| post(i, &format!("P{i}"), "travel", (i as i64 * 13) % 17, 0))
            .collect();
        let engine = QueryEngine::new(Arc::new(VecStore::new(posts)));

        let latest = engine
            .list(&ListQuery::default().with_sort(SortBy::Latest))
            .await
            .unwrap();
        let oldest = engine
            .list(&ListQuery::default().with_sort(SortBy::Oldest))
            .await
            .unwrap();

        let mut reversed = ids(&oldest);
        reversed.reverse();
        assert_eq!(ids(&latest), reversed);
    }

    #[tokio::test]
    async fn test_repeated_calls_are_identical() {
        let engine = QueryEngine::new(Arc::new(VecStore::new(many(15))));
        let query = ListQuery::default()
            .with_category("technology")
            .with_sort(SortBy::MostLiked)
            .with_limit(3)
            .with_page(2);

        let first = engine.list(&query).await.unwrap();
        let second = engine.list(&query).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_store_failure_surfaces() {
        let engine = QueryEngine::new(Arc::new(DownStore));
        let err = engine.list(&ListQuery::default()).await.unwrap_err();
        assert!(matches!(err, DomainError::StoreUnavailable(_)));
    }
}
