//! Application state - shared across all handlers.

use std::sync::Arc;

use waypost_core::QueryEngine;
use waypost_core::ports::{BookmarkStore, CommentStore, MediaStore, PostStore};
use waypost_infra::database::DatabaseConnections;
use waypost_infra::media::LocalMediaStore;
use waypost_infra::memory::{
    InMemoryBookmarkStore, InMemoryCommentStore, InMemoryPostStore, demo_posts,
};

#[cfg(feature = "postgres")]
use waypost_infra::database::{PostgresBookmarkStore, PostgresCommentStore, PostgresPostStore};

use crate::config::AppConfig;

/// Which storage backend serves requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl StoreBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreBackend::Postgres => "postgres",
            StoreBackend::Memory => "memory",
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostStore>,
    pub comments: Arc<dyn CommentStore>,
    pub bookmarks: Arc<dyn BookmarkStore>,
    pub media: Arc<dyn MediaStore>,
    pub engine: QueryEngine,
    pub db: Option<Arc<DatabaseConnections>>,
    pub backend: StoreBackend,
    pub list_max_limit: u64,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let media: Arc<dyn MediaStore> = Arc::new(LocalMediaStore::new(&config.media_dir));
        if let Err(e) = tokio::fs::create_dir_all(&config.media_dir).await {
            tracing::warn!(
                media_dir = %config.media_dir.display(),
                "Could not create media directory: {}",
                e
            );
        }

        #[cfg(feature = "postgres")]
        {
            if let Some(db_config) = &config.database {
                match DatabaseConnections::init(db_config).await {
                    Ok(connections) => {
                        let conn = Arc::new(connections);
                        let posts = Arc::new(PostgresPostStore::new(Arc::clone(&conn.main)));
                        let comments = Arc::new(PostgresCommentStore::new(Arc::clone(&conn.main)));
                        let bookmarks =
                            Arc::new(PostgresBookmarkStore::new(Arc::clone(&conn.main)));
                        tracing::info!("Application state initialized (postgres)");
                        return Self::assemble(
                            posts,
                            comments,
                            bookmarks,
                            media,
                            Some(conn),
                            StoreBackend::Postgres,
                            config.list_max_limit,
                        );
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            }
        }

        #[cfg(not(feature = "postgres"))]
        tracing::info!("Running without postgres feature - using in-memory stores");

        let posts = if config.seed_demo_posts {
            tracing::warn!("Seeding in-memory store with demo posts");
            InMemoryPostStore::with_posts(demo_posts())
        } else {
            InMemoryPostStore::new()
        };

        tracing::info!("Application state initialized (memory)");
        Self::assemble(
            Arc::new(posts),
            Arc::new(InMemoryCommentStore::new()),
            Arc::new(InMemoryBookmarkStore::new()),
            media,
            None,
            StoreBackend::Memory,
            config.list_max_limit,
        )
    }

    /// Wire stores together without touching the environment.
    pub fn assemble(
        posts: Arc<dyn PostStore>,
        comments: Arc<dyn CommentStore>,
        bookmarks: Arc<dyn BookmarkStore>,
        media: Arc<dyn MediaStore>,
        db: Option<Arc<DatabaseConnections>>,
        backend: StoreBackend,
        list_max_limit: u64,
    ) -> Self {
        Self {
            engine: QueryEngine::new(posts.clone()),
            posts,
            comments,
            bookmarks,
            media,
            db,
            backend,
            list_max_limit,
        }
    }
}
