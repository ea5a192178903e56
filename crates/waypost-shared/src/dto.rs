//! Data Transfer Objects - request/response envelopes for the API.

use serde::{Deserialize, Serialize};

/// Pagination block of every listing response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub total: u64,
    pub page: u64,
    pub pages: u64,
}

/// Response of `GET /api/blogs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogListResponse<T> {
    pub blogs: Vec<T>,
    pub pagination: PaginationMeta,
}

/// Response of `GET /api/blogs/{id}/comments`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentListResponse<T> {
    pub comments: Vec<T>,
    pub pagination: PaginationMeta,
}

/// Body of `POST /api/blogs/{id}/bookmark`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkRequest {
    #[serde(default)]
    pub user_id: String,
}

/// Whether the post is bookmarked after a toggle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BookmarkResponse {
    pub bookmarked: bool,
}

/// Plain acknowledgement body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
