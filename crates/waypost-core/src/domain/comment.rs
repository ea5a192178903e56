use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Comment entity - a reader's note appended to a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields a reader supplies when commenting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewComment {
    pub user: String,
    pub content: String,
}

/// Edit of an existing comment. Only the text can change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentUpdate {
    pub content: String,
}

impl Comment {
    /// Create a new comment on the given post.
    pub fn new(post_id: Uuid, input: NewComment) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            post_id,
            user: input.user.trim().to_string(),
            content: input.content.trim().to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the text and refresh `updated_at`.
    pub fn apply(&mut self, update: CommentUpdate) {
        self.content = update.content.trim().to_string();
        self.updated_at = Utc::now();
    }
}
