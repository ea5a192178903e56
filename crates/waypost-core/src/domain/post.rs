use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default reading time in minutes when the author gives none.
pub const DEFAULT_READ_TIME: u32 = 5;

/// Reference to an externally stored image (CDN or local disk).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaRef {
    pub url: String,
    pub public_id: String,
}

/// Blog post entity - a single travel story.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: Uuid,
    pub title: String,
    pub summary: String,
    pub content: String,
    pub author: String,
    pub category: String,
    pub tags: Vec<String>,
    pub destination: Option<String>,
    pub cover_image: Option<MediaRef>,
    pub read_time: u32,
    pub likes: u64,
    pub views: u64,
    /// Number of comments on the post, refreshed whenever one is added or removed.
    pub comment_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Authoring fields supplied when a post is created.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub title: String,
    pub summary: String,
    pub content: String,
    pub author: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub destination: Option<String>,
    pub cover_image: Option<MediaRef>,
    pub read_time: Option<u32>,
}

/// Partial update of the authoring fields. Counters and `created_at` are
/// not reachable from here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostUpdate {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub destination: Option<String>,
    pub cover_image: Option<MediaRef>,
    pub read_time: Option<u32>,
}

impl BlogPost {
    /// Create a new post with a fresh id, zeroed counters and trimmed fields.
    pub fn new(input: NewPost) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: input.title.trim().to_string(),
            summary: input.summary.trim().to_string(),
            content: input.content,
            author: input.author.trim().to_string(),
            category: input.category.trim().to_string(),
            tags: clean_tags(input.tags),
            destination: clean_optional(input.destination),
            cover_image: input.cover_image,
            read_time: input.read_time.unwrap_or(DEFAULT_READ_TIME).max(1),
            likes: 0,
            views: 0,
            comment_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update and refresh `updated_at`. Counters are left
    /// to the store.
    pub fn apply(&mut self, update: PostUpdate) {
        if let Some(title) = update.title {
            self.title = title.trim().to_string();
        }
        if let Some(summary) = update.summary {
            self.summary = summary.trim().to_string();
        }
        if let Some(content) = update.content {
            self.content = content;
        }
        if let Some(author) = update.author {
            self.author = author.trim().to_string();
        }
        if let Some(category) = update.category {
            self.category = category.trim().to_string();
        }
        if let Some(tags) = update.tags {
            self.tags = clean_tags(tags);
        }
        if update.destination.is_some() {
            self.destination = clean_optional(update.destination);
        }
        if let Some(cover) = update.cover_image {
            self.cover_image = Some(cover);
        }
        if let Some(read_time) = update.read_time {
            self.read_time = read_time.max(1);
        }
        self.updated_at = Utc::now();
    }
}

fn clean_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

fn clean_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
