use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::BlogPost;

/// Listing sort mode. Every mode breaks ties by `id` ascending so that
/// repeated calls page through the same order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortBy {
    #[default]
    #[serde(rename = "latest")]
    Latest,
    #[serde(rename = "oldest")]
    Oldest,
    #[serde(rename = "popular")]
    Popular,
    #[serde(rename = "mostLiked")]
    MostLiked,
    #[serde(rename = "a-z")]
    TitleAsc,
    #[serde(rename = "z-a")]
    TitleDesc,
}

impl SortBy {
    /// Parse a wire value; unknown values fall back to `Latest`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "oldest" => SortBy::Oldest,
            "popular" => SortBy::Popular,
            "mostliked" | "most-liked" => SortBy::MostLiked,
            "a-z" => SortBy::TitleAsc,
            "z-a" => SortBy::TitleDesc,
            _ => SortBy::Latest,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Latest => "latest",
            SortBy::Oldest => "oldest",
            SortBy::Popular => "popular",
            SortBy::MostLiked => "mostLiked",
            SortBy::TitleAsc => "a-z",
            SortBy::TitleDesc => "z-a",
        }
    }

    /// Total order over posts for this mode.
    pub fn compare(&self, a: &BlogPost, b: &BlogPost) -> Ordering {
        let primary = match self {
            SortBy::Latest => b.created_at.cmp(&a.created_at),
            SortBy::Oldest => a.created_at.cmp(&b.created_at),
            SortBy::Popular => b.views.cmp(&a.views),
            SortBy::MostLiked => b.likes.cmp(&a.likes),
            SortBy::TitleAsc => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            SortBy::TitleDesc => b.title.to_lowercase().cmp(&a.title.to_lowercase()),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewPost;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn post(title: &str, age_days: i64, likes: u64, views: u64) -> BlogPost {
        let mut post = BlogPost::new(NewPost {
            title: title.to_string(),
            ..Default::default()
        });
        post.created_at = Utc::now() - Duration::days(age_days);
        post.likes = likes;
        post.views = views;
        post
    }

    #[test]
    fn test_parse_accepts_wire_names() {
        assert_eq!(SortBy::parse("mostLiked"), SortBy::MostLiked);
        assert_eq!(SortBy::parse("Z-A"), SortBy::TitleDesc);
        assert_eq!(SortBy::parse("oldest"), SortBy::Oldest);
        assert_eq!(SortBy::parse("bogus"), SortBy::Latest);
        assert_eq!(SortBy::parse(""), SortBy::Latest);
    }

    #[test]
    fn test_title_sort_ignores_case() {
        let a = post("alps", 1, 0, 0);
        let b = post("Bali", 1, 0, 0);
        assert_eq!(SortBy::TitleAsc.compare(&a, &b), Ordering::Less);
        assert_eq!(SortBy::TitleDesc.compare(&a, &b), Ordering::Greater);
    }

    #[test]
    fn test_ties_break_on_id() {
        let mut a = post("Same", 1, 4, 4);
        let mut b = a.clone();
        a.id = Uuid::from_u128(1);
        b.id = Uuid::from_u128(2);

        for mode in [SortBy::Popular, SortBy::MostLiked, SortBy::Latest, SortBy::TitleDesc] {
            assert_eq!(mode.compare(&a, &b), Ordering::Less, "mode {mode}");
        }
    }

    #[test]
    fn test_counters_sort_descending() {
        let few = post("Few", 1, 1, 10);
        let many = post("Many", 1, 9, 2);
        assert_eq!(SortBy::MostLiked.compare(&many, &few), Ordering::Less);
        assert_eq!(SortBy::Popular.compare(&few, &many), Ordering::Less);
    }
}
