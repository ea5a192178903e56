use crate::domain::BlogPost;

use super::list_query::ListQuery;
use super::synonyms::{expand_category, expand_tag};

/// Filter predicate derived from a [`ListQuery`].
///
/// All values are pre-lowered and synonym-expanded so that stores can
/// translate them directly. Every present clause must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    /// Substring looked up in title, summary, content and author.
    pub search: Option<String>,
    /// Accepted category values.
    pub categories: Option<Vec<String>>,
    /// Accepted tag values; a post matches when any of its tags is listed.
    pub tags: Option<Vec<String>>,
    pub destination: Option<String>,
}

impl PostFilter {
    pub fn from_query(query: &ListQuery) -> Self {
        let tags = if query.tags.is_empty() {
            None
        } else {
            let mut accepted: Vec<String> = Vec::new();
            for tag in &query.tags {
                for value in expand_tag(tag) {
                    if !accepted.contains(&value) {
                        accepted.push(value);
                    }
                }
            }
            Some(accepted)
        };

        Self {
            search: query.search.as_deref().map(str::to_lowercase),
            categories: query.category.as_deref().map(expand_category),
            tags,
            destination: query.destination.as_deref().map(|d| d.trim().to_lowercase()),
        }
    }

    /// In-process evaluation of the predicate.
    pub fn matches(&self, post: &BlogPost) -> bool {
        if let Some(needle) = &self.search {
            let hit = [&post.title, &post.summary, &post.content, &post.author]
                .iter()
                .any(|field| field.to_lowercase().contains(needle.as_str()));
            if !hit {
                return false;
            }
        }

        if let Some(categories) = &self.categories {
            if !categories.contains(&post.category.to_lowercase()) {
                return false;
            }
        }

        if let Some(tags) = &self.tags {
            let hit = post
                .tags
                .iter()
                .any(|tag| tags.contains(&tag.to_lowercase()));
            if !hit {
                return false;
            }
        }

        if let Some(destination) = &self.destination {
            match &post.destination {
                Some(d) if d.to_lowercase() == *destination => {}
                _ => return false,
            }
        }

        true
    }
}
