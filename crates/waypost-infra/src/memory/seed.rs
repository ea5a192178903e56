use chrono::{TimeZone, Utc};

use waypost_core::domain::{BlogPost, NewPost};

/// Sample posts for running without a database. Not a substitute for real
/// data: enable with `SEED_DEMO_POSTS=true` only for local development.
pub fn demo_posts() -> Vec<BlogPost> {
    let samples = [
        (
            "Exploring Europe",
            "John Doe",
            "travel",
            "hiking",
            Some("europe"),
            "A journey through European landscapes",
            "Detailed content about European travel experiences...",
            20,
        ),
        (
            "Asian Cuisine Adventure",
            "Jane Smith",
            "food",
            "recipes",
            Some("asia"),
            "Exploring Asian culinary delights",
            "Detailed content about Asian cuisine...",
            19,
        ),
        (
            "North American Road Trip",
            "Mike Johnson",
            "travel",
            "hiking",
            Some("north-america"),
            "Exploring the national parks of North America",
            "A comprehensive guide to road tripping across North America...",
            18,
        ),
    ];

    samples
        .into_iter()
        .map(
            |(title, author, category, tag, destination, summary, content, day)| {
                let mut post = BlogPost::new(NewPost {
                    title: title.to_string(),
                    summary: summary.to_string(),
                    content: content.to_string(),
                    author: author.to_string(),
                    category: category.to_string(),
                    tags: vec![tag.to_string()],
                    destination: destination.map(String::from),
                    ..Default::default()
                });
                if let Some(created) = Utc.with_ymd_and_hms(2024, 2, day, 0, 0, 0).single() {
                    post.created_at = created;
                    post.updated_at = created;
                }
                post
            },
        )
        .collect()
}
