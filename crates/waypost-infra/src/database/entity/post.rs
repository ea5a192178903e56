//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use waypost_core::domain::{BlogPost, MediaRef};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub summary: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub author: String,
    pub category: String,
    pub destination: Option<String>,
    pub cover_image_url: Option<String>,
    pub cover_image_public_id: Option<String>,
    pub read_time: i32,
    pub likes: i64,
    pub views: i64,
    pub comment_count: i64,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post_tag::Entity")]
    Tags,
    #[sea_orm(has_many = "super::comment::Entity")]
    Comments,
    #[sea_orm(has_many = "super::post_bookmark::Entity")]
    Bookmarks,
}

impl Related<super::post_tag::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tags.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl Related<super::post_bookmark::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bookmarks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Build the domain post; tags live in `post_tags` and are passed in.
    pub fn into_domain(self, tags: Vec<String>) -> BlogPost {
        let cover_image = match (self.cover_image_url, self.cover_image_public_id) {
            (Some(url), Some(public_id)) => Some(MediaRef { url, public_id }),
            _ => None,
        };

        BlogPost {
            id: self.id,
            title: self.title,
            summary: self.summary,
            content: self.content,
            author: self.author,
            category: self.category,
            tags,
            destination: self.destination,
            cover_image,
            read_time: u32::try_from(self.read_time).unwrap_or(1),
            likes: u64::try_from(self.likes).unwrap_or(0),
            views: u64::try_from(self.views).unwrap_or(0),
            comment_count: u64::try_from(self.comment_count).unwrap_or(0),
            created_at: self.created_at.into(),
            updated_at: self.updated_at.into(),
        }
    }
}

/// Conversion from Domain BlogPost to SeaORM ActiveModel.
impl From<&BlogPost> for ActiveModel {
    fn from(post: &BlogPost) -> Self {
        Self {
            id: Set(post.id),
            title: Set(post.title.clone()),
            summary: Set(post.summary.clone()),
            content: Set(post.content.clone()),
            author: Set(post.author.clone()),
            category: Set(post.category.clone()),
            destination: Set(post.destination.clone()),
            cover_image_url: Set(post.cover_image.as_ref().map(|m| m.url.clone())),
            cover_image_public_id: Set(post.cover_image.as_ref().map(|m| m.public_id.clone())),
            read_time: Set(i32::try_from(post.read_time).unwrap_or(i32::MAX)),
            likes: Set(i64::try_from(post.likes).unwrap_or(i64::MAX)),
            views: Set(i64::try_from(post.views).unwrap_or(i64::MAX)),
            comment_count: Set(i64::try_from(post.comment_count).unwrap_or(i64::MAX)),
            created_at: Set(post.created_at.into()),
            updated_at: Set(post.updated_at.into()),
        }
    }
}
