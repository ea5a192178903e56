//! Schema migrations for the Waypost post database.

pub use sea_orm_migration::prelude::*;

mod m20240601_000001_create_posts;
mod m20240601_000002_create_comments;
mod m20240601_000003_create_post_bookmarks;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_posts::Migration),
            Box::new(m20240601_000002_create_comments::Migration),
            Box::new(m20240601_000003_create_post_bookmarks::Migration),
        ]
    }
}
