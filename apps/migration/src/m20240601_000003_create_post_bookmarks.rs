use sea_orm_migration::prelude::*;

use crate::m20240601_000001_create_posts::Posts;

/// One row per (post, user) bookmark.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PostBookmarks::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(PostBookmarks::PostId).uuid().not_null())
                    .col(ColumnDef::new(PostBookmarks::UserId).string().not_null())
                    .col(
                        ColumnDef::new(PostBookmarks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(PostBookmarks::PostId)
                            .col(PostBookmarks::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_post_bookmarks_post")
                            .from(PostBookmarks::Table, PostBookmarks::PostId)
                            .to(Posts::Table, Posts::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PostBookmarks::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum PostBookmarks {
    Table,
    PostId,
    UserId,
    CreatedAt,
}
