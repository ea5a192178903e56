//! PostgreSQL store implementations.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::{Expr, Func, LikeExpr, OnConflict, Query, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DbConn, DbErr, EntityTrait, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set, TransactionTrait,
};
use uuid::Uuid;

use waypost_core::domain::{BlogPost, Comment, PostUpdate};
use waypost_core::error::RepoError;
use waypost_core::ports::{BaseRepository, BookmarkStore, CommentStore, PostStore};
use waypost_core::query::{PostFilter, SortBy, Window};

use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::post_bookmark::{self, Entity as PostBookmarkEntity};
use super::entity::post_tag::{self, Entity as PostTagEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL comment store.
pub type PostgresCommentStore = PostgresBaseRepository<CommentEntity>;

/// PostgreSQL post store. Tags are kept in `post_tags` and loaded in one
/// extra query per page.
pub struct PostgresPostStore {
    pub(crate) db: Arc<DbConn>,
}

impl PostgresPostStore {
    pub fn new(db: Arc<DbConn>) -> Self {
        Self { db }
    }

    /// Load tags for the given posts, keyed by post id, in authoring order.
    async fn tags_for(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, Vec<String>>, RepoError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = PostTagEntity::find()
            .filter(post_tag::Column::PostId.is_in(ids.iter().copied()))
            .order_by_asc(post_tag::Column::PostId)
            .order_by_asc(post_tag::Column::Position)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        let mut tags: HashMap<Uuid, Vec<String>> = HashMap::new();
        for row in rows {
            tags.entry(row.post_id).or_default().push(row.tag);
        }
        Ok(tags)
    }

    async fn with_tags(&self, models: Vec<post::Model>) -> Result<Vec<BlogPost>, RepoError> {
        let ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();
        let mut tags = self.tags_for(&ids).await?;

        Ok(models
            .into_iter()
            .map(|m| {
                let post_tags = tags.remove(&m.id).unwrap_or_default();
                m.into_domain(post_tags)
            })
            .collect())
    }

    async fn bump(&self, id: Uuid, column: post::Column) -> Result<BlogPost, RepoError> {
        // Increment in SQL so concurrent requests cannot overwrite each other
        let result = PostEntity::update_many()
            .col_expr(column, Expr::col(column).add(1))
            .filter(post::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        self.find_by_id(id).await?.ok_or(RepoError::NotFound)
    }
}

/// `LOWER(column)` as an expression.
fn lower<C>(column: C) -> Expr
where
    C: ColumnTrait,
{
    Expr::expr(Func::lower(Expr::col(column)))
}

/// Escape LIKE wildcards so the needle matches literally.
fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// UPDATE the authoring columns of an existing row. Counters and
/// `created_at` stay as stored. `None` when no row has this id.
async fn update_row<C>(conn: &C, post: &BlogPost) -> Result<Option<post::Model>, RepoError>
where
    C: ConnectionTrait,
{
    let mut active_model = post::ActiveModel::from(post);
    active_model.likes = NotSet;
    active_model.views = NotSet;
    active_model.comment_count = NotSet;
    active_model.created_at = NotSet;

    match active_model.update(conn).await {
        Ok(model) => Ok(Some(model)),
        Err(DbErr::RecordNotUpdated) => Ok(None),
        Err(e) => Err(map_db_err(e)),
    }
}

/// Tags are replaced wholesale.
async fn replace_tags<C>(conn: &C, post: &BlogPost) -> Result<(), RepoError>
where
    C: ConnectionTrait,
{
    PostTagEntity::delete_many()
        .filter(post_tag::Column::PostId.eq(post.id))
        .exec(conn)
        .await
        .map_err(map_db_err)?;

    if !post.tags.is_empty() {
        let rows = post
            .tags
            .iter()
            .enumerate()
            .map(|(position, tag)| post_tag::ActiveModel {
                post_id: Set(post.id),
                position: Set(position as i32),
                tag: Set(tag.clone()),
            });
        PostTagEntity::insert_many(rows)
            .exec_without_returning(conn)
            .await
            .map_err(map_db_err)?;
    }

    Ok(())
}

/// Translate a [`PostFilter`] into a SQL condition.
pub(crate) fn filter_condition(filter: &PostFilter) -> Condition {
    let mut condition = Condition::all();

    if let Some(needle) = &filter.search {
        let pattern = format!("%{}%", escape_like(needle));
        let mut any = Condition::any();
        for column in [
            post::Column::Title,
            post::Column::Summary,
            post::Column::Content,
            post::Column::Author,
        ] {
            any = any.add(lower(column).like(LikeExpr::new(pattern.clone()).escape('\\')));
        }
        condition = condition.add(any);
    }

    if let Some(categories) = &filter.categories {
        condition = condition.add(lower(post::Column::Category).is_in(categories.clone()));
    }

    if let Some(tags) = &filter.tags {
        let tagged = Query::select()
            .column(post_tag::Column::PostId)
            .from(PostTagEntity)
            .and_where(lower(post_tag::Column::Tag).is_in(tags.clone()))
            .to_owned();
        condition = condition.add(post::Column::Id.in_subquery(tagged));
    }

    if let Some(destination) = &filter.destination {
        condition = condition.add(lower(post::Column::Destination).eq(destination.clone()));
    }

    condition
}

/// Apply the ordering for `sort`, always finishing with `id ASC`.
pub(crate) fn apply_sort(select: Select<PostEntity>, sort: SortBy) -> Select<PostEntity> {
    let lower_title: SimpleExpr = Func::lower(Expr::col(post::Column::Title)).into();

    let select = match sort {
        SortBy::Latest => select.order_by_desc(post::Column::CreatedAt),
        SortBy::Oldest => select.order_by_asc(post::Column::CreatedAt),
        SortBy::Popular => select.order_by_desc(post::Column::Views),
        SortBy::MostLiked => select.order_by_desc(post::Column::Likes),
        SortBy::TitleAsc => select.order_by(lower_title, Order::Asc),
        SortBy::TitleDesc => select.order_by(lower_title, Order::Desc),
    };

    select.order_by_asc(post::Column::Id)
}

#[async_trait]
impl BaseRepository<BlogPost, Uuid> for PostgresPostStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<BlogPost>, RepoError> {
        let model = PostEntity::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        match model {
            Some(model) => {
                let mut posts = self.with_tags(vec![model]).await?;
                Ok(posts.pop())
            }
            None => Ok(None),
        }
    }

    async fn save(&self, entity: BlogPost) -> Result<BlogPost, RepoError> {
        tracing::debug!(post_id = %entity.id, "Saving post");

        let txn = self.db.begin().await.map_err(map_db_err)?;
        let model = match update_row(&txn, &entity).await? {
            Some(model) => model,
            None => post::ActiveModel::from(&entity)
                .insert(&txn)
                .await
                .map_err(map_db_err)?,
        };
        replace_tags(&txn, &entity).await?;
        txn.commit().await.map_err(map_db_err)?;

        Ok(model.into_domain(entity.tags))
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        // post_tags and comments go with it via ON DELETE CASCADE
        let result = PostEntity::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}

#[async_trait]
impl PostStore for PostgresPostStore {
    async fn find_matching(
        &self,
        filter: &PostFilter,
        sort: SortBy,
        window: Window,
    ) -> Result<Vec<BlogPost>, RepoError> {
        let select = PostEntity::find().filter(filter_condition(filter));
        let models = apply_sort(select, sort)
            .offset(window.offset)
            .limit(window.limit)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        self.with_tags(models).await
    }

    async fn count(&self, filter: &PostFilter) -> Result<u64, RepoError> {
        PostEntity::find()
            .filter(filter_condition(filter))
            .count(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    async fn increment_likes(&self, id: Uuid) -> Result<BlogPost, RepoError> {
        self.bump(id, post::Column::Likes).await
    }

    async fn increment_views(&self, id: Uuid) -> Result<BlogPost, RepoError> {
        self.bump(id, post::Column::Views).await
    }

    async fn update(&self, id: Uuid, update: PostUpdate) -> Result<BlogPost, RepoError> {
        let mut post = self.find_by_id(id).await?.ok_or(RepoError::NotFound)?;
        post.apply(update);

        let txn = self.db.begin().await.map_err(map_db_err)?;
        let model = update_row(&txn, &post).await?.ok_or(RepoError::NotFound)?;
        replace_tags(&txn, &post).await?;
        txn.commit().await.map_err(map_db_err)?;

        Ok(model.into_domain(post.tags))
    }

    async fn set_comment_count(&self, id: Uuid, count: u64) -> Result<(), RepoError> {
        let count = i64::try_from(count).unwrap_or(i64::MAX);
        let result = PostEntity::update_many()
            .col_expr(post::Column::CommentCount, Expr::value(count))
            .filter(post::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl CommentStore for PostgresCommentStore {
    async fn add(&self, comment: Comment) -> Result<Comment, RepoError> {
        let model = comment::ActiveModel::from(comment)
            .insert(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn list_for_post(&self, post_id: Uuid, window: Window) -> Result<Vec<Comment>, RepoError> {
        let result = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .order_by_desc(comment::Column::CreatedAt)
            .order_by_asc(comment::Column::Id)
            .offset(window.offset)
            .limit(window.limit)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn count_for_post(&self, post_id: Uuid) -> Result<u64, RepoError> {
        CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .count(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }
}

/// PostgreSQL bookmark store.
pub struct PostgresBookmarkStore {
    pub(crate) db: Arc<DbConn>,
}

impl PostgresBookmarkStore {
    pub fn new(db: Arc<DbConn>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BookmarkStore for PostgresBookmarkStore {
    async fn toggle(&self, post_id: Uuid, user: &str) -> Result<bool, RepoError> {
        let removed = PostBookmarkEntity::delete_many()
            .filter(post_bookmark::Column::PostId.eq(post_id))
            .filter(post_bookmark::Column::UserId.eq(user))
            .exec(self.db.as_ref())
            .await
            .map_err(map_db_err)?;
        if removed.rows_affected > 0 {
            return Ok(false);
        }

        let mark = post_bookmark::ActiveModel {
            post_id: Set(post_id),
            user_id: Set(user.to_string()),
            created_at: Set(Utc::now().into()),
        };
        PostBookmarkEntity::insert(mark)
            .on_conflict(
                OnConflict::columns([post_bookmark::Column::PostId, post_bookmark::Column::UserId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(true)
    }
}
