//! Blog post handlers: the listing endpoint plus CRUD, likes, views and
//! bookmarks.

use actix_web::{HttpRequest, HttpResponse, web};

use waypost_core::domain::{BlogPost, NewPost, PostUpdate};
use waypost_core::query::{ListQuery, RawListQuery};
use waypost_shared::dto::{
    BlogListResponse, BookmarkRequest, BookmarkResponse, MessageResponse, PaginationMeta,
};

use super::{parse_id, query_pairs};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/blogs
///
/// Malformed or repeated parameters are normalized, never rejected.
pub async fn list_blogs(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> AppResult<HttpResponse> {
    let raw = RawListQuery::from_pairs(query_pairs(&req));
    let query = ListQuery::from_raw(raw, state.list_max_limit);
    let result = state.engine.list(&query).await?;

    Ok(HttpResponse::Ok().json(BlogListResponse {
        blogs: result.items,
        pagination: PaginationMeta {
            total: result.pagination.total,
            page: result.pagination.page,
            pages: result.pagination.pages,
        },
    }))
}

/// POST /api/blogs
pub async fn create_blog(
    state: web::Data<AppState>,
    body: web::Json<NewPost>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let errors = validate_new(&req);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let post = state.posts.save(BlogPost::new(req)).await?;
    tracing::info!(post_id = %post.id, category = %post.category, "Blog created");

    Ok(HttpResponse::Created().json(post))
}

/// GET /api/blogs/{id} - also records one view.
pub async fn get_blog(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;
    let post = state.posts.increment_views(id).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// PUT /api/blogs/{id}
///
/// Only authoring fields are written, so likes and views recorded while the
/// edit is in flight survive.
pub async fn update_blog(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<PostUpdate>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;
    let update = body.into_inner();

    let errors = validate_update(&update);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let post = state.posts.update(id, update).await?;

    Ok(HttpResponse::Ok().json(post))
}

/// DELETE /api/blogs/{id}
///
/// Asks the media store to drop the cover image first. A media failure is
/// logged and does not keep the post alive.
pub async fn delete_blog(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;
    let post = find_post(&state, id).await?;

    if let Some(cover) = &post.cover_image {
        if let Err(e) = state.media.delete(cover).await {
            tracing::warn!(post_id = %id, public_id = %cover.public_id, "Media deletion failed: {}", e);
        }
    }

    state.posts.delete(id).await?;
    tracing::info!(post_id = %id, "Blog deleted");

    Ok(HttpResponse::Ok().json(MessageResponse::new("Blog deleted successfully")))
}

/// POST /api/blogs/{id}/like
pub async fn like_blog(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;
    let post = state.posts.increment_likes(id).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// POST /api/blogs/{id}/bookmark - toggles the bookmark of one user.
pub async fn bookmark_blog(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<BookmarkRequest>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;
    let user_id = body.into_inner().user_id;
    if user_id.trim().is_empty() {
        return Err(AppError::Validation(vec!["userId is required".to_string()]));
    }

    find_post(&state, id).await?;
    let bookmarked = state.bookmarks.toggle(id, user_id.trim()).await?;
    tracing::debug!(post_id = %id, bookmarked, "Bookmark toggled");

    Ok(HttpResponse::Ok().json(BookmarkResponse { bookmarked }))
}

pub(super) async fn find_post(state: &AppState, id: uuid::Uuid) -> AppResult<BlogPost> {
    state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Blog with id {} not found", id)))
}

fn validate_new(req: &NewPost) -> Vec<String> {
    let mut errors = Vec::new();
    for (field, value) in [
        ("title", &req.title),
        ("summary", &req.summary),
        ("content", &req.content),
        ("author", &req.author),
        ("category", &req.category),
    ] {
        if value.trim().is_empty() {
            errors.push(format!("{} is required", field));
        }
    }
    if req.read_time == Some(0) {
        errors.push("readTime must be at least 1".to_string());
    }
    errors
}

fn validate_update(update: &PostUpdate) -> Vec<String> {
    let mut errors = Vec::new();
    for (field, value) in [
        ("title", &update.title),
        ("summary", &update.summary),
        ("content", &update.content),
        ("author", &update.author),
        ("category", &update.category),
    ] {
        if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
            errors.push(format!("{} must not be blank", field));
        }
    }
    if update.read_time == Some(0) {
        errors.push("readTime must be at least 1".to_string());
    }
    errors
}
