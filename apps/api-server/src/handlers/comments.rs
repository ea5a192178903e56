//! Comment handlers.

use actix_web::{HttpRequest, HttpResponse, web};
use uuid::Uuid;

use waypost_core::domain::{Comment, CommentUpdate, NewComment};
use waypost_core::error::RepoError;
use waypost_core::query::{ListQuery, RawListQuery};
use waypost_shared::dto::{CommentListResponse, MessageResponse, PaginationMeta};

use super::blogs::find_post;
use super::{parse_id, query_pairs};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/blogs/{id}/comments
pub async fn list_comments(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: HttpRequest,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;
    find_post(&state, id).await?;

    // Same page/limit normalization as the blog listing.
    let raw = RawListQuery::from_pairs(query_pairs(&req));
    let paging = ListQuery::from_raw(
        RawListQuery {
            page: raw.page,
            limit: raw.limit,
            ..Default::default()
        },
        state.list_max_limit,
    );

    let page = state
        .engine
        .comments(state.comments.as_ref(), id, paging.page, paging.limit)
        .await?;

    Ok(HttpResponse::Ok().json(CommentListResponse {
        comments: page.items,
        pagination: PaginationMeta {
            total: page.pagination.total,
            page: page.pagination.page,
            pages: page.pagination.pages,
        },
    }))
}

/// POST /api/blogs/{id}/comments
pub async fn add_comment(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<NewComment>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;
    let req = body.into_inner();

    let mut errors = Vec::new();
    if req.user.trim().is_empty() {
        errors.push("user is required".to_string());
    }
    if req.content.trim().is_empty() {
        errors.push("content is required".to_string());
    }
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    find_post(&state, id).await?;
    let comment = state.comments.add(Comment::new(id, req)).await?;
    sync_comment_count(&state, id).await?;
    tracing::debug!(post_id = %id, comment_id = %comment.id, "Comment added");

    Ok(HttpResponse::Created().json(comment))
}

/// PUT /api/comments/{id}
pub async fn update_comment(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<CommentUpdate>,
) -> AppResult<HttpResponse> {
    let id = parse_comment_id(&path)?;
    let update = body.into_inner();
    if update.content.trim().is_empty() {
        return Err(AppError::Validation(vec!["content is required".to_string()]));
    }

    let mut comment = find_comment(&state, id).await?;
    comment.apply(update);
    let comment = state.comments.save(comment).await?;

    Ok(HttpResponse::Ok().json(comment))
}

/// DELETE /api/comments/{id}
pub async fn delete_comment(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_comment_id(&path)?;
    let comment = find_comment(&state, id).await?;

    state.comments.delete(id).await?;
    sync_comment_count(&state, comment.post_id).await?;
    tracing::debug!(post_id = %comment.post_id, comment_id = %id, "Comment deleted");

    Ok(HttpResponse::Ok().json(MessageResponse::new("Comment deleted successfully")))
}

fn parse_comment_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::BadRequest(format!("Invalid comment id: {}", raw)))
}

async fn find_comment(state: &AppState, id: Uuid) -> AppResult<Comment> {
    state
        .comments
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Comment with id {} not found", id)))
}

/// Recount the post's comments and store the total on the post. A post that
/// is already gone has nothing to update.
async fn sync_comment_count(state: &AppState, post_id: Uuid) -> AppResult<()> {
    let count = state.comments.count_for_post(post_id).await?;
    match state.posts.set_comment_count(post_id, count).await {
        Ok(()) | Err(RepoError::NotFound) => Ok(()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{App, http::StatusCode, test};
    use serde_json::{Value, json};
    use uuid::Uuid;

    use waypost_core::domain::{BlogPost, NewPost};

    use super::*;
    use crate::handlers::configure_routes;
    use crate::handlers::test_support::memory_state;

    fn sample_post() -> BlogPost {
        BlogPost::new(NewPost {
            title: "Kyoto".to_string(),
            summary: "Temples".to_string(),
            content: "Body".to_string(),
            author: "Ada".to_string(),
            category: "travel".to_string(),
            ..Default::default()
        })
    }

    #[actix_web::test]
    async fn test_comments_are_paged_newest_first() {
        let post = sample_post();
        let id = post.id;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(memory_state(vec![post])))
                .configure(configure_routes),
        )
        .await;

        for n in 1..=3 {
            let req = test::TestRequest::post()
                .uri(&format!("/api/blogs/{}/comments", id))
                .set_json(json!({"user": "Bo", "content": format!("comment {}", n)}))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::CREATED);
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        }

        let req = test::TestRequest::get()
            .uri(&format!("/api/blogs/{}/comments?limit=2", id))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        let contents: Vec<&str> = body["comments"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["content"].as_str().unwrap())
            .collect();
        assert_eq!(contents, vec!["comment 3", "comment 2"]);
        assert_eq!(body["pagination"], json!({"total": 3, "page": 1, "pages": 2}));
    }

    #[actix_web::test]
    async fn test_comment_validation_and_missing_post() {
        let post = sample_post();
        let id = post.id;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(memory_state(vec![post])))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri(&format!("/api/blogs/{}/comments", id))
            .set_json(json!({"user": "", "content": "hi"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let req = test::TestRequest::post()
            .uri(&format!("/api/blogs/{}/comments", Uuid::new_v4()))
            .set_json(json!({"user": "Bo", "content": "hi"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::get()
            .uri(&format!("/api/blogs/{}/comments", Uuid::new_v4()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_comment_count_follows_adds_and_deletes() {
        let post = sample_post();
        let id = post.id;
        let state = memory_state(vec![post]);
        let posts = state.posts.clone();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure_routes),
        )
        .await;

        let mut comment_ids = Vec::new();
        for n in 1..=2 {
            let req = test::TestRequest::post()
                .uri(&format!("/api/blogs/{}/comments", id))
                .set_json(json!({"user": "Bo", "content": format!("comment {}", n)}))
                .to_request();
            let body: Value = test::call_and_read_body_json(&app, req).await;
            comment_ids.push(body["id"].as_str().unwrap().to_string());
        }
        let stored = posts.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.comment_count, 2);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/comments/{}", comment_ids[0]))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["message"], "Comment deleted successfully");

        let req = test::TestRequest::get()
            .uri(&format!("/api/blogs/{}", id))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["commentCount"], 1);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/comments/{}", comment_ids[0]))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_edit_comment() {
        let post = sample_post();
        let id = post.id;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(memory_state(vec![post])))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri(&format!("/api/blogs/{}/comments", id))
            .set_json(json!({"user": "Bo", "content": "first"}))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let comment_id = created["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::put()
            .uri(&format!("/api/comments/{}", comment_id))
            .set_json(json!({"content": "  second thoughts "}))
            .to_request();
        let edited: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(edited["content"], "second thoughts");
        assert_eq!(edited["user"], "Bo");
        assert_eq!(edited["createdAt"], created["createdAt"]);

        let req = test::TestRequest::put()
            .uri(&format!("/api/comments/{}", comment_id))
            .set_json(json!({"content": " "}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let req = test::TestRequest::put()
            .uri(&format!("/api/comments/{}", Uuid::new_v4()))
            .set_json(json!({"content": "hello"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::delete()
            .uri("/api/comments/not-a-uuid")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_comment_paging_tolerates_repeated_params() {
        let post = sample_post();
        let id = post.id;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(memory_state(vec![post])))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/blogs/{}/comments?limit=5&limit=1&page=x", id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["pagination"], json!({"total": 0, "page": 1, "pages": 1}));
    }
}
