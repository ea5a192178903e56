//! HTTP handlers and route configuration.

mod blogs;
mod comments;
mod health;

use actix_web::{HttpRequest, web};
use uuid::Uuid;

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/blogs")
                    .route("", web::get().to(blogs::list_blogs))
                    .route("", web::post().to(blogs::create_blog))
                    .route("/{id}", web::get().to(blogs::get_blog))
                    .route("/{id}", web::put().to(blogs::update_blog))
                    .route("/{id}", web::delete().to(blogs::delete_blog))
                    .route("/{id}/like", web::post().to(blogs::like_blog))
                    .route("/{id}/bookmark", web::post().to(blogs::bookmark_blog))
                    .route("/{id}/comments", web::get().to(comments::list_comments))
                    .route("/{id}/comments", web::post().to(comments::add_comment)),
            )
            .service(
                web::scope("/comments")
                    .route("/{id}", web::put().to(comments::update_comment))
                    .route("/{id}", web::delete().to(comments::delete_comment)),
            ),
    );
}

/// Parse a post id from the path.
fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::BadRequest(format!("Invalid blog id: {}", raw)))
}

/// Query string as ordered key/value pairs. Repeated keys are kept and
/// anything unparseable yields no pairs rather than a 400.
fn query_pairs(req: &HttpRequest) -> Vec<(String, String)> {
    serde_urlencoded::from_str(req.query_string()).unwrap_or_default()
}
