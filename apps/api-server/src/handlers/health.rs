//! Health check endpoint.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: String,
    pub store: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<&'static str>,
}

/// Health check endpoint - reports the active store and, when a database
/// is attached, whether it answers.
///
/// GET /api/health
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let database = match &state.db {
        Some(db) => Some(ping(db).await),
        None => None,
    };

    let status = match database {
        Some("down") => "degraded",
        _ => "ok",
    };

    let response = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().to_rfc3339(),
        store: state.backend.as_str(),
        database,
    };

    HttpResponse::Ok().json(response)
}

#[cfg(feature = "postgres")]
async fn ping(db: &waypost_infra::database::DatabaseConnections) -> &'static str {
    match db.ping().await {
        Ok(()) => "up",
        Err(e) => {
            tracing::warn!("Database ping failed: {}", e);
            "down"
        }
    }
}

#[cfg(not(feature = "postgres"))]
async fn ping(_db: &waypost_infra::database::DatabaseConnections) -> &'static str {
    "up"
}
