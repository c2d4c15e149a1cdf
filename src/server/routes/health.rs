//! Health check endpoint

use std::borrow::Cow;

use actix_web::{web, HttpResponse, Result as ActixResult};
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::server::state::AppState;

/// Configure health check routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}

/// Health check response body
#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: Cow<'static, str>,
    pub timestamp: DateTime<Utc>,
    /// Number of events currently held in the store
    pub events_count: usize,
}

/// Basic health check endpoint
///
/// Used by load balancers and monitoring systems; also reports how many
/// events the in-memory store currently holds.
pub async fn health_check(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    debug!("Health check requested");

    let health_status = HealthStatus {
        status: Cow::Borrowed("healthy"),
        timestamp: Utc::now(),
        events_count: state.store.len().await,
    };

    Ok(HttpResponse::Ok().json(health_status))
}
