//! Event query endpoint

use actix_web::{web, HttpResponse, Result as ActixResult};
use serde::{Deserialize, Serialize};

use crate::core::events::{LottoEvent, RECENT_HARD_CAP};
use crate::server::state::AppState;

/// Configure event query routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/events", web::get().to(recent_events));
}

/// Query parameters for the event listing
#[derive(Debug, Deserialize)]
pub struct EventsQuery {
    /// How many events to return, newest first
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    50
}

/// Event listing response body
#[derive(Debug, Serialize)]
pub struct EventsResponse {
    pub events: Vec<LottoEvent>,
}

/// Return the most recent events, newest first.
///
/// The limit is clamped to [`RECENT_HARD_CAP`] no matter what the caller
/// asks for.
pub async fn recent_events(
    state: web::Data<AppState>,
    query: web::Query<EventsQuery>,
) -> ActixResult<HttpResponse> {
    let limit = query.limit.min(RECENT_HARD_CAP);
    let events = state.store.recent(limit).await;
    Ok(HttpResponse::Ok().json(EventsResponse { events }))
}
