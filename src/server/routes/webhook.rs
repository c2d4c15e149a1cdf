//! Chainhook webhook ingestion endpoints
//!
//! Two ingestion shapes are served under `/api/chainhook`:
//!
//! - `POST /events/{event_type}`: per-endpoint deliveries where the path
//!   segment names the event category and every transaction is tagged with
//!   it.
//! - `POST /events`: consolidated deliveries where the invoked contract
//!   function determines the category and unmapped functions are dropped.
//!
//! Payloads are parsed manually from raw bytes so a malformed body surfaces
//! as a processing failure rather than actix's default bad-request reply.

use actix_web::{web, HttpResponse};
use tracing::{debug, info, warn};

use crate::core::events::{extract_events, CategorySource, ChainhookPayload, EventKind};
use crate::server::routes::AckResponse;
use crate::server::state::AppState;
use crate::utils::error::{RelayError, Result};

/// Configure webhook ingestion routes (callers wrap these in auth)
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/events", web::post().to(ingest_consolidated))
        .route("/events/{event_type}", web::post().to(ingest_tagged));
}

/// Per-endpoint ingestion: the path segment is the event category
pub async fn ingest_tagged(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Bytes,
) -> Result<HttpResponse> {
    let tag = path.into_inner();
    let payload = parse_payload(&body)?;
    let source = CategorySource::PathTag(EventKind::from_path_tag(&tag));

    let accepted = ingest(&state, &payload, &source).await;
    info!(tag = %tag, accepted, "Processed tagged webhook delivery");

    Ok(HttpResponse::Ok().json(AckResponse::ok()))
}

/// Consolidated ingestion: categories come from the invoked function name
pub async fn ingest_consolidated(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse> {
    let payload = parse_payload(&body)?;

    if let Some(uuid) = payload.chainhook.as_ref().and_then(|c| c.uuid.as_deref()) {
        debug!(hook_uuid = %uuid, "Consolidated delivery");
    }

    let accepted = ingest(&state, &payload, &CategorySource::FunctionMap).await;
    info!(accepted, "Processed consolidated webhook delivery");

    Ok(HttpResponse::Ok().json(AckResponse::ok()))
}

fn parse_payload(body: &web::Bytes) -> Result<ChainhookPayload> {
    serde_json::from_slice(body).map_err(|e| {
        warn!("Failed to parse chainhook payload: {}", e);
        RelayError::Payload(e.to_string())
    })
}

async fn ingest(
    state: &AppState,
    payload: &ChainhookPayload,
    source: &CategorySource,
) -> usize {
    let events = extract_events(payload, source, || state.store.next_seq());

    for event in &events {
        state.store.append(event.clone()).await;
        let delivered = state.broadcaster.publish(event).await;
        debug!(event_id = %event.id, kind = %event.kind, delivered, "Event relayed");
    }

    events.len()
}
