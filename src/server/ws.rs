//! WebSocket subscriber endpoint
//!
//! Subscribers connect at `/ws`, immediately receive a `connected` message
//! replaying recent events, then get a `new-event` message for every event
//! the relay ingests. The channel is one-way: client frames other than
//! ping/close are ignored.

use actix_web::{web, HttpRequest, HttpResponse};
use actix_ws::Message;
use futures_util::StreamExt;
use tracing::{debug, info, warn};

use crate::core::events::{EventStore, SocketMessage, REPLAY_LIMIT};
use crate::server::state::AppState;

/// Configure the WebSocket route
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/ws", web::get().to(subscribe));
}

/// Serialized `connected` replay for a new subscriber, up to
/// [`REPLAY_LIMIT`] events newest first
async fn connected_message(store: &EventStore) -> Option<String> {
    let replay = store.recent(REPLAY_LIMIT).await;
    let connected = SocketMessage::Connected { events: replay };
    match serde_json::to_string(&connected) {
        Ok(text) => Some(text),
        Err(e) => {
            warn!("Failed to serialize replay message: {}", e);
            None
        }
    }
}

/// Upgrade to a WebSocket session and register it with the broadcaster
pub async fn subscribe(
    req: HttpRequest,
    stream: web::Payload,
    state: web::Data<AppState>,
) -> actix_web::Result<HttpResponse> {
    let (response, mut session, mut msg_stream) = actix_ws::handle(&req, stream)?;

    if let Some(text) = connected_message(&state.store).await {
        if session.text(text).await.is_err() {
            debug!("Subscriber disconnected before the replay was sent");
            return Ok(response);
        }
    }

    let id = state.broadcaster.subscribe(session.clone()).await;
    info!(connection = %id, subscribers = state.broadcaster.subscriber_count().await, "WebSocket subscriber connected");

    actix_web::rt::spawn(async move {
        while let Some(msg) = msg_stream.next().await {
            match msg {
                Ok(Message::Ping(bytes)) => {
                    if session.pong(&bytes).await.is_err() {
                        break;
                    }
                }
                Ok(Message::Close(reason)) => {
                    debug!(connection = %id, ?reason, "Subscriber closed the connection");
                    break;
                }
                Ok(_) => {
                    // Inbound text/binary frames carry no meaning here
                }
                Err(e) => {
                    debug!(connection = %id, "WebSocket protocol error: {}", e);
                    break;
                }
            }
        }

        state.broadcaster.unsubscribe(id).await;
        info!(connection = %id, "WebSocket subscriber disconnected");
    });

    Ok(response)
}
