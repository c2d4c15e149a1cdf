//! Integration tests for webhook ingestion and the event query API
//!
//! These wire the real handlers into an actix test app and drive them with
//! chainhook-shaped payloads end to end, auth middleware included.

use actix_web::{test, web, App};
use serde_json::{json, Value};

use stackslotto_relay::config::Config;
use stackslotto_relay::server::middleware::WebhookAuth;
use stackslotto_relay::server::{routes, AppState};

fn test_app_state(secret: &str) -> web::Data<AppState> {
    let mut config = Config::default();
    config.webhook.secret = secret.to_string();
    web::Data::new(AppState::new(config))
}

macro_rules! build_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data($state.clone())
                .configure(routes::health::configure_routes)
                .configure(routes::events::configure_routes)
                .service(
                    web::scope("/api/chainhook")
                        .wrap(WebhookAuth)
                        .configure(routes::webhook::configure_routes),
                ),
        )
        .await
    };
}

fn buy_ticket_delivery() -> Value {
    json!({
        "apply": [{
            "block_identifier": { "index": 4321, "hash": "0xblock" },
            "transactions": [{
                "transaction_identifier": { "hash": "0xabc123" },
                "metadata": {
                    "kind": { "data": { "function_name": "buy-ticket" } },
                    "receipt": {
                        "events": [{
                            "type": "SmartContractEvent",
                            "data": { "value": {
                                "player": "SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7",
                                "round": 12
                            } }
                        }]
                    }
                }
            }]
        }],
        "rollback": [],
        "chainhook": { "uuid": "hook-uuid-1" }
    })
}

#[actix_web::test]
async fn consolidated_delivery_is_queryable_and_counted() {
    let state = test_app_state("");
    let app = build_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/chainhook/events")
        .set_json(buy_ticket_delivery())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let ack: Value = test::read_body_json(resp).await;
    assert_eq!(ack["success"], true);

    let req = test::TestRequest::get().uri("/api/events").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let events = body["events"].as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["type"], "ticket-purchase");
    assert_eq!(events[0]["player"], "SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7");
    assert_eq!(events[0]["round"], 12);
    assert_eq!(events[0]["transactionId"], "0xabc123");
    assert_eq!(events[0]["blockHeight"], 4321);
    // Absent fields are omitted, not serialized as null
    assert!(events[0].get("winner").is_none());

    let req = test::TestRequest::get().uri("/health").to_request();
    let health: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["eventsCount"], 1);
}

#[actix_web::test]
async fn tagged_delivery_uses_path_category_for_unknown_functions() {
    let state = test_app_state("");
    let app = build_app!(state);

    // A function outside the category table still produces an event on the
    // per-endpoint path
    let delivery = json!({
        "apply": [{
            "transactions": [{
                "transaction_identifier": { "hash": "0xdef" },
                "metadata": { "kind": { "data": { "function_name": "transfer" } } }
            }]
        }]
    });

    let req = test::TestRequest::post()
        .uri("/api/chainhook/events/winner-drawn")
        .set_json(delivery)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let req = test::TestRequest::get().uri("/api/events").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let events = body["events"].as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["type"], "winner-drawn");
}

#[actix_web::test]
async fn consolidated_delivery_drops_unmapped_functions() {
    let state = test_app_state("");
    let app = build_app!(state);

    let delivery = json!({
        "apply": [{
            "transactions": [{
                "transaction_identifier": { "hash": "0xdef" },
                "metadata": { "kind": { "data": { "function_name": "transfer" } } }
            }]
        }]
    });

    let req = test::TestRequest::post()
        .uri("/api/chainhook/events")
        .set_json(delivery)
        .to_request();
    let resp = test::call_service(&app, req).await;
    // Accepted, but nothing extracted
    assert!(resp.status().is_success());

    let req = test::TestRequest::get().uri("/api/events").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let events = body["events"].as_array().unwrap();
    assert!(events.is_empty());
}

#[actix_web::test]
async fn string_print_value_is_accepted_and_stored() {
    let state = test_app_state("");
    let app = build_app!(state);

    // Decoded Clarity prints can be bare strings; the delivery must still
    // succeed and the transaction must still produce its event
    let delivery = json!({
        "apply": [{
            "transactions": [{
                "transaction_identifier": { "hash": "0xstr" },
                "metadata": {
                    "kind": { "data": { "function_name": "buy-ticket" } },
                    "receipt": {
                        "events": [{
                            "type": "SmartContractEvent",
                            "data": { "value": "round started" }
                        }]
                    }
                }
            }]
        }]
    });

    let req = test::TestRequest::post()
        .uri("/api/chainhook/events")
        .set_json(delivery)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let req = test::TestRequest::get().uri("/api/events").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let events = body["events"].as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["type"], "ticket-purchase");
    assert_eq!(events[0]["transactionId"], "0xstr");
    assert!(events[0].get("player").is_none());
}

#[actix_web::test]
async fn malformed_payload_is_a_server_error() {
    let state = test_app_state("");
    let app = build_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/chainhook/events")
        .insert_header(("content-type", "application/json"))
        .set_payload("{ not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 500);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "PAYLOAD_ERROR");
}

#[actix_web::test]
async fn webhook_rejects_missing_credentials_when_secret_set() {
    let state = test_app_state("hunter2");
    let app = build_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/chainhook/events")
        .set_json(buy_ticket_delivery())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 401);
}

#[actix_web::test]
async fn webhook_accepts_bearer_header() {
    let state = test_app_state("hunter2");
    let app = build_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/chainhook/events")
        .insert_header(("authorization", "Bearer hunter2"))
        .set_json(buy_ticket_delivery())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
}

#[actix_web::test]
async fn webhook_accepts_query_token() {
    let state = test_app_state("hunter2");
    let app = build_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/chainhook/events/ticket-purchase?token=hunter2")
        .set_json(buy_ticket_delivery())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
}

#[actix_web::test]
async fn read_endpoints_require_no_credentials() {
    // Secret only guards the webhook scope
    let state = test_app_state("hunter2");
    let app = build_app!(state);

    let req = test::TestRequest::get().uri("/api/events").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
}

#[actix_web::test]
async fn event_listing_clamps_limit_to_hard_cap() {
    let state = test_app_state("");
    let app = build_app!(state);

    // 120 single-transaction deliveries
    for n in 0..120 {
        let delivery = json!({
            "apply": [{
                "transactions": [{
                    "transaction_identifier": { "hash": format!("0x{:03}", n) },
                    "metadata": { "kind": { "data": { "function_name": "buy-ticket" } } }
                }]
            }]
        });
        let req = test::TestRequest::post()
            .uri("/api/chainhook/events")
            .set_json(delivery)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
    }

    let req = test::TestRequest::get()
        .uri("/api/events?limit=1000")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let events = body["events"].as_array().unwrap();
    assert_eq!(events.len(), 100);
    // Newest first
    assert_eq!(events[0]["transactionId"], "0x119");

    let req = test::TestRequest::get().uri("/api/events").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let events = body["events"].as_array().unwrap();
    assert_eq!(events.len(), 50);
}

#[actix_web::test]
async fn rollback_only_delivery_produces_no_events() {
    let state = test_app_state("");
    let app = build_app!(state);

    let delivery = json!({
        "apply": [],
        "rollback": [{
            "transactions": [{
                "transaction_identifier": { "hash": "0xgone" },
                "metadata": { "kind": { "data": { "function_name": "buy-ticket" } } }
            }]
        }]
    });

    let req = test::TestRequest::post()
        .uri("/api/chainhook/events")
        .set_json(delivery)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let req = test::TestRequest::get().uri("/api/events").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let events = body["events"].as_array().unwrap();
    assert!(events.is_empty());
}
