//! Webhook authentication middleware
//!
//! Inbound chainhook deliveries carry the shared secret either as a bearer
//! token in the `Authorization` header or as a `token` query parameter.
//! When no secret is configured every delivery is accepted.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::web;
use futures_util::future::{ready, Ready};
use tracing::warn;

use crate::server::AppState;
use crate::utils::error::RelayError;

/// Shared-secret auth middleware for the webhook scope
pub struct WebhookAuth;

impl<S, B> Transform<S, ServiceRequest> for WebhookAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = WebhookAuthService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(WebhookAuthService { service }))
    }
}

/// Service implementation for webhook auth
pub struct WebhookAuthService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for WebhookAuthService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let secret = req
            .app_data::<web::Data<AppState>>()
            .map(|state| state.config().webhook().secret.clone())
            .unwrap_or_default();

        if !is_authorized(&req, &secret) {
            warn!(path = %req.path(), "Rejected webhook delivery with invalid credentials");
            return Box::pin(ready(Err(
                RelayError::Unauthorized("Invalid webhook credentials".to_string()).into(),
            )));
        }

        Box::pin(self.service.call(req))
    }
}

fn is_authorized(req: &ServiceRequest, secret: &str) -> bool {
    if secret.is_empty() {
        return true;
    }

    let bearer_matches = req
        .headers()
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .map(|value| value == format!("Bearer {}", secret))
        .unwrap_or(false);

    if bearer_matches {
        return true;
    }

    web::Query::<HashMap<String, String>>::from_query(req.query_string())
        .map(|query| query.get("token").map(String::as_str) == Some(secret))
        .unwrap_or(false)
}
