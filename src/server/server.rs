//! HTTP server core implementation
//!
//! This module provides the HttpServer struct and its core methods.

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer as ActixHttpServer};
use tracing::info;

use crate::config::{Config, ServerConfig};
use crate::server::middleware::WebhookAuth;
use crate::server::routes;
use crate::server::state::AppState;
use crate::server::ws;
use crate::utils::error::{RelayError, Result};

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server
    pub fn new(config: &Config) -> Self {
        info!("Creating HTTP server");

        let state = AppState::new(config.clone());

        Self {
            config: config.server().clone(),
            state,
        }
    }

    /// Create the Actix-web application
    fn create_app(
        state: web::Data<AppState>,
        max_body_size: usize,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        // Deliveries come from the provider and reads from browsers, so the
        // whole surface is open cross-origin.
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();

        App::new()
            .app_data(state)
            .app_data(web::PayloadConfig::new(max_body_size))
            .wrap(cors)
            .wrap(Logger::default())
            .configure(routes::health::configure_routes)
            .configure(routes::events::configure_routes)
            .service(
                web::scope("/api/chainhook")
                    .wrap(WebhookAuth)
                    .configure(routes::webhook::configure_routes),
            )
            .configure(ws::configure_routes)
    }

    /// Start the HTTP server
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.address();
        let max_body_size = self.config.max_body_size;

        info!("Starting HTTP server on {}", bind_addr);

        let state = web::Data::new(self.state);

        let server = ActixHttpServer::new(move || Self::create_app(state.clone(), max_body_size))
            .bind(&bind_addr)
            .map_err(|e| RelayError::server(format!("Failed to bind {}: {}", bind_addr, e)))?
            .run();

        info!("HTTP server listening on {}", bind_addr);

        server
            .await
            .map_err(|e| RelayError::server(format!("Server error: {}", e)))?;

        info!("HTTP server stopped");
        Ok(())
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}
