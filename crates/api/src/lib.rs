//! # ClassDesk API
//!
//! A development stand-in for the REST API the ClassDesk client talks to. It serves the seven
//! collections (`users`, `classes`, `announcements`, `requests`, `attendance`, `performance`,
//! `assignments`) from memory with generic list/get/create/patch/delete endpoints and
//! equality filters on the query string.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Turn requests into store operations
//! - **Store**: In-memory collections, optionally seeded from a JSON file
//! - **Middleware**: Error mapping
//! - **Config**: Environment configuration

/// Configuration module for API settings
pub mod config;
/// Request handlers for the collection endpoints
pub mod handlers;
/// Middleware for error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;
/// In-memory collection storage
pub mod store;

use std::sync::Arc;
use std::time::Duration;

use axum::{http::HeaderValue, Router};
use eyre::Result;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

use crate::store::CollectionStore;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// The collections served by this instance
    pub store: CollectionStore,
}

impl ApiState {
    pub fn new(store: CollectionStore) -> Arc<Self> {
        Arc::new(Self { store })
    }
}

/// Builds the router with every endpoint attached to `state`.
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Collection endpoints
        .merge(routes::collections::routes())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect::<Vec<HeaderValue>>();

    CorsLayer::new()
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PATCH,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
            axum::http::header::ACCEPT,
        ])
        .allow_origin(allowed)
        .allow_credentials(true)
}

/// Starts the API server with the provided configuration
///
/// Sets up logging, loads seed data when configured, and serves until the listener fails.
pub async fn start_server(config: config::ApiConfig) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let store = match &config.seed_file {
        Some(path) => {
            info!("Loading seed data from {}", path.display());
            CollectionStore::load_seed_file(path).await?
        }
        None => CollectionStore::new(),
    };

    let app = build_router(ApiState::new(store));

    // Apply CORS configuration if origins are specified
    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)),
        None => app,
    };

    let app = app.layer(
        tower::ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
