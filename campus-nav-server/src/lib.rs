//! HTTP front end for the campus walking route engine

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod store;

use std::time::Duration;

use axum::Router;
use axum::error_handling::HandleErrorLayer;
use axum::routing::{delete, get, post};
use tower::limit::GlobalConcurrencyLimitLayer;
use tower::timeout::TimeoutLayer;
use tower::{BoxError, ServiceBuilder};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::error::AppError;
pub use crate::state::AppState;

pub fn app(state: AppState, config: &ServerConfig) -> Router {
    // one semaphore shared by every route
    let limits = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(handle_middleware_error))
        .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout_secs)))
        .layer(GlobalConcurrencyLimitLayer::new(config.max_concurrent_requests));

    Router::new()
        .route("/health", get(routes::health))
        .route(
            "/locations",
            get(routes::list_locations).post(routes::create_location),
        )
        .route("/locations/{id}", delete(routes::delete_location))
        .route("/route", post(routes::route))
        .route("/route/geojson", post(routes::route_geojson))
        .layer(limits)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn handle_middleware_error(err: BoxError) -> AppError {
    if err.is::<tower::timeout::error::Elapsed>() {
        AppError::Timeout
    } else {
        AppError::Internal(err.to_string())
    }
}
