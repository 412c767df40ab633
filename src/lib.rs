pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod services;
pub mod state;

use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn app(state: Arc<AppState>) -> Router {
    let cors = match state.config.allowed_origin.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE]),
        Err(_) => {
            tracing::warn!("invalid ALLOWED_ORIGIN, cross-origin requests will be refused");
            CorsLayer::new()
        }
    };

    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/flights", get(handlers::flights::list_flights))
        .route("/api/flights", post(handlers::flights::create_flight))
        .route(
            "/api/flights/:flight_no",
            put(handlers::flights::update_flight),
        )
        .route(
            "/api/flights/:flight_no",
            delete(handlers::flights::delete_flight),
        )
        .route("/api/bookings", get(handlers::bookings::list_bookings))
        .route("/api/bookings", post(handlers::bookings::create_booking))
        .route(
            "/api/bookings/:id",
            put(handlers::bookings::update_booking_status),
        )
        .route(
            "/api/bookings/:id",
            delete(handlers::bookings::delete_booking),
        )
        .route("/api/stats", get(handlers::stats::get_stats))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
