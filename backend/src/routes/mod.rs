//! Route definitions for the Moneybags API
//!
//! This module organizes all API routes and applies middleware.

use crate::auth::require_session;
use crate::state::AppState;
use axum::{
    http::{header, Method},
    middleware,
    routing::get,
    Router,
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod auth;
mod bank_accounts;
mod budgets;
mod extract;
mod health;
mod user_accounts;

#[cfg(test)]
mod auth_tests;

pub use auth::auth_routes;
pub use bank_accounts::bank_account_routes;
pub use budgets::budget_routes;
pub use extract::ApiJson;
pub use user_accounts::user_account_routes;

/// Every request body here is a small JSON object
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Create the main application router with all middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/ping", get(health::ping))
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .nest("/api/v1", api_routes(state.clone()))
        // Apply middleware layers
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API v1 routes
fn api_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .nest("/budgets", budget_routes().merge(bank_account_routes()))
        .route_layer(middleware::from_fn_with_state(state, require_session));

    Router::new()
        .route("/", get(|| async { "Moneybags API v1" }))
        .nest("/auth", auth_routes())
        .nest("/user-accounts", user_account_routes())
        .merge(protected)
}
