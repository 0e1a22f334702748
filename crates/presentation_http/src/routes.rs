//! Route definitions

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::limit::RequestBodyLimitLayer;

use crate::{handlers, middleware::RequestIdLayer, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.server.max_body_size_bytes;

    Router::new()
        // Health and status endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Route lookup
        .route("/route", post(handlers::route::find_route))
        .route("/v1/route", post(handlers::route::find_route))
        // Accounts
        .route(
            "/login",
            get(handlers::auth::login_page).post(handlers::auth::login),
        )
        .route(
            "/signup",
            get(handlers::auth::signup_page).post(handlers::auth::signup),
        )
        .route("/logout", get(handlers::auth::logout))
        // Pages
        .route("/", get(handlers::pages::dashboard))
        .route("/profile", get(handlers::pages::profile))
        .route("/settings", get(handlers::pages::settings))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(RequestIdLayer)
        .with_state(state)
}
