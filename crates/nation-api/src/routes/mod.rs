//! API route handlers

pub mod health;
pub mod venation;

use axum::{routing::get, Router};

use crate::AppState;

/// Create the API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/venation", venation::router())
        .with_state(state)
}
