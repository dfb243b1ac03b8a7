pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::feedback::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/feedback/enhance", post(handlers::handle_enhance))
        .route(
            "/api/v1/feedback/structured",
            post(handlers::handle_structured),
        )
        .with_state(state)
}
