pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::pipeline::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Screening pipeline
        .route("/api/v1/evaluate", post(handlers::handle_evaluate))
        .route("/api/v1/screen_resume", post(handlers::handle_screen_resume))
        // Session reads
        .route("/api/v1/sessions", get(handlers::handle_list_sessions))
        .route("/api/v1/sessions/:id", get(handlers::handle_get_session))
        .route(
            "/api/v1/sessions/:id/rounds",
            get(handlers::handle_get_rounds),
        )
        .with_state(state)
}
