pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::advisor::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Long-term-care consultation
        .route("/api/v1/advise", post(handlers::handle_advise))
        .route(
            "/api/v1/chronic-conditions",
            get(handlers::handle_chronic_conditions),
        )
        .route("/api/v1/subsidy", get(handlers::handle_subsidy))
        // Hospice Q&A
        .route("/api/v1/hospice/ask", post(handlers::handle_hospice_ask))
        .route(
            "/api/v1/hospice/sessions/:id",
            get(handlers::handle_session_history),
        )
        // Email hand-off
        .route("/api/v1/email", post(handlers::handle_send_email))
        .with_state(state)
}
